//! Line-oriented feed parser.
//!
//! Each non-blank line has the shape `name:loc1,loc2,...`. Only the first
//! `:` separates the name, so names may not contain one but locations may.

use std::io::{self, BufRead};

use crate::catalog::types::{RawRecord, SkipReason, SkippedRecord};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Classification of a single feed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLine {
    Blank,
    Record(RawRecord),
    Malformed,
}

/// Records and rejected lines from one feed.
#[derive(Debug, Default)]
pub struct ParsedFeed {
    pub records: Vec<RawRecord>,
    pub malformed: Vec<SkippedRecord>,
}

pub fn parse_line(line: &str) -> FeedLine {
    if line.trim().is_empty() {
        return FeedLine::Blank;
    }

    match line.split_once(':') {
        Some((name, locations)) => FeedLine::Record(RawRecord::new(
            name,
            locations
                .split(',')
                .filter(|location| !location.is_empty())
                .map(str::to_owned)
                .collect(),
        )),
        None => FeedLine::Malformed,
    }
}

/// Parse a whole feed. Stops at the first read error.
pub fn parse_feed<R: BufRead>(reader: R) -> io::Result<ParsedFeed> {
    let mut feed = ParsedFeed::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let number = index + 1;
        let text = if index == 0 {
            line.trim_start_matches(BYTE_ORDER_MARK)
        } else {
            line.as_str()
        };

        match parse_line(text) {
            FeedLine::Blank => {}
            FeedLine::Record(mut record) => {
                record.line = Some(number);
                feed.records.push(record);
            }
            FeedLine::Malformed => {
                tracing::warn!(line = number, content = %text, "Malformed feed line");
                feed.malformed.push(SkippedRecord {
                    line: Some(number),
                    name: None,
                    reason: SkipReason::MalformedLine,
                });
            }
        }
    }

    Ok(feed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(""), FeedLine::Blank);
        assert_eq!(parse_line("   \t"), FeedLine::Blank);
        assert_eq!(parse_line("Строка без двоеточия"), FeedLine::Malformed);

        match parse_line("Ревдинский рабочий:/ru/svrd/revda,/ru/svrd/pervik") {
            FeedLine::Record(record) => {
                assert_eq!(record.name, "Ревдинский рабочий");
                assert_eq!(record.locations, vec!["/ru/svrd/revda", "/ru/svrd/pervik"]);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_line_splits_on_first_colon() {
        match parse_line("Name:/a:b,,/c") {
            FeedLine::Record(record) => {
                assert_eq!(record.name, "Name");
                assert_eq!(record.locations, vec!["/a:b", "/c"]);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_feed() {
        let content = "Яндекс.Директ:/ru\r\n\r\nНекорректная строка\nКрутая реклама:/ru/svrd\n";
        let feed = parse_feed(Cursor::new(content)).unwrap();

        assert_eq!(feed.records.len(), 2);
        assert_eq!(feed.records[0].name, "Яндекс.Директ");
        assert_eq!(feed.records[0].locations, vec!["/ru"]);
        assert_eq!(feed.records[0].line, Some(1));
        assert_eq!(feed.records[1].line, Some(4));
        assert_eq!(
            feed.malformed,
            vec![SkippedRecord {
                line: Some(3),
                name: None,
                reason: SkipReason::MalformedLine,
            }]
        );
    }

    #[test]
    fn test_parse_feed_strips_bom() {
        let feed = parse_feed(Cursor::new("\u{feff}Газета:/ru/msk")).unwrap();
        assert_eq!(feed.records[0].name, "Газета");
    }

    #[test]
    fn test_parse_feed_empty() {
        let feed = parse_feed(Cursor::new("")).unwrap();
        assert!(feed.records.is_empty());
        assert!(feed.malformed.is_empty());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_parse_feed_propagates_io_errors() {
        let err = parse_feed(io::BufReader::new(FailingReader)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);

        let err = parse_feed(Cursor::new(vec![b'a', b':', 0xff, b'\n'])).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
