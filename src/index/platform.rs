//! The indexed entity.

use serde::{Deserialize, Serialize};

/// An advertising platform that passed validation.
///
/// `name` is non-blank and every entry of `locations` starts with `/`.
/// Names are not unique: two platforms with the same name are indexed
/// independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub name: String,
    pub locations: Vec<String>,
}

impl Platform {
    pub fn new(name: impl Into<String>, locations: Vec<String>) -> Self {
        Self {
            name: name.into(),
            locations,
        }
    }
}
