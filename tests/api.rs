//! End-to-end tests over a real socket, driven through the SDK.

use admatch_sdk::{AdMatchClient, ClientError, Record, SkipReason};
use reqwest::StatusCode;

mod common;

use common::{spawn_server, test_config, ADMIN_KEY, FEED};

#[tokio::test]
async fn test_load_then_search() {
    let server = spawn_server(test_config()).await;
    let client = AdMatchClient::new(&server.base_url);

    let summary = client.load_feed(FEED).await.unwrap();
    assert_eq!(summary.loaded, 4);
    assert_eq!(summary.skipped, 0);

    assert_eq!(client.search("/ru").await.unwrap(), vec!["Яндекс.Директ"]);
    assert_eq!(
        client.search("/ru/svrd").await.unwrap(),
        vec!["Крутая реклама", "Яндекс.Директ"]
    );
    assert_eq!(
        client.search("/ru/svrd/revda").await.unwrap(),
        vec!["Крутая реклама", "Ревдинский рабочий", "Яндекс.Директ"]
    );
    assert_eq!(
        client.search("/ru/msk").await.unwrap(),
        vec!["Газета уральских москвичей", "Яндекс.Директ"]
    );
    assert!(client.search("/us").await.unwrap().is_empty());

    server.stop().await;
}

#[tokio::test]
async fn test_search_rejects_relative_location() {
    let server = spawn_server(test_config()).await;
    let client = AdMatchClient::new(&server.base_url);

    match client.search("ru/svrd").await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("ru/svrd"));
        }
        other => panic!("expected 400, got {:?}", other),
    }

    server.stop().await;
}

#[tokio::test]
async fn test_load_reports_skipped_records() {
    let server = spawn_server(test_config()).await;
    let client = AdMatchClient::new(&server.base_url);

    let summary = client
        .load_feed("Good:/ru\nno separator here\n:/ru/msk\nOnlyBlank: , ,\n")
        .await
        .unwrap();
    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.skipped, 3);

    let reasons: Vec<SkipReason> = summary.skipped_records.iter().map(|r| r.reason).collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::MalformedLine,
            SkipReason::BlankName,
            SkipReason::NoValidLocations
        ]
    );

    let names: Vec<Option<&str>> = summary
        .skipped_records
        .iter()
        .map(|r| r.name.as_deref())
        .collect();
    assert_eq!(names, vec![None, None, Some("OnlyBlank")]);
    assert_eq!(summary.skipped_records[0].line, Some(2));

    assert_eq!(client.search("/ru/msk").await.unwrap(), vec!["Good"]);

    server.stop().await;
}

#[tokio::test]
async fn test_json_records_with_blank_name() {
    let server = spawn_server(test_config()).await;
    let client = AdMatchClient::new(&server.base_url);

    let records = vec![Record::new("  ", &["/ru"]), Record::new("Яндекс.Директ", &["/ru"])];
    let summary = client.load_records(&records).await.unwrap();
    assert_eq!(summary.loaded, 1);
    assert_eq!(summary.skipped_records.len(), 1);
    assert_eq!(summary.skipped_records[0].name, None);
    assert_eq!(summary.skipped_records[0].line, None);
    assert_eq!(summary.skipped_records[0].reason, SkipReason::BlankName);

    server.stop().await;
}

#[tokio::test]
async fn test_json_records_and_index_stats() {
    let server = spawn_server(test_config()).await;
    let client = AdMatchClient::new(&server.base_url).with_api_key(ADMIN_KEY);

    let records = vec![
        Record::new("Яндекс.Директ", &["/ru"]),
        Record::new("Крутая реклама", &["/ru/svrd"]),
    ];
    let summary = client.load_records(&records).await.unwrap();
    assert_eq!(summary.loaded, 2);

    client.search("/ru/svrd/revda").await.unwrap();

    let stats = client.index_stats().await.unwrap();
    assert_eq!(stats.generation, 1);
    assert_eq!(stats.platforms, 2);
    assert_eq!(stats.locations, 2);
    assert_eq!(stats.cached_paths, 1);

    server.stop().await;
}

#[tokio::test]
async fn test_admin_requires_key() {
    let server = spawn_server(test_config()).await;
    let client = AdMatchClient::new(&server.base_url).with_api_key("wrong-key");

    match client.index_stats().await {
        Err(ClientError::Status { status, .. }) => assert_eq!(status, StatusCode::UNAUTHORIZED),
        other => panic!("expected 401, got {:?}", other),
    }

    server.stop().await;
}

#[tokio::test]
async fn test_admin_reload_from_feed_file() {
    let path = std::env::temp_dir().join(format!("admatch_api_reload_{}.txt", std::process::id()));
    std::fs::write(&path, FEED).unwrap();

    let mut config = test_config();
    config.feed.path = Some(path.clone());
    let server = spawn_server(config).await;
    let client = AdMatchClient::new(&server.base_url).with_api_key(ADMIN_KEY);

    assert!(client.search("/ru").await.unwrap().is_empty());

    let summary = client.reload().await.unwrap();
    assert_eq!(summary.loaded, 4);
    assert_eq!(client.search("/ru/svrd").await.unwrap().len(), 2);

    std::fs::write(&path, "Другая площадка:/ru/svrd\n").unwrap();
    client.reload().await.unwrap();
    assert_eq!(client.search("/ru/svrd").await.unwrap(), vec!["Другая площадка"]);
    assert_eq!(server.catalog.stats().generation, 2);

    std::fs::remove_file(&path).unwrap_or_default();
    server.stop().await;
}
