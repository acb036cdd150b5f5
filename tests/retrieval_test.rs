use serde_json::Value;
use submissions_backend::config::StorageConfig;
use submissions_backend::infrastructure::storage::connect;
use submissions_backend::services::retrieval::{RetrievalError, collect_page};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUCKET: &str = "archive-bucket";

fn test_config(endpoint: &str) -> StorageConfig {
    StorageConfig {
        bucket: BUCKET.to_string(),
        region: "ap-southeast-2".to_string(),
        access_key_id: "test-access-key".to_string(),
        secret_access_key: "test-secret-key".to_string(),
        endpoint: Some(endpoint.to_string()),
    }
}

fn listing_xml(entries: &[(&str, &str)]) -> String {
    let contents: String = entries
        .iter()
        .map(|(key, modified)| {
            format!(
                "<Contents><Key>{key}</Key><LastModified>{modified}</LastModified>\
                 <ETag>\"d41d8cd98f00b204e9800998ecf8427e\"</ETag><Size>2</Size>\
                 <StorageClass>STANDARD</StorageClass></Contents>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <ListBucketResult xmlns=\"http://s3.amazonaws.com/doc/2006-03-01/\">\
         <Name>{BUCKET}</Name><Prefix>FormSubmissions/</Prefix>\
         <KeyCount>{count}</KeyCount><MaxKeys>500</MaxKeys>\
         <IsTruncated>false</IsTruncated>{contents}</ListBucketResult>",
        count = entries.len(),
    )
}

async fn stub_listing(server: &MockServer, xml: String) {
    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}")))
        .and(query_param("list-type", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(xml, "application/xml"))
        .mount(server)
        .await;
}

async fn stub_object(server: &MockServer, key: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}/{key}")))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json"))
        .mount(server)
        .await;
}

fn keys_of(page: &submissions_backend::services::retrieval::SubmissionPage) -> Vec<String> {
    page.submissions
        .iter()
        .map(|record| record["key"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn only_json_keys_are_fetched() {
    let server = MockServer::start().await;
    stub_listing(
        &server,
        listing_xml(&[
            ("FormSubmissions/2026/08/2026-08-01_Ada_aaaaaaaa.json", "2026-08-01T10:00:00.000Z"),
            ("FormSubmissions/2026/08/notes.txt", "2026-08-04T10:00:00.000Z"),
            ("FormSubmissions/2026/08/2026-08-02_Bea_bbbbbbbb.json", "2026-08-02T10:00:00.000Z"),
            ("FormSubmissions/2026/08/2026-08-03_Cal_cccccccc.json", "2026-08-03T10:00:00.000Z"),
        ]),
    )
    .await;
    for key in [
        "FormSubmissions/2026/08/2026-08-01_Ada_aaaaaaaa.json",
        "FormSubmissions/2026/08/2026-08-02_Bea_bbbbbbbb.json",
        "FormSubmissions/2026/08/2026-08-03_Cal_cccccccc.json",
    ] {
        stub_object(&server, key, "{\"n\": 1}").await;
    }
    // valid JSON at the non-.json key: if it were fetched it would show up
    stub_object(&server, "FormSubmissions/2026/08/notes.txt", "{\"n\": 99}").await;

    let store = connect(&test_config(&server.uri())).await;
    let page = collect_page(&store, None).await.unwrap();

    assert_eq!(page.count, 3);
    assert!(keys_of(&page).iter().all(|key| key.ends_with(".json")));
}

#[tokio::test]
async fn records_are_ordered_most_recent_first() {
    let server = MockServer::start().await;
    stub_listing(
        &server,
        listing_xml(&[
            ("FormSubmissions/2026/08/2026-08-01_Old_aaaaaaaa.json", "2026-08-01T10:00:00.000Z"),
            ("FormSubmissions/2026/08/2026-08-06_New_bbbbbbbb.json", "2026-08-06T10:00:00.000Z"),
            ("FormSubmissions/2026/08/2026-08-03_Mid_cccccccc.json", "2026-08-03T10:00:00.000Z"),
        ]),
    )
    .await;
    for key in [
        "FormSubmissions/2026/08/2026-08-01_Old_aaaaaaaa.json",
        "FormSubmissions/2026/08/2026-08-06_New_bbbbbbbb.json",
        "FormSubmissions/2026/08/2026-08-03_Mid_cccccccc.json",
    ] {
        stub_object(&server, key, "{}").await;
    }

    let store = connect(&test_config(&server.uri())).await;
    let page = collect_page(&store, None).await.unwrap();

    let keys = keys_of(&page);
    assert!(keys[0].contains("_New_"));
    assert!(keys[1].contains("_Mid_"));
    assert!(keys[2].contains("_Old_"));
}

#[tokio::test]
async fn failed_object_fetch_is_skipped() {
    let server = MockServer::start().await;
    stub_listing(
        &server,
        listing_xml(&[
            ("FormSubmissions/2026/08/2026-08-03_Ada_aaaaaaaa.json", "2026-08-03T10:00:00.000Z"),
            ("FormSubmissions/2026/08/2026-08-02_Bea_bbbbbbbb.json", "2026-08-02T10:00:00.000Z"),
            ("FormSubmissions/2026/08/2026-08-01_Cal_cccccccc.json", "2026-08-01T10:00:00.000Z"),
        ]),
    )
    .await;
    stub_object(&server, "FormSubmissions/2026/08/2026-08-03_Ada_aaaaaaaa.json", "{}").await;
    // the middle object is gone from the store
    Mock::given(method("GET"))
        .and(path("/archive-bucket/FormSubmissions/2026/08/2026-08-02_Bea_bbbbbbbb.json"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message>\
             </Error>",
            "application/xml",
        ))
        .mount(&server)
        .await;
    stub_object(&server, "FormSubmissions/2026/08/2026-08-01_Cal_cccccccc.json", "{}").await;

    let store = connect(&test_config(&server.uri())).await;
    let page = collect_page(&store, None).await.unwrap();

    assert_eq!(page.count, 2);
    let keys = keys_of(&page);
    assert!(keys[0].contains("_Ada_"));
    assert!(keys[1].contains("_Cal_"));
}

#[tokio::test]
async fn unparseable_object_is_skipped() {
    let server = MockServer::start().await;
    stub_listing(
        &server,
        listing_xml(&[
            ("FormSubmissions/2026/08/2026-08-02_Ada_aaaaaaaa.json", "2026-08-02T10:00:00.000Z"),
            ("FormSubmissions/2026/08/2026-08-01_Bea_bbbbbbbb.json", "2026-08-01T10:00:00.000Z"),
        ]),
    )
    .await;
    stub_object(&server, "FormSubmissions/2026/08/2026-08-02_Ada_aaaaaaaa.json", "not json").await;
    stub_object(&server, "FormSubmissions/2026/08/2026-08-01_Bea_bbbbbbbb.json", "{\"n\": 1}").await;

    let store = connect(&test_config(&server.uri())).await;
    let page = collect_page(&store, None).await.unwrap();

    assert_eq!(page.count, 1);
    assert!(keys_of(&page)[0].contains("_Bea_"));
}

#[tokio::test]
async fn records_merge_stored_fields_after_the_key() {
    let server = MockServer::start().await;
    let key = "FormSubmissions/2026/08/2026-08-01_Ada_aaaaaaaa.json";
    stub_listing(&server, listing_xml(&[(key, "2026-08-01T10:00:00.000Z")])).await;
    stub_object(
        &server,
        key,
        "{\"payload\": {\"First Name\": \"Ada\"}, \"score\": 7}",
    )
    .await;

    let store = connect(&test_config(&server.uri())).await;
    let page = collect_page(&store, None).await.unwrap();

    let record = &page.submissions[0];
    assert_eq!(record["key"], Value::String(key.to_string()));
    assert_eq!(record["payload"]["First Name"], "Ada");
    assert_eq!(record["score"], 7);
}

#[tokio::test]
async fn empty_listing_is_a_successful_empty_page() {
    let server = MockServer::start().await;
    stub_listing(&server, listing_xml(&[])).await;

    let store = connect(&test_config(&server.uri())).await;
    let page = collect_page(&store, None).await.unwrap();

    assert_eq!(page.count, 0);
    assert!(page.submissions.is_empty());
}

#[tokio::test]
async fn oversized_limit_is_clamped_and_fetches_cap_at_one_hundred() {
    let server = MockServer::start().await;

    // only a listing asking for exactly 500 keys is answered
    let entries: Vec<(String, String)> = (0..150)
        .map(|i| {
            (
                format!("FormSubmissions/2026/08/2026-08-01_Sub_{i:08}.json"),
                "2026-08-01T10:00:00.000Z".to_string(),
            )
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = entries
        .iter()
        .map(|(k, m)| (k.as_str(), m.as_str()))
        .collect();
    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}")))
        .and(query_param("list-type", "2"))
        .and(query_param("max-keys", "500"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(listing_xml(&borrowed), "application/xml"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/archive-bucket/FormSubmissions/.+\.json$"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let store = connect(&test_config(&server.uri())).await;
    let page = collect_page(&store, Some(9999)).await.unwrap();

    // 150 listed, but never more than 100 fetched
    assert_eq!(page.count, 100);
}

#[tokio::test]
async fn listing_failure_is_a_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{BUCKET}")))
        .respond_with(ResponseTemplate::new(403).set_body_raw(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
             <Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>",
            "application/xml",
        ))
        .mount(&server)
        .await;

    let store = connect(&test_config(&server.uri())).await;
    let err = collect_page(&store, None).await.unwrap_err();

    match err {
        RetrievalError::Store(message) => assert!(!message.is_empty()),
        other => panic!("expected a store error, got {other:?}"),
    }
}
