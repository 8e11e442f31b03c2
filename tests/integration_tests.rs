//! Integration tests using wiremock to simulate the Asana API.

use asana_client::cache::MapCache;
use asana_client::resources::{CreateTaskRequest, Task, TaskBase, TaskQuery};
use asana_client::retry::Retrier;
use asana_client::{ApiErrorKind, Client, Error, Feature, Options, RetryStrategy, Upload};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PREFIX: &str = "/api/1.0";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn api(p: &str) -> String {
    format!("{}{}", PREFIX, p)
}

fn client_for(server: &MockServer) -> Client {
    builder_for(server).build().unwrap()
}

fn builder_for(server: &MockServer) -> asana_client::ClientBuilder {
    init_tracing();
    Client::builder()
        .base_url(format!("{}{}", server.uri(), PREFIX))
        .unwrap()
        .access_token("0/test")
}

#[derive(Debug, Deserialize, PartialEq)]
struct Compact {
    gid: String,
    name: String,
}

#[tokio::test]
async fn test_get_single_task() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/123")))
        .and(header("authorization", "Bearer 0/test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "123", "name": "Test"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let response = client.get::<_, Task>("/tasks/123", (), &[]).await.unwrap();

    assert_eq!(response.data.id, "123");
    assert_eq!(response.data.base.name.as_deref(), Some("Test"));
    assert!(response.next_page.is_none());
    assert_eq!(response.status.as_u16(), 200);
    assert!(!response.cached);
    assert_eq!(response.request_id.len(), 32);
}

#[tokio::test]
async fn test_next_page_cursor_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/projects/9/tasks")))
        .and(query_param("limit", "2"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "1", "name": "One"}, {"gid": "2", "name": "Two"}],
            "next_page": {
                "offset": "abc",
                "path": "/projects/9/tasks?limit=2&offset=abc",
                "uri": "https://app.asana.com/api/1.0/projects/9/tasks?limit=2&offset=abc"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/projects/9/tasks")))
        .and(query_param("offset", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "3", "name": "Three"}],
            "next_page": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let first = client
        .get::<_, Vec<Compact>>("/projects/9/tasks", (), &[Options::new().limit(2)])
        .await
        .unwrap();
    assert_eq!(first.data.len(), 2);
    let next = first.next_page.clone().unwrap();
    assert_eq!(next.offset, "abc");

    let second = client
        .get::<_, Vec<Compact>>(
            "/projects/9/tasks",
            (),
            &[Options::new().limit(2).offset(next.offset)],
        )
        .await
        .unwrap();
    assert_eq!(
        second.data,
        vec![Compact {
            gid: "3".to_string(),
            name: "Three".to_string()
        }]
    );
    assert!(!second.has_next_page());
}

#[tokio::test]
async fn test_create_task_clears_assignee_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/tasks")))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": {"gid": "77", "name": "New"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let task = client
        .create_task(CreateTaskRequest {
            base: TaskBase {
                name: Some("New".to_string()),
                assignee_status: Some("today".to_string()),
                ..TaskBase::default()
            },
            workspace: Some("1".to_string()),
            ..CreateTaskRequest::default()
        })
        .await
        .unwrap();
    assert_eq!(task.id, "77");

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(body["data"]["name"], "New");
    assert_eq!(body["data"]["workspace"], "1");
    assert!(body["data"].get("assignee_status").is_none());
    assert!(body.get("options").is_none());
}

#[tokio::test]
async fn test_rate_limited_with_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "5")
                .set_body_json(json!({"errors": [{"message": "rate limited"}]})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<_, Task>("/tasks/1", (), &[])
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
    assert!(!err.is_recoverable_error());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.message, "rate limited");
    assert_eq!(api_error.error_type, "rate_limit_enforced");
}

#[tokio::test]
async fn test_rate_limited_without_header_uses_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users/me")))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"errors": [{"message": "slow down"}]})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.current_user().await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn test_not_found_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/404")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{"message": "task: Unknown object: 404", "help": "See docs"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Task::with_id("404").fetch(&client, &[]).await.unwrap_err();

    assert!(matches!(err, Error::Context { .. }));
    assert!(err.is_not_found_error());
    assert!(!err.is_auth_error());
    assert!(!err.is_retryable());
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.message, "task: Unknown object: 404");
    assert_eq!(api_error.help.as_deref(), Some("See docs"));
    assert!(err.to_string().contains("fetching task 404"));
}

#[tokio::test]
async fn test_server_error_with_html_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>Down</html>"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<_, Task>("/tasks/1", (), &[])
        .await
        .unwrap_err();

    assert!(err.is_recoverable_error());
    assert!(err.is_retryable());
    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.error_type, "unknown");
    assert_eq!(api_error.message, "Service Unavailable");
    assert_eq!(api_error.retry_after, None);
}

#[tokio::test]
async fn test_null_data_is_protocol_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get::<_, Task>("/tasks/1", (), &[]).await;

    match result {
        Err(Error::Protocol { status, request_id }) => {
            assert_eq!(status.as_u16(), 200);
            assert!(!request_id.is_empty());
        }
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<_, Task>("/tasks/1", (), &[])
        .await
        .unwrap_err();

    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.error_type, "unknown");
    assert_eq!(api_error.status.as_u16(), 200);
}

#[tokio::test]
async fn test_decode_error_keeps_raw_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": 1}})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get::<_, Compact>("/tasks/1", (), &[]).await;

    match result {
        Err(Error::Decode {
            raw_response,
            status,
            ..
        }) => {
            assert_eq!(raw_response, r#"{"gid":1}"#);
            assert_eq!(status.as_u16(), 200);
        }
        other => panic!("Expected Decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_query_precedence() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .default_options(Options::new().limit(100).pretty(true).fields(["gid"]))
        .build()
        .unwrap();

    let query = TaskQuery {
        project: Some("9".to_string()),
        ..TaskQuery::default()
    };
    let page = client
        .query_tasks(query, &[Options::new().limit(5).fields(["name"])])
        .await
        .unwrap();
    assert!(page.items.is_empty());

    let requests = mock_server.received_requests().await.unwrap();
    let pairs: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("opt_pretty".to_string(), "true".to_string()),
            ("opt_fields".to_string(), "name".to_string()),
            ("limit".to_string(), "5".to_string()),
            ("project".to_string(), "9".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_feature_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users/me")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "3"}})))
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .default_options(Options::new().enable(Feature::StringIds))
        .build()
        .unwrap();

    client
        .get::<_, Value>(
            "/users/me",
            (),
            &[Options::new()
                .enable(Feature::NewSections)
                .enable(Feature::StringIds)
                .disable("new_task_subtypes")
                .fast_api(true)],
        )
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    assert_eq!(
        headers.get("asana-enable").unwrap().to_str().unwrap(),
        "string_ids,new_sections"
    );
    assert_eq!(
        headers.get("asana-disable").unwrap().to_str().unwrap(),
        "new_task_subtypes"
    );
    assert_eq!(headers.get("asana-fast-api").unwrap().to_str().unwrap(), "true");
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_post_sends_body_options() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/workspaces/1/tags")))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"data": {"gid": "42", "name": "urgent"}})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .post::<_, Value>(
            "/workspaces/1/tags",
            json!({"name": "urgent"}),
            &[Options::new().fields(["name", "color"]).enable(Feature::StringIds)],
        )
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(
        body,
        json!({"data": {"name": "urgent"}, "options": {"fields": ["name", "color"]}})
    );
    assert_eq!(
        requests[0].headers.get("asana-enable").unwrap().to_str().unwrap(),
        "string_ids"
    );
}

#[tokio::test]
async fn test_cache_serves_repeat_gets() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users/me")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "3", "name": "Sam"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let cache = Arc::new(MapCache::new(Duration::from_secs(60)));
    let client = builder_for(&mock_server).cache(cache.clone()).build().unwrap();

    let first = client.get::<_, Compact>("/users/me", (), &[]).await.unwrap();
    let second = client.get::<_, Compact>("/users/me", (), &[]).await.unwrap();

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(first.data, second.data);
    assert!(second.next_page.is_none());
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_cache_is_keyed_by_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/workspaces/1/tags")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .cache(Arc::new(MapCache::new(Duration::from_secs(60))))
        .build()
        .unwrap();

    for limit in [10, 20, 10] {
        client
            .get::<_, Vec<Value>>("/workspaces/1/tags", (), &[Options::new().limit(limit)])
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_created_location_seeds_cache() {
    let mock_server = MockServer::start().await;
    let location = format!("{}{}/tasks/77", mock_server.uri(), PREFIX);

    Mock::given(method("POST"))
        .and(path(api("/tasks")))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", location.as_str())
                .set_body_json(json!({"data": {"gid": "77", "name": "Seeded"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/77")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "77"}})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .cache(Arc::new(MapCache::new(Duration::from_secs(60))))
        .build()
        .unwrap();

    client
        .post::<_, Task>("/tasks", json!({"name": "Seeded", "workspace": "1"}), &[])
        .await
        .unwrap();

    let task = Task::with_id("77").fetch(&client, &[]).await.unwrap();
    assert_eq!(task.base.name.as_deref(), Some("Seeded"));
}

#[tokio::test]
async fn test_put_clears_cached_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/5")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "5", "name": "Old"}})),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(api("/tasks/5")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "5", "name": "New"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .cache(Arc::new(MapCache::new(Duration::from_secs(60))))
        .build()
        .unwrap();

    let task = Task::with_id("5");
    task.fetch(&client, &[]).await.unwrap();
    task.fetch(&client, &[]).await.unwrap();
    client
        .put::<_, Task>("/tasks/5", json!({"name": "New"}), &[])
        .await
        .unwrap();
    task.fetch(&client, &[]).await.unwrap();
}

#[tokio::test]
async fn test_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(api("/tasks/5")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(api("/tasks/6")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errors": [{"message": "Forbidden"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    Task::with_id("5").delete(&client).await.unwrap();

    let err = Task::with_id("6").delete(&client).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
    assert_eq!(err.api_error().unwrap().error_type, "forbidden");

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_multipart_upload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/tasks/5/attachments")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"gid": "900", "name": "notes.txt", "host": "asana"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let upload = Upload::new("notes.txt", "text/plain", "hello world".to_string());
    let attachment = Task::with_id("5")
        .create_attachment(&client, upload)
        .await
        .unwrap();
    assert_eq!(attachment.id, "900");
    assert_eq!(attachment.host.as_deref(), Some("asana"));

    let requests = mock_server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"notes.txt\""));
    assert!(body.contains("hello world"));
}

#[tokio::test]
async fn test_get_all_walks_every_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/workspaces/1/tags")))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "1", "name": "a"}, {"gid": "2", "name": "b"}],
            "next_page": {"offset": "p2", "path": "", "uri": ""}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/workspaces/1/tags")))
        .and(query_param("offset", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "3", "name": "c"}],
            "next_page": {"offset": "p3", "path": "", "uri": ""}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/workspaces/1/tags")))
        .and(query_param("offset", "p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "4", "name": "d"}],
            "next_page": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let tags: Vec<Compact> = client
        .get_all("/workspaces/1/tags", (), 2, &[Options::new().limit(500)])
        .await
        .unwrap();

    let ids: Vec<&str> = tags.iter().map(|t| t.gid.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert!(request
            .url
            .query_pairs()
            .any(|(k, v)| k == "limit" && v == "2"));
    }
}

#[tokio::test]
async fn test_validation_failure_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = TaskQuery {
        assignee: Some("me".to_string()),
        ..TaskQuery::default()
    };
    let err = client.query_tasks(query, &[]).await.unwrap_err();

    assert!(matches!(err.root(), Error::Validation(_)));
}

#[tokio::test]
async fn test_unencodable_options_send_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<_, Value>("/users/me", (), &[Options::new().fields(["name,email"])])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));

    let err = client
        .get::<_, Value>("/users/me", json!({"owner": {"gid": "1"}}), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Encoding(_)));

    let err = client
        .get::<_, Value>("users/me", (), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[tokio::test]
async fn test_retrier_recovers_from_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{"message": "Server Error", "phrase": "6 sad squid snuggle softly"}]
        })))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "1", "name": "Back"}})),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let retrier = Retrier::new(RetryStrategy::Linear {
        delay: Duration::from_millis(10),
        max_retries: 3,
    });

    let task = Task::with_id("1");
    let fetched = retrier.run(|| task.fetch(&client, &[])).await.unwrap();
    assert_eq!(fetched.base.name.as_deref(), Some("Back"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn test_pipeline_never_retries_by_itself() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "errors": [{"message": "Server Error", "phrase": "6 sad squid snuggle softly"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .get::<_, Task>("/tasks/1", (), &[])
        .await
        .unwrap_err();

    assert!(err.is_recoverable_error());
    assert_eq!(
        err.api_error().unwrap().phrase.as_deref(),
        Some("6 sad squid snuggle softly")
    );
}

#[tokio::test]
async fn test_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users/me")))
        .and(header("x-trace", "on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "3"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .default_header("X-Trace", "on")
        .unwrap()
        .build()
        .unwrap();

    let me = client.current_user().await.unwrap();
    assert_eq!(me.id, "3");
}

#[tokio::test]
async fn test_cached_final_page_keeps_fetch_all_complete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/workspaces/1/tags")))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "1", "name": "a"}],
            "next_page": {"offset": "p2", "path": "/workspaces/1/tags?offset=p2", "uri": ""}
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/workspaces/1/tags")))
        .and(query_param("offset", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"gid": "2", "name": "b"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .cache(Arc::new(MapCache::new(Duration::from_secs(300))))
        .build()
        .unwrap();

    for _ in 0..2 {
        let tags: Vec<Compact> = client
            .get_all("/workspaces/1/tags", (), 50, &[])
            .await
            .unwrap();
        let ids: Vec<&str> = tags.iter().map(|t| t.gid.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }
}

#[tokio::test]
async fn test_only_ok_and_created_carry_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"data": {"gid": "1"}})))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(api("/tasks/1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    match client.get::<_, Value>("/tasks/1", (), &[]).await {
        Err(Error::Api(api)) => {
            assert_eq!(api.status.as_u16(), 202);
            assert_eq!(api.kind, ApiErrorKind::Other);
            assert!(!api.kind.is_retryable());
        }
        other => panic!("Expected an API error, got {:?}", other),
    }

    client.delete("/tasks/1", &[]).await.unwrap();
}

#[tokio::test]
async fn test_location_seed_matches_default_options() {
    let mock_server = MockServer::start().await;
    let location = format!("{}{}/tasks/88", mock_server.uri(), PREFIX);

    Mock::given(method("POST"))
        .and(path(api("/tasks")))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", location.as_str())
                .set_body_json(json!({"data": {"gid": "88", "name": "Seeded"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path(api("/tasks/88")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "88", "name": "Renamed"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/tasks/88")))
        .and(query_param("opt_pretty", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"gid": "88", "name": "Renamed"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = builder_for(&mock_server)
        .default_options(Options::new().pretty(true))
        .cache(Arc::new(MapCache::new(Duration::from_secs(60))))
        .build()
        .unwrap();

    client
        .post::<_, Task>("/tasks", json!({"name": "Seeded", "workspace": "1"}), &[])
        .await
        .unwrap();

    let task = Task::with_id("88");
    let seeded = task.fetch(&client, &[]).await.unwrap();
    assert_eq!(seeded.base.name.as_deref(), Some("Seeded"));

    client
        .put::<_, Task>("/tasks/88", json!({"name": "Renamed"}), &[])
        .await
        .unwrap();

    let fresh = task.fetch(&client, &[]).await.unwrap();
    assert_eq!(fresh.base.name.as_deref(), Some("Renamed"));
}
