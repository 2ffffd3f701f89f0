use chrono::{DateTime, Duration, SecondsFormat, Utc};
use hookreplay::fetch::fetch_since;
use hookreplay::{run, DeliveryId, DeliveryLog, HookreplayError, LookbackBoundary, RunOptions};
use hookreplay_github::{AppConfig, GithubAppClient};
use serde_json::{json, Value};
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = include_str!("fixtures/app_key.pem");

fn client_for(server: &MockServer) -> GithubAppClient {
    let config = AppConfig::new(4242, KEY).with_api_url(server.uri());
    GithubAppClient::new(&config).unwrap()
}

fn ts(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn delivery_json(id: u64, guid: &str, delivered_at: DateTime<Utc>, status: &str) -> Value {
    json!({
        "id": id,
        "guid": guid,
        "delivered_at": ts(delivered_at),
        "redelivery": false,
        "duration": 0.5,
        "status": status,
        "status_code": if status == "OK" { 200 } else { 502 },
        "event": "issues",
        "action": "opened",
        "installation_id": null,
        "repository_id": null
    })
}

#[tokio::test]
async fn test_follows_link_header_until_boundary() {
    let server = MockServer::start().await;
    let now = Utc::now();
    let boundary = LookbackBoundary::since(now);

    // Second page (mounted first so the cursor-specific mock wins)
    Mock::given(method("GET"))
        .and(path("/app/hook/deliveries"))
        .and(query_param("cursor", "v1_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            delivery_json(3, "c", now - Duration::minutes(90), "OK"),
            delivery_json(4, "d", now - Duration::minutes(200), "OK"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let next = format!(
        "<{}/app/hook/deliveries?per_page=100&cursor=v1_2>; rel=\"next\"",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/app/hook/deliveries"))
        .and(query_param("per_page", "100"))
        .and(header("x-github-api-version", "2022-11-28"))
        .and(header("accept", "application/vnd.github+json"))
        .and(header_exists("authorization"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(json!([
                    delivery_json(1, "a", now - Duration::minutes(5), "OK"),
                    delivery_json(2, "b", now - Duration::minutes(60), "Invalid HTTP Response: 502"),
                ])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let fetched = fetch_since(&client, boundary).await.unwrap();

    let ids: Vec<u64> = fetched.iter().map(|d| d.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_mid_page_boundary_skips_next_page() {
    let server = MockServer::start().await;
    let now = Utc::now();

    // 100 deliveries a minute apart: only the first three are inside 3 hours
    let page: Vec<Value> = (0..100)
        .map(|i| {
            delivery_json(
                i + 1,
                &format!("guid-{}", i),
                now - Duration::minutes(177 + i as i64) - Duration::seconds(30),
                "OK",
            )
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/app/hook/deliveries"))
        .and(query_param("cursor", "v1_next"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let next = format!(
        "<{}/app/hook/deliveries?per_page=100&cursor=v1_next>; rel=\"next\"",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/app/hook/deliveries"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", next.as_str())
                .set_body_json(Value::Array(page)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let fetched = fetch_since(&client, LookbackBoundary::since(now))
        .await
        .unwrap();

    assert_eq!(fetched.len(), 3);
}

#[tokio::test]
async fn test_redeliver_posts_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/hook/deliveries/12345/attempts"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.redeliver(DeliveryId(12345)).await.unwrap();
}

#[tokio::test]
async fn test_error_body_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/hook/deliveries"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "A JSON web token could not be decoded",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = fetch_since(&client, LookbackBoundary::now())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(
        err.remote_message(),
        Some("A JSON web token could not be decoded")
    );
}

#[tokio::test]
async fn test_error_without_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/app/hook/deliveries/7/attempts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.redeliver(DeliveryId(7)).await.unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.remote_message(), None);
}

#[tokio::test]
async fn test_malformed_listing_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/app/hook/deliveries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not": "a list"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = fetch_since(&client, LookbackBoundary::now())
        .await
        .unwrap_err();

    assert!(matches!(err, HookreplayError::Decode(_)));
}

#[tokio::test]
async fn test_full_run_redelivers_failed_guid_once() {
    let server = MockServer::start().await;
    let now = Utc::now();

    Mock::given(method("GET"))
        .and(path("/app/hook/deliveries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            delivery_json(10, "g1", now - Duration::minutes(1), "Invalid HTTP Response: 502"),
            delivery_json(11, "g2", now - Duration::minutes(2), "Invalid HTTP Response: 502"),
            delivery_json(12, "g1", now - Duration::minutes(3), "OK"),
            delivery_json(13, "g2", now - Duration::minutes(4), "Invalid HTTP Response: 502"),
            delivery_json(14, "g3", now - Duration::minutes(5), "OK"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/app/hook/deliveries/11/attempts"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let summary = run(&client, LookbackBoundary::since(now), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(summary.redelivered, 1);
    assert_eq!(summary.total, 5);
    assert!(summary
        .to_string()
        .starts_with("Redelivered 1 failed webhook deliveries out of 5 total deliveries since "));
}
