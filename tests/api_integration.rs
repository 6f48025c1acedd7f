mod helpers;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use progression::extractor::{FieldKeywords, TableExtractor};
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use helpers::{test_app, test_app_with};

const WIKI_PAGE: &str = r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Men's pole vault world record progression</title></head><body>
<table class="wikitable">
<tr><th>Mark</th><th>Athlete</th><th>Date</th><th>Venue</th></tr>
<tr><td>4.02 m (13 ft 2+1⁄4 in)</td><td>Marc Wright</td><td>8 June 1912</td><td>Cambridge, United States</td></tr>
</table>
<table class="wikitable">
<tr><th>Mark</th><th>Athlete</th><th>Date</th><th>Venue</th></tr>
<tr><td>5.83 m</td><td>Thierry Vigneron</td><td>1 September 1981</td><td>Rome, Italy</td></tr>
<tr><td>6.14 m<sup>[2]</sup></td><td>Sergey Bubka</td><td>31 July 1994</td><td>Sestriere, Italy</td></tr>
<tr><td>n/a</td><td>Unknown</td><td></td><td></td></tr>
</table>
</body></html>"#;

async fn serve_page(mock_server: &MockServer, page_path: &str, html: &'static str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(html.as_bytes())
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(mock_server)
        .await;
}

async fn get(app: axum::Router, uri: String) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_scrape_end_to_end_picks_largest_table() {
    let mock_server = MockServer::start().await;
    serve_page(&mock_server, "/wiki/Pole_vault", WIKI_PAGE).await;

    let uri = format!("/api/scrape?url={}/wiki/Pole_vault", mock_server.uri());
    let response = get(test_app(), uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["actor"], "Thierry Vigneron");
    assert_eq!(data[1]["observedValue"], 6.14);
    assert_eq!(data[1]["location"], "Sestriere, Italy");
}

#[tokio::test]
async fn test_scrape_upstream_404_is_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let uri = format!("/api/scrape?url={}/wiki/Missing", mock_server.uri());
    let response = get(test_app(), uri).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["error"], "Failed to fetch the page");
}

#[tokio::test]
async fn test_scrape_page_with_malformed_byte_still_extracts() {
    let mut body = WIKI_PAGE.as_bytes().to_vec();
    body.extend_from_slice(b"<p>caf");
    body.push(0xE9);
    body.extend_from_slice(b"</p>");

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wiki/Pole_vault"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(body)
                .insert_header("Content-Type", "text/html; charset=utf-8"),
        )
        .mount(&mock_server)
        .await;

    let uri = format!("/api/scrape?url={}/wiki/Pole_vault", mock_server.uri());
    let response = get(test_app(), uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][1]["actor"], "Sergey Bubka");
}

#[tokio::test]
async fn test_scrape_page_without_marker_returns_empty_data() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/plain",
        "<html><body><table><tr><td>1.00</td></tr></table></body></html>",
    )
    .await;

    let uri = format!("/api/scrape?url={}/plain", mock_server.uri());
    let response = get(test_app(), uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, serde_json::json!({ "data": [] }));
}

#[tokio::test]
async fn test_scrape_missing_url() {
    let response = get(test_app(), "/api/scrape?url=".to_string()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "Missing \"url\" query parameter");
}

#[tokio::test]
async fn test_scrape_csv_with_custom_keywords() {
    let mock_server = MockServer::start().await;
    serve_page(
        &mock_server,
        "/times",
        r#"<html><body><table class="results">
        <tr><th>Time</th><th>Name</th><th>Date</th><th>Place</th></tr>
        <tr><td>9.58 s</td><td>Usain Bolt</td><td>16 August 2009</td><td>Berlin</td></tr>
        </table></body></html>"#,
    )
    .await;

    let keywords = FieldKeywords::new(vec!["time"], vec!["name"], vec!["date"], vec!["place"]);
    let app = test_app_with(TableExtractor::new("results", keywords).unwrap());

    let uri = format!("/api/scrape/csv?url={}/times", mock_server.uri());
    let response = get(app, uri).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        "observedValue,actor,observedAt,location\n9.58,Usain Bolt,16 August 2009,Berlin\n"
    );
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let response = get(test_app(), "/healthz".to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(json_body(response).await["status"], "OK");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let response = get(test_app(), "/api-docs/openapi.json".to_string()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/scrape"].is_object());
}
