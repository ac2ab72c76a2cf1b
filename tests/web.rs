mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use ringkas::web::{router, AppState};
use ringkas::ExtractMode;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use url::form_urlencoded;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer) -> axum::Router {
    let fetcher = common::fetcher();
    let summarizer = common::summarizer(server, &fetcher);
    router(Arc::new(AppState {
        fetcher,
        summarizer,
        default_mode: ExtractMode::Article,
    }))
}

fn post_form(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn form_has_url_and_masked_key_fields() {
    let server = MockServer::start().await;
    let response = app(&server)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains(r#"name="page_url""#));
    assert!(page.contains(r#"<input type="password" name="api_key""#));
}

#[tokio::test]
async fn empty_submission_shows_validation_message() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(post_form("page_url=&api_key=".to_string()))
        .await
        .unwrap();

    let page = body_text(response).await;
    assert_eq!(
        page.matches("Please enter both the webpage URL and Gemini API key.").count(),
        1
    );
}

#[tokio::test]
async fn submission_renders_escaped_summaries_without_the_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/story"))
        .respond_with(common::html("<article><p>Story text.</p></article>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(common::API_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"content": "<b>bold</b> claim"})),
        )
        .mount(&server)
        .await;

    let page_url = format!("{}/story", server.uri());
    let form = form_urlencoded::Serializer::new(String::new())
        .append_pair("page_url", &page_url)
        .append_pair("api_key", "hunter2-secret")
        .append_pair("mode", "article")
        .finish();
    let response = app(&server).oneshot(post_form(form)).await.unwrap();

    let page = body_text(response).await;
    assert!(page.contains("Summary of paragraph 1:"));
    assert!(page.contains("&lt;b&gt;bold&lt;/b&gt; claim"));
    assert!(page.contains(&format!(r#"value="{}""#, page_url)));
    assert!(!page.contains("hunter2-secret"));
}

#[tokio::test]
async fn health_check() {
    let server = MockServer::start().await;
    let response = app(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
