#![allow(dead_code)]

use ringkas::config::{GeminiConfig, HttpConfig};
use ringkas::{Fetcher, Summarizer};
use wiremock::MockServer;

pub const MODEL: &str = "gemini-2.0-flash";
pub const API_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

pub fn fetcher() -> Fetcher {
    Fetcher::new(&HttpConfig::default()).expect("client builds")
}

/// Summarizer pointed at the mock server's model endpoint
pub fn summarizer(server: &MockServer, fetcher: &Fetcher) -> Summarizer {
    let config = GeminiConfig {
        endpoint: format!("{}/v1beta/models", server.uri()),
        model: MODEL.to_string(),
        api_key: None,
    };
    Summarizer::new(fetcher.client().clone(), &config)
}

/// A URL nothing is listening on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

pub fn html(body: &str) -> wiremock::ResponseTemplate {
    wiremock::ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(body.to_string())
}
