#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, extract::State, routing::post};
use axum_test::TestServer;
use clap::Parser;
use serde_json::{Value, json};
use test_context::AsyncTestContext;
use tokio::{net::TcpListener, task::JoinHandle};
use vegscan_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};

pub const HONEY_LABEL: &str = "成分：腰果、糖、棕櫚油、乙醯化己二酸二澱粉、麥芽糊精、蜂蜜、鹽";
pub const HONEY_REPLY: &str = r#"```json
{
  "type": "caution",
  "explanations": ["含有蜂蜜，屬於間接動物來源成分。"],
  "flags": [{ "ingredient": "蜂蜜", "level": "caution" }],
  "suggestion": "全素者請避免食用。"
}
```"#;

/// A tiny PNG signature; the fake OCR never decodes it.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// Nothing listens on the discard port, so connecting fails fast.
pub const UNREACHABLE_VISION_ENDPOINT: &str = "http://127.0.0.1:9/v1/images:annotate";

#[derive(Default)]
struct Script {
    ocr_text: String,
    model_reply: String,
    last_prompt: Option<String>,
}

#[derive(Clone, Default)]
struct UpstreamState {
    script: Arc<Mutex<Script>>,
    vision_calls: Arc<AtomicUsize>,
    gemini_calls: Arc<AtomicUsize>,
}

/// Stands in for Cloud Vision and Gemini on a loopback port.
pub struct FakeUpstream {
    pub base_url: String,
    state: UpstreamState,
    task: JoinHandle<()>,
}

async fn annotate(State(state): State<UpstreamState>) -> Json<Value> {
    state.vision_calls.fetch_add(1, Ordering::SeqCst);
    let text = state.script.lock().unwrap().ocr_text.clone();

    if text.is_empty() {
        return Json(json!({ "responses": [{}] }));
    }

    Json(json!({
        "responses": [{
            "textAnnotations": [{ "description": text }],
            "fullTextAnnotation": { "text": text }
        }]
    }))
}

async fn generate_content(
    State(state): State<UpstreamState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.gemini_calls.fetch_add(1, Ordering::SeqCst);
    let mut script = state.script.lock().unwrap();
    script.last_prompt = body["contents"][0]["parts"][0]["text"]
        .as_str()
        .map(str::to_string);

    Json(json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": script.model_reply }] }
        }]
    }))
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let state = UpstreamState::default();
        let app = Router::new()
            .route("/vision/annotate", post(annotate))
            .route("/gemini/models/{call}", post(generate_content))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            task,
        }
    }

    pub fn vision_endpoint(&self) -> String {
        format!("{}/vision/annotate", self.base_url)
    }

    pub fn gemini_endpoint(&self) -> String {
        format!("{}/gemini", self.base_url)
    }

    pub fn set_ocr_text(&self, text: &str) {
        self.state.script.lock().unwrap().ocr_text = text.to_string();
    }

    pub fn set_model_reply(&self, reply: &str) {
        self.state.script.lock().unwrap().model_reply = reply.to_string();
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.state.script.lock().unwrap().last_prompt.clone()
    }

    pub fn vision_calls(&self) -> usize {
        self.state.vision_calls.load(Ordering::SeqCst)
    }

    pub fn gemini_calls(&self) -> usize {
        self.state.gemini_calls.load(Ordering::SeqCst)
    }
}

impl Drop for FakeUpstream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub async fn build_server(upstream: &FakeUpstream, extra: &[&str]) -> TestServer {
    build_server_with_vision(upstream, &upstream.vision_endpoint(), extra).await
}

pub async fn build_server_with_vision(
    upstream: &FakeUpstream,
    vision_endpoint: &str,
    extra: &[&str],
) -> TestServer {
    let gemini_endpoint = upstream.gemini_endpoint();
    let mut argv = vec![
        "vegscan-api",
        "--vision-endpoint",
        vision_endpoint,
        "--vision-api-key",
        "test-vision-key",
        "--gemini-endpoint",
        gemini_endpoint.as_str(),
        "--gemini-api-key",
        "test-gemini-key",
    ];
    argv.extend_from_slice(extra);

    let args = Arc::new(Args::parse_from(argv));
    let app_state = state(args).await.unwrap();
    TestServer::new(router(app_state).unwrap()).unwrap()
}

pub struct ScanContext {
    pub upstream: FakeUpstream,
    pub server: TestServer,
}

impl AsyncTestContext for ScanContext {
    async fn setup() -> Self {
        let upstream = FakeUpstream::start().await;
        let server = build_server(&upstream, &[]).await;
        Self { upstream, server }
    }
}
