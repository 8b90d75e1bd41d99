#![allow(clippy::unwrap_used)]
// Integration tests for `NodeClient` using wiremock: credential attachment,
// the 401 challenge flow, and response classification.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::future::BoxFuture;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ictrl_api::{
    CredentialPrompt, CredentialStore, Error, MemoryCredentialStore, NoPrompt, NodeClient,
    RequestTransport,
};

// ── Helpers ─────────────────────────────────────────────────────────

/// Prompt that answers challenges from a fixed queue, then cancels.
/// Counts how many times it was consulted.
struct QueuePrompt {
    answers: Mutex<VecDeque<SecretString>>,
    asked: AtomicUsize,
}

impl QueuePrompt {
    fn new<const N: usize>(answers: [&str; N]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|s| SecretString::from(*s)).collect()),
            asked: AtomicUsize::new(0),
        }
    }

    fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl CredentialPrompt for QueuePrompt {
    fn request_secret(&self) -> BoxFuture<'_, Option<SecretString>> {
        self.asked.fetch_add(1, Ordering::SeqCst);
        let next = self.answers.lock().unwrap().pop_front();
        Box::pin(async move { next })
    }
}

async fn setup(
    store: Arc<MemoryCredentialStore>,
    prompt: Arc<dyn CredentialPrompt>,
) -> (MockServer, NodeClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let transport = RequestTransport::with_client(reqwest::Client::new(), base_url);
    let client = NodeClient::with_transport(transport, store, prompt);
    (server, client)
}

fn store_with(secret: &str) -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::with_secret(SecretString::from(
        secret,
    )))
}

// ── Credential attachment ───────────────────────────────────────────

#[tokio::test]
async fn cached_secret_is_attached_to_every_request() {
    let (server, client) = setup(store_with("hunter2"), Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getModules"))
        .and(body_string_contains("password=hunter2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "modules": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let modules = client.get_modules().await.unwrap();
    assert!(modules.is_empty());
}

#[tokio::test]
async fn absent_credential_sends_empty_secret() {
    let store = Arc::new(MemoryCredentialStore::new());
    let (server, client) = setup(store, Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getModules"))
        .and(body_string_contains("password="))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "modules": [] })),
        )
        .mount(&server)
        .await;

    client.get_modules().await.unwrap();
}

#[tokio::test]
async fn payload_fields_are_form_encoded() {
    let (server, client) = setup(store_with("pw"), Arc::new(NoPrompt)).await;

    // '/' in the slug must arrive percent-encoded.
    Mock::given(method("POST"))
        .and(path("/addModule"))
        .and(body_string_contains("user_slash_repo=iotaledger%2Fchat.ixi"))
        .and(body_string_contains("password=pw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    client.add_module("iotaledger/chat.ixi").await.unwrap();
}

// ── Challenge flow ──────────────────────────────────────────────────

#[tokio::test]
async fn challenge_resubmits_with_new_secret() {
    let store = store_with("old");
    let prompt = Arc::new(QueuePrompt::new(["new"]));
    let (server, client) = setup(Arc::clone(&store), Arc::clone(&prompt) as _).await;

    Mock::given(method("POST"))
        .and(path("/getModules"))
        .and(body_string_contains("password=old"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/getModules"))
        .and(body_string_contains("password=new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "modules": [{ "path": "chat.ixi", "name": "Chat", "gui_port": -1 }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let modules = client.get_modules().await.unwrap();

    assert_eq!(modules.len(), 1);
    assert_eq!(prompt.times_asked(), 1, "exactly one prompt per 401");

    // The fresh secret is now cached for all later calls.
    let cached = store.get().unwrap();
    assert_eq!(cached.secret.expose_secret(), "new");
}

#[tokio::test]
async fn cancelled_challenge_surfaces_unauthorized() {
    let (server, client) = setup(store_with("rejected"), Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getNeighbors"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_neighbors().await;
    assert!(matches!(result, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn persistent_rejection_reprompts_until_cancelled() {
    let prompt = Arc::new(QueuePrompt::new(["first", "second"]));
    let (server, client) =
        setup(Arc::new(MemoryCredentialStore::new()), Arc::clone(&prompt) as _).await;

    // The node rejects every secret.
    Mock::given(method("POST"))
        .and(path("/getModules"))
        .respond_with(ResponseTemplate::new(401))
        .expect(3)
        .mount(&server)
        .await;

    let result = client.get_modules().await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    // Two answered challenges plus the final cancellation.
    assert_eq!(prompt.times_asked(), 3);
}

// ── Response classification ─────────────────────────────────────────

#[tokio::test]
async fn application_error_is_terminal_and_verbatim() {
    let prompt = Arc::new(QueuePrompt::new(["unused"]));
    let (server, client) = setup(store_with("pw"), Arc::clone(&prompt) as _).await;

    Mock::given(method("POST"))
        .and(path("/removeModule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "No module 'chat.ixi'.",
        })))
        .mount(&server)
        .await;

    let result = client.remove_module("chat.ixi").await;

    match result {
        Err(Error::Api { ref message }) => assert_eq!(message, "No module 'chat.ixi'."),
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(prompt.times_asked(), 0, "no challenge for an app error");
}

#[tokio::test]
async fn unexpected_status_is_a_network_failure() {
    let (server, client) = setup(store_with("pw"), Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getModules"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.get_modules().await;
    match result {
        Err(e) => {
            assert!(matches!(e, Error::Http { status: 500, .. }));
            assert!(e.is_network());
        }
        Ok(value) => panic!("expected Http error, got: {value:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_deserialization_failure() {
    let (server, client) = setup(store_with("pw"), Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getModules"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>crash</html>"))
        .mount(&server)
        .await;

    let result = client.get_modules().await;
    match result {
        Err(e) => {
            assert!(matches!(e, Error::Deserialization { .. }));
            assert!(e.is_network());
        }
        Ok(value) => panic!("expected Deserialization error, got: {value:?}"),
    }
}

// ── Typed wrappers ──────────────────────────────────────────────────

#[tokio::test]
async fn get_info_parses_defaults() {
    let (server, client) = setup(store_with("pw"), Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "version": "0.6",
            "default_config": { "port": 1337, "name": "ict" },
        })))
        .mount(&server)
        .await;

    let info = client.get_info().await.unwrap();
    assert_eq!(info.version, "0.6");
    assert!(info.update.is_none());
    assert_eq!(info.default_config["port"], json!(1337));
}

#[tokio::test]
async fn get_logs_sends_requested_bounds() {
    let (server, client) = setup(store_with("pw"), Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getLogs"))
        .and(body_string_contains("min=30"))
        .and(body_string_contains("max=45"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "logs": [{ "timestamp": 1_547_437_313_000_i64, "level": "info", "message": "round done" }],
            "min": 0,
            "max": 45,
        })))
        .mount(&server)
        .await;

    let window = client.get_logs(Some(30), Some(45)).await.unwrap();
    assert_eq!(window.logs.len(), 1);
    assert_eq!(window.min, 0);
    assert_eq!(window.max, 45);
}

#[tokio::test]
async fn get_config_strips_success_flag() {
    let (server, client) = setup(store_with("pw"), Arc::new(NoPrompt)).await;

    Mock::given(method("POST"))
        .and(path("/getConfig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "port": 1337,
            "gui_password": "",
        })))
        .mount(&server)
        .await;

    let config = client.get_config().await.unwrap();
    assert!(!config.contains_key("success"));
    assert_eq!(config["port"], json!(1337));
}
