//! Test helpers for integration tests
//!
//! Provides a mock Crew backend and shortcuts for building authenticated
//! clients against it.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crew_api::{ApiClient, LoginRequest};
use crew_common::{ClientConfig, SessionStore};

use crate::fixtures::user_json;

/// Mock backend instance for one test
pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    /// Start a fresh mock backend
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Build a client against this backend with a memory-only session store
    pub fn client(&self) -> ApiClient {
        let config = ClientConfig::for_url(self.server.uri());
        ApiClient::new(&config, SessionStore::in_memory()).expect("client builds")
    }

    /// Mount the login endpoint for the given user and log the client in
    pub async fn login_as(&self, client: &ApiClient, id: i64, username: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": user_json(id, username, None),
                "accessToken": "tok"
            })))
            .mount(&self.server)
            .await;

        client
            .login(&LoginRequest {
                email_or_username: username.to_string(),
                password: "Secret123".to_string(),
            })
            .await
            .expect("login succeeds");
    }

    /// Mount a GET endpoint returning the given JSON
    pub async fn stub_get(&self, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount a GET endpoint failing with the given status and error body
    pub async fn stub_get_error(&self, route: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": message })),
            )
            .mount(&self.server)
            .await;
    }
}
