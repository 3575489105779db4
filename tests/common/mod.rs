//! Shared harness for the HTTP integration tests
//!
//! Builds the full router over in-memory storage and signs tokens with the
//! development secret.

#![allow(dead_code)]

use axum_test::TestServer;
use gestor::config::AppConfig;
use gestor::core::auth::{ROLE_ADMIN, ROLE_APPROVER, TokenKind};
use gestor::core::{DataService, JwtKeys};
use gestor::server::AppState;
use gestor::storage::{Backend, InMemoryObjectStorage};
use serde_json::{Value, json};
use std::sync::Arc;

pub struct TestApp {
    pub server: TestServer,
    pub config: AppConfig,
    pub state: AppState,
    pub objects: Arc<InMemoryObjectStorage>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_env(&[])
    }

    /// Build the app with extra environment variables
    pub fn with_env(vars: &[(&str, &str)]) -> Self {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = AppConfig::from_lookup(|key| {
            vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
        })
        .unwrap();
        let objects = Arc::new(InMemoryObjectStorage::new());
        let state = AppState::new(&Backend::InMemory, objects.clone(), &config);
        let app = gestor::app(state.clone(), &config).unwrap();
        Self {
            server: TestServer::new(app),
            config,
            state,
            objects,
        }
    }

    fn token(&self, subject: &str, roles: &[&str]) -> String {
        let roles: Vec<String> = roles.iter().map(|r| r.to_string()).collect();
        JwtKeys::new(&self.config.jwt)
            .issue(TokenKind::Access, subject, Some("Usuario de prueba"), &roles)
            .unwrap()
    }

    /// Token of a user without roles
    pub fn user_token(&self) -> String {
        self.token("user-1", &[])
    }

    pub fn admin_token(&self) -> String {
        self.token("admin-1", &[ROLE_ADMIN])
    }

    pub fn approver_token(&self) -> String {
        self.token("approver-1", &[ROLE_APPROVER])
    }

    /// POST as a plain user, expecting 201, returning the body
    pub async fn create(&self, path: &str, body: Value) -> Value {
        let response = self
            .server
            .post(path)
            .authorization_bearer(self.user_token())
            .json(&body)
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json()
    }

    pub async fn create_client(&self, tax_id: &str) -> Value {
        self.create(
            "/clients",
            json!({
                "name": format!("Cliente {tax_id}"),
                "taxId": tax_id,
                "email": "compras@cliente.co",
            }),
        )
        .await
    }

    pub async fn create_order(&self, client_id: &str) -> Value {
        self.create(
            "/orders",
            json!({
                "clientId": client_id,
                "description": "Mantenimiento de planta eléctrica",
                "estimatedValue": 1500000.0,
            }),
        )
        .await
    }

    /// Move an order through the given statuses
    pub async fn advance_order(&self, order_id: &str, statuses: &[&str]) {
        for status in statuses {
            self.server
                .patch(&format!("/orders/{order_id}/status"))
                .authorization_bearer(self.user_token())
                .json(&json!({ "status": status }))
                .await
                .assert_status_ok();
        }
    }

    /// An APPROVED order ready for work orders
    pub async fn approved_order(&self) -> Value {
        let existing = self.state.clients.list().await.unwrap().len();
        let client = self.create_client(&format!("90012{existing:04}-7")).await;
        let order = self.create_order(client["id"].as_str().unwrap()).await;
        self.advance_order(order["id"].as_str().unwrap(), &["APPROVED"])
            .await;
        order
    }
}

/// Field names reported in a validation error body
pub fn error_fields(body: &Value) -> Vec<String> {
    body["details"]["fields"]
        .as_object()
        .map(|fields| fields.keys().cloned().collect())
        .unwrap_or_default()
}

pub fn id_of(record: &Value) -> String {
    record["id"].as_str().unwrap().to_string()
}
