//! Orders: numbering, status machine, history and edit requests

mod common;

use axum::http::StatusCode;
use common::{TestApp, error_fields, id_of};
use serde_json::{Value, json};

#[tokio::test]
async fn test_orders_are_numbered_in_sequence() {
    let app = TestApp::new();
    let client = app.create_client("900111222").await;
    let client_id = id_of(&client);

    let first = app.create_order(&client_id).await;
    let second = app.create_order(&client_id).await;

    assert_eq!(first["number"], "PED-000001");
    assert_eq!(second["number"], "PED-000002");
    assert_eq!(first["status"], "PENDING");
    assert_eq!(first["createdBy"], "user-1");
}

#[tokio::test]
async fn test_deleted_numbers_are_not_reused() {
    let app = TestApp::new();
    let client = app.create_client("900111223").await;
    let first = app.create_order(&id_of(&client)).await;

    app.server
        .delete(&format!("/orders/{}", id_of(&first)))
        .authorization_bearer(app.user_token())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let next = app.create_order(&id_of(&client)).await;
    assert_eq!(next["number"], "PED-000002");
}

#[tokio::test]
async fn test_order_requires_active_client() {
    let app = TestApp::new();
    let client = app.create_client("900111224").await;
    let client_id = id_of(&client);

    app.server
        .patch(&format!("/clients/{client_id}"))
        .authorization_bearer(app.user_token())
        .json(&json!({ "isActive": false }))
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/orders")
        .authorization_bearer(app.user_token())
        .json(&json!({ "clientId": client_id, "description": "Revisión anual" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_REFERENCE");
    assert_eq!(body["details"]["field"], "clientId");
}

#[tokio::test]
async fn test_status_transitions_follow_the_lifecycle() {
    let app = TestApp::new();
    let client = app.create_client("900111225").await;
    let order = app.create_order(&id_of(&client)).await;
    let order_id = id_of(&order);

    // PENDING cannot jump to COMPLETED
    let response = app
        .server
        .patch(&format!("/orders/{order_id}/status"))
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "COMPLETED" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_STATUS_TRANSITION");
    assert_eq!(body["details"]["from"], "PENDING");
    assert_eq!(body["details"]["to"], "COMPLETED");

    app.advance_order(&order_id, &["APPROVED", "IN_PROGRESS", "COMPLETED"])
        .await;

    let history: Value = app
        .server
        .get(&format!("/orders/{order_id}/status-history"))
        .authorization_bearer(app.user_token())
        .await
        .json();
    let steps: Vec<(String, String)> = history["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| {
            (
                s["fromStatus"].as_str().unwrap().to_string(),
                s["toStatus"].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            ("PENDING".to_string(), "APPROVED".to_string()),
            ("APPROVED".to_string(), "IN_PROGRESS".to_string()),
            ("IN_PROGRESS".to_string(), "COMPLETED".to_string()),
        ]
    );

    // Terminal orders cannot be deleted
    app.server
        .delete(&format!("/orders/{order_id}"))
        .authorization_bearer(app.user_token())
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancellation_requires_a_reason() {
    let app = TestApp::new();
    let client = app.create_client("900111226").await;
    let order = app.create_order(&id_of(&client)).await;
    let order_id = id_of(&order);

    let response = app
        .server
        .patch(&format!("/orders/{order_id}/status"))
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "CANCELLED", "reason": "   " }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["reason"]);

    let response = app
        .server
        .patch(&format!("/orders/{order_id}/status"))
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "CANCELLED", "reason": "El cliente desistió" }))
        .await;
    response.assert_status_ok();

    let history: Value = app
        .server
        .get(&format!("/orders/{order_id}/status-history"))
        .authorization_bearer(app.user_token())
        .await
        .json();
    assert_eq!(history["data"][0]["reason"], "El cliente desistió");
    assert_eq!(history["data"][0]["requestedBy"], "user-1");
}

#[tokio::test]
async fn test_client_with_open_orders_cannot_be_deleted() {
    let app = TestApp::new();
    let client = app.create_client("900111230").await;
    let client_id = id_of(&client);
    let order = app.create_order(&client_id).await;

    let response = app
        .server
        .delete(&format!("/clients/{client_id}"))
        .authorization_bearer(app.user_token())
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_STATE");

    app.server
        .patch(&format!("/orders/{}/status", id_of(&order)))
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "CANCELLED", "reason": "Pedido duplicado" }))
        .await
        .assert_status_ok();

    app.server
        .delete(&format!("/clients/{client_id}"))
        .authorization_bearer(app.user_token())
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unknown_status_is_rejected() {
    let app = TestApp::new();
    let client = app.create_client("900111227").await;
    let order = app.create_order(&id_of(&client)).await;

    let response = app
        .server
        .patch(&format!("/orders/{}/status", id_of(&order)))
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "SHIPPED" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_approved_order_is_edited_through_requests() {
    let app = TestApp::new();
    let order = app.approved_order().await;
    let order_id = id_of(&order);

    // Direct edits are closed once the order leaves PENDING
    let response = app
        .server
        .patch(&format!("/orders/{order_id}"))
        .authorization_bearer(app.user_token())
        .json(&json!({ "description": "Mantenimiento correctivo" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_STATE");

    let request = app
        .create(
            &format!("/orders/{order_id}/edit-requests"),
            json!({
                "changes": { "description": "Mantenimiento correctivo", "estimatedValue": 2000000.0 },
                "reason": "El cliente amplió el alcance",
            }),
        )
        .await;
    assert_eq!(request["status"], "PENDING");
    let request_id = id_of(&request);

    // Only one pending request per order
    let response = app
        .server
        .post(&format!("/orders/{order_id}/edit-requests"))
        .authorization_bearer(app.user_token())
        .json(&json!({
            "changes": { "specialCondition": "Entrega nocturna" },
            "reason": "Segundo cambio solicitado",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Reviewing needs the admin role
    let review_path = format!("/order-edit-requests/{request_id}/review");
    let response = app
        .server
        .post(&review_path)
        .authorization_bearer(app.approver_token())
        .json(&json!({ "approved": true }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = app
        .server
        .post(&review_path)
        .authorization_bearer(app.admin_token())
        .json(&json!({ "approved": true, "reviewNote": "Aprobado por gerencia" }))
        .await;
    response.assert_status_ok();
    let reviewed: Value = response.json();
    assert_eq!(reviewed["status"], "APPROVED");
    assert_eq!(reviewed["reviewedBy"], "admin-1");
    assert!(reviewed["reviewedAt"].is_string());

    let order: Value = app
        .server
        .get(&format!("/orders/{order_id}"))
        .authorization_bearer(app.user_token())
        .await
        .json();
    assert_eq!(order["description"], "Mantenimiento correctivo");
    assert_eq!(order["estimatedValue"], 2000000.0);

    // A reviewed request cannot be reviewed again
    app.server
        .post(&review_path)
        .authorization_bearer(app.admin_token())
        .json(&json!({ "approved": false }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_rejected_request_leaves_the_order_untouched() {
    let app = TestApp::new();
    let order = app.approved_order().await;
    let order_id = id_of(&order);

    let request = app
        .create(
            &format!("/orders/{order_id}/edit-requests"),
            json!({
                "changes": { "description": "Cambio no autorizado" },
                "reason": "Solicitud del asesor comercial",
            }),
        )
        .await;

    app.server
        .post(&format!("/order-edit-requests/{}/review", id_of(&request)))
        .authorization_bearer(app.admin_token())
        .json(&json!({ "approved": false, "reviewNote": "Fuera de alcance" }))
        .await
        .assert_status_ok();

    let current: Value = app
        .server
        .get(&format!("/orders/{order_id}"))
        .authorization_bearer(app.user_token())
        .await
        .json();
    assert_eq!(current["description"], order["description"]);

    let listed: Value = app
        .server
        .get(&format!("/orders/{order_id}/edit-requests"))
        .authorization_bearer(app.user_token())
        .await
        .json();
    assert_eq!(listed["data"][0]["status"], "REJECTED");
}

#[tokio::test]
async fn test_edit_request_needs_changes_and_valid_references() {
    let app = TestApp::new();
    let order = app.approved_order().await;
    let path = format!("/orders/{}/edit-requests", id_of(&order));

    let response = app
        .server
        .post(&path)
        .authorization_bearer(app.user_token())
        .json(&json!({ "changes": {}, "reason": "Nada que cambiar aquí" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["changes"]);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(app.user_token())
        .json(&json!({
            "changes": { "commercialChannelId": uuid::Uuid::new_v4() },
            "reason": "Cambio de canal comercial",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_REFERENCE");
}

#[tokio::test]
async fn test_edit_request_reason_length_ignores_padding() {
    let app = TestApp::new();
    let order = app.approved_order().await;

    let response = app
        .server
        .post(&format!("/orders/{}/edit-requests", id_of(&order)))
        .authorization_bearer(app.user_token())
        .json(&json!({
            "changes": { "description": "Mantenimiento de dos plantas eléctricas" },
            "reason": "    Ajuste        ",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["reason"]);
}
