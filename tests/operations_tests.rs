//! Work orders and expense orders

mod common;

use axum::http::StatusCode;
use common::{TestApp, error_fields, id_of};
use serde_json::{Value, json};

async fn work_order(app: &TestApp) -> Value {
    let order = app.approved_order().await;
    app.create(
        "/work-orders",
        json!({
            "orderId": order["id"],
            "assignee": "Cuadrilla norte",
            "description": "Cambio de transformador",
            "startDate": "2025-03-01",
            "endDate": "2025-03-05",
        }),
    )
    .await
}

async fn expense_type(app: &TestApp, name: &str) -> Value {
    app.create("/expense-types", json!({ "name": name })).await
}

async fn expense_order(app: &TestApp, work_order: &Value) -> Value {
    let kind = expense_type(app, "Viáticos").await;
    app.create(
        "/expense-orders",
        json!({
            "workOrderId": work_order["id"],
            "expenseTypeId": kind["id"],
            "amount": 250000.456,
            "description": "Hospedaje cuadrilla",
            "beneficiary": "Hotel Central",
        }),
    )
    .await
}

#[tokio::test]
async fn test_work_order_needs_an_approved_order() {
    let app = TestApp::new();
    let client = app.create_client("901000001").await;
    let pending = app.create_order(&id_of(&client)).await;

    let response = app
        .server
        .post("/work-orders")
        .authorization_bearer(app.user_token())
        .json(&json!({ "orderId": pending["id"], "description": "Visita técnica" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_work_order_numbering_and_listing() {
    let app = TestApp::new();
    let first = work_order(&app).await;
    assert_eq!(first["number"], "OT-000001");
    assert_eq!(first["status"], "PENDING");

    let order_id = first["orderId"].as_str().unwrap();
    let second = app
        .create(
            "/work-orders",
            json!({ "orderId": order_id, "description": "Pruebas de carga" }),
        )
        .await;
    assert_eq!(second["number"], "OT-000002");

    let listed: Value = app
        .server
        .get(&format!("/orders/{order_id}/work-orders"))
        .authorization_bearer(app.user_token())
        .await
        .json();
    assert_eq!(listed["pagination"]["total"], 2);
}

#[tokio::test]
async fn test_work_order_dates_are_ordered() {
    let app = TestApp::new();
    let order = app.approved_order().await;

    let response = app
        .server
        .post("/work-orders")
        .authorization_bearer(app.user_token())
        .json(&json!({
            "orderId": order["id"],
            "description": "Instalación de red",
            "startDate": "2025-05-10",
            "endDate": "2025-05-01",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["endDate"]);

    // The update is checked against the stored start date
    let created = work_order(&app).await;
    let response = app
        .server
        .patch(&format!("/work-orders/{}", id_of(&created)))
        .authorization_bearer(app.user_token())
        .json(&json!({ "endDate": "2025-02-01" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_work_order_status_machine() {
    let app = TestApp::new();
    let created = work_order(&app).await;
    let path = format!("/work-orders/{}/status", id_of(&created));

    for status in ["IN_PROGRESS", "ON_HOLD", "IN_PROGRESS", "COMPLETED"] {
        app.server
            .patch(&path)
            .authorization_bearer(app.user_token())
            .json(&json!({ "status": status, "observation": "Avance registrado" }))
            .await
            .assert_status_ok();
    }

    let response = app
        .server
        .patch(&path)
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "IN_PROGRESS" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Completed work orders are frozen
    app.server
        .patch(&format!("/work-orders/{}", id_of(&created)))
        .authorization_bearer(app.user_token())
        .json(&json!({ "assignee": "Otra cuadrilla" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_expense_order_amount_is_rounded_and_numbered() {
    let app = TestApp::new();
    let work = work_order(&app).await;
    let expense = expense_order(&app, &work).await;

    assert_eq!(expense["number"], "OG-000001");
    assert_eq!(expense["status"], "PENDING");
    assert_eq!(expense["amount"], 250000.46);
    assert_eq!(expense["requestedBy"], "user-1");

    let listed: Value = app
        .server
        .get(&format!("/work-orders/{}/expense-orders", id_of(&work)))
        .authorization_bearer(app.user_token())
        .await
        .json();
    assert_eq!(listed["data"][0]["id"], expense["id"]);
}

#[tokio::test]
async fn test_expense_amount_must_be_positive() {
    let app = TestApp::new();
    let work = work_order(&app).await;
    let kind = expense_type(&app, "Materiales").await;

    let response = app
        .server
        .post("/expense-orders")
        .authorization_bearer(app.user_token())
        .json(&json!({
            "workOrderId": work["id"],
            "expenseTypeId": kind["id"],
            "amount": 0,
            "description": "Sin valor",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["amount"]);
}

#[tokio::test]
async fn test_amount_rounding_to_zero_is_rejected() {
    let app = TestApp::new();
    let work = work_order(&app).await;
    let kind = expense_type(&app, "Papelería").await;

    let response = app
        .server
        .post("/expense-orders")
        .authorization_bearer(app.user_token())
        .json(&json!({
            "workOrderId": work["id"],
            "expenseTypeId": kind["id"],
            "amount": 0.001,
            "description": "Clips",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["amount"]);

    let expense = expense_order(&app, &work).await;
    let response = app
        .server
        .patch(&format!("/expense-orders/{}", id_of(&expense)))
        .authorization_bearer(app.user_token())
        .json(&json!({ "amount": 0.004 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let stored: Value = app
        .server
        .get(&format!("/expense-orders/{}", id_of(&expense)))
        .authorization_bearer(app.user_token())
        .await
        .json();
    assert_eq!(stored["amount"], 250000.46);
}

#[tokio::test]
async fn test_subcategory_must_match_the_expense_type() {
    let app = TestApp::new();
    let work = work_order(&app).await;
    let transport = expense_type(&app, "Transporte").await;
    let food = expense_type(&app, "Alimentación").await;
    let lunch = app
        .create(
            "/expense-subcategories",
            json!({ "name": "Almuerzo", "expenseTypeId": food["id"] }),
        )
        .await;

    let response = app
        .server
        .post("/expense-orders")
        .authorization_bearer(app.user_token())
        .json(&json!({
            "workOrderId": work["id"],
            "expenseTypeId": transport["id"],
            "expenseSubcategoryId": lunch["id"],
            "amount": 30000,
            "description": "Almuerzo en ruta",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["expenseSubcategoryId"]);
}

#[tokio::test]
async fn test_expense_authorization_and_payment() {
    let app = TestApp::new();
    let work = work_order(&app).await;
    let expense = expense_order(&app, &work).await;
    let id = id_of(&expense);

    // Plain users cannot authorize
    app.server
        .post(&format!("/expense-orders/{id}/authorize"))
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "APPROVED" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // PAID is not a decision
    app.server
        .post(&format!("/expense-orders/{id}/authorize"))
        .authorization_bearer(app.approver_token())
        .json(&json!({ "status": "PAID" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Paying before approval is out of order
    app.server
        .post(&format!("/expense-orders/{id}/pay"))
        .authorization_bearer(app.approver_token())
        .await
        .assert_status(StatusCode::CONFLICT);

    let response = app
        .server
        .post(&format!("/expense-orders/{id}/authorize"))
        .authorization_bearer(app.approver_token())
        .json(&json!({ "status": "APPROVED", "observation": "Soportes completos" }))
        .await;
    response.assert_status_ok();
    let approved: Value = response.json();
    assert_eq!(approved["status"], "APPROVED");
    assert_eq!(approved["authorizedBy"], "approver-1");
    assert!(approved["authorizedAt"].is_string());

    // Approved expenses are locked for edits and deletion
    app.server
        .patch(&format!("/expense-orders/{id}"))
        .authorization_bearer(app.user_token())
        .json(&json!({ "amount": 1.0 }))
        .await
        .assert_status(StatusCode::CONFLICT);
    app.server
        .delete(&format!("/expense-orders/{id}"))
        .authorization_bearer(app.user_token())
        .await
        .assert_status(StatusCode::CONFLICT);

    let response = app
        .server
        .post(&format!("/expense-orders/{id}/pay"))
        .authorization_bearer(app.admin_token())
        .await;
    response.assert_status_ok();
    let paid: Value = response.json();
    assert_eq!(paid["status"], "PAID");
}

#[tokio::test]
async fn test_rejection_requires_an_observation() {
    let app = TestApp::new();
    let work = work_order(&app).await;
    let expense = expense_order(&app, &work).await;
    let path = format!("/expense-orders/{}/authorize", id_of(&expense));

    let response = app
        .server
        .post(&path)
        .authorization_bearer(app.admin_token())
        .json(&json!({ "status": "REJECTED" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_fields(&response.json()), vec!["observation"]);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(app.admin_token())
        .json(&json!({ "status": "REJECTED", "observation": "Sin factura" }))
        .await;
    response.assert_status_ok();

    // Rejected expenses may be removed
    app.server
        .delete(&format!("/expense-orders/{}", id_of(&expense)))
        .authorization_bearer(app.user_token())
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_closed_work_order_takes_no_expenses() {
    let app = TestApp::new();
    let work = work_order(&app).await;
    app.server
        .patch(&format!("/work-orders/{}/status", id_of(&work)))
        .authorization_bearer(app.user_token())
        .json(&json!({ "status": "CANCELLED" }))
        .await
        .assert_status_ok();

    let kind = expense_type(&app, "Peajes").await;
    let response = app
        .server
        .post("/expense-orders")
        .authorization_bearer(app.user_token())
        .json(&json!({
            "workOrderId": work["id"],
            "expenseTypeId": kind["id"],
            "amount": 12000,
            "description": "Peaje vía al mar",
        }))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}
