use serde_json::Value;
use uuid::Uuid;

use crate::helpers::{month_start, spawn_app};

#[tokio::test]
async fn create_plan_returns_201_for_valid_request() {
    let app = spawn_app().await;

    let response = app.create_plan(3).await;

    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["total_installments"], 3);
    assert_eq!(body["data"]["recurrence"], "monthly");
}

#[tokio::test]
async fn create_plan_rejects_non_positive_installment_counts() {
    let app = spawn_app().await;

    for total in [0, -2] {
        let response = app.create_plan(total).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 for {} installments",
            total
        );
    }
}

#[tokio::test]
async fn create_plan_rejects_malformed_bodies() {
    let app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({"buyer_id": 1, "product_id": 2, "total_installments": 3}),
            "missing recurrence",
        ),
        (
            serde_json::json!({
                "buyer_id": 1,
                "product_id": 2,
                "total_installments": 3,
                "recurrence": "fortnightly",
            }),
            "unknown recurrence",
        ),
        (serde_json::json!({"buyer_id": 1}), "only a buyer"),
        (
            serde_json::json!({
                "buyer_id": "one",
                "product_id": 2,
                "total_installments": 3,
                "recurrence": "monthly",
            }),
            "non-numeric buyer",
        ),
    ];

    for (body, description) in test_cases {
        let response = app
            .api_client
            .post(&format!("{}/api/v1/subscriptions", app.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 when the payload was {}.",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false, "No error envelope for {}.", description);
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn create_plan_stores_the_requested_currency() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/api/v1/subscriptions", app.address))
        .json(&serde_json::json!({
            "buyer_id": 1,
            "product_id": 2,
            "total_installments": 2,
            "recurrence": "monthly",
            "currency": "EUR",
        }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["currency"], "eur");
}

#[tokio::test]
async fn charge_in_another_currency_is_rejected_with_400() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(2).await;
    let charges_url = format!(
        "{}/api/v1/subscriptions/{}/charges",
        app.address, subscription_id
    );

    let response = app
        .api_client
        .post(&charges_url)
        .json(&serde_json::json!({"amount": 1000, "currency": "eur"}))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);

    let response = app
        .api_client
        .post(&charges_url)
        .json(&serde_json::json!({"amount": 1000}))
        .send()
        .await
        .expect("Failed to execute request.");
    assert_eq!(201, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["currency"], "usd");

    let status: Value = app.get_plan_status(subscription_id).await.json().await.unwrap();
    assert_eq!(status["data"]["progress"]["installments_paid"], 1);
}

#[tokio::test]
async fn charges_beyond_the_plan_are_rejected_with_409() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(3).await;

    for month in 1..=3 {
        let response = app
            .record_charge(subscription_id, 1000, month_start(month))
            .await;
        assert_eq!(201, response.status().as_u16());
    }
    let response = app
        .record_charge(subscription_id, 1000, month_start(4))
        .await;

    assert_eq!(409, response.status().as_u16());
}

#[tokio::test]
async fn negative_charge_amount_is_rejected() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(3).await;

    let response = app
        .record_charge(subscription_id, -100, month_start(1))
        .await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn charge_for_unknown_subscription_returns_404() {
    let app = spawn_app().await;

    let response = app
        .record_charge(Uuid::new_v4(), 1000, month_start(1))
        .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn plan_status_tracks_progress_until_complete() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(3).await;

    let fresh: Value = app.get_plan_status(subscription_id).await.json().await.unwrap();
    assert_eq!(fresh["data"]["progress"]["installments_paid"], 0);
    assert!(fresh["data"]["progress"]["next_charge_date"].is_null());

    app.record_charge(subscription_id, 1000, month_start(1)).await;
    let midway: Value = app.get_plan_status(subscription_id).await.json().await.unwrap();
    assert_eq!(midway["data"]["progress"]["installments_paid"], 1);
    assert_eq!(midway["data"]["progress"]["installments_remaining"], 2);
    assert_eq!(
        midway["data"]["progress"]["next_charge_date"],
        "2026-02-17T14:00:00"
    );
    assert_eq!(
        midway["data"]["progress"]["final_charge_date"],
        "2026-03-17T14:00:00"
    );

    for month in 2..=3 {
        app.record_charge(subscription_id, 1000, month_start(month)).await;
    }
    let done: Value = app.get_plan_status(subscription_id).await.json().await.unwrap();
    assert_eq!(done["data"]["progress"]["is_complete"], true);
    assert_eq!(done["data"]["progress"]["amount_paid"], 3000);
    assert!(done["data"]["progress"]["next_charge_date"].is_null());
}

#[tokio::test]
async fn plan_status_for_unknown_subscription_returns_404() {
    let app = spawn_app().await;

    let response = app.get_plan_status(Uuid::new_v4()).await;

    assert_eq!(404, response.status().as_u16());
}
