use serde_json::Value;
use uuid::Uuid;

use crate::helpers::{has_line, month_start, receipt_lines, spawn_app, MANAGE_BASE_URL};

#[tokio::test]
async fn first_installment_receipt_shows_numbering_and_settings_link() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(3).await;
    let charge_id = app
        .record_charge_id(subscription_id, 1000, month_start(1))
        .await;

    let response = app.get_receipt(charge_id).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let lines = receipt_lines(&body);

    assert!(has_line(&lines, "Today's payment: 1 of 3"));
    assert!(has_line(&lines, "Upcoming payment: 2 of 3"));
    assert!(has_line(&lines, "Installment plan initiated on Jan 17, 2026"));
    assert!(has_line(&lines, "Your final charge will be on Mar 17, 2026"));
    assert!(has_line(&lines, "You can manage your payment settings"));
    assert!(!has_line(&lines, "You will be charged once a month"));
    assert!(!has_line(&lines, "subscription settings"));

    assert_eq!(
        body["data"]["messages"]["manage_payment_settings_url"],
        format!("{}/{}/manage", MANAGE_BASE_URL, subscription_id)
    );
    assert_eq!(body["data"]["installment"]["kind"], "ongoing");
    assert_eq!(body["data"]["installment"]["current_ordinal"], 1);
    assert_eq!(body["data"]["amount_formatted"], "$10");
}

#[tokio::test]
async fn second_installment_receipt_shows_correct_numbering() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(3).await;
    app.record_charge_id(subscription_id, 1000, month_start(1))
        .await;
    let second_id = app
        .record_charge_id(subscription_id, 1000, month_start(2))
        .await;

    let body: Value = app.get_receipt(second_id).await.json().await.unwrap();
    let lines = receipt_lines(&body);

    assert!(has_line(&lines, "Today's payment: 2 of 3"));
    assert!(has_line(&lines, "Upcoming payment: 3 of 3 on Mar 17, 2026"));
    assert!(has_line(&lines, "Installment plan initiated on"));
    assert!(has_line(&lines, "Your final charge will be on"));
}

#[tokio::test]
async fn final_installment_receipt_shows_history_and_total() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(3).await;
    for month in 1..=2 {
        app.record_charge_id(subscription_id, 1000, month_start(month))
            .await;
    }
    let final_id = app
        .record_charge_id(subscription_id, 1000, month_start(3))
        .await;

    let body: Value = app.get_receipt(final_id).await.json().await.unwrap();
    let lines = receipt_lines(&body);

    assert!(!has_line(&lines, "Today's payment:"));
    assert!(!has_line(&lines, "Upcoming payment"));
    assert!(has_line(&lines, "This is your final payment for your installment plan"));
    assert!(has_line(&lines, "You will not be charged again"));
    assert!(has_line(&lines, "Payment history:"));
    assert!(has_line(&lines, "Total amount paid:"));
    assert!(has_line(&lines, "$30"));
    assert!(!has_line(&lines, "Your final charge will be on"));
    assert!(!has_line(&lines, "You can manage your payment settings"));

    let installment = &body["data"]["installment"];
    assert_eq!(installment["kind"], "final");
    assert_eq!(installment["total_amount_paid"], 3000);
    assert_eq!(installment["payment_history"].as_array().unwrap().len(), 3);
    assert!(body["data"]["messages"]["manage_payment_settings_url"].is_null());
}

#[tokio::test]
async fn earlier_receipt_is_unchanged_after_later_charges() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(2).await;
    let first_id = app
        .record_charge_id(subscription_id, 500, month_start(1))
        .await;
    app.record_charge_id(subscription_id, 500, month_start(2))
        .await;

    let body: Value = app.get_receipt(first_id).await.json().await.unwrap();
    let lines = receipt_lines(&body);

    assert!(has_line(&lines, "Today's payment: 1 of 2"));
    assert_eq!(body["data"]["installment"]["amount_paid_to_date"], 500);
}

#[tokio::test]
async fn single_installment_plan_receipt_is_final() {
    let app = spawn_app().await;
    let subscription_id = app.create_plan_id(1).await;
    let charge_id = app
        .record_charge_id(subscription_id, 2550, month_start(5))
        .await;

    let body: Value = app.get_receipt(charge_id).await.json().await.unwrap();
    let lines = receipt_lines(&body);

    assert!(has_line(&lines, "This is your final payment"));
    assert!(has_line(&lines, "Total amount paid: $25.50"));
}

#[tokio::test]
async fn receipt_for_unknown_purchase_returns_404() {
    let app = spawn_app().await;

    let response = app.get_receipt(Uuid::new_v4()).await;

    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}
