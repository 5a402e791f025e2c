//! Test-mode payments. Nothing is charged: a transaction id is fabricated,
//! the outcome is always `SUCCESS`, and the record is stored for the books.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::Rng;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{auth::Session, error::AppError, state::AppState};

use super::{
    dto::{parse_amount, PayRequest, PayResponse},
    repo_types::Transaction,
};

pub const STATUS_SUCCESS: &str = "SUCCESS";

pub fn pay_routes() -> Router<AppState> {
    Router::new().route("/pay", post(pay))
}

/// `TEST-` followed by a four digit number.
pub fn test_txn_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("TEST-{}", rng.gen_range(1000..=9999))
}

#[instrument(skip(state, body))]
pub async fn pay(
    State(state): State<AppState>,
    Session(user_id): Session,
    body: Result<Json<PayRequest>, JsonRejection>,
) -> Result<Json<PayResponse>, AppError> {
    let Json(body) = body?;
    let Some(amount) = parse_amount(body.amount.as_ref()) else {
        warn!(amount = ?body.amount, "pay with non-numeric amount");
        return Err(AppError::Validation("Invalid amount".into()));
    };
    let txn_id = test_txn_id(&mut rand::thread_rng());

    let txn = Transaction::record(
        &state.db,
        amount,
        &txn_id,
        STATUS_SUCCESS,
        user_id,
        OffsetDateTime::now_utc(),
    )
    .await?;

    info!(txn_id = %txn.txn_id, amount = txn.amount, user_id = ?txn.user_id, "test payment recorded");
    Ok(Json(PayResponse {
        message: "Payment processed successfully! Thank you for supporting Zero Hunger.".into(),
        txn_id: txn.txn_id,
        status: txn.status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRef,
        http::{header, Request, StatusCode},
    };
    use rand::{rngs::StdRng, SeedableRng};
    use regex::Regex;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{app::build_app, auth::session::SessionKeys};

    async fn pay_with(app: &Router, body: Value, session: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method("POST")
            .uri("/pay")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = session {
            req = req.header(header::COOKIE, format!("session={token}"));
        }
        let res = app
            .clone()
            .oneshot(req.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn transactions(state: &AppState) -> Vec<Transaction> {
        sqlx::query_as::<_, Transaction>(
            "SELECT id, user_id, amount, txn_id, status, created_at FROM transactions",
        )
        .fetch_all(&state.db)
        .await
        .unwrap()
    }

    #[test]
    fn txn_ids_are_four_digits() {
        let re = Regex::new(r"^TEST-\d{4}$").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let id = test_txn_id(&mut rng);
            assert!(re.is_match(&id), "bad txn id {id}");
        }
    }

    #[tokio::test]
    async fn pay_always_succeeds_whatever_the_amount() {
        let state = AppState::for_tests().await;
        let app = build_app(state.clone());
        let re = Regex::new(r"^TEST-\d{4}$").unwrap();

        for amount in [json!(5), json!(0), json!(-3.5)] {
            let (status, body) = pay_with(&app, json!({ "amount": amount }), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["status"], "SUCCESS");
            assert!(re.is_match(body["txn_id"].as_str().unwrap()));
            assert!(body["message"].as_str().is_some());
        }

        let stored = transactions(&state).await;
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|t| t.status == "SUCCESS" && t.user_id.is_none()));
        assert!(stored.iter().any(|t| t.amount == -3.5));
    }

    #[tokio::test]
    async fn missing_amount_defaults_to_one() {
        let state = AppState::for_tests().await;
        let app = build_app(state.clone());

        let (status, body) = pay_with(&app, json!({}), None).await;
        assert_eq!(status, StatusCode::OK);

        let stored = transactions(&state).await;
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].amount, 1.0);
        assert_eq!(stored[0].txn_id, body["txn_id"].as_str().unwrap());
    }

    #[tokio::test]
    async fn string_amount_is_accepted() {
        let state = AppState::for_tests().await;
        let app = build_app(state.clone());

        let (status, body) = pay_with(&app, json!({ "amount": "5" }), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "SUCCESS");
        assert_eq!(transactions(&state).await[0].amount, 5.0);
    }

    #[tokio::test]
    async fn bad_amount_and_bad_body_get_json_errors() {
        let state = AppState::for_tests().await;
        let app = build_app(state.clone());

        let (status, body) = pay_with(&app, json!({ "amount": "lots" }), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid amount" }));

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/pay")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("amount=5"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());

        assert!(transactions(&state).await.is_empty());
    }

    #[tokio::test]
    async fn session_user_is_linked() {
        let state = AppState::for_tests().await;
        let app = build_app(state.clone());
        let user_id = uuid::Uuid::new_v4();
        let token = SessionKeys::from_ref(&state).sign(user_id).unwrap();

        pay_with(&app, json!({ "amount": 2.5 }), Some(&token)).await;
        assert_eq!(transactions(&state).await[0].user_id, Some(user_id));
    }
}
