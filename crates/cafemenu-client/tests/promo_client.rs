//! Integration tests for `PromoClient` using wiremock HTTP mocks.

use cafemenu_client::{ClientError, PromoClient};
use cafemenu_core::{Checkout, PromoError, PromoStatus};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PromoClient {
    PromoClient::new(base_url, 30, "cafemenu-test").expect("client construction should not fail")
}

#[tokio::test]
async fn ok_response_is_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/check_promo"))
        .and(body_json(serde_json::json!({"code": "SUMMER", "userId": 42})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"status": "OK", "discount": 0.1})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let response = client.check_promo(" summer ", 42).await.expect("should check promo");

    assert_eq!(response.status, PromoStatus::Ok);
    assert_eq!(response.discount, Some(0.1));
}

#[tokio::test]
async fn base_path_prefix_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/shop/api/check_promo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "USED"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/shop/", server.uri()));
    let response = client.check_promo("WELCOME", 1).await.expect("should check promo");

    assert_eq!(response.status, PromoStatus::Used);
    assert_eq!(response.discount, None);
}

#[tokio::test]
async fn limit_resets_applied_discount() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/check_promo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "LIMIT"})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut checkout = Checkout::new();
    checkout
        .apply_promo(
            "FIRST",
            Ok::<_, ClientError>(cafemenu_core::PromoResponse {
                status: PromoStatus::Ok,
                discount: Some(0.2),
            }),
        )
        .unwrap();

    let status = checkout
        .apply_promo("SECOND", client.check_promo("SECOND", 7).await)
        .expect("transport should succeed");

    assert_eq!(status, PromoStatus::Limit);
    assert_eq!(checkout.promo_code(), None);
    assert_eq!(checkout.discount_percent(), 0);
}

#[tokio::test]
async fn server_error_keeps_discount() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut checkout = Checkout::new();
    checkout
        .apply_promo(
            "FIRST",
            Ok::<_, ClientError>(cafemenu_core::PromoResponse {
                status: PromoStatus::Ok,
                discount: Some(0.2),
            }),
        )
        .unwrap();

    let err = checkout
        .apply_promo("SECOND", client.check_promo("SECOND", 7).await)
        .unwrap_err();

    assert!(
        matches!(err, ClientError::UnexpectedStatus { status: 500, .. }),
        "expected UnexpectedStatus(500), got: {err:?}"
    );
    assert_eq!(checkout.promo_code(), Some("FIRST"));
    assert_eq!(checkout.discount_percent(), 20);
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.check_promo("CODE", 1).await.unwrap_err();

    assert!(
        matches!(err, ClientError::Deserialize { .. }),
        "expected Deserialize, got: {err:?}"
    );
}

#[tokio::test]
async fn blank_code_is_rejected_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.check_promo("   ", 1).await.unwrap_err();

    assert!(matches!(err, ClientError::Promo(PromoError::EmptyCode)));
}
