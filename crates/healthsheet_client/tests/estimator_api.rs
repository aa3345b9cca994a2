use healthsheet_client::http_client::ReqwestEstimatorClient;
use healthsheet_client::{NutritionEstimator, SheetError};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn estimate_parses_response_with_numeric_strings() {
    let server = MockServer::start().await;
    let body = json!({
        "food_name": "chicken rice bowl",
        "calories": "620",
        "protein": 42,
        "carbs": "71.5",
        "fat": 18,
        "time": "12:30"
    });
    Mock::given(method("POST"))
        .and(path("/v1/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = ReqwestEstimatorClient::new(&server.uri(), SecretString::new("tok".into()));
    let est = client
        .estimate(None, Some("chicken rice bowl for lunch"))
        .await
        .expect("estimate");
    assert_eq!(est.food_name, "chicken rice bowl");
    assert_eq!(est.calories, 620.0);
    assert_eq!(est.carbs, 71.5);
    assert_eq!(est.time.as_deref(), Some("12:30"));
    assert!(est.date.is_none());
}

#[tokio::test]
async fn estimate_encodes_image_and_sends_submission_instant() {
    let server = MockServer::start().await;
    let body = json!({
        "food_name": "banana",
        "calories": 105, "protein": 1.3, "carbs": 27, "fat": 0.4
    });
    Mock::given(method("POST"))
        .and(path("/v1/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = ReqwestEstimatorClient::new(&server.uri(), SecretString::new("tok".into()));
    client
        .estimate(Some(&[0xff, 0xd8, 0xff]), None)
        .await
        .expect("estimate");

    let received = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["image_base64"], json!("/9j/"));
    assert!(sent["submitted_at"].as_str().is_some());
}

#[tokio::test]
async fn malformed_estimate_is_an_error_not_a_partial_record() {
    let server = MockServer::start().await;
    // Missing macro fields entirely.
    let body = json!({"food_name": "mystery stew"});
    Mock::given(method("POST"))
        .and(path("/v1/estimate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = ReqwestEstimatorClient::new(&server.uri(), SecretString::new("tok".into()));
    let res = client.estimate(None, Some("stew")).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn estimator_outage_surfaces_as_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/estimate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let client = ReqwestEstimatorClient::new(&server.uri(), SecretString::new("tok".into()));
    let res = client.estimate(None, Some("toast")).await;
    assert!(matches!(res, Err(SheetError::Api { status: 503, .. })));
}
