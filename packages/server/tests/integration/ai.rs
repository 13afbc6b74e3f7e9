use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestApp, llm_reply, routes};

fn jeans() -> serde_json::Value {
    json!({
        "brandName": "Agolde",
        "itemName": "90s Pinch Waist Jeans",
        "categoryName": "Jeans",
        "conditionLabel": "Excellent"
    })
}

#[tokio::test]
async fn pricing_returns_both_estimates() {
    let app = TestApp::spawn_with_llm().await;
    app.mock_prompt("retailPrice", "{\"retailPrice\": 325}").await;
    app.mock_prompt("resalePrice", "```json\n{\"resalePrice\": 140}\n```")
        .await;

    let res = app.post(routes::AI_PRICING, &jeans()).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body, json!({"retailPrice": 325.0, "resalePrice": 140.0}));
    assert_eq!(app.llm().received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn pricing_missing_fields_is_bad_request() {
    let app = TestApp::spawn_with_llm().await;
    let res = app
        .post(routes::AI_PRICING, &json!({"brandName": "Agolde"}))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
    assert!(
        res.body["error"]
            .as_str()
            .unwrap()
            .starts_with("Missing required fields")
    );
    assert!(app.llm().received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn pricing_upstream_error_is_generic() {
    let app = TestApp::spawn_with_llm().await;
    app.mock_upstream_failure(401).await;

    let res = app.post(routes::AI_PRICING, &jeans()).await;
    assert_eq!(res.status, 502);
    assert_eq!(res.body["error"], "Failed to estimate pricing");
    assert!(!res.text.contains("upstream exploded"));
}

#[tokio::test]
async fn one_failed_price_fails_the_estimate() {
    let app = TestApp::spawn_with_llm().await;
    app.mock_prompt("retailPrice", "{\"retailPrice\": 325}").await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_string_contains("resalePrice"))
        .respond_with(ResponseTemplate::new(529))
        .mount(app.llm())
        .await;

    let res = app.post(routes::AI_PRICING, &jeans()).await;
    assert_eq!(res.status, 502);
}

#[tokio::test]
async fn wrong_reply_shape_is_a_failure() {
    let app = TestApp::spawn_with_llm().await;
    app.mock_prompt("retailPrice", "{\"price\": 325}").await;
    app.mock_prompt("resalePrice", "{\"resalePrice\": 140}").await;

    let res = app.post(routes::AI_PRICING, &jeans()).await;
    assert_eq!(res.status, 502);
    assert_eq!(res.code(), "AI_FAILED");
}

#[tokio::test]
async fn listing_returns_title_and_description() {
    let app = TestApp::spawn_with_llm().await;
    app.mock_prompt("Your title here", "{\"title\": \"Agolde – Jeans – 30\"}")
        .await;
    app.mock_prompt("Your description here", "{\"description\": \"Great jeans.\"}")
        .await;

    let mut body = jeans();
    body["size"] = json!("30");
    body["colour"] = json!("Washed Black");
    let res = app.post(routes::AI_LISTING, &body).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["title"], "Agolde – Jeans – 30");
    assert_eq!(res.body["description"], "Great jeans.");
}

#[tokio::test]
async fn listing_requires_size_and_colour() {
    let app = TestApp::spawn_with_llm().await;
    let res = app.post(routes::AI_LISTING, &jeans()).await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn recognize_accepts_empty_input() {
    let app = TestApp::spawn_with_llm().await;
    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(body_string_contains("Item Name: Unknown"))
        .respond_with(llm_reply(
            r#"{"itemType": "Denim jacket", "category": "Outerwear", "colour": "Indigo"}"#,
        ))
        .mount(app.llm())
        .await;

    let res = app.post(routes::AI_RECOGNIZE, &json!({})).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["itemType"], "Denim jacket");
    assert_eq!(res.body["colour"], "Indigo");
}

#[tokio::test]
async fn recognize_rejects_invalid_photo() {
    let app = TestApp::spawn_with_llm().await;
    let res = app
        .post(routes::AI_RECOGNIZE, &json!({"photoBase64": "not base64!!"}))
        .await;
    assert_eq!(res.status, 400);
    assert!(app.llm().received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn ai_routes_are_unavailable_without_a_key() {
    let app = TestApp::spawn().await;
    let mut listing = jeans();
    listing["size"] = json!("30");
    listing["colour"] = json!("Washed Black");

    for (route, body) in [
        (routes::AI_RECOGNIZE, json!({})),
        (routes::AI_PRICING, jeans()),
        (routes::AI_LISTING, listing),
    ] {
        let res = app.post(route, &body).await;
        assert_eq!(res.status, 503, "{route}");
        assert_eq!(res.code(), "AI_UNAVAILABLE");
    }
}

#[tokio::test]
async fn incomplete_requests_are_rejected_even_without_a_key() {
    let app = TestApp::spawn().await;
    for (route, body) in [
        (routes::AI_PRICING, json!({"brandName": "Agolde"})),
        (routes::AI_LISTING, jeans()),
    ] {
        let res = app.post(route, &body).await;
        assert_eq!(res.status, 400, "{route}");
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}
