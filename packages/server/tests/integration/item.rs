use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use server::entity::{brand, category};
use uuid::Uuid;

use crate::common::{TestApp, routes};

fn names(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .map(|i| i["item_name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_returns_joined_detail_with_defaults() {
    let app = TestApp::spawn().await;
    let agolde = app.brand_id("Agolde").await;
    let jeans = app.category_id("Jeans").await;

    let res = app
        .post(
            routes::ITEMS,
            &json!({
                "item_name": "  90s Pinch Waist Jeans ",
                "brand_id": agolde,
                "category_id": jeans,
                "colour": "Washed Black",
                "resale_price_cad": 140,
            }),
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["item_name"], "90s Pinch Waist Jeans");
    assert_eq!(res.body["brand_name"], "Agolde");
    assert_eq!(res.body["display_brand"], "Agolde");
    assert_eq!(res.body["category_name"], "Jeans");
    assert_eq!(res.body["status"], "Keep");
    assert_eq!(res.body["currency"], "CAD");
    assert_eq!(res.body["for_sale"], false);
    assert_eq!(res.body["photo_urls"], json!([]));
    assert_eq!(res.body["estimated_resale_value_cad"].as_f64(), Some(126.0));
}

#[tokio::test]
async fn client_supplied_estimate_is_ignored() {
    let app = TestApp::spawn().await;

    let id = app
        .create_item(json!({
            "item_name": "Kotto Jacket",
            "resale_price_cad": 99.99,
            "estimated_resale_value_cad": 5000,
        }))
        .await;

    let res = app.get(&routes::item(id)).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["estimated_resale_value_cad"].as_f64(), Some(89.99));
}

#[tokio::test]
async fn item_without_resale_price_has_no_estimate() {
    let app = TestApp::spawn().await;
    let id = app
        .create_item(json!({"item_name": "Linen Shirt", "retail_price_cad": 80}))
        .await;

    let res = app.get(&routes::item(id)).await;
    assert!(res.body["estimated_resale_value_cad"].is_null());
}

#[tokio::test]
async fn create_rejects_blank_name() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::ITEMS, &json!({"item_name": "   "})).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
    assert_eq!(res.body["error"], "Item name must be 1-256 characters");
}

#[tokio::test]
async fn create_rejects_unknown_reference() {
    let app = TestApp::spawn().await;
    let res = app
        .post(
            routes::ITEMS,
            &json!({"item_name": "Jeans", "brand_id": Uuid::now_v7()}),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_rejects_subcategory_of_another_category() {
    let app = TestApp::spawn().await;
    let shoes = app.category_id("Shoes").await;
    let subs = app
        .get(&format!("{}?category_id={shoes}", routes::SUBCATEGORIES))
        .await;
    let sneaker_id = subs.body[0]["id"].as_str().unwrap().to_string();

    let res = app
        .post(
            routes::ITEMS,
            &json!({
                "item_name": "Jeans",
                "category_id": app.category_id("Jeans").await,
                "subcategory_id": sneaker_id,
            }),
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
}

#[tokio::test]
async fn create_rejects_photo_from_unlisted_host() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::ITEMS,
            &json!({"item_name": "Jeans", "photo_urls": ["https://evil.example.com/a.jpg"]}),
        )
        .await;
    assert_eq!(res.status, 400);

    let res = app
        .post(
            routes::ITEMS,
            &json!({
                "item_name": "Jeans",
                "photo_urls": ["https://abc.supabase.co/storage/v1/object/public/a.jpg"]
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let res = app
        .client
        .post(app.url(routes::ITEMS))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    let res = crate::common::TestResponse::from_response(res).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_unknown_item_is_not_found() {
    let app = TestApp::spawn().await;
    let res = app.get(&routes::item(Uuid::now_v7())).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "NOT_FOUND");
}

#[tokio::test]
async fn put_replaces_editable_fields() {
    let app = TestApp::spawn().await;
    let id = app
        .create_item(json!({
            "item_name": "Sweater",
            "colour": "Cream",
            "resale_price_cad": 50,
            "status": "Sell",
        }))
        .await;

    let res = app
        .put(
            &routes::item(id),
            &json!({"item_name": "Cashmere Sweater", "status": "Donate"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["item_name"], "Cashmere Sweater");
    assert_eq!(res.body["status"], "Donate");
    assert!(res.body["colour"].is_null());
    assert!(res.body["resale_price_cad"].is_null());
    assert!(res.body["estimated_resale_value_cad"].is_null());
}

#[tokio::test]
async fn put_unknown_item_is_not_found() {
    let app = TestApp::spawn().await;
    let res = app
        .put(&routes::item(Uuid::now_v7()), &json!({"item_name": "x"}))
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn delete_removes_item_but_keeps_reference_rows() {
    let app = TestApp::spawn().await;
    let brands_before = brand::Entity::find().count(&app.db).await.unwrap();
    let categories_before = category::Entity::find().count(&app.db).await.unwrap();

    let keep = app.create_agolde_jeans(json!({"item_name": "Keep me"})).await;
    let doomed = app.create_agolde_jeans(json!({})).await;

    let res = app.delete(&routes::item(doomed)).await;
    assert_eq!(res.status, 204);

    let list = app.get(routes::ITEMS).await;
    assert_eq!(names(&list.body), ["Keep me"]);
    assert_eq!(list.body["data"][0]["id"], keep.to_string());

    assert_eq!(brand::Entity::find().count(&app.db).await.unwrap(), brands_before);
    assert_eq!(
        category::Entity::find().count(&app.db).await.unwrap(),
        categories_before
    );

    let again = app.delete(&routes::item(doomed)).await;
    assert_eq!(again.status, 404);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = TestApp::spawn().await;
    for name in ["First", "Second", "Third"] {
        app.create_item(json!({"item_name": name})).await;
    }

    let res = app.get(routes::ITEMS).await;
    assert_eq!(res.status, 200);
    assert_eq!(names(&res.body), ["Third", "Second", "First"]);
    assert_eq!(res.body["total"], 3);
}

#[tokio::test]
async fn search_matches_colour_case_insensitively() {
    let app = TestApp::spawn().await;
    app.create_item(json!({"item_name": "Jeans", "colour": "Washed Black"}))
        .await;
    app.create_item(json!({"item_name": "Chinos", "colour": "Khaki"}))
        .await;

    let res = app.get(&format!("{}?search=black", routes::ITEMS)).await;
    assert_eq!(names(&res.body), ["Jeans"]);
    assert_eq!(res.body["total_unfiltered"], 2);
}

#[tokio::test]
async fn search_uses_override_brand() {
    let app = TestApp::spawn().await;
    app.create_agolde_jeans(json!({"brand_override_text": "Re/Done"}))
        .await;

    let by_override = app.get(&format!("{}?search=re/done", routes::ITEMS)).await;
    assert_eq!(by_override.body["total"], 1);
    assert_eq!(by_override.body["data"][0]["display_brand"], "Re/Done");
    assert_eq!(by_override.body["data"][0]["brand_name"], "Agolde");
}

#[tokio::test]
async fn filters_narrow_the_list() {
    let app = TestApp::spawn().await;
    app.create_item(json!({"item_name": "Kept", "status": "Keep", "retail_price_cad": 10, "resale_price_cad": 5}))
        .await;
    app.create_item(json!({
        "item_name": "Selling",
        "status": "Sell",
        "photo_urls": [format!("http://{}/api/photos/1_a.jpg", app.addr)],
    }))
    .await;
    app.create_item(json!({"item_name": "Giving", "status": "Donate"}))
        .await;

    let get = |filter: &'static str| {
        let app = &app;
        async move { app.get(&format!("{}?filter={filter}", routes::ITEMS)).await }
    };

    assert_eq!(names(&get("sell").await.body), ["Selling"]);
    assert_eq!(names(&get("donate").await.body), ["Giving"]);
    assert_eq!(names(&get("no-photos").await.body), ["Giving", "Kept"]);
    assert_eq!(names(&get("no-pricing").await.body), ["Giving", "Selling"]);
    assert_eq!(get("all").await.body["total"], 3);

    let bad = get("archived").await;
    assert_eq!(bad.status, 400);
    assert_eq!(bad.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn pricing_upstream_failure_leaves_prices_unchanged() {
    let app = TestApp::spawn_with_llm().await;
    let id = app
        .create_agolde_jeans(json!({"retail_price_cad": 300, "resale_price_cad": 120}))
        .await;
    app.mock_upstream_failure(500).await;

    let res = app.post_empty(&routes::item_pricing(id)).await;
    assert_eq!(res.status, 502, "{}", res.text);
    assert_eq!(res.code(), "AI_FAILED");
    assert_eq!(res.body["error"], "Failed to estimate pricing");

    let item = app.get(&routes::item(id)).await;
    assert_eq!(item.body["retail_price_cad"].as_f64(), Some(300.0));
    assert_eq!(item.body["resale_price_cad"].as_f64(), Some(120.0));
    assert_eq!(item.body["estimated_resale_value_cad"].as_f64(), Some(108.0));
    assert!(item.body["ai_retail_price_raw"].is_null());
}

#[tokio::test]
async fn pricing_writes_prices_and_raw_output() {
    let app = TestApp::spawn_with_llm().await;
    let id = app.create_agolde_jeans(json!({})).await;
    app.mock_prompt("retailPrice", "```json\n{\"retailPrice\": 325}\n```")
        .await;
    app.mock_prompt("resalePrice", "{\"resalePrice\": 140.5}").await;

    let res = app.post_empty(&routes::item_pricing(id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["retail_price_cad"].as_f64(), Some(325.0));
    assert_eq!(res.body["resale_price_cad"].as_f64(), Some(140.5));
    assert_eq!(res.body["estimated_resale_value_cad"].as_f64(), Some(126.45));
    assert_eq!(res.body["ai_retail_price_raw"], "325");
    assert_eq!(res.body["ai_resale_price_raw"], "140.5");
}

#[tokio::test]
async fn pricing_without_brand_is_rejected_before_calling_the_model() {
    let app = TestApp::spawn_with_llm().await;
    let id = app.create_item(json!({"item_name": "Mystery Jeans"})).await;

    let res = app.post_empty(&routes::item_pricing(id)).await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert!(app.llm().received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn pricing_with_ai_disabled_is_unavailable() {
    let app = TestApp::spawn().await;
    let id = app.create_agolde_jeans(json!({})).await;
    let res = app.post_empty(&routes::item_pricing(id)).await;
    assert_eq!(res.status, 503);
    assert_eq!(res.code(), "AI_UNAVAILABLE");

    let res = app.post_empty(&routes::item_listing(id)).await;
    assert_eq!(res.status, 503);
}

#[tokio::test]
async fn incomplete_item_is_rejected_even_with_ai_disabled() {
    let app = TestApp::spawn().await;
    let id = app.create_item(json!({"item_name": "Jeans"})).await;

    let res = app.post_empty(&routes::item_pricing(id)).await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.code(), "VALIDATION_ERROR");

    let res = app.post_empty(&routes::item_listing(id)).await;
    assert_eq!(res.status, 400, "{}", res.text);
}

#[tokio::test]
async fn listing_writes_title_and_description() {
    let app = TestApp::spawn_with_llm().await;
    let id = app.create_agolde_jeans(json!({})).await;
    app.mock_prompt("Your title here", "{\"title\": \"Agolde 90s Pinch Waist Jeans 30\"}")
        .await;
    app.mock_prompt(
        "Your description here",
        "{\"description\": \"High-rise, relaxed leg.\"}",
    )
    .await;

    let res = app.post_empty(&routes::item_listing(id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["ai_listing_title"], "Agolde 90s Pinch Waist Jeans 30");
    assert_eq!(res.body["ai_listing_description"], "High-rise, relaxed leg.");

    let bodies: Vec<String> = app
        .llm()
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect();
    assert!(
        bodies
            .iter()
            .any(|b| b.contains("Excellent (Worn a few times, no visible flaws)")),
        "condition notes missing from prompts"
    );
}

#[tokio::test]
async fn listing_with_bad_reply_writes_nothing() {
    let app = TestApp::spawn_with_llm().await;
    let id = app.create_agolde_jeans(json!({})).await;
    app.mock_prompt("Your title here", "{\"title\": \"Fine\"}").await;
    app.mock_prompt("Your description here", "Sorry, I can't help with that.")
        .await;

    let res = app.post_empty(&routes::item_listing(id)).await;
    assert_eq!(res.status, 502);
    assert_eq!(res.body["error"], "Failed to generate listing");

    let item = app.get(&routes::item(id)).await;
    assert!(item.body["ai_listing_title"].is_null());
}

#[tokio::test]
async fn recognition_stores_raw_result() {
    let app = TestApp::spawn_with_llm().await;
    let id = app.create_agolde_jeans(json!({})).await;
    app.mock_prompt(
        "itemType",
        r#"{"brand": "Agolde", "itemType": "Pinch waist jeans", "category": "Jeans"}"#,
    )
    .await;

    let res = app.post_empty(&routes::item_recognition(id)).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["itemType"], "Pinch waist jeans");

    let item = app.get(&routes::item(id)).await;
    let stored: serde_json::Value =
        serde_json::from_str(item.body["ai_item_recognition"].as_str().unwrap()).unwrap();
    assert_eq!(stored["category"], "Jeans");
}
