use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn empty_closet_has_zero_metrics() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::DASHBOARD).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["metrics"]["total_items"], 0);
    assert_eq!(res.body["metrics"]["total_retail_value"].as_f64(), Some(0.0));
    assert_eq!(res.body["value_by_brand"], json!([]));
    assert_eq!(res.body["value_by_category"], json!([]));
}

#[tokio::test]
async fn metrics_and_breakdowns() {
    let app = TestApp::spawn().await;
    let photo = format!("http://{}/api/photos/1_front.jpg", app.addr);

    app.create_agolde_jeans(json!({
        "status": "Sell",
        "retail_price_cad": 325,
        "resale_price_cad": 140,
        "photo_urls": [photo],
    }))
    .await;
    app.create_agolde_jeans(json!({
        "item_name": "Riley Jeans",
        "retail_price_cad": 300,
    }))
    .await;
    app.create_item(json!({
        "item_name": "Old Scarf",
        "status": "Donate",
        "resale_price_cad": 10,
    }))
    .await;

    let res = app.get(routes::DASHBOARD).await;
    assert_eq!(res.status, 200, "{}", res.text);

    let m = &res.body["metrics"];
    assert_eq!(m["total_items"], 3);
    assert_eq!(m["total_retail_value"].as_f64(), Some(625.0));
    assert_eq!(m["total_resale_value"].as_f64(), Some(135.0));
    assert_eq!(m["items_to_sell"], 1);
    assert_eq!(m["items_to_photograph"], 2);
    // Only the first item has both prices.
    assert_eq!(m["items_to_price"], 2);

    assert_eq!(
        res.body["value_by_brand"],
        json!([{"name": "Agolde", "value": 126}, {"name": "Unknown", "value": 9}])
    );
    assert_eq!(
        res.body["value_by_category"],
        json!([{"name": "Jeans", "value": 126}, {"name": "Unknown", "value": 9}])
    );
}

#[tokio::test]
async fn brand_breakdown_prefers_override_text() {
    let app = TestApp::spawn().await;
    app.create_agolde_jeans(json!({
        "brand_override_text": "Agolde x Re/Done",
        "resale_price_cad": 200,
    }))
    .await;

    let res = app.get(routes::DASHBOARD).await;
    assert_eq!(res.body["value_by_brand"][0]["name"], "Agolde x Re/Done");
    assert_eq!(res.body["value_by_brand"][0]["value"], 180);
}
