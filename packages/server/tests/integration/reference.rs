use crate::common::{TestApp, routes};

fn field<'a>(body: &'a serde_json::Value, key: &str) -> Vec<&'a str> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|v| v[key].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn brands_are_sorted_by_name() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::BRANDS).await;
    assert_eq!(res.status, 200);

    let names = field(&res.body, "name");
    assert!(names.contains(&"Agolde"));
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[tokio::test]
async fn conditions_are_best_first() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::CONDITIONS).await;
    assert_eq!(res.status, 200);

    let scores: Vec<i64> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["score"].as_i64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    assert!(field(&res.body, "label").contains(&"Excellent"));
}

#[tokio::test]
async fn categories_carry_body_area() {
    let app = TestApp::spawn().await;
    let res = app.get(routes::CATEGORIES).await;
    let jeans = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "Jeans")
        .expect("Jeans category");
    assert_eq!(jeans["body_area"], "Bottom");
}

#[tokio::test]
async fn subcategories_filter_by_category() {
    let app = TestApp::spawn().await;
    let shoes = app.category_id("Shoes").await;

    let res = app
        .get(&format!("{}?category_id={shoes}", routes::SUBCATEGORIES))
        .await;
    assert_eq!(res.status, 200);
    let subs = res.body.as_array().unwrap();
    assert!(!subs.is_empty());
    assert!(subs.iter().all(|s| s["category_id"] == shoes.to_string()));

    let all = app.get(routes::SUBCATEGORIES).await;
    assert!(all.body.as_array().unwrap().len() > subs.len());
}

#[tokio::test]
async fn reference_bundle_matches_individual_lists() {
    let app = TestApp::spawn().await;
    let bundle = app.get(routes::REFERENCE).await;
    assert_eq!(bundle.status, 200);

    assert_eq!(bundle.body["brands"], app.get(routes::BRANDS).await.body);
    assert_eq!(bundle.body["categories"], app.get(routes::CATEGORIES).await.body);
    assert_eq!(
        bundle.body["subcategories"],
        app.get(routes::SUBCATEGORIES).await.body
    );
    assert_eq!(bundle.body["conditions"], app.get(routes::CONDITIONS).await.body);
}

#[tokio::test]
async fn seeding_twice_adds_nothing() {
    let app = TestApp::spawn().await;
    let before = app.get(routes::REFERENCE).await.body;

    server::seed::seed_reference_data(&app.db).await.unwrap();

    let after = app.get(routes::REFERENCE).await.body;
    assert_eq!(before, after);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;
    let res = app.get("/api-docs/openapi.json").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["info"]["title"], "Closet Worthy API");
    assert!(res.body["paths"]["/api/items/{id}/pricing"].is_object());
}
