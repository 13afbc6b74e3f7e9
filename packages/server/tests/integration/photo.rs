use serde_json::json;

use crate::common::{TestApp, routes};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

fn key_of(url: &str) -> &str {
    url.rsplit('/').next().unwrap()
}

#[tokio::test]
async fn upload_then_download() {
    let app = TestApp::spawn().await;

    let res = app
        .upload(vec![
            ("front.png", PNG_BYTES.to_vec()),
            ("Back Shot.JPG", b"jpeg bytes".to_vec()),
        ])
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let urls: Vec<String> = serde_json::from_value(res.body["urls"].clone()).unwrap();
    assert_eq!(urls.len(), 2);
    let prefix = format!("http://{}/api/photos/", app.addr);
    assert!(urls.iter().all(|u| u.starts_with(&prefix)), "{urls:?}");
    assert!(key_of(&urls[0]).ends_with("_front.png"));
    assert!(key_of(&urls[1]).ends_with(".jpg"));

    let res = app.client.get(&urls[0]).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "image/png");
    assert_eq!(
        res.headers()["etag"].to_str().unwrap(),
        format!("\"{}\"", key_of(&urls[0]))
    );
    assert!(
        res.headers()["cache-control"]
            .to_str()
            .unwrap()
            .contains("immutable")
    );
    assert_eq!(res.bytes().await.unwrap().as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn matching_etag_returns_not_modified() {
    let app = TestApp::spawn().await;
    let res = app.upload(vec![("front.png", PNG_BYTES.to_vec())]).await;
    let url = res.body["urls"][0].as_str().unwrap().to_string();
    let etag = format!("\"{}\"", key_of(&url));

    let res = app
        .client
        .get(&url)
        .header("If-None-Match", etag)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 304);
}

#[tokio::test]
async fn same_filename_twice_gets_distinct_urls() {
    let app = TestApp::spawn().await;
    let res = app
        .upload(vec![
            ("front.png", PNG_BYTES.to_vec()),
            ("front.png", b"second".to_vec()),
        ])
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_ne!(res.body["urls"][0], res.body["urls"][1]);
}

#[tokio::test]
async fn non_image_is_rejected() {
    let app = TestApp::spawn().await;
    let res = app.upload(vec![("notes.txt", b"hello".to_vec())]).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn oversized_photo_is_rejected() {
    let app = TestApp::spawn().await;
    let res = app
        .upload(vec![("huge.jpg", vec![0u8; 64 * 1024 + 1])])
        .await;
    assert_eq!(res.status, 413, "{}", res.text);
    assert_eq!(res.code(), "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let app = TestApp::spawn().await;
    let form = reqwest::multipart::Form::new().text("note", "no files here");
    let res = app
        .client
        .post(app.url(routes::PHOTOS))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn missing_and_malformed_keys() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/photos/1700000000000_gone.jpg").await;
    assert_eq!(res.status, 404);
    assert_eq!(res.code(), "NOT_FOUND");

    let res = app.get("/api/photos/bad%20key.jpg").await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn uploaded_url_is_accepted_on_an_item() {
    let app = TestApp::spawn().await;
    let res = app.upload(vec![("front.png", PNG_BYTES.to_vec())]).await;
    let url = res.body["urls"][0].clone();

    let id = app
        .create_item(json!({"item_name": "Jeans", "photo_urls": [url]}))
        .await;
    let item = app.get(&routes::item(id)).await;
    assert_eq!(item.body["photo_urls"][0], url);
}

#[tokio::test]
async fn failure_part_way_keeps_earlier_files() {
    let app = TestApp::spawn().await;
    let res = app
        .upload(vec![
            ("front.png", PNG_BYTES.to_vec()),
            ("notes.txt", b"hello".to_vec()),
        ])
        .await;
    assert_eq!(res.status, 400, "{}", res.text);

    let stored: Vec<String> = std::fs::read_dir(app.photo_dir())
        .unwrap()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().unwrap().is_file())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(stored.len(), 1, "{stored:?}");
    assert!(stored[0].ends_with("_front.png"));

    let res = app.get(&format!("{}/{}", routes::PHOTOS, stored[0])).await;
    assert_eq!(res.status, 200);
}

#[tokio::test]
async fn deleting_an_item_keeps_its_photos() {
    let app = TestApp::spawn().await;
    let res = app.upload(vec![("front.png", PNG_BYTES.to_vec())]).await;
    let url = res.body["urls"][0].as_str().unwrap().to_string();

    let id = app
        .create_item(json!({"item_name": "Jeans", "photo_urls": [url]}))
        .await;
    assert_eq!(app.delete(&routes::item(id)).await.status, 204);

    let res = app.client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), 200);
}
