use crate::common::{TestApp, png_bytes, routes};

#[tokio::test]
async fn stored_image_round_trips_byte_identical() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let id = app.create_technology(&token, "Rust").await;
    let icon = app.get(&routes::technology(id)).await.body["icon"]
        .as_str()
        .unwrap()
        .to_string();

    let res = app
        .client
        .get(format!("http://{}{}", app.addr, icon))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(
        res.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/png"
    );
    let etag = res.headers().get("etag").unwrap().to_str().unwrap().to_string();
    let body = res.bytes().await.unwrap();
    assert_eq!(body.as_ref(), png_bytes().as_slice());

    // Conditional fetch with the returned ETag short-circuits.
    let cached = app
        .client
        .get(format!("http://{}{}", app.addr, icon))
        .header("If-None-Match", etag)
        .send()
        .await
        .unwrap();
    assert_eq!(cached.status().as_u16(), 304);
}

#[tokio::test]
async fn unknown_keys_are_not_found() {
    let app = TestApp::spawn().await;

    // Well-formed but unknown key.
    let res = app
        .get("/static/images/550e8400-e29b-41d4-a716-446655440000.png")
        .await;
    assert_eq!(res.status, 404);

    // Not a key at all.
    let res = app.get("/static/images/whatever.png").await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    // Larger than the 5 MB test cap, shaped like a PNG header so it reaches
    // the size check rather than failing multipart parsing.
    let mut huge = png_bytes();
    huge.resize(6 * 1024 * 1024, 0);

    let res = app
        .post_form_with_token(
            routes::TECHNOLOGIES,
            &[("name", "Huge")],
            &[("icon", "huge.png", huge)],
            &token,
        )
        .await;
    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(app.stored_asset_count(), 0);
}
