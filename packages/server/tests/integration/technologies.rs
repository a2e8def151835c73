use crate::common::{TestApp, png_bytes, routes};

#[tokio::test]
async fn create_technology_with_icon() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app
        .post_form_with_token(
            routes::TECHNOLOGIES,
            &[("name", "Python")],
            &[("icon", "icon.png", png_bytes())],
            &token,
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["name"], "Python");
    let icon = res.body["icon"].as_str().unwrap();
    assert!(icon.starts_with("/static/images/"), "got {icon}");
    assert!(icon.ends_with(".png"), "got {icon}");
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let no_icon = app
        .post_form_with_token(routes::TECHNOLOGIES, &[("name", "Python")], &[], &token)
        .await;
    assert_eq!(no_icon.status, 400);
    assert_eq!(no_icon.body["code"], "VALIDATION_ERROR");

    let no_name = app
        .post_form_with_token(
            routes::TECHNOLOGIES,
            &[],
            &[("icon", "icon.png", png_bytes())],
            &token,
        )
        .await;
    assert_eq!(no_name.status, 400);
}

#[tokio::test]
async fn create_rejects_non_image_payload_and_stores_nothing() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app
        .post_form_with_token(
            routes::TECHNOLOGIES,
            &[("name", "Python")],
            &[("icon", "icon.png", b"not an image at all".to_vec())],
            &token,
        )
        .await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert_eq!(app.stored_asset_count(), 0);
}

#[tokio::test]
async fn truncated_image_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let png = png_bytes();
    let truncated = png[..png.len() / 2].to_vec();

    let res = app
        .post_form_with_token(
            routes::TECHNOLOGIES,
            &[("name", "Python")],
            &[("icon", "icon.png", truncated)],
            &token,
        )
        .await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(app.stored_asset_count(), 0);
}

#[tokio::test]
async fn duplicate_name_conflicts() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    app.create_technology(&token, "Rust").await;

    let res = app
        .post_form_with_token(
            routes::TECHNOLOGIES,
            &[("name", "Rust")],
            &[("icon", "icon.png", png_bytes())],
            &token,
        )
        .await;

    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.body["code"], "CONFLICT");
    // The conflicting upload was rolled back.
    assert_eq!(app.stored_asset_count(), 1);
}

#[tokio::test]
async fn list_and_get() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let first = app.create_technology(&token, "Rust").await;
    let second = app.create_technology(&token, "Python").await;

    let list = app.get(routes::TECHNOLOGIES).await;
    assert_eq!(list.status, 200);
    let items = list.body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Insertion order.
    assert_eq!(items[0]["id"].as_i64().unwrap() as i32, first);
    assert_eq!(items[1]["id"].as_i64().unwrap() as i32, second);

    let limited = app.get("/technologies/?skip=1&limit=1").await;
    let items = limited.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Python");

    let single = app.get(&routes::technology(first)).await;
    assert_eq!(single.status, 200);
    assert_eq!(single.body["name"], "Rust");

    let missing = app.get(&routes::technology(9999)).await;
    assert_eq!(missing.status, 404);
}

#[tokio::test]
async fn update_is_partial_and_idempotent() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let id = app.create_technology(&token, "OldName").await;
    let before = app.get(&routes::technology(id)).await;
    let original_icon = before.body["icon"].as_str().unwrap().to_string();

    let first = app
        .put_form_with_token(&routes::technology(id), &[("name", "NewName")], &[], &token)
        .await;
    assert_eq!(first.status, 200, "{}", first.text);
    assert_eq!(first.body["name"], "NewName");
    // Untouched field survives.
    assert_eq!(first.body["icon"], original_icon.as_str());

    // Applying the same partial update twice leaves the same state.
    let second = app
        .put_form_with_token(&routes::technology(id), &[("name", "NewName")], &[], &token)
        .await;
    assert_eq!(second.status, 200);
    assert_eq!(second.body["name"], first.body["name"]);
    assert_eq!(second.body["icon"], first.body["icon"]);
}

#[tokio::test]
async fn updating_icon_replaces_the_old_asset() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let id = app.create_technology(&token, "Rust").await;
    let before = app.get(&routes::technology(id)).await;
    let original_icon = before.body["icon"].as_str().unwrap().to_string();
    assert_eq!(app.stored_asset_count(), 1);

    let res = app
        .put_form_with_token(
            &routes::technology(id),
            &[],
            &[("icon", "new.png", png_bytes())],
            &token,
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let new_icon = res.body["icon"].as_str().unwrap();
    assert_ne!(new_icon, original_icon);

    // Old asset gone, new one live.
    assert_eq!(app.stored_asset_count(), 1);
    assert_eq!(app.get(&original_icon).await.status, 404);
    assert_eq!(app.get(new_icon).await.status, 200);
}

#[tokio::test]
async fn update_missing_technology_is_404() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app
        .put_form_with_token(&routes::technology(42), &[("name", "x")], &[], &token)
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn delete_removes_row_and_asset() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let id = app.create_technology(&token, "Rust").await;
    let icon = app.get(&routes::technology(id)).await.body["icon"]
        .as_str()
        .unwrap()
        .to_string();

    let res = app.delete_with_token(&routes::technology(id), &token).await;
    assert_eq!(res.status, 204);

    assert_eq!(app.get(&routes::technology(id)).await.status, 404);
    assert_eq!(app.get(&icon).await.status, 404);
    assert_eq!(app.stored_asset_count(), 0);

    let again = app.delete_with_token(&routes::technology(id), &token).await;
    assert_eq!(again.status, 404);
}
