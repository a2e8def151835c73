use crate::common::{TestApp, png_bytes, routes};

async fn create_certificate(app: &TestApp, token: &str, title: &str) -> crate::common::TestResponse {
    app.post_form_with_token(
        routes::CERTIFICATES,
        &[("title", title), ("school", "Test University")],
        &[("image", "cert.png", png_bytes())],
        token,
    )
    .await
}

#[tokio::test]
async fn create_and_get_certificate() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = create_certificate(&app, &token, "Rust Certification").await;
    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["title"], "Rust Certification");
    assert_eq!(res.body["school"], "Test University");
    assert!(res.body["link"].is_null());

    let fetched = app.get(&routes::certificate(res.id())).await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body["title"], "Rust Certification");
}

#[tokio::test]
async fn create_without_image_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app
        .post_form_with_token(
            routes::CERTIFICATES,
            &[("title", "x"), ("school", "y")],
            &[],
            &token,
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn link_can_be_set_and_cleared() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let id = create_certificate(&app, &token, "Cert").await.id();

    let set = app
        .put_form_with_token(
            &routes::certificate(id),
            &[("link", "https://example.com/verify/123")],
            &[],
            &token,
        )
        .await;
    assert_eq!(set.status, 200, "{}", set.text);
    assert_eq!(set.body["link"], "https://example.com/verify/123");

    // Empty value clears the optional field.
    let cleared = app
        .put_form_with_token(&routes::certificate(id), &[("link", "")], &[], &token)
        .await;
    assert_eq!(cleared.status, 200);
    assert!(cleared.body["link"].is_null());
}

#[tokio::test]
async fn delete_certificate_removes_entity_and_image() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let created = create_certificate(&app, &token, "Doomed").await;
    let id = created.id();
    let image = created.body["image"].as_str().unwrap().to_string();
    assert_eq!(app.get(&image).await.status, 200);

    let res = app.delete_with_token(&routes::certificate(id), &token).await;
    assert_eq!(res.status, 204);

    assert_eq!(app.get(&routes::certificate(id)).await.status, 404);
    assert_eq!(app.get(&image).await.status, 404);
    assert_eq!(app.stored_asset_count(), 0);
}

#[tokio::test]
async fn delete_missing_certificate_is_404() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app.delete_with_token(&routes::certificate(77), &token).await;
    assert_eq!(res.status, 404);
}
