use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn tag_crud_round_trip() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let created = app
        .post_json_with_token(routes::TAGS, &json!({"name": "web"}), &token)
        .await;
    assert_eq!(created.status, 201, "{}", created.text);
    assert_eq!(created.body["name"], "web");
    let id = created.id();

    let fetched = app.get(&routes::tag(id)).await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body["name"], "web");

    let updated = app
        .put_json_with_token(&routes::tag(id), &json!({"name": "frontend"}), &token)
        .await;
    assert_eq!(updated.status, 200, "{}", updated.text);
    assert_eq!(updated.body["name"], "frontend");

    let deleted = app.delete_with_token(&routes::tag(id), &token).await;
    assert_eq!(deleted.status, 204);
    assert_eq!(app.get(&routes::tag(id)).await.status, 404);
}

#[tokio::test]
async fn duplicate_tag_name_conflicts() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    app.create_tag(&token, "web").await;

    let res = app
        .post_json_with_token(routes::TAGS, &json!({"name": "web"}), &token)
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let res = app
        .post_json_with_token(routes::TAGS, &json!({"name": "   "}), &token)
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn empty_update_payload_returns_current_state() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let id = app.create_tag(&token, "web").await;

    let res = app
        .put_json_with_token(&routes::tag(id), &json!({}), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["name"], "web");
}
