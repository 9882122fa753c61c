use folio::domain::comments::Comment;

use crate::helpers::{create_default_comment, spawn_app};

#[tokio::test]
async fn creating_a_comment_returns_a_201_for_valid_data() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let payload = serde_json::json!({
        "name": "Alice",
        "relationship": "Colleague",
        "message": "Great working with you!",
    });

    let response = client
        .post(app.api_url("/comments"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 201);

    let comment: Comment = response.json().await.expect("Failed to parse response");
    assert_eq!(comment.name, "Alice");
    assert_eq!(comment.relationship.as_deref(), Some("Colleague"));
    assert_eq!(comment.message, "Great working with you!");
}

#[tokio::test]
async fn creating_a_comment_persists_the_data() {
    let app = spawn_app().await;

    let created = create_default_comment(&app, "Hello there").await;

    let fetched = app
        .comment_repo
        .get(created.id)
        .await
        .expect("Failed to fetch comment");
    assert_eq!(fetched.message, "Hello there");
}

#[tokio::test]
async fn empty_relationship_is_stored_as_null() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let payload = serde_json::json!({
        "name": "Bob",
        "relationship": "   ",
        "message": "hi",
    });

    let response = client
        .post(app.api_url("/comments"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 201);
    let comment: Comment = response.json().await.expect("Failed to parse response");
    assert_eq!(comment.relationship, None);
}

#[tokio::test]
async fn blank_fields_are_rejected_with_a_400() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for payload in [
        serde_json::json!({ "name": "", "message": "hi" }),
        serde_json::json!({ "name": "Alice", "message": "   " }),
        serde_json::json!({ "name": "n".repeat(200), "message": "hi" }),
    ] {
        let response = client
            .post(app.api_url("/comments"))
            .json(&payload)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), 400, "payload: {payload}");
    }
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.api_url("/comments"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.api_url("/comments"))
        .header("content-type", "application/json")
        .body(r#"{"name": "Alice", "message": }"#)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn listing_returns_newest_first_and_honours_take() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    create_default_comment(&app, "first").await;
    create_default_comment(&app, "second").await;
    create_default_comment(&app, "third").await;

    let response = client
        .get(app.api_url("/comments?take=2"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let comments: Vec<Comment> = response.json().await.expect("Failed to parse response");
    let messages: Vec<&str> = comments.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["third", "second"]);
}

#[tokio::test]
async fn take_is_capped_and_defaults() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    create_default_comment(&app, "only one").await;

    // A huge take is capped rather than rejected
    let response = client
        .get(app.api_url("/comments?take=100000"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    // No take at all uses the default
    let comments: Vec<Comment> = client
        .get(app.api_url("/comments"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(comments.len(), 1);
}
