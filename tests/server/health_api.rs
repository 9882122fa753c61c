use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_reports_ok() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(app.api_url("/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["ok"], true);
}
