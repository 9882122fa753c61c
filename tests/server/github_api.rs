use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{GITHUB_USER, spawn_app};

fn repo_listing() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!([
        {
            "id": 1,
            "name": "folio",
            "html_url": "https://github.com/test-user/folio",
            "description": "Portfolio backend",
            "language": "Rust",
            "stargazers_count": 4,
            "forks_count": 1,
            "updated_at": "2025-07-01T10:00:00Z"
        },
        {
            "id": 2,
            "name": "dotfiles",
            "html_url": "https://github.com/test-user/dotfiles",
            "description": null,
            "language": null,
            "stargazers_count": 0,
            "forks_count": 0,
            "updated_at": "2025-06-01T10:00:00Z"
        }
    ]))
}

#[tokio::test]
async fn overview_aggregates_languages_and_bytes() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{GITHUB_USER}/repos")))
        .and(query_param("per_page", "100"))
        .and(query_param("sort", "updated"))
        .respond_with(repo_listing())
        .mount(&app.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{GITHUB_USER}/folio/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Rust": 5000,
            "Shell": 100
        })))
        .mount(&app.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{GITHUB_USER}/dotfiles/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Shell": 300
        })))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.api_url("/github/overview"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["username"], GITHUB_USER);

    let repos = body["repos"].as_array().expect("repos array");
    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0]["name"], "folio");
    assert_eq!(repos[0]["language"], "Rust");
    // Per-repo languages are ranked by bytes, descending
    assert_eq!(repos[0]["langs"][0], "Rust");
    assert_eq!(repos[0]["langBytes"][0]["bytes"], 5000);
    // A repo with no primary language degrades to "Other"
    assert_eq!(repos[1]["language"], "Other");

    assert_eq!(body["languages"]["Rust"], 1);
    assert_eq!(body["languages"]["Other"], 1);
    assert_eq!(body["languageBytes"]["Rust"], 5000);
    assert_eq!(body["languageBytes"]["Shell"], 400);
}

#[tokio::test]
async fn overview_degrades_single_repo_language_failures() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{GITHUB_USER}/repos")))
        .respond_with(repo_listing())
        .mount(&app.mock_server)
        .await;

    // Both language endpoints are down; the overview still succeeds
    Mock::given(method("GET"))
        .and(path(format!("/repos/{GITHUB_USER}/folio/languages")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{GITHUB_USER}/dotfiles/languages")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let body: serde_json::Value = client
        .get(app.api_url("/github/overview"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    let repos = body["repos"].as_array().expect("repos array");
    assert_eq!(repos.len(), 2);
    assert!(repos[0]["langs"].as_array().expect("langs").is_empty());
    assert_eq!(body["languageBytes"], serde_json::json!({}));
}

#[tokio::test]
async fn overview_surfaces_listing_failure_as_bad_gateway() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{GITHUB_USER}/repos")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.api_url("/github/overview"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 502);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].as_str().expect("error message").contains("GitHub"));
}
