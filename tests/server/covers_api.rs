use folio::domain::covers::{CoverCandidate, CoverSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

fn google_books_volumes() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "items": [
            {
                "id": "vol-1",
                "volumeInfo": {
                    "title": "1984",
                    "authors": ["George Orwell"],
                    "publishedDate": "1949",
                    "description": "A dystopian novel.",
                    "imageLinks": {
                        "thumbnail": "https://books.google.com/books/content/image?id=abc&zoom=1"
                    }
                }
            },
            {
                "id": "vol-2",
                "volumeInfo": {
                    "title": "Nineteen Eighty-Four",
                    "imageLinks": {
                        "smallThumbnail": "https://books.google.com/books/content/small?id=def&zoom=1"
                    }
                }
            },
            {
                "id": "vol-3",
                "volumeInfo": { "title": "No Image Here" }
            }
        ]
    }))
}

#[tokio::test]
async fn search_requires_a_title() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for url in [
        app.api_url("/books/search"),
        app.api_url("/books/search?title="),
        app.api_url("/books/search?author=Orwell"),
    ] {
        let response = client
            .get(url)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 400);
    }
}

#[tokio::test]
async fn search_returns_an_open_library_candidate_from_cover_id() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "title:1984 author:George Orwell"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "docs": [{
                "cover_i": 12345,
                "title": "1984",
                "author_name": ["George Orwell"],
                "first_publish_year": 1949
            }]
        })))
        .mount(&app.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let candidates: Vec<CoverCandidate> = client
        .get(app.api_url("/books/search?title=1984&author=George%20Orwell"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].source, CoverSource::OpenLibrary);
    assert_eq!(
        candidates[0].cover_url,
        "https://covers.openlibrary.org/b/id/12345-L.jpg"
    );
    assert_eq!(candidates[0].author, "George Orwell");
    assert_eq!(candidates[0].published_date, "1949");
}

#[tokio::test]
async fn search_builds_an_isbn_cover_url_when_no_cover_id() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "docs": [{ "isbn": ["9780451524935", "0451524934"] }]
        })))
        .mount(&app.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let candidates: Vec<CoverCandidate> = client
        .get(app.api_url("/books/search?title=1984"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(candidates.len(), 1);
    assert_eq!(
        candidates[0].cover_url,
        "https://covers.openlibrary.org/b/isbn/9780451524935-L.jpg"
    );
}

#[tokio::test]
async fn search_merges_google_candidates_after_open_library() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "docs": [{ "cover_i": 77 }]
        })))
        .mount(&app.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .and(query_param("maxResults", "5"))
        .respond_with(google_books_volumes())
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let candidates: Vec<CoverCandidate> = client
        .get(app.api_url("/books/search?title=1984"))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse response");

    // Open Library first, then the two Google volumes that carry images
    let sources: Vec<CoverSource> = candidates.iter().map(|c| c.source).collect();
    assert_eq!(
        sources,
        vec![
            CoverSource::OpenLibrary,
            CoverSource::GoogleBooks,
            CoverSource::GoogleBooks,
        ]
    );

    // Google thumbnails are upscaled on the way through
    assert_eq!(
        candidates[1].cover_url,
        "https://books.google.com/books/content/image?id=abc&zoom=3&fife=w800"
    );
    assert_eq!(candidates[1].author, "George Orwell");
    assert_eq!(candidates[2].id, "vol-2");
}

#[tokio::test]
async fn search_returns_empty_when_both_sources_fail() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/books/v1/volumes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.api_url("/books/search?title=Whatever"))
        .send()
        .await
        .expect("Failed to execute request");

    // Failures collapse to "no candidates", never to an error response
    assert_eq!(response.status(), 200);
    let candidates: Vec<CoverCandidate> =
        response.json().await.expect("Failed to parse response");
    assert!(candidates.is_empty());
}
