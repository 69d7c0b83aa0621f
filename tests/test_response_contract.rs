use async_trait::async_trait;
use recipe_scrape::fetchers::Renderer;
use recipe_scrape::model::RawPage;
use recipe_scrape::{
    OpaqueTokenIssuer, RecipeScraper, ScrapeError, ScrapeResponse, ScraperConfig, TokenIssuer,
};
use serde_json::json;

struct UnusedRenderer;

#[async_trait]
impl Renderer for UnusedRenderer {
    async fn render(&self, _url: &str) -> Result<RawPage, ScrapeError> {
        Err(ScrapeError::Render("browser unavailable".to_string()))
    }
}

struct RefusingIssuer;

impl TokenIssuer for RefusingIssuer {
    fn issue(&self, _user_id: &str) -> Result<String, ScrapeError> {
        Err(ScrapeError::Token("signing key missing".to_string()))
    }
}

fn scraper() -> RecipeScraper<UnusedRenderer> {
    RecipeScraper::with_renderer(&ScraperConfig::default(), UnusedRenderer).unwrap()
}

async fn soup_server(expected_hits: usize) -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/soup")
        .expect(expected_hits)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(
            r#"<html><head><script type="application/ld+json">{"@type":"Recipe","name":"Soup"}</script></head><body></body></html>"#,
        )
        .create_async()
        .await;
    (server, mock)
}

#[tokio::test]
async fn test_success_carries_recipe_and_token() {
    let (server, _m) = soup_server(1).await;
    let url = format!("{}/soup", server.url());

    let response = scraper().respond(&url, "user-42", &OpaqueTokenIssuer).await;

    assert_eq!(response.status_code(), 200);
    let ScrapeResponse::Success { recipe_data, token } = &response else {
        panic!("expected success, got {:?}", response);
    };
    assert_eq!(recipe_data.name, "Soup");
    assert!(token.starts_with("user-42."));

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["recipe_data"]["name"], "Soup");
    assert_eq!(body["recipe_data"]["recipeIngredient"], json!([]));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_not_found_is_generic_server_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;

    let response = scraper()
        .respond(
            &format!("{}/missing", server.url()),
            "user-42",
            &OpaqueTokenIssuer,
        )
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"error": "Internal Server Error"})
    );
}

#[tokio::test]
async fn test_render_failure_looks_like_any_other_failure() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/spa")
        .with_status(200)
        .with_body("<html><body><div id=\"root\"></div></body></html>")
        .create_async()
        .await;

    let response = scraper()
        .respond(&format!("{}/spa", server.url()), "user-42", &OpaqueTokenIssuer)
        .await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"error": "Internal Server Error"})
    );
}

#[tokio::test]
async fn test_token_failure_fails_the_request() {
    let (server, mock) = soup_server(0).await;

    let response = scraper()
        .respond(&format!("{}/soup", server.url()), "user-42", &RefusingIssuer)
        .await;

    assert_eq!(response.status_code(), 500);
    // the token is issued before the page is requested
    mock.assert_async().await;
}
