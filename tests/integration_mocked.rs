/// Integration tests over the full router with a mocked remote store.
/// Exercises the rendered pages without hitting a real Supabase project.
use btruston_web::config::Config;
use btruston_web::handlers::{self, AppState};
use btruston_web::store::{ProfileStore, LIST_FIELD_TIERS};
use moka::future::Cache;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test config pointing at the mock store.
fn create_test_config(supabase_url: String) -> Config {
    Config {
        site_url: "https://btruston.com".to_string(),
        supabase_url,
        supabase_anon_key: "anon-key".to_string(),
        supabase_service_role_key: Some("service-key".to_string()),
        port: 0,
    }
}

/// Boots the routed app on an ephemeral port and returns its base URL.
async fn spawn_app(mock_uri: String) -> String {
    let config = create_test_config(mock_uri);
    let store = ProfileStore::new(&config.supabase_url, &config.supabase_anon_key).unwrap();
    let preview_store =
        ProfileStore::new(&config.supabase_url, config.preview_image_key()).unwrap();
    let directory_cache = Cache::builder()
        .time_to_live(Duration::from_secs(300))
        .max_capacity(4)
        .build();

    let state = Arc::new(AppState {
        config,
        store,
        preview_store,
        directory_cache,
    });
    let app = handlers::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn directory_rows() -> serde_json::Value {
    json!([
        {
            "id": "p-1", "slug": "acme", "company_name": "Acme Corp",
            "sector": "Steel", "country": "US", "city": "Pittsburgh",
            "tagline": "We make everything"
        },
        {
            "id": "p-2", "slug": "globex", "company_name": "Globex",
            "sector": "Energy", "country": "DE", "city": "Berlin"
        }
    ])
}

async fn mock_directory(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("select", LIST_FIELD_TIERS[0]))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(directory_rows()))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn health_endpoint_reports_service() {
    let mock_server = MockServer::start().await;
    let base = spawn_app(mock_server.uri()).await;

    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn home_renders_directory_cards() {
    let mock_server = MockServer::start().await;
    mock_directory(&mock_server).await;
    let base = spawn_app(mock_server.uri()).await;

    let body = reqwest::get(format!("{}/", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Acme Corp"));
    assert!(body.contains("Globex"));
    assert!(body.contains("/company/acme"));
    assert!(body.contains("2/2"));
}

#[tokio::test]
async fn home_filters_from_query_parameters() {
    let mock_server = MockServer::start().await;
    mock_directory(&mock_server).await;
    let base = spawn_app(mock_server.uri()).await;

    let body = reqwest::get(format!("{}/?q=acme", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Acme Corp"));
    assert!(!body.contains("Globex"));
    // The query also narrows the country facet options.
    assert!(!body.contains(">DE</option>"));

    let body = reqwest::get(format!("{}/?country=DE", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Globex"));
    assert!(!body.contains("Acme Corp"));
}

#[tokio::test]
async fn directory_memo_shared_between_home_and_sitemap() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("select", LIST_FIELD_TIERS[0]))
        .respond_with(ResponseTemplate::new(200).set_body_json(directory_rows()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let base = spawn_app(mock_server.uri()).await;

    assert_eq!(
        reqwest::get(format!("{}/", base)).await.unwrap().status(),
        200
    );
    let resp = reqwest::get(format!("{}/sitemap.xml", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("application/xml"));
    let xml = resp.text().await.unwrap();
    assert!(xml.contains("<loc>https://btruston.com/company/acme</loc>"));
    assert!(xml.contains("<loc>https://btruston.com/company/globex</loc>"));
}

#[tokio::test]
async fn robots_points_at_sitemap() {
    let mock_server = MockServer::start().await;
    let base = spawn_app(mock_server.uri()).await;

    let body = reqwest::get(format!("{}/robots.txt", base))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Allow: /"));
    assert!(body.contains("Sitemap: https://btruston.com/sitemap.xml"));
}

#[tokio::test]
async fn company_page_renders_profile() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("slug", "eq.acme"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p-1", "slug": "acme", "company_name": "Acme Corp",
            "tagline": "We make everything", "website": "acme.example",
            "verification_status": "Approved",
            "services": "casting, forging;; rolling"
        }])))
        .mount(&mock_server)
        .await;

    let base = spawn_app(mock_server.uri()).await;
    let resp = reqwest::get(format!("{}/company/acme", base)).await.unwrap();
    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Acme Corp"));
    assert!(body.contains("Verified"));
    assert!(body.contains("https://acme.example"));
    assert!(body.contains("casting"));
    assert!(body.contains("https://btruston.com/og/company/acme"));
}

#[tokio::test]
async fn unknown_slug_is_not_found_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("slug", "eq.ghost"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let base = spawn_app(mock_server.uri()).await;
    let resp = reqwest::get(format!("{}/company/ghost", base)).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn store_failure_surfaces_generic_error_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let base = spawn_app(mock_server.uri()).await;
    let resp = reqwest::get(format!("{}/company/acme", base)).await.unwrap();
    assert_eq!(resp.status(), 502);
    let body = resp.text().await.unwrap();
    assert!(!body.contains("boom"));
}

#[tokio::test]
async fn preview_image_uses_elevated_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("slug", "eq.acme"))
        .and(header("apikey", "service-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "p-1", "slug": "acme", "company_name": "Acme Corp",
            "blue_tick": true
        }])))
        .mount(&mock_server)
        .await;

    let base = spawn_app(mock_server.uri()).await;
    let resp = reqwest::get(format!("{}/og/company/acme", base)).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap().to_str().unwrap(),
        "image/svg+xml"
    );
    let svg = resp.text().await.unwrap();
    assert!(svg.contains("Acme Corp"));
    assert!(svg.contains("Verified"));
}

#[tokio::test]
async fn preview_image_degrades_on_store_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let base = spawn_app(mock_server.uri()).await;
    let resp = reqwest::get(format!("{}/og/company/lost-co", base)).await.unwrap();

    // Crawlers always get an image, never a 500.
    assert_eq!(resp.status(), 200);
    let svg = resp.text().await.unwrap();
    assert!(svg.contains("lost co"));
}
