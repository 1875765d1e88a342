//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/index", get(handlers::index::get_index))
        .route("/api/page", get(handlers::page::get_page));

    let sitemap_routes = Router::new()
        .route("/sitemap.xml", get(handlers::sitemap::get_sitemap_index))
        .route(
            "/sitemap_categories.xml",
            get(handlers::sitemap::get_categories_sitemap),
        )
        .route(
            "/sitemap_pages.xml",
            get(handlers::sitemap::get_pages_sitemap),
        );

    security::header_layers()
        .fold(
            Router::new().merge(api_routes).merge(sitemap_routes),
            |router, layer| router.layer(layer),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use folio_site::{Site, SiteOptions};
    use folio_storage::MockStorage;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    const INDEX: &str = r#"{
        "site": {"title": "Printables", "h1": "Free pages", "description": "Print them",
                 "baseUrl": "https://print.example"},
        "categories": [
            {"id": "sea", "name": "Sea"},
            {"id": "animals", "name": "Animals", "description": "Furry"}
        ]
    }"#;

    fn router_with(storage: MockStorage) -> Router {
        let state = Arc::new(AppState {
            site: Site::new(Arc::new(storage), SiteOptions::default()),
            version: "test".to_owned(),
        });
        create_router(state)
    }

    fn router() -> Router {
        router_with(
            MockStorage::new()
                .with_index(INDEX)
                .with_category(
                    "animals",
                    r#"{"pages":[
                        {"id":"cat","title":"Cat","image":"cat.png"},
                        {"id":"dog","title":"Dog","image":"dog.png"}
                    ]}"#,
                )
                .with_category(
                    "sea",
                    r#"{"pages":[{"id":"whale","title":"Whale","image":"whale.png"}]}"#,
                ),
        )
    }

    async fn get(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_home_view() {
        let response = get(router(), "/api/index").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
        let json = body_json(response).await;
        assert_eq!(json["view"], "home");
        assert_eq!(json["title"], "Printables");
        assert_eq!(json["canonicalUrl"], "https://print.example/");
        // categories sorted by name, newest page of each
        assert_eq!(json["grid"][0]["id"], "dog");
        assert_eq!(json["grid"][1]["id"], "whale");
        assert_eq!(json["categories"][0]["href"], "/?c=animals");
    }

    #[tokio::test]
    async fn test_security_headers_on_every_route() {
        for uri in ["/api/index", "/api/page?id=nope", "/sitemap.xml"] {
            let response = get(router(), uri).await;
            let headers = response.headers();

            for &(name, value) in security::SECURITY_HEADERS {
                assert_eq!(headers[name], value, "{uri} {name}");
            }
        }
    }

    #[tokio::test]
    async fn test_category_view() {
        let json = body_json(get(router(), "/api/index?c=animals").await).await;

        assert_eq!(json["view"], "category");
        assert_eq!(json["h1"], "2 Animals");
        assert_eq!(json["grid"][0]["id"], "dog");
        assert_eq!(json["grid"][0]["image"], "categories/animals/dog.png");
    }

    #[tokio::test]
    async fn test_unknown_category_renders_empty_grid() {
        let response = get(router(), "/api/index?c=nope").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["view"], "category");
        assert_eq!(json["grid"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_malformed_category_is_server_error() {
        let router = router_with(
            MockStorage::new()
                .with_index(INDEX)
                .with_category("animals", "not json"),
        );

        let response = get(router, "/api/index?c=animals").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_page_view() {
        let response = get(router(), "/api/page?id=cat&c=animals").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["pageId"], "cat");
        assert_eq!(json["documentTitle"], "Cat | Printables");
        assert_eq!(
            json["canonicalUrl"],
            "https://print.example/page?id=cat&c=animals"
        );
        assert_eq!(json["similar"][0]["id"], "dog");
        assert_eq!(json["more"]["label"], "More Animals");
    }

    #[tokio::test]
    async fn test_page_view_global_scan() {
        let json = body_json(get(router(), "/api/page?id=whale&c=animals").await).await;

        assert_eq!(json["categoryId"], "sea");
    }

    #[tokio::test]
    async fn test_page_not_found() {
        for uri in ["/api/page?id=unicorn", "/api/page"] {
            let response = get(router(), uri).await;

            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            let json = body_json(response).await;
            assert_eq!(json["error"], "Page not found");
        }
    }

    #[tokio::test]
    async fn test_etag_not_modified() {
        let first = get(router(), "/api/index").await;
        let etag = first.headers()[header::ETAG].clone();

        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/index")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_sitemap_index() {
        let response = get(router(), "/sitemap.xml").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/xml; charset=utf-8"
        );
        let xml = body_text(response).await;
        assert!(xml.contains("<sitemapindex"));
        assert!(xml.contains("<loc>https://print.example/sitemap_categories.xml</loc>"));
        assert!(xml.contains("<loc>https://print.example/sitemap_pages.xml?n=1</loc>"));
        assert!(!xml.contains("n=2"));
    }

    #[tokio::test]
    async fn test_categories_sitemap() {
        let xml = body_text(get(router(), "/sitemap_categories.xml").await).await;

        assert!(xml.contains("<loc>https://print.example/</loc>"));
        assert!(xml.contains("<loc>https://print.example/?c=animals</loc>"));
        assert!(xml.contains("<loc>https://print.example/?c=sea</loc>"));
    }

    #[tokio::test]
    async fn test_pages_sitemap() {
        let xml = body_text(get(router(), "/sitemap_pages.xml?n=1").await).await;

        assert!(xml.contains("<loc>https://print.example/page?id=cat&amp;c=animals</loc>"));
        assert!(xml.contains("<loc>https://print.example/page?id=whale&amp;c=sea</loc>"));
    }

    #[tokio::test]
    async fn test_pages_sitemap_invalid_n() {
        for uri in [
            "/sitemap_pages.xml",
            "/sitemap_pages.xml?n=0",
            "/sitemap_pages.xml?n=abc",
            "/sitemap_pages.xml?n=3abc",
        ] {
            let response = get(router(), uri).await;

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        }
    }
}
