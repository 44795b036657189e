//! HTTP server: content pages, sitemap, static assets and the signup API

mod api;
mod pages;

pub use api::client_origin;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::signup::SignupService;
use crate::templates::{PageRenderer, STYLESHEET_PATH};
use crate::Site;

/// Shared request state
pub struct AppState {
    pub site: Site,
    pub renderer: PageRenderer,
    pub signups: SignupService,
}

impl AppState {
    pub fn new(site: Site, signups: SignupService) -> Result<Self> {
        Ok(Self {
            site,
            renderer: PageRenderer::new()?,
            signups,
        })
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.site.static_dir);

    Router::new()
        .route("/", get(pages::home))
        .route("/blog", get(pages::blog_listing))
        .route("/blog/:slug", get(pages::blog_item))
        .route("/compare", get(pages::compare_listing))
        .route("/compare/:slug", get(pages::compare_item))
        .route("/faq", get(pages::faq_listing))
        .route("/faq/:slug", get(pages::faq_item))
        .route("/sitemap.xml", get(pages::sitemap))
        .route(STYLESHEET_PATH, get(pages::stylesheet))
        .route("/api/signup", post(api::signup))
        .nest_service("/static", static_files)
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until Ctrl+C
pub async fn start(site: Site, signups: SignupService, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(site, signups)?);
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!(
        "Serving content from {:?} (site id: {})",
        state.site.content_dir,
        state.signups.site_id()
    );
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, keep serving
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::signup::{MemoryStore, SignupMetadata, SignupStore, StoreError};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    struct Fixture {
        _tmp: TempDir,
        app: Router,
        store: Arc<MemoryStore>,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(content.join("blog")).unwrap();
        fs::create_dir_all(content.join("faq")).unwrap();
        fs::create_dir_all(tmp.path().join("public")).unwrap();

        fs::write(
            content.join("blog/apob-explained.md"),
            "---\ntitle: ApoB Explained\ndescription: Why ApoB matters\ndate: 2024-02-01\n---\n# ApoB\n\nParticle count.\n",
        )
        .unwrap();
        fs::write(
            content.join("faq/lpa.md"),
            "---\ntitle: Lp(a) FAQ\n---\n## Is Lp(a) genetic?\n\nLargely, yes.\n",
        )
        .unwrap();
        fs::write(tmp.path().join("public/robots.txt"), "User-agent: *\n").unwrap();

        let store = Arc::new(MemoryStore::new());
        let site = Site::with_config(tmp.path(), SiteConfig::default());
        let state = AppState::new(site, SignupService::new(store.clone(), "cardioguard")).unwrap();

        Fixture {
            _tmp: tmp,
            app: router(Arc::new(state)),
            store,
        }
    }

    async fn get_page(app: &Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn post_signup(app: &Router, body: &str, forwarded: Option<&str>) -> (StatusCode, Value) {
        let mut request = Request::builder()
            .method("POST")
            .uri("/api/signup")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(ip) = forwarded {
            request = request.header("x-forwarded-for", ip);
        }

        let response = app
            .clone()
            .oneshot(request.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let f = fixture();

        let (status, body) =
            post_signup(&f.app, r#"{"email":"a@b.com"}"#, Some("203.0.113.7")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "success": true }));

        let (status, body) = post_signup(&f.app, r#"{"email":"a@b.com"}"#, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");

        assert_eq!(f.store.list("email_signups:cardioguard"), vec!["a@b.com"]);
        assert_eq!(f.store.counter("email_signups_count:cardioguard"), 1);
        assert_eq!(f.store.hash("email_signup_meta:a@b.com")["ip"], "203.0.113.7");
    }

    #[tokio::test]
    async fn test_signup_rejects_bad_input() {
        let f = fixture();

        for body in [
            r#"{"email":"not-an-email"}"#,
            r#"{"email":""}"#,
            r#"{}"#,
            r#"{"email":42}"#,
            "not json",
        ] {
            let (status, json) = post_signup(&f.app, body, None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
            assert_eq!(json["error"], "Please provide a valid email address");
        }
        assert_eq!(f.store.key_count(), 0);
    }

    #[tokio::test]
    async fn test_signup_without_proxy_headers_records_unknown() {
        let f = fixture();
        let (status, _) = post_signup(&f.app, r#"{"email":"c@d.org"}"#, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(f.store.hash("email_signup_meta:c@d.org")["ip"], "unknown");
    }

    struct UnavailableStore;

    #[async_trait]
    impl SignupStore for UnavailableStore {
        async fn list_emails(&self, _site: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Protocol("connection reset".to_string()))
        }

        async fn append_email(&self, _site: &str, _email: &str) -> Result<(), StoreError> {
            Ok(())
        }

        async fn increment_count(&self, _site: &str) -> Result<i64, StoreError> {
            Ok(1)
        }

        async fn write_metadata(
            &self,
            _email: &str,
            _meta: &SignupMetadata,
        ) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        let tmp = TempDir::new().unwrap();
        let site = Site::with_config(tmp.path(), SiteConfig::default());
        let signups = SignupService::new(Arc::new(UnavailableStore), "cardioguard");
        let app = router(Arc::new(AppState::new(site, signups).unwrap()));

        let (status, body) = post_signup(&app, r#"{"email":"a@b.com"}"#, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Something went wrong. Please try again.");
        assert!(!body["error"].as_str().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_pages() {
        let f = fixture();

        let (status, html) = get_page(&f.app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("signup-form"));

        let (status, html) = get_page(&f.app, "/blog").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#"href="/blog/apob-explained""#));

        let (status, html) = get_page(&f.app, "/blog/apob-explained").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<h1>ApoB</h1>"));

        let (status, html) = get_page(&f.app, "/compare").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Coming Soon"));

        let (status, html) = get_page(&f.app, "/faq/lpa").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains(r#""name":"Is Lp(a) genetic?""#));
    }

    #[tokio::test]
    async fn test_missing_pages_are_404() {
        let f = fixture();

        for uri in ["/blog/nope", "/compare/nope", "/faq/..", "/no/such/page"] {
            let (status, html) = get_page(&f.app, uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
            assert!(html.contains("Page Not Found"));
        }
    }

    #[tokio::test]
    async fn test_sitemap_and_static_files() {
        let f = fixture();

        let response = f
            .app
            .clone()
            .oneshot(Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("application/xml"));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let xml = String::from_utf8(body.to_vec()).unwrap();
        assert!(xml.contains("<loc>https://cardioguard.com/blog</loc>"));

        let response = f
            .app
            .clone()
            .oneshot(Request::builder().uri("/site.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/css"));

        let (status, text) = get_page(&f.app, "/static/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "User-agent: *\n");
    }
}
