//! HTML page handlers

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use super::AppState;
use crate::content::{ContentItem, ContentType};
use crate::templates;

/// `GET /`
pub async fn home(State(state): State<Arc<AppState>>) -> Response {
    html_page(state.renderer.home(&state.site.config))
}

/// `GET /blog`, `/compare`, `/faq`
pub async fn listing(state: Arc<AppState>, content_type: ContentType) -> Response {
    let items = list_items(&state, content_type).await;
    html_page(
        state
            .renderer
            .listing(&state.site.config, content_type, &items),
    )
}

/// `GET /blog/:slug`, `/compare/:slug`, `/faq/:slug`
pub async fn item(state: Arc<AppState>, content_type: ContentType, slug: String) -> Response {
    match find_item(&state, content_type, slug).await {
        Some(item) => html_page(state.renderer.item(&state.site.config, &item)),
        None => not_found_page(&state),
    }
}

/// `GET /sitemap.xml`
pub async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        state.site.sitemap(),
    )
        .into_response()
}

/// `GET /site.css`
pub async fn stylesheet() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        templates::STYLESHEET,
    )
        .into_response()
}

/// Fallback for unknown paths
pub async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    not_found_page(&state)
}

fn not_found_page(state: &AppState) -> Response {
    match state.renderer.not_found(&state.site.config) {
        Ok(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
        Err(e) => render_failure(e),
    }
}

fn html_page(rendered: anyhow::Result<String>) -> Response {
    match rendered {
        Ok(body) => Html(body).into_response(),
        Err(e) => render_failure(e),
    }
}

fn render_failure(e: anyhow::Error) -> Response {
    tracing::error!("Template rendering failed: {:#}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
}

/// File reads and markdown rendering run on the blocking pool
async fn list_items(state: &AppState, content_type: ContentType) -> Vec<ContentItem> {
    let loader = state.site.loader();
    match tokio::task::spawn_blocking(move || loader.list_all(content_type)).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!("Loading {} listing panicked: {}", content_type, e);
            Vec::new()
        }
    }
}

async fn find_item(
    state: &AppState,
    content_type: ContentType,
    slug: String,
) -> Option<ContentItem> {
    let loader = state.site.loader();
    match tokio::task::spawn_blocking(move || loader.get_by_slug(content_type, &slug)).await {
        Ok(item) => item,
        Err(e) => {
            tracing::error!("Loading {} item panicked: {}", content_type, e);
            None
        }
    }
}

// Route adapters binding a content type to the generic handlers

pub async fn blog_listing(State(state): State<Arc<AppState>>) -> Response {
    listing(state, ContentType::Article).await
}

pub async fn compare_listing(State(state): State<Arc<AppState>>) -> Response {
    listing(state, ContentType::Comparison).await
}

pub async fn faq_listing(State(state): State<Arc<AppState>>) -> Response {
    listing(state, ContentType::Faq).await
}

pub async fn blog_item(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    item(state, ContentType::Article, slug).await
}

pub async fn compare_item(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    item(state, ContentType::Comparison, slug).await
}

pub async fn faq_item(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    item(state, ContentType::Faq, slug).await
}
