//! The single-page question form

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET / - Question page
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
