use axum::response::Html;

/// Upload form bundled into the binary at build time.
static INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Handle `GET /`.
///
/// Only registered when `view_index` is enabled; otherwise the path
/// falls through to the 404 fallback.
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
