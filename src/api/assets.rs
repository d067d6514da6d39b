//! Embedded client bundle
//!
//! In development, falls back to serving from filesystem.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::PathBuf;

const UI_DIR: &str = "ui";

#[derive(Embed)]
#[folder = "ui"]
struct Assets;

/// Serve files under `/assets/`, embedded first, filesystem second
pub async fn serve_static(Path(path): Path<String>) -> Response {
    let path = format!("assets/{}", path.trim_start_matches('/'));
    if path.split('/').any(|segment| segment == "..") {
        return (StatusCode::BAD_REQUEST, "Invalid path").into_response();
    }

    let content = Assets::get(&path)
        .map(|file| file.data.into_owned())
        .or_else(|| std::fs::read(PathBuf::from(UI_DIR).join(&path)).ok());

    match content {
        Some(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    if let Some(content) = Assets::get("index.html") {
        return String::from_utf8(content.data.into_owned()).ok();
    }

    std::fs::read_to_string(PathBuf::from(UI_DIR).join("index.html")).ok()
}
