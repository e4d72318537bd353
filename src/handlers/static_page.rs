//! Static index page.

use std::path::Path;

use crate::http::Response;

/// `GET /`: the configured HTML file, byte for byte.
pub async fn static_page(index_path: &Path) -> Response {
    match tokio::fs::read(index_path).await {
        Ok(bytes) => Response::html(bytes),
        Err(e) => {
            tracing::error!(path = %index_path.display(), error = %e, "Failed to read static page");
            Response::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{response::TEXT_HTML, Status};

    #[tokio::test]
    async fn test_serves_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(&path, "<h1>Players</h1>\n").unwrap();

        let response = static_page(&path).await;
        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.content_type, TEXT_HTML);
        assert_eq!(response.body, b"<h1>Players</h1>\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let response = static_page(&dir.path().join("missing.html")).await;
        assert_eq!(response.status, Status::InternalServerError);
    }
}
