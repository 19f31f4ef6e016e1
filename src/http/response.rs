//! Application shell responses.
//!
//! # Responsibilities
//! - Load the shell (index.html) once at startup
//! - Answer deep links with the shell and the right status
//! - Tag responses with the resolved route name
//!
//! # Design Decisions
//! - The shell is held in memory; no per-request disk reads
//! - Not-found routes still get the shell, with status 404

use std::fs;
use std::path::Path;
use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

pub const X_ROUTE_NAME: &str = "x-route-name";

const BUILTIN_SHELL: &str = "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
<title>Portal</title>\n\
</head>\n\
<body>\n\
<div id=\"app\"></div>\n\
</body>\n\
</html>\n";

/// The HTML document every client route is served with.
#[derive(Debug, Clone)]
pub struct Shell {
    html: Arc<str>,
}

impl Shell {
    /// Read `index_file`, or fall back to the built-in document.
    pub fn load(index_file: Option<&Path>) -> std::io::Result<Self> {
        let html = match index_file {
            Some(path) => {
                let html = fs::read_to_string(path)?;
                tracing::info!(path = %path.display(), bytes = html.len(), "Loaded application shell");
                html
            }
            None => BUILTIN_SHELL.to_string(),
        };
        Ok(Self { html: html.into() })
    }

    pub fn builtin() -> Self {
        Self {
            html: BUILTIN_SHELL.into(),
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Shell response with `status`, tagged with `route` when known.
    pub fn respond(&self, status: StatusCode, route: Option<&str>) -> Response {
        let mut response = (
            status,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            self.html.to_string(),
        )
            .into_response();

        if let Some(value) = route.and_then(|name| HeaderValue::from_str(name).ok()) {
            response.headers_mut().insert(X_ROUTE_NAME, value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_index_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html>custom</html>").unwrap();

        let shell = Shell::load(Some(file.path())).unwrap();
        assert_eq!(shell.html(), "<html>custom</html>");
        assert!(Shell::load(Some(Path::new("/no/such/index.html"))).is_err());
    }

    #[test]
    fn test_respond_sets_route_header() {
        let response = Shell::builtin().respond(StatusCode::NOT_FOUND, Some("NotFound"));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[X_ROUTE_NAME], "NotFound");
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
    }
}
