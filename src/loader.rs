//! Document loading from various sources.
//!
//! Handles loading API descriptions from files, strings, and HTTP URLs.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::LoadError;
use crate::types::json_type_name;

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::InvalidJson` if the file isn't valid JSON, or
/// `LoadError::NotAnObject` if the root isn't a JSON object.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!(path = %path.display(), "loading document");
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_document_str(&content)
}

/// Load a document from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON,
/// or `LoadError::NotAnObject` if the root isn't a JSON object.
pub fn load_document_str(content: &str) -> Result<Value, LoadError> {
    let document: Value =
        serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })?;
    ensure_object(document)
}

/// Load a document from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails or the body
/// isn't valid JSON, or `LoadError::NotAnObject` for a non-object root.
#[cfg(feature = "remote")]
pub fn load_document_url(url: &str) -> Result<Value, LoadError> {
    let network_error = |source: reqwest::Error| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    debug!(url, "fetching document");
    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    // Check for HTTP errors before parsing
    let document: Value = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.json::<Value>())
        .map_err(network_error)?;

    ensure_object(document)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a document from a file path or URL.
///
/// Automatically detects whether the source is a URL or file path.
/// URL loading requires the `remote` feature.
///
/// # Errors
///
/// Returns appropriate errors based on the source type.
pub fn load_document_auto(source: &str) -> Result<Value, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_document_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_document(Path::new(source))
    }
}

fn ensure_object(document: Value) -> Result<Value, LoadError> {
    if document.is_object() {
        Ok(document)
    } else {
        Err(LoadError::NotAnObject {
            actual: json_type_name(&document).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn load_document_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"openapi": "3.0.0", "paths": {{}}}}"#).unwrap();

        let document = load_document(file.path()).unwrap();
        assert_eq!(document["openapi"], "3.0.0");
    }

    #[test]
    fn load_document_file_not_found() {
        let result = load_document(Path::new("/nonexistent/openapi.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_document_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid json").unwrap();

        let result = load_document(file.path());
        assert!(matches!(result, Err(LoadError::InvalidJson { .. })));
    }

    #[test]
    fn load_document_str_valid() {
        let document = load_document_str(r#"{"paths": {"/items": {}}}"#).unwrap();
        assert!(document["paths"].get("/items").is_some());
    }

    #[test]
    fn load_document_str_rejects_non_object() {
        let result = load_document_str("[1, 2, 3]");
        assert!(matches!(
            result,
            Err(LoadError::NotAnObject { actual }) if actual == "array"
        ));
    }

    #[test]
    fn is_url_detection() {
        assert!(is_url("https://example.com/openapi.json"));
        assert!(is_url("http://example.com/openapi.json"));
        assert!(!is_url("/path/to/openapi.json"));
        assert!(!is_url("./openapi.json"));
        assert!(!is_url("openapi.json"));
    }

    #[test]
    fn load_document_auto_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"components": {{}}}}"#).unwrap();

        let document = load_document_auto(file.path().to_str().unwrap()).unwrap();
        assert!(document.get("components").is_some());
    }

    #[cfg(feature = "remote")]
    mod remote {
        use super::*;

        #[test]
        fn load_document_url_valid() {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/openapi.json")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(r#"{"paths": {"/items": {"get": {}}}}"#)
                .create();

            let url = format!("{}/openapi.json", server.url());
            let document = load_document_url(&url).unwrap();
            assert!(document["paths"]["/items"].get("get").is_some());
            mock.assert();
        }

        #[test]
        fn load_document_url_404() {
            let mut server = mockito::Server::new();
            let _mock = server.mock("GET", "/missing.json").with_status(404).create();

            let url = format!("{}/missing.json", server.url());
            let result = load_document_url(&url);
            assert!(matches!(result, Err(LoadError::NetworkError { .. })));
        }

        #[test]
        fn load_document_url_rejects_non_object() {
            let mut server = mockito::Server::new();
            let _mock = server
                .mock("GET", "/list.json")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body("[]")
                .create();

            let url = format!("{}/list.json", server.url());
            let result = load_document_auto(&url);
            assert!(matches!(result, Err(LoadError::NotAnObject { .. })));
        }
    }
}
