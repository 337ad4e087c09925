use crate::utils::error::{BoxLayoutError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> BoxLayoutError {
    BoxLayoutError::InvalidConfigValue {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_endpoint(field_name: &str, endpoint: &str) -> Result<()> {
    if !endpoint.starts_with('/') {
        return Err(invalid(field_name, endpoint, "Endpoint must start with '/'"));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(invalid(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

/// A download filename is a bare name: no directories, no traversal.
pub fn validate_filename(field_name: &str, filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        return Err(invalid(
            field_name,
            filename,
            "Filename cannot be empty or whitespace-only",
        ));
    }

    if filename.contains(['/', '\\', '\0']) || filename == "." || filename == ".." {
        return Err(invalid(
            field_name,
            filename,
            "Filename must not contain path separators",
        ));
    }

    Ok(())
}
