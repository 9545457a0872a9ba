use crate::utils::error::{Result, WaybackError};
use std::path::Path;
use std::time::Duration;
use url::{Host, Url};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 網域會原樣代入 CDX 樣式，因此不能含有路徑、查詢字串或萬用字元
pub fn validate_domain(domain: &str) -> Result<()> {
    let invalid = |reason: &str| WaybackError::ValidationError {
        message: format!("invalid domain '{}': {}", domain, reason),
    };

    if domain.is_empty() {
        return Err(invalid("domain is empty"));
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    if domain.contains('*') {
        return Err(invalid("'*' is reserved for pattern wildcards"));
    }

    Host::parse(domain)
        .map(|_| ())
        .map_err(|e| invalid(&e.to_string()))
}

/// CDX endpoint: http(s) with a host. The query string is built per request.
pub fn validate_endpoint(field_name: &str, endpoint: &str) -> Result<()> {
    let invalid = |reason: String| WaybackError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("Unsupported URL scheme: {}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("URL has no host".to_string()));
    }
    if url.query().is_some() {
        return Err(invalid(
            "query parameters are added per request and must not be set here".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_duration(field_name: &str, value: Duration, min: Duration, max: Duration) -> Result<()> {
    if value < min || value > max {
        return Err(WaybackError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{}ms", value.as_millis()),
            reason: format!(
                "must be between {}ms and {}ms",
                min.as_millis(),
                max.as_millis()
            ),
        });
    }
    Ok(())
}

/// 報告目錄可以尚未存在（寫入時會建立），但不能是既有的檔案
pub fn validate_output_dir(field_name: &str, dir: &str) -> Result<()> {
    let invalid = |reason: &str| WaybackError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: dir.to_string(),
        reason: reason.to_string(),
    };

    if dir.trim().is_empty() {
        return Err(invalid("directory cannot be empty"));
    }
    if dir.contains('\0') {
        return Err(invalid("directory contains null bytes"));
    }
    if Path::new(dir).is_file() {
        return Err(invalid("path exists and is a file"));
    }
    Ok(())
}
