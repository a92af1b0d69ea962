use crate::utils::error::{CatalogError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: impl Into<String>) -> CatalogError {
    CatalogError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Accepts http(s) only; plain http is kept for local emulators such as LocalStack.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty"));
    }

    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "Value cannot be empty or whitespace-only"));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(
            field_name,
            &value.to_string(),
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// The subset of S3 naming rules that catches typos in deployment config.
pub fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    let reason = if !(3..=63).contains(&bucket_name.len()) {
        Some("S3 bucket name must be between 3 and 63 characters")
    } else if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        Some("S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots")
    } else if !bucket_name.starts_with(|c: char| c.is_ascii_alphanumeric())
        || !bucket_name.ends_with(|c: char| c.is_ascii_alphanumeric())
    {
        Some("S3 bucket name must start and end with a letter or number")
    } else if bucket_name.contains("..") {
        Some("S3 bucket name cannot contain adjacent dots")
    } else if bucket_name.parse::<std::net::Ipv4Addr>().is_ok() {
        Some("S3 bucket name cannot be formatted as an IP address")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(invalid(field_name, bucket_name, reason)),
        None => Ok(()),
    }
}

/// Folder prefixes are joined with `/` by callers, so they must not carry their own slashes at the ends.
pub fn validate_folder_prefix(field_name: &str, prefix: &str) -> Result<()> {
    validate_non_empty_string(field_name, prefix)?;

    if prefix.starts_with('/') || prefix.ends_with('/') {
        return Err(invalid(field_name, prefix, "Folder prefix cannot start or end with '/'"));
    }
    if prefix.split('/').any(|segment| segment.is_empty() || segment == "..") {
        return Err(invalid(
            field_name,
            prefix,
            "Folder prefix cannot contain empty or '..' segments",
        ));
    }
    Ok(())
}
