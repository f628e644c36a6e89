//! Field checks run before any request is built. A form that fails here never
//! reaches the dispatcher.

use std::path::Path;

use shared::domain::Attachment;

use crate::error::ValidationError;

/// `accept` list for identity documents.
pub const DOCUMENT_ACCEPT: &[&str] = &[".pdf", ".doc", ".docx"];
/// `accept` list for profile pictures.
pub const PICTURE_ACCEPT: &[&str] = &["image/png", "image/jpeg"];

pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    // Whitespace-only counts as missing, and the trimmed value is what gets sent.
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    Ok(value.to_string())
}

pub fn email(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    if is_valid_email(&value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidEmail { value })
    }
}

/// Accepts what a numeric input would: any finite decimal, zero and negatives
/// included. The trimmed input is sent as typed, not reformatted.
pub fn amount(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(value),
        _ => Err(ValidationError::NotANumber { field }),
    }
}

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let local_ok = local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c));
    let domain_ok = domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    local_ok && domain_ok
}

/// Matches a file against an `accept` list: `.ext` tokens compare the
/// extension, `type/*` tokens the MIME top-level type, anything else the full
/// MIME essence.
pub fn accepts(accept: &[&str], path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let guessed = mime_guess::from_path(path).first();

    accept.iter().any(|token| {
        let token = token.trim().to_ascii_lowercase();
        if let Some(ext) = token.strip_prefix('.') {
            extension.as_deref() == Some(ext)
        } else if let Some(top) = token.strip_suffix("/*") {
            guessed
                .as_ref()
                .is_some_and(|mime| mime.type_().as_str() == top)
        } else {
            guessed
                .as_ref()
                .is_some_and(|mime| mime.essence_str() == token)
        }
    })
}

/// Checks the file type and reads the file for upload.
pub async fn attachment(
    field: &'static str,
    path: &Path,
    accept: &[&str],
) -> Result<Attachment, ValidationError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !accepts(accept, path) {
        return Err(ValidationError::FileType {
            field,
            file_name,
            accept: accept.join(","),
        });
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ValidationError::UnreadableFile {
            field,
            path: path.to_path_buf(),
            source,
        })?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(Attachment {
        file_name,
        content_type,
        bytes,
    })
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
