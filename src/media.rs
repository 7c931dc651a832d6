//! Upload storage for image fields.
//!
//! Files live below the configured media root; the database keeps only the
//! path relative to that root.

use std::path::Path;

use tokio::fs;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub const TECHNIQUE_IMAGES: &str = "technique_images/";
pub const PRODUCT_IMAGES: &str = "product_images/";

// Matches the width of the image columns.
const MAX_PATH_LEN: usize = 100;

/// Base name of `filename` restricted to `[A-Za-z0-9._-]`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Relative path for a new upload: `prefix` + short random token + file name,
/// cut to fit the column while keeping the extension.
pub fn upload_path(prefix: &str, filename: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    let name = sanitize_filename(filename);
    let head = format!("{prefix}{}-", &token[..8]);
    let room = MAX_PATH_LEN.saturating_sub(head.len());
    if name.len() <= room {
        return format!("{head}{name}");
    }
    let (stem, ext) = match name.rfind('.') {
        Some(idx) if name.len() - idx < room => name.split_at(idx),
        _ => (name.as_str(), ""),
    };
    let keep = room - ext.len();
    format!("{head}{}{ext}", &stem[..keep.min(stem.len())])
}

/// Writes `bytes` below `root` and returns the stored relative path.
pub async fn store_upload(
    root: &Path,
    prefix: &str,
    filename: &str,
    bytes: &[u8],
) -> AppResult<String> {
    if bytes.is_empty() {
        return Err(AppError::BadRequest("empty upload".into()));
    }
    let relative = upload_path(prefix, filename);
    let target = root.join(&relative);
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Internal(e.into()))?;
    }
    fs::write(&target, bytes)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;
    tracing::debug!(path = %relative, size = bytes.len(), "stored upload");
    Ok(relative)
}

/// Best-effort removal of a previously stored upload.
pub async fn remove_upload(root: &Path, relative: &str) {
    if let Err(err) = fs::remove_file(root.join(relative)).await {
        tracing::warn!(error = %err, path = relative, "failed to remove upload");
    }
}
