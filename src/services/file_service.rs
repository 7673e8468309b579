use crate::utils::error::AppError;
use std::path::Path;

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

pub fn is_allowed(original_name: &str) -> bool {
    Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Generated names are `<millis-timestamp>-<original-name>`, which keeps
/// concurrent uploads of the same file from colliding.
pub fn generate_filename(original_name: &str) -> String {
    format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        sanitize(original_name)
    )
}

// Clients control the original name, so path components and anything outside
// a small safe character set are stripped before it touches the filesystem.
fn sanitize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

/// Writes the upload under the uploads directory and returns the generated
/// filename for embedding in the user record.
pub async fn store(uploads_dir: &str, original_name: &str, data: &[u8]) -> Result<String, AppError> {
    if !is_allowed(original_name) {
        return Err(AppError::UnsupportedFileType(format!(
            "Only jpg, jpeg, png and gif files are allowed, got '{}'",
            original_name
        )));
    }

    tokio::fs::create_dir_all(uploads_dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create uploads directory: {}", e)))?;

    let filename = generate_filename(original_name);
    let path = Path::new(uploads_dir).join(&filename);

    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store file: {}", e)))?;

    Ok(filename)
}
