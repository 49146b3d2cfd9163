use std::path::Path;

use uuid::Uuid;

/// A photo received in a multipart form, not yet written to disk.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Write the photo under a generated name and return that name.
pub async fn store_photo(dir: &Path, photo: &PhotoUpload) -> std::io::Result<String> {
    let name = stored_name(photo.file_name.as_deref());
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(&name), &photo.bytes).await?;
    tracing::debug!(file = %name, bytes = photo.bytes.len(), "stored photo");
    Ok(name)
}

/// Remove a stored photo that ended up unreferenced.
pub async fn discard_photo(dir: &Path, name: &str) {
    if let Err(e) = tokio::fs::remove_file(dir.join(name)).await {
        tracing::warn!(file = %name, "failed to remove orphaned photo: {}", e);
    }
}

/// `<uuid>` plus the client's extension when it is short and alphanumeric.
fn stored_name(original: Option<&str>) -> String {
    let id = Uuid::new_v4().simple().to_string();
    let extension = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| (1..=5).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase);

    match extension {
        Some(ext) => format!("{id}.{ext}"),
        None => id,
    }
}
