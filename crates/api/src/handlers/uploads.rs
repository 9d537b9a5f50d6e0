//! File uploads: images for content and gallery entries, and documents.
//!
//! Files land under `UPLOAD_DIR`, which sits inside `STATIC_DIR`, so the
//! stored paths are public `/static/...` URLs served by `ServeDir`.

use std::path::{Component, Path, PathBuf};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use glavtrub_core::imaging::{
    allowed_image_extension, generate_image_filename, image_info, process_upload, ImageInfo,
};
use glavtrub_core::slug::generate_slug;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Extensions accepted for downloadable documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "png", "jpg", "jpeg", "gif",
];

const IMAGES_SUBDIR: &str = "images";
const DOCUMENTS_SUBDIR: &str = "documents";

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// A file field plus any plain text fields sent alongside it.
pub struct UploadForm {
    pub filename: String,
    pub data: Vec<u8>,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }
}

/// Read a multipart body with one required `file` field.
pub async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut fields = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file = Some((filename, data.to_vec()));
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            fields.push((name, text));
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    Ok(UploadForm {
        filename,
        data,
        fields,
    })
}

// ---------------------------------------------------------------------------
// Path mapping
// ---------------------------------------------------------------------------

/// Public URL of a file stored under the static directory.
pub fn public_url(config: &ServerConfig, file: &Path) -> AppResult<String> {
    let relative = file.strip_prefix(&config.static_dir).map_err(|_| {
        AppError::InternalError(format!(
            "Upload path {} is outside the static directory",
            file.display()
        ))
    })?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(format!("/static/{}", parts.join("/")))
}

/// Filesystem path of a `/static/...` URL. `None` for anything else,
/// including paths that try to climb out with `..`.
pub fn static_file_path(config: &ServerConfig, url: &str) -> Option<PathBuf> {
    let relative = Path::new(url.strip_prefix("/static/")?);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(config.static_dir.join(relative))
}

/// Transliterated, filesystem-safe document name that keeps its extension.
fn document_filename(original: &str) -> Option<String> {
    let (stem, ext) = original.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if !DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    let stem = generate_slug(stem);
    let stem = if stem.is_empty() { "document".to_string() } else { stem };
    Some(format!("{stem}.{ext}"))
}

/// Write `data` to `dir/name`, adding `_1`, `_2`, ... before the extension
/// while the name is taken.
async fn write_unique(dir: &Path, name: &str, data: &[u8]) -> AppResult<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let (stem, ext) = name.rsplit_once('.').unwrap_or((name, ""));
    let mut candidate = dir.join(name);
    let mut n = 1;
    while tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
        candidate = dir.join(format!("{stem}_{n}.{ext}"));
        n += 1;
    }

    tokio::fs::write(&candidate, data)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    Ok(candidate)
}

/// Remove an uploaded file. Missing files are not an error.
pub async fn remove_static_file(config: &ServerConfig, url: &str) {
    let Some(path) = static_file_path(config, url) else {
        return;
    };
    match tokio::fs::remove_file(&path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed uploaded file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(error = %e, path = %path.display(), "Failed to remove file"),
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Resize, re-encode and store an uploaded image. Returns its public URL.
pub async fn store_image(config: &ServerConfig, filename: &str, data: &[u8]) -> AppResult<String> {
    let ext = allowed_image_extension(filename).ok_or_else(|| {
        AppError::BadRequest(format!("Unsupported image file '{filename}'"))
    })?;
    let processed = process_upload(data, &ext)?;
    let name = generate_image_filename(filename);
    let path = write_unique(&config.upload_dir.join(IMAGES_SUBDIR), &name, &processed).await?;
    public_url(config, &path)
}

/// Store a document under its sanitized name. Returns its public URL.
pub async fn store_document(
    config: &ServerConfig,
    filename: &str,
    data: &[u8],
) -> AppResult<String> {
    let name = document_filename(filename).ok_or_else(|| {
        AppError::BadRequest(format!(
            "Unsupported document file '{filename}'. Allowed: {}",
            DOCUMENT_EXTENSIONS.join(", ")
        ))
    })?;
    let path = write_unique(&config.upload_dir.join(DOCUMENTS_SUBDIR), &name, data).await?;
    public_url(config, &path)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub path: String,
    #[serde(flatten)]
    pub info: ImageInfo,
}

/// POST /api/v1/admin/uploads/images
///
/// Multipart with a `file` field. The image is shrunk to fit 1920x1080 and
/// re-encoded; the response carries the public path to store in
/// `image_path` / `hero_image` fields.
pub async fn upload_image(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_upload_form(multipart).await?;
    let path = store_image(&state.config, &form.filename, &form.data).await?;
    let stored = static_file_path(&state.config, &path)
        .ok_or_else(|| AppError::InternalError(format!("Unmapped upload path {path}")))?;
    let bytes = tokio::fs::read(&stored)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let info = image_info(&bytes)?;

    tracing::info!(path = %path, width = info.width, height = info.height, user_id = staff.user_id, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedImage { path, info },
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::JwtConfig;
    use glavtrub_core::seo::SiteInfo;

    fn config(static_dir: &Path) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 30,
            database_url: String::new(),
            jwt: JwtConfig {
                secret: "secret".into(),
                access_token_expiry_mins: 15,
            },
            site: SiteInfo::new("ГлавТрубТорг", "https://glavtrubtorg.ru"),
            static_dir: static_dir.to_path_buf(),
            upload_dir: static_dir.join("uploads"),
            max_upload_bytes: 1024,
            captcha_secret: "secret".into(),
        }
    }

    #[test]
    fn url_and_path_mapping() {
        let config = config(Path::new("/srv/static"));
        let file = Path::new("/srv/static/uploads/images/abc.jpg");
        assert_eq!(
            public_url(&config, file).unwrap(),
            "/static/uploads/images/abc.jpg"
        );
        assert_eq!(
            static_file_path(&config, "/static/uploads/images/abc.jpg"),
            Some(PathBuf::from("/srv/static/uploads/images/abc.jpg"))
        );
        assert!(public_url(&config, Path::new("/etc/passwd")).is_err());
    }

    #[test]
    fn traversal_is_rejected() {
        let config = config(Path::new("/srv/static"));
        assert!(static_file_path(&config, "/static/../secrets.env").is_none());
        assert!(static_file_path(&config, "/uploads/x.jpg").is_none());
    }

    #[test]
    fn document_names_are_sanitized() {
        assert_eq!(
            document_filename("Сертификат 2024.PDF").as_deref(),
            Some("sertifikat_2024.pdf")
        );
        assert_eq!(document_filename("!!!.xlsx").as_deref(), Some("document.xlsx"));
        assert!(document_filename("run.sh").is_none());
        assert!(document_filename("noext").is_none());
    }

    #[tokio::test]
    async fn write_unique_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_unique(dir.path(), "price.pdf", b"a").await.unwrap();
        let second = write_unique(dir.path(), "price.pdf", b"b").await.unwrap();
        assert_eq!(first.file_name().unwrap(), "price.pdf");
        assert_eq!(second.file_name().unwrap(), "price_1.pdf");
        assert_eq!(std::fs::read(&second).unwrap(), b"b");
    }

    #[tokio::test]
    async fn store_document_writes_under_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let url = store_document(&config, "Прайс.xls", b"data").await.unwrap();
        assert_eq!(url, "/static/uploads/documents/prays.xls");
        let stored = static_file_path(&config, &url).unwrap();
        assert!(stored.exists());

        remove_static_file(&config, &url).await;
        assert!(!stored.exists());
    }
}
