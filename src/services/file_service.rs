//! Almacenamiento de archivos subidos
//!
//! Los uploads llegan completos en memoria; el handler valida tamaño y tipo
//! ANTES de mutar cualquier entidad, así un upload rechazado nunca deja
//! estado parcial. El trait devuelve la referencia (`file_url`) que se
//! guarda en el subregistro de documento.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use uuid::Uuid;

use crate::utils::errors::{AppError, AppResult};

/// Límite para documentos y comprobantes de pago.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;
/// Límite para fotos de vehículos.
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/png",
];

const PHOTO_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Valida un documento (PDF, DOC, DOCX, JPG, PNG hasta 10MB).
pub fn check_document_upload(mime_type: &str, size: usize) -> AppResult<()> {
    if !DOCUMENT_MIME_TYPES.contains(&mime_type) {
        return Err(AppError::Validation(
            "Only PDF, DOC, DOCX, JPG, PNG files are allowed".to_string(),
        ));
    }
    if size > MAX_DOCUMENT_BYTES {
        return Err(AppError::Validation(
            "File exceeds the 10MB upload limit".to_string(),
        ));
    }
    Ok(())
}

/// Valida una foto de vehículo (JPG, PNG, WEBP hasta 5MB).
pub fn check_photo_upload(mime_type: &str, size: usize) -> AppResult<()> {
    if !PHOTO_MIME_TYPES.contains(&mime_type) {
        return Err(AppError::Validation(
            "Only JPG, PNG, WEBP image files are allowed for vehicle photos".to_string(),
        ));
    }
    if size > MAX_PHOTO_BYTES {
        return Err(AppError::Validation(
            "Photo exceeds the 5MB upload limit".to_string(),
        ));
    }
    Ok(())
}

/// Valida un comprobante de pago (imagen o PDF hasta 10MB).
pub fn check_receipt_upload(mime_type: &str, size: usize) -> AppResult<()> {
    if !mime_type.starts_with("image/") && mime_type != "application/pdf" {
        return Err(AppError::Validation(
            "Only image and PDF files are allowed for payment receipts".to_string(),
        ));
    }
    if size > MAX_DOCUMENT_BYTES {
        return Err(AppError::Validation(
            "Receipt exceeds the 10MB upload limit".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persiste los bytes y devuelve la referencia a guardar en el documento.
    async fn store(
        &self,
        category: &str,
        original_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile>;

    /// Recupera los bytes de una referencia previamente devuelta por `store`.
    async fn load(&self, file_url: &str) -> AppResult<Option<Vec<u8>>>;
}

/// Almacenamiento en disco bajo el directorio de uploads configurado.
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, file_url: &str) -> Option<PathBuf> {
        let relative = file_url.strip_prefix("/uploads/")?;
        // Nunca resolver fuera del directorio de uploads.
        if relative.split('/').any(|part| part == "..") {
            return None;
        }
        Some(self.root.join(relative))
    }
}

fn unique_file_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default();
    format!("{}{}", Uuid::new_v4().simple(), extension)
}

#[async_trait]
impl FileStorage for DiskStorage {
    async fn store(
        &self,
        category: &str,
        original_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile> {
        let file_size = bytes.len() as i64;
        let stored_name = unique_file_name(original_name);
        let directory = self.root.join(category);
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| AppError::Internal(format!("Error creating upload directory: {}", e)))?;
        tokio::fs::write(directory.join(&stored_name), bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Error writing upload: {}", e)))?;

        Ok(StoredFile {
            file_url: format!("/uploads/{}/{}", category, stored_name),
            file_name: original_name.to_string(),
            file_size,
            mime_type: mime_type.to_string(),
        })
    }

    async fn load(&self, file_url: &str) -> AppResult<Option<Vec<u8>>> {
        let Some(path) = self.resolve(file_url) else {
            return Ok(None);
        };
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Internal(format!("Error reading upload: {}", e))),
        }
    }
}

/// Almacenamiento sin disco: inlinea el archivo como data-URI base64.
/// Pensado para despliegues efímeros y para los tests.
#[derive(Default)]
pub struct DataUriStorage;

impl DataUriStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStorage for DataUriStorage {
    async fn store(
        &self,
        _category: &str,
        original_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile> {
        let file_size = bytes.len() as i64;
        Ok(StoredFile {
            file_url: format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)),
            file_name: original_name.to_string(),
            file_size,
            mime_type: mime_type.to_string(),
        })
    }

    async fn load(&self, file_url: &str) -> AppResult<Option<Vec<u8>>> {
        let Some(encoded) = file_url.split(";base64,").nth(1) else {
            return Ok(None);
        };
        match BASE64.decode(encoded) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(_) => Ok(None),
        }
    }
}
