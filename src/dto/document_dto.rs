//! DTOs de documentos

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Document, DocumentStatus};

// Actualización de metadatos de un documento existente
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDocumentRequest {
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<DocumentStatus>,
}

#[derive(Debug, Serialize)]
pub struct DocumentEnvelope {
    pub message: String,
    pub document: Document,
}

/// Tipo de documento del catálogo fijo de vehículos.
#[derive(Debug, Serialize)]
pub struct DocumentTypeEntry {
    pub value: &'static str,
    pub label: &'static str,
}
