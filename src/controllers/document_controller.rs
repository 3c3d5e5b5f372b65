//! Controller de documentos
//!
//! Los documentos son subregistros: cada mutación reescribe el vehículo o
//! conductor dueño completo. La descarga de documentos de conductor está
//! bloqueada hasta que el comprobante de pago figure como subido, exista o
//! no el documento pedido.

use axum::extract::Multipart;
use axum::http::{header, StatusCode};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use tracing::info;

use crate::dto::document_dto::{DocumentEnvelope, UpdateDocumentRequest};
use crate::models::{is_vehicle_document_type, Document, DocumentStatus};
use crate::repositories::WriteBatch;
use crate::services::file_service::check_document_upload;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

/// Dueño de un documento: vehículo o conductor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentOwner {
    Vehicle,
    Driver,
}

struct DocumentUpload {
    document_type: String,
    expiry_date: Option<NaiveDate>,
    uploaded_by: String,
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

impl DocumentUpload {
    async fn parse(mut multipart: Multipart) -> AppResult<Self> {
        let mut document_type = None;
        let mut expiry_date = None;
        let mut uploaded_by = None;
        let mut file = None;

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "documentFile" => {
                    file = Some((
                        field
                            .file_name()
                            .map(str::to_string)
                            .unwrap_or_else(|| "document".to_string()),
                        field
                            .content_type()
                            .map(str::to_string)
                            .unwrap_or_else(|| "application/octet-stream".to_string()),
                        field.bytes().await?.to_vec(),
                    ));
                }
                "documentType" => document_type = Some(field.text().await?),
                "expiryDate" => {
                    let raw = field.text().await?;
                    if !raw.is_empty() {
                        expiry_date = Some(raw.parse().map_err(|_| {
                            AppError::Validation("expiryDate must be a date".to_string())
                        })?);
                    }
                }
                "uploadedBy" => uploaded_by = Some(field.text().await?),
                other => {
                    return Err(AppError::Validation(format!(
                        "Unexpected field: {}",
                        other
                    )))
                }
            }
        }

        let (file_name, mime_type, bytes) = file
            .ok_or_else(|| AppError::Validation("Document file is required".to_string()))?;
        let document_type = document_type
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Validation("documentType is required".to_string()))?;

        Ok(Self {
            document_type,
            expiry_date,
            uploaded_by: uploaded_by.unwrap_or_else(|| "admin".to_string()),
            file_name,
            mime_type,
            bytes,
        })
    }
}

pub struct DocumentController {
    state: AppState,
}

impl DocumentController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, owner: DocumentOwner, owner_id: i64) -> AppResult<Json<Vec<Document>>> {
        let documents = match owner {
            DocumentOwner::Vehicle => {
                self.state
                    .store
                    .vehicle(owner_id)
                    .await?
                    .ok_or_else(|| not_found_error("Vehicle"))?
                    .documents
            }
            DocumentOwner::Driver => {
                self.state
                    .store
                    .driver(owner_id)
                    .await?
                    .ok_or_else(|| not_found_error("Driver"))?
                    .documents
            }
        };
        Ok(Json(documents))
    }

    pub async fn attach(
        &self,
        owner: DocumentOwner,
        owner_id: i64,
        multipart: Multipart,
    ) -> AppResult<(StatusCode, Json<DocumentEnvelope>)> {
        let upload = DocumentUpload::parse(multipart).await?;
        if owner == DocumentOwner::Vehicle && !is_vehicle_document_type(&upload.document_type) {
            return Err(AppError::Validation(
                "Invalid document type for vehicle".to_string(),
            ));
        }
        check_document_upload(&upload.mime_type, upload.bytes.len())?;

        let stored = self
            .state
            .files
            .store("documents", &upload.file_name, &upload.mime_type, upload.bytes)
            .await?;
        let document = Document {
            id: self.state.ids.next_id(),
            document_type: upload.document_type,
            file_name: stored.file_name,
            file_url: stored.file_url,
            file_size: stored.file_size,
            mime_type: stored.mime_type,
            expiry_date: upload.expiry_date,
            uploaded_by: upload.uploaded_by,
            uploaded_at: Utc::now(),
            status: DocumentStatus::Active,
        };

        self.mutate_documents(owner, owner_id, |documents| {
            documents.push(document.clone());
            Ok(())
        })
        .await?;
        info!("📄 Document attached to {:?} {}: {}", owner, owner_id, document.document_type);

        Ok((
            StatusCode::CREATED,
            Json(DocumentEnvelope {
                message: "Document uploaded successfully".to_string(),
                document,
            }),
        ))
    }

    pub async fn update(
        &self,
        owner: DocumentOwner,
        owner_id: i64,
        document_id: i64,
        request: UpdateDocumentRequest,
    ) -> AppResult<Json<DocumentEnvelope>> {
        let mut updated = None;
        self.mutate_documents(owner, owner_id, |documents| {
            let document = documents
                .iter_mut()
                .find(|doc| doc.id == document_id)
                .ok_or_else(|| not_found_error("Document"))?;
            if let Some(expiry_date) = request.expiry_date {
                document.expiry_date = Some(expiry_date);
            }
            if let Some(status) = request.status {
                document.status = status;
            }
            updated = Some(document.clone());
            Ok(())
        })
        .await?;

        // mutate_documents garantiza que el documento existía
        let document = updated.ok_or_else(|| not_found_error("Document"))?;
        Ok(Json(DocumentEnvelope {
            message: "Document updated successfully".to_string(),
            document,
        }))
    }

    pub async fn delete(
        &self,
        owner: DocumentOwner,
        owner_id: i64,
        document_id: i64,
    ) -> AppResult<Json<Value>> {
        self.mutate_documents(owner, owner_id, |documents| {
            let before = documents.len();
            documents.retain(|doc| doc.id != document_id);
            if documents.len() == before {
                return Err(not_found_error("Document"));
            }
            Ok(())
        })
        .await?;

        Ok(Json(json!({ "message": "Document deleted successfully" })))
    }

    /// Descarga de un documento de conductor, bloqueada hasta el pago.
    pub async fn download_driver_document(
        &self,
        driver_id: i64,
        document_id: i64,
    ) -> AppResult<([(header::HeaderName, String); 2], Vec<u8>)> {
        let driver = self
            .state
            .store
            .driver(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;
        // El gate se evalúa antes de mirar el documento pedido.
        if !driver.payment_receipt_uploaded {
            return Err(AppError::AccessDenied(
                "Payment required to access documents".to_string(),
            ));
        }
        let document = driver
            .documents
            .iter()
            .find(|doc| doc.id == document_id)
            .ok_or_else(|| not_found_error("Document"))?;

        let bytes = self
            .state
            .files
            .load(&document.file_url)
            .await?
            .ok_or_else(|| not_found_error("File"))?;

        Ok((
            [
                (header::CONTENT_TYPE, document.mime_type.clone()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", document.file_name),
                ),
            ],
            bytes,
        ))
    }

    async fn mutate_documents<F>(
        &self,
        owner: DocumentOwner,
        owner_id: i64,
        mutate: F,
    ) -> AppResult<()>
    where
        F: FnOnce(&mut Vec<Document>) -> AppResult<()>,
    {
        match owner {
            DocumentOwner::Vehicle => {
                let mut vehicle = self
                    .state
                    .store
                    .vehicle(owner_id)
                    .await?
                    .ok_or_else(|| not_found_error("Vehicle"))?;
                mutate(&mut vehicle.documents)?;
                vehicle.touch();
                self.state
                    .store
                    .commit(WriteBatch::default().vehicle(vehicle))
                    .await
            }
            DocumentOwner::Driver => {
                let mut driver = self
                    .state
                    .store
                    .driver(owner_id)
                    .await?
                    .ok_or_else(|| not_found_error("Driver"))?;
                mutate(&mut driver.documents)?;
                driver.touch();
                self.state
                    .store
                    .commit(WriteBatch::default().driver(driver))
                    .await
            }
        }
    }
}
