//! Escáner de vencimiento de documentos
//!
//! Recorre todos los documentos de vehículos y conductores y produce una
//! lista plana de alertas clasificadas por días restantes.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AlertLevel, AlertOwner, Document, Driver, ExpiryAlert, Vehicle};

/// Escanear toda la flota. Las entradas `normal` (más de 90 días) se
/// filtran; el resto sale ordenado por urgencia y tipo de documento.
pub fn scan(vehicles: &[Vehicle], drivers: &[Driver], today: NaiveDate) -> Vec<ExpiryAlert> {
    let mut alerts = Vec::new();

    for vehicle in vehicles {
        collect_alerts(
            &mut alerts,
            AlertOwner::Vehicle,
            vehicle.id,
            vehicle.display_name(),
            &vehicle.documents,
            today,
        );
    }
    for driver in drivers {
        collect_alerts(
            &mut alerts,
            AlertOwner::Driver,
            driver.id,
            driver.display_name(),
            &driver.documents,
            today,
        );
    }

    alerts.sort_by(|a, b| {
        a.days_until_expiry
            .cmp(&b.days_until_expiry)
            .then_with(|| a.document_type.cmp(&b.document_type))
    });
    alerts
}

fn collect_alerts(
    alerts: &mut Vec<ExpiryAlert>,
    owner_kind: AlertOwner,
    owner_id: i64,
    owner_label: String,
    documents: &[Document],
    today: NaiveDate,
) {
    for (index, document) in documents.iter().enumerate() {
        // Documentos sin fecha de vencimiento no alertan.
        let Some(expiry_date) = document.expiry_date else {
            continue;
        };
        let days_until_expiry = (expiry_date - today).num_days();
        let alert_level = AlertLevel::for_days(days_until_expiry);
        if alert_level == AlertLevel::Normal {
            continue;
        }
        alerts.push(ExpiryAlert {
            owner_id,
            owner_kind,
            owner_label: owner_label.clone(),
            document_type: document.document_type.clone(),
            document_index: index,
            expiry_date,
            days_until_expiry,
            alert_level,
        });
    }
}

/// Estadísticas de documentos de la flota para el dashboard admin.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStats {
    pub total_documents: usize,
    pub expired_documents: usize,
    pub expiring_soon_documents: usize,
    pub valid_documents: usize,
}

pub fn document_stats(vehicles: &[Vehicle], today: NaiveDate) -> DocumentStats {
    let mut stats = DocumentStats {
        total_documents: 0,
        expired_documents: 0,
        expiring_soon_documents: 0,
        valid_documents: 0,
    };

    for vehicle in vehicles {
        for document in &vehicle.documents {
            stats.total_documents += 1;
            match document.expiry_date {
                Some(expiry) => {
                    let days = (expiry - today).num_days();
                    if days < 0 {
                        stats.expired_documents += 1;
                    } else if days <= 30 {
                        stats.expiring_soon_documents += 1;
                    } else {
                        stats.valid_documents += 1;
                    }
                }
                // Sin vencimiento cuenta como válido.
                None => stats.valid_documents += 1,
            }
        }
    }
    stats
}
