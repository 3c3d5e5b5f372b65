//! Alertas de vencimiento de documentos

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Clasificación de una alerta según los días restantes hasta el vencimiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Critical,
    Warning,
    Info,
    Normal,
}

impl AlertLevel {
    /// Tabla de clasificación: <0 crítico, 0–30 warning, 31–90 info,
    /// más de 90 días es normal (y se filtra de la salida).
    pub fn for_days(days_until_expiry: i64) -> Self {
        if days_until_expiry < 0 {
            AlertLevel::Critical
        } else if days_until_expiry <= 30 {
            AlertLevel::Warning
        } else if days_until_expiry <= 90 {
            AlertLevel::Info
        } else {
            AlertLevel::Normal
        }
    }
}

/// Dueño del documento que disparó la alerta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertOwner {
    Vehicle,
    Driver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryAlert {
    pub owner_id: i64,
    pub owner_kind: AlertOwner,
    pub owner_label: String,
    pub document_type: String,
    /// Posición del documento dentro de la lista de su dueño.
    pub document_index: usize,
    pub expiry_date: NaiveDate,
    pub days_until_expiry: i64,
    pub alert_level: AlertLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(AlertLevel::for_days(-1), AlertLevel::Critical);
        assert_eq!(AlertLevel::for_days(0), AlertLevel::Warning);
        assert_eq!(AlertLevel::for_days(30), AlertLevel::Warning);
        assert_eq!(AlertLevel::for_days(31), AlertLevel::Info);
        assert_eq!(AlertLevel::for_days(90), AlertLevel::Info);
        assert_eq!(AlertLevel::for_days(91), AlertLevel::Normal);
    }
}
