//! Reglas del ciclo de vida vehículo/conductor
//!
//! Todo acoplamiento entre la disponibilidad de un vehículo y el estado de
//! un conductor o solicitud pasa por estas funciones puras; los controllers
//! arman el `WriteBatch` con el resultado y lo commitean de una sola vez.

use chrono::{Months, NaiveDate};

use crate::models::{Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};

/// Reclamar un vehículo para un conductor nuevo.
///
/// Solo un vehículo `available` puede reclamarse; cualquier otro estado es
/// un error de validación.
pub fn claim_vehicle(mut vehicle: Vehicle, driver_id: i64) -> AppResult<Vehicle> {
    if !vehicle.status.is_available() {
        return Err(AppError::Validation(
            "Selected vehicle is not available".to_string(),
        ));
    }
    vehicle.status = VehicleStatus::Assigned;
    vehicle.assigned_driver_id = Some(driver_id);
    vehicle.touch();
    Ok(vehicle)
}

/// Reasignar un vehículo a un conductor existente.
///
/// El camino de actualización no re-valida disponibilidad: al reasignar,
/// el vehículo nuevo se toma incondicionalmente.
pub fn assign_vehicle(mut vehicle: Vehicle, driver_id: i64) -> Vehicle {
    vehicle.status = VehicleStatus::Assigned;
    vehicle.assigned_driver_id = Some(driver_id);
    vehicle.touch();
    vehicle
}

/// Liberar un vehículo: vuelve a `available` sin conductor.
pub fn release_vehicle(mut vehicle: Vehicle) -> Vehicle {
    vehicle.status = VehicleStatus::Available;
    vehicle.assigned_driver_id = None;
    vehicle.touch();
    vehicle
}

/// Marcar un vehículo como alquilado tras aprobar una solicitud.
pub fn rent_vehicle(mut vehicle: Vehicle, driver_id: i64) -> Vehicle {
    vehicle.status = VehicleStatus::Rented;
    vehicle.assigned_driver_id = Some(driver_id);
    vehicle.touch();
    vehicle
}

/// Fecha de fin de contrato según el período elegido.
/// Cualquier período desconocido cae al default de un mes.
pub fn contract_end_date(start: NaiveDate, contract_period: &str) -> NaiveDate {
    let months = match contract_period {
        "1 month" => 1,
        "3 months" => 3,
        "6 months" => 6,
        "12 months" => 12,
        _ => 1,
    };
    start
        .checked_add_months(Months::new(months))
        .unwrap_or(start)
}
