//! Record builders in both persisted shapes

use operation_splits::OperationRecord;
use serde_json::{json, Value};

pub fn record(value: Value) -> OperationRecord {
    serde_json::from_value(value).expect("fixture record deserializes")
}

/// Single pilot/helper with the four-bucket 36/40/14/10 split
pub fn legacy_record() -> OperationRecord {
    record(json!({
        "fecha": "15/08/2025",
        "cliente": "Constructora ABC",
        "ubicacion": "Santiago Centro",
        "tipo": "Mapeo",
        "piloto": "Juan Pérez",
        "ayudante": "Carlos Rodríguez",
        "drone": "Phantom 4 Pro",
        "horaInicio": "09:00",
        "horaFin": "11:30",
        "estado": "Completada",
        "descripcion": "Mapeo de terreno para proyecto de construcción",
        "montoTotal": 450000,
        "distribucionPago": { "empresa": 36, "piloto": 40, "ayudante": 14, "gastos": 10 }
    }))
}

/// Roster form: one pilot at 40, one helper at 14, company 46
pub fn current_record() -> OperationRecord {
    record(json!({
        "fecha": "16/08/2025",
        "cliente": "Minera XYZ",
        "ubicacion": "Antofagasta",
        "tipo": "Inspección",
        "pilotos": ["María González"],
        "ayudantes": ["Pedro Soto"],
        "drone": "Mavic 3",
        "horaInicio": "14:00",
        "estado": "En progreso",
        "montoTotal": 450000,
        "gastoExacto": 0,
        "distribucionPago": {
            "empresa": 46,
            "pilotos": { "María González": 40 },
            "ayudantes": { "Pedro Soto": 14 }
        }
    }))
}

/// Form fields only: no personnel, no distribution
pub fn bare_record() -> OperationRecord {
    record(json!({
        "fecha": "17/08/2025",
        "cliente": "Inmobiliaria DEF",
        "ubicacion": "Viña del Mar",
        "tipo": "Fotografía",
        "drone": "Autel EVO II",
        "horaInicio": "10:00",
        "montoTotal": 320000
    }))
}

/// A complete new-operation form, date still in input layout
pub fn new_operation_form() -> OperationRecord {
    record(json!({
        "fecha": "2025-09-01",
        "cliente": "Viñedos del Sur",
        "ubicacion": "Curicó",
        "tipo": "Monitoreo",
        "pilotos": ["Ana Martínez"],
        "ayudantes": [],
        "drone": "DJI Air 2S",
        "horaInicio": "08:30"
    }))
}
