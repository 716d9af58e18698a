//! Persisted operation record.
//!
//! Field names on the wire are the document store's Spanish keys. Records
//! written by older versions carry a single `piloto`/`ayudante` name and a
//! four-bucket `distribucionPago`; newer ones carry `pilotos`/`ayudantes`
//! lists and per-name share maps. Both shapes deserialize into the same type.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{
    constants::{INPUT_DATE_FORMAT, STORED_DATE_FORMAT},
    currency::NumberLocale,
    errors::{AllocationError, Result},
    legacy::LegacyDistribution,
    state::Role,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum OperationStatus {
    #[default]
    #[serde(rename = "Planificada")]
    Planned,
    #[serde(rename = "En progreso")]
    InProgress,
    #[serde(rename = "Completada")]
    Completed,
    #[serde(rename = "Cancelada")]
    Cancelled,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationStatus::Planned => "Planificada",
            OperationStatus::InProgress => "En progreso",
            OperationStatus::Completed => "Completada",
            OperationStatus::Cancelled => "Cancelada",
        }
    }
}

/// Roster-based distribution: company share plus a share per named person
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurrentDistribution {
    /// Absent when never stored; the share is then reconciled on decode
    pub empresa: Option<f64>,
    pub pilots: BTreeMap<String, f64>,
    pub helpers: BTreeMap<String, f64>,
}

impl CurrentDistribution {
    pub fn shares(&self, role: Role) -> &BTreeMap<String, f64> {
        match role {
            Role::Pilot => &self.pilots,
            Role::Helper => &self.helpers,
        }
    }

    /// Drops shares for names not in `listed`
    /// The company share is cleared too, since it was balanced against them
    pub fn retain_listed(&mut self, role: Role, listed: &[String]) {
        let shares = match role {
            Role::Pilot => &mut self.pilots,
            Role::Helper => &mut self.helpers,
        };
        let before = shares.len();
        shares.retain(|name, _| listed.contains(name));

        if shares.len() != before {
            self.empresa = None;
        }
    }
}

/// Stored `distribucionPago`, in either of its historical shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawDistribution", into = "RawDistribution")]
pub enum DistributionSnapshot {
    Legacy(LegacyDistribution),
    Current(CurrentDistribution),
}

/// Wire form of `distribucionPago` with every known key optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawDistribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    empresa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pilotos: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ayudantes: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    piloto: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ayudante: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gastos: Option<f64>,
}

impl From<RawDistribution> for DistributionSnapshot {
    fn from(raw: RawDistribution) -> Self {
        // Share maps mark the current shape, even if only one role is present
        if raw.pilotos.is_some() || raw.ayudantes.is_some() {
            return DistributionSnapshot::Current(CurrentDistribution {
                empresa: raw.empresa,
                pilots: raw.pilotos.unwrap_or_default(),
                helpers: raw.ayudantes.unwrap_or_default(),
            });
        }

        if raw.piloto.is_some() || raw.ayudante.is_some() || raw.gastos.is_some() {
            let defaults = LegacyDistribution::default();
            return DistributionSnapshot::Legacy(LegacyDistribution {
                empresa: raw.empresa.map_or(defaults.empresa, whole_percent),
                piloto: raw.piloto.map_or(defaults.piloto, whole_percent),
                ayudante: raw.ayudante.map_or(defaults.ayudante, whole_percent),
                gastos: raw.gastos.map_or(defaults.gastos, whole_percent),
            });
        }

        // Only a company share (or nothing): treat as a roster with no shares yet
        DistributionSnapshot::Current(CurrentDistribution {
            empresa: raw.empresa,
            ..CurrentDistribution::default()
        })
    }
}

impl From<DistributionSnapshot> for RawDistribution {
    fn from(snapshot: DistributionSnapshot) -> Self {
        match snapshot {
            DistributionSnapshot::Legacy(legacy) => RawDistribution {
                empresa: Some(f64::from(legacy.empresa)),
                piloto: Some(f64::from(legacy.piloto)),
                ayudante: Some(f64::from(legacy.ayudante)),
                gastos: Some(f64::from(legacy.gastos)),
                ..RawDistribution::default()
            },
            DistributionSnapshot::Current(current) => RawDistribution {
                empresa: current.empresa,
                pilotos: Some(current.pilots),
                ayudantes: Some(current.helpers),
                ..RawDistribution::default()
            },
        }
    }
}

fn whole_percent(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// A drone service engagement as stored in the record store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "cliente", default)]
    pub client: String,
    #[serde(rename = "ubicacion", default)]
    pub location: String,
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "piloto", default, skip_serializing_if = "Option::is_none")]
    pub legacy_pilot: Option<String>,
    #[serde(rename = "ayudante", default, skip_serializing_if = "Option::is_none")]
    pub legacy_helper: Option<String>,
    #[serde(rename = "pilotos", default, skip_serializing_if = "Option::is_none")]
    pub pilots: Option<Vec<String>>,
    #[serde(rename = "ayudantes", default, skip_serializing_if = "Option::is_none")]
    pub helpers: Option<Vec<String>>,
    #[serde(default)]
    pub drone: String,
    #[serde(rename = "horaInicio", default)]
    pub start_time: String,
    #[serde(rename = "horaFin", default)]
    pub end_time: String,
    #[serde(rename = "estado", default)]
    pub status: OperationStatus,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "observaciones", default)]
    pub notes: String,
    #[serde(
        rename = "montoTotal",
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_amount: Option<u64>,
    #[serde(
        rename = "gastoExacto",
        default,
        deserialize_with = "lenient_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub exact_expense: Option<u64>,
    #[serde(rename = "distribucionPago", default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionSnapshot>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    /// Keys this crate does not model (files, history, ...) pass through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accepts an amount stored as an integer, a float or numeric text
/// Negative amounts and blank text read as absent
fn lenient_amount<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u64)
        }),
        // Text is read the way it is typed: es-CL grouping and decimals
        Some(Value::String(s)) => {
            let text = s.trim();
            if text.is_empty() || text.starts_with('-') {
                None
            } else {
                Some(NumberLocale::default().parse(text))
            }
        }
        _ => None,
    })
}

impl OperationRecord {
    /// Personnel names for a role: the roster list when present, else the
    /// legacy single name (blank legacy names count as absent)
    pub fn names(&self, role: Role) -> Vec<String> {
        let (list, single) = match role {
            Role::Pilot => (&self.pilots, &self.legacy_pilot),
            Role::Helper => (&self.helpers, &self.legacy_helper),
        };

        if let Some(list) = list {
            return list
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
        }

        single
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| vec![n.to_string()])
            .unwrap_or_default()
    }

    /// True when the record carries any personnel list, legacy name or share map
    pub fn has_personnel(&self) -> bool {
        let has_legacy = |name: &Option<String>| {
            name.as_deref().is_some_and(|n| !n.trim().is_empty())
        };

        self.pilots.is_some()
            || self.helpers.is_some()
            || has_legacy(&self.legacy_pilot)
            || has_legacy(&self.legacy_helper)
    }

    /// Checks the fields an operation cannot be saved without
    ///
    /// # Errors
    ///
    /// `Validation` naming every missing field.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();

        let required = [
            ("fecha", &self.date),
            ("cliente", &self.client),
            ("ubicacion", &self.location),
            ("tipo", &self.kind),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                missing.push(field);
            }
        }

        if self.names(Role::Pilot).is_empty() {
            missing.push("piloto");
        }
        if self.drone.trim().is_empty() {
            missing.push("drone");
        }
        if self.start_time.trim().is_empty() {
            missing.push("horaInicio");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AllocationError::Validation { fields: missing })
        }
    }

    /// Stored date parsed from `DD/MM/YYYY` (or `YYYY-MM-DD` while being edited)
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        NaiveDate::parse_from_str(date, STORED_DATE_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(date, INPUT_DATE_FORMAT))
            .ok()
    }

    /// Case-insensitive match against id, client, location, personnel and drone
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let contains = |field: &str| field.to_lowercase().contains(&term);

        self.id.as_deref().is_some_and(contains)
            || contains(&self.client)
            || contains(&self.location)
            || contains(&self.drone)
            || Role::ALL
                .iter()
                .flat_map(|role| self.names(*role))
                .any(|name| contains(&name))
    }
}

/// `15/08/2025` -> `2025-08-15`; anything unparseable is returned as-is
pub fn stored_date_to_input(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), STORED_DATE_FORMAT)
        .map(|d| d.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// `2025-08-15` -> `15/08/2025`; anything unparseable is returned as-is
pub fn input_date_to_stored(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), INPUT_DATE_FORMAT)
        .map(|d| d.format(STORED_DATE_FORMAT).to_string())
        .unwrap_or_else(|_| date.to_string())
}
