use entity::property::PropertyKind;
use serde::{Deserialize, Serialize};

use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateProperty {
    pub name: String,
    pub kind: PropertyKind,
}

impl CreateProperty {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("property name must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SetItemProperty {
    pub property_id: i64,
    /// `None` clears the value but keeps the row.
    pub value: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ItemProperty {
    pub property_id: i64,
    pub name: String,
    pub kind: PropertyKind,
    pub value: Option<String>,
}

/// Checks a raw value against the property kind and returns what gets stored.
pub fn normalize_value(
    kind: PropertyKind,
    value: Option<&str>,
) -> Result<Option<String>, AppError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    match kind {
        PropertyKind::Text => Ok(Some(raw.to_string())),
        PropertyKind::Float => {
            let parsed: f64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("`{raw}` is not a float")))?;
            if !parsed.is_finite() {
                return Err(AppError::Validation(format!("`{raw}` is not a finite float")));
            }
            Ok(Some(parsed.to_string()))
        }
        PropertyKind::Number => {
            let parsed: i64 = raw
                .trim()
                .parse()
                .map_err(|_| AppError::Validation(format!("`{raw}` is not a whole number")))?;
            Ok(Some(parsed.to_string()))
        }
    }
}
