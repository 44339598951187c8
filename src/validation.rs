use std::collections::BTreeMap;
use tracing::warn;

pub const PACK_FIELD: &str = "cigarettes-per-pack";

/// Declared constraints of a numeric form field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: &'static str,
    pub min: f64,
    pub required: bool,
    pub integer: bool,
}

pub const FIELDS: [FieldSpec; 9] = [
    FieldSpec { id: "cigarettes-per-day", min: 0.0, required: true, integer: true },
    FieldSpec { id: "cigarette-price", min: 0.0, required: true, integer: false },
    FieldSpec { id: PACK_FIELD, min: 1.0, required: true, integer: true },
    FieldSpec { id: "drinks-per-day", min: 0.0, required: true, integer: true },
    FieldSpec { id: "drink-price", min: 0.0, required: true, integer: false },
    FieldSpec { id: "quit-period", min: 1.0, required: true, integer: true },
    FieldSpec { id: "exercise-duration", min: 0.0, required: true, integer: true },
    FieldSpec { id: "exercise-frequency", min: 0.0, required: true, integer: true },
    FieldSpec { id: "user-weight", min: 0.0, required: true, integer: true },
];

pub fn field_spec(id: &str) -> Option<FieldSpec> {
    FIELDS.iter().copied().find(|spec| spec.id == id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub value: f64,
    pub error: Option<String>,
}

/// Repairs a value in place instead of rejecting it.
pub fn validate(field_id: &str, value: f64, min: f64) -> Validation {
    if value < min {
        return Validation {
            value: min,
            error: Some(format!("value must not be less than {}", format_min(min))),
        };
    }

    if field_id == PACK_FIELD && value < 1.0 {
        return Validation {
            value: 1.0,
            error: Some("cigarettes per pack must be at least 1".to_string()),
        };
    }

    Validation { value, error: None }
}

/// Parses raw form text first. Anything that is not a finite number is
/// replaced by the field minimum.
pub fn validate_raw(field_id: &str, raw: &str, min: f64) -> Validation {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => validate(field_id, value, min),
        _ => {
            let fallback = if field_id == PACK_FIELD { min.max(1.0) } else { min };
            Validation {
                value: fallback,
                error: Some("value must be a number".to_string()),
            }
        }
    }
}

fn format_min(min: f64) -> String {
    if min.fract() == 0.0 {
        format!("{min:.0}")
    } else {
        min.to_string()
    }
}

/// Inline error text per field.
///
/// A slot appears the first time a required field fails validation and is
/// blanked, not removed, whenever the field validates cleanly again.
#[derive(Debug, Clone, Default)]
pub struct ErrorSlots {
    slots: BTreeMap<String, String>,
}

impl ErrorSlots {
    pub fn check(&mut self, spec: &FieldSpec, raw: &str) -> Validation {
        let mut outcome = validate_raw(spec.id, raw, spec.min);
        if spec.integer {
            outcome.value = outcome.value.trunc();
        }

        match &outcome.error {
            Some(message) => {
                warn!(field = spec.id, raw, repaired = outcome.value, "input repaired");
                if spec.required {
                    self.slots.insert(spec.id.to_string(), message.clone());
                }
            }
            None => {
                if let Some(slot) = self.slots.get_mut(spec.id) {
                    slot.clear();
                }
            }
        }

        outcome
    }

    pub fn message(&self, field_id: &str) -> Option<&str> {
        self.slots
            .get(field_id)
            .map(String::as_str)
            .filter(|message| !message.is_empty())
    }

    pub fn has_slot(&self, field_id: &str) -> bool {
        self.slots.contains_key(field_id)
    }

    pub fn active(&self) -> BTreeMap<String, String> {
        self.slots
            .iter()
            .filter(|(_, message)| !message.is_empty())
            .map(|(field, message)| (field.clone(), message.clone()))
            .collect()
    }
}
