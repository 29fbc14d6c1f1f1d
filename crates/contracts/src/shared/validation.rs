//! Field validation primitives shared by all draft validators.
//!
//! Validators never perform I/O: they take a draft and return a
//! [`ValidationResult`] with one message per failing field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation rules for a single text or numeric field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl ValidationRules {
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
        }
    }

    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Validate a text value. Length is counted in characters of the
    /// trimmed value; an empty optional value always passes.
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            if self.required {
                return Err(format!("{} es obligatorio", field_label));
            }
            return Ok(());
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(format!(
                    "{} debe tener al menos {} caracteres",
                    field_label, min
                ));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err(format!(
                    "{} no puede superar {} caracteres",
                    field_label, max
                ));
            }
        }
        Ok(())
    }

    /// Validate a numeric value against min/max. `min` is exclusive when
    /// it is zero, so "greater than zero" rules read naturally.
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} debe ser un número", field_label));
        }
        if let Some(min) = self.min {
            if (min == 0.0 && value <= 0.0) || value < min {
                return Err(format!("{} debe ser mayor que {}", field_label, min));
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(format!("{} no puede ser mayor que {}", field_label, max));
            }
        }
        Ok(())
    }

    /// Parse and validate a numeric text input
    pub fn validate_numeric_str(&self, value: &str, field_label: &str) -> Result<f64, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("{} es obligatorio", field_label));
        }
        let number: f64 = value
            .replace(',', ".")
            .parse()
            .map_err(|_| format!("{} debe ser un número", field_label))?;
        self.validate_number(number, field_label)?;
        Ok(number)
    }
}

/// Outcome of validating a draft: `errors` is keyed by wire field name
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(rename = "isValid")]
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    /// Record the error of a check, if any. The first error for a field wins.
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.add(field, message);
                None
            }
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.is_valid = false;
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Loose e-mail check: one `@`, non-empty local part, dotted domain
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
            .unwrap_or(false)
}

/// `HH:MM`, 24h clock
pub fn is_valid_time(value: &str) -> bool {
    chrono::NaiveTime::parse_from_str(value.trim(), "%H:%M").is_ok() && value.trim().len() == 5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_string_lengths() {
        let rules = ValidationRules::required().length(3, 5);
        assert!(rules.validate_string("abc", "Título").is_ok());
        assert!(rules.validate_string("  ", "Título").is_err());
        assert!(rules.validate_string("ab", "Título").is_err());
        assert!(rules.validate_string("abcdef", "Título").is_err());
        // characters, not bytes
        assert!(rules.validate_string("ñññ", "Título").is_ok());
    }

    #[test]
    fn test_optional_empty_passes() {
        let rules = ValidationRules::none().length(7, 20);
        assert!(rules.validate_string("", "Teléfono").is_ok());
        assert!(rules.validate_string("123", "Teléfono").is_err());
    }

    #[test]
    fn test_numeric_range() {
        let rules = ValidationRules::required().range(0.0, 24.0);
        assert_eq!(rules.validate_numeric_str("1,5", "Tiempo"), Ok(1.5));
        assert!(rules.validate_numeric_str("0", "Tiempo").is_err());
        assert!(rules.validate_numeric_str("25", "Tiempo").is_err());
        assert!(rules.validate_numeric_str("dos", "Tiempo").is_err());
    }

    #[test]
    fn test_first_error_wins() {
        let mut result = ValidationResult::new();
        result.add("titulo", "primero");
        result.add("titulo", "segundo");
        assert!(!result.is_valid);
        assert_eq!(result.error("titulo"), Some("primero"));
    }

    #[test]
    fn test_email_and_time() {
        assert!(is_valid_email("ops@acme.com"));
        assert!(!is_valid_email("ops@acme"));
        assert!(!is_valid_email("@acme.com"));
        assert!(!is_valid_email("ops @acme.com"));
        assert!(is_valid_time("08:30"));
        assert!(!is_valid_time("8:30"));
        assert!(!is_valid_time("24:10"));
    }
}
