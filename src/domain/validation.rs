//! Form-schema validation shared by every inbound record.
//!
//! DESIGN
//! ======
//! Rules accumulate into a [`Validator`] so a single submission reports every
//! failing field at once, the way an inline form does. Lengths are counted in
//! characters on the trimmed value.

use std::fmt;

use serde::Serialize;

/// One failing field and the message shown next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field failures of a single submission. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// Build an error list holding a single field failure.
    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        Self(vec![FieldError { field: field.to_owned(), message: message.to_owned() }])
    }

    /// Whether any failure is reported for `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed")?;
        for (i, err) in self.0.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{} ({})", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// VALIDATOR
// =============================================================================

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError { field: field.to_owned(), message: message.to_owned() });
        }
        self
    }

    pub fn min_chars(&mut self, field: &str, value: &str, min: usize, message: &str) -> &mut Self {
        self.check(char_len(value) >= min, field, message)
    }

    pub fn max_chars(&mut self, field: &str, value: &str, max: usize, message: &str) -> &mut Self {
        self.check(char_len(value) <= max, field, message)
    }

    /// Inclusive range check. NaN never passes.
    pub fn range(&mut self, field: &str, value: f64, min: f64, max: f64, message: &str) -> &mut Self {
        self.check((min..=max).contains(&value), field, message)
    }

    pub fn url(&mut self, field: &str, value: &str, message: &str) -> &mut Self {
        self.check(is_http_url(value), field, message)
    }

    /// Finish the pass, returning every recorded failure.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] if any rule failed.
    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.errors)))
        }
    }
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// `http://` or `https://` followed by a non-empty host without whitespace.
#[must_use]
pub fn is_http_url(value: &str) -> bool {
    let value = value.trim();
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    let Some(rest) = rest else {
        return false;
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !host.is_empty() && !rest.chars().any(char::is_whitespace)
}

/// Minimal address shape check: non-empty `local@domain`.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.chars().any(char::is_whitespace)
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
