use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::api::error::ApiError;
use crate::api::utils::is_fqdn;
use crate::models::{Patch, RecordId};

/// One rejected field, rendered as `{ "<field>": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.message)?;
        map.end()
    }
}

/// Collects every field error of a body before anything is sent upstream
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn non_empty(&mut self, field: &str, value: &Patch<String>) -> &mut Self {
        if value.as_option().map_or(true, |v| v.trim().is_empty()) {
            self.push(field, format!("{} is required", field));
        }
        self
    }

    pub fn one_of(&mut self, field: &str, value: &Patch<String>, allowed: &[&str]) -> &mut Self {
        match value.as_option() {
            Some(v) if allowed.contains(&v.as_str()) => {}
            _ => self.push(field, format!("{} must be one of {}", field, allowed.join(", "))),
        }
        self
    }

    pub fn numeric_id(&mut self, field: &str, value: &Patch<RecordId>) -> &mut Self {
        match value.as_option() {
            Some(id) if id.is_numeric() => {}
            Some(_) => self.push(field, format!("{} must be numeric", field)),
            None => self.push(field, format!("{} is required", field)),
        }
        self
    }

    /// Only checked when supplied
    pub fn optional_numeric_id(&mut self, field: &str, value: &Patch<RecordId>) -> &mut Self {
        if let Some(id) = value.as_option() {
            if !id.is_numeric() {
                self.push(field, format!("{} must be numeric", field));
            }
        }
        self
    }

    pub fn fqdn(&mut self, field: &str, value: &Patch<String>) -> &mut Self {
        if !value.as_option().map_or(false, |v| is_fqdn(v)) {
            self.push(field, format!("{} must be a fully qualified domain name", field));
        }
        self
    }

    pub fn non_empty_list<T>(&mut self, field: &str, value: &Patch<Vec<T>>) -> &mut Self {
        if value.as_option().map_or(true, Vec::is_empty) {
            self.push(field, format!("{} must be a non-empty list", field));
        }
        self
    }

    pub fn list_len<T>(&mut self, field: &str, value: &Patch<Vec<T>>, min: usize, max: usize) -> &mut Self {
        let len = value.as_option().map_or(0, Vec::len);
        if len < min || len > max {
            self.push(field, format!("{} must have between {} and {} entries", field, min, max));
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ApiError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

/// Reject a non-numeric path id before any remote call
pub fn numeric_path_id(field: &str, id: &str) -> Result<(), ApiError> {
    if crate::models::ids::is_numeric_id(id) {
        Ok(())
    } else {
        Err(FieldError::new(field, format!("{} must be numeric", field)).into())
    }
}

/// Reject a path domain name that is not an FQDN
pub fn fqdn_path(field: &str, name: &str) -> Result<(), ApiError> {
    if is_fqdn(name) {
        Ok(())
    } else {
        Err(FieldError::new(field, format!("{} must be a fully qualified domain name", field)).into())
    }
}

/// Reject an empty path segment or one made only of dots
pub fn plain_path_segment(field: &str, segment: &str) -> Result<(), ApiError> {
    if segment.trim().is_empty() || segment.chars().all(|c| c == '.') {
        Err(FieldError::new(field, format!("{} is required", field)).into())
    } else {
        Ok(())
    }
}
