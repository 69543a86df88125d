mod errors;

use std::collections::HashMap;

use validator::ValidateEmail;

pub use errors::FormErrors;

/// Submitted form data: each key may carry several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues(HashMap<String, Vec<String>>);

impl FormValues {
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut values = Self::default();
        for (key, value) in pairs {
            values.add(key, value);
        }
        values
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), vec![value.into()]);
    }

    /// First value for `key`, or the empty string.
    pub fn get(&self, key: &str) -> &str {
        self.0
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A submitted form together with the errors its validation rules produced.
#[derive(Debug, Clone, Default)]
pub struct Form {
    pub values: FormValues,
    pub errors: FormErrors,
}

impl Form {
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            errors: FormErrors::default(),
        }
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field)
    }

    pub fn required(&mut self, fields: &[&str]) {
        for field in fields {
            if self.values.get(field).trim().is_empty() {
                self.errors.add(field, "This field cannot be blank");
            }
        }
    }

    /// Length is counted in characters, not bytes.
    pub fn min_length(&mut self, field: &str, length: usize) -> bool {
        if self.values.get(field).chars().count() < length {
            self.errors.add(
                field,
                format!("This field must be at least {} characters long", length),
            );
            return false;
        }
        true
    }

    pub fn is_email(&mut self, field: &str) {
        if !self.values.get(field).validate_email() {
            self.errors.add(field, "Invalid email address");
        }
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }
}
