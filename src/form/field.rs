use std::collections::BTreeMap;

use serde::Serialize;

/// Which validation rules apply to a field beyond the required check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Other,
}

impl FieldKind {
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Other => "text",
            FieldKind::Email => "email",
            FieldKind::Tel => "tel",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            kind,
            required,
        }
    }

    #[cfg(test)]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn trimmed_value(&self) -> &str {
        self.value.trim()
    }
}

/// Field values as sent to a submission channel: name -> trimmed value.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ContactPayload(BTreeMap<String, String>);

impl ContactPayload {
    pub fn from_fields(fields: &[Field]) -> Self {
        Self(
            fields
                .iter()
                .map(|field| (field.name.clone(), field.trimmed_value().to_string()))
                .collect(),
        )
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}
