//! Course reference data: a course and its sets of tees.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{TeeBox, WagerError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    #[serde(default)]
    pub tees: Vec<TeeBox>,
}

impl Course {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), tees: Vec::new() }
    }

    /// Add a set of tees, replacing any existing tees with the same name.
    pub fn with_tee(mut self, tee: TeeBox) -> Self {
        self.tees.retain(|t| !t.name().eq_ignore_ascii_case(tee.name()));
        self.tees.push(tee);
        self
    }

    /// Look up tees by name, ignoring case.
    pub fn tee(&self, name: &str) -> Result<&TeeBox, WagerError> {
        self.tees
            .iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| WagerError::UnknownTee(name.to_string()))
    }

    pub fn tee_names(&self) -> Vec<&str> {
        self.tees.iter().map(TeeBox::name).collect()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.tee_names().join(", "))
    }
}
