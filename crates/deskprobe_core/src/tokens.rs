//! Bearer tokens acquired during a run, keyed by department.

use crate::error::{DeskprobeError, Result};
use std::collections::BTreeMap;

/// Department label to bearer token.
///
/// Lives for exactly one run. Tokens are never empty.
#[derive(Debug, Default, Clone)]
pub struct TokenSet {
    tokens: BTreeMap<String, String>,
}

impl TokenSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token for a department, replacing any earlier one.
    pub fn insert(&mut self, department: &str, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(DeskprobeError::EmptyToken(department.to_string()));
        }
        self.tokens.insert(department.to_string(), token.to_string());
        Ok(())
    }

    /// Token for a department, if one was acquired.
    pub fn get(&self, department: &str) -> Option<&str> {
        self.tokens.get(department).map(String::as_str)
    }

    /// Whether a token was acquired for the department.
    pub fn contains(&self, department: &str) -> bool {
        self.tokens.contains_key(department)
    }

    /// Departments holding a token, sorted.
    pub fn departments(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
