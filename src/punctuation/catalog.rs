use std::collections::HashMap;

use super::config::{builtin_schemes, PunctuationScheme};
use crate::error::EngineError;

/// Punctuation schemes keyed by code, in registration order.
#[derive(Debug, Clone, Default)]
pub struct PunctuationCatalog {
    schemes: Vec<PunctuationScheme>,
    index: HashMap<String, usize>,
}

impl PunctuationCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog holding only the built-in schemes.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for scheme in builtin_schemes() {
            catalog.insert(scheme);
        }
        catalog
    }

    /// Add a scheme. A code that is already present, built-in or not, is rejected.
    pub fn register(&mut self, scheme: PunctuationScheme) -> Result<(), EngineError> {
        if self.index.contains_key(&scheme.code) {
            return Err(EngineError::DuplicateScheme(scheme.code));
        }
        tracing::debug!(code = %scheme.code, "registered punctuation scheme");
        self.insert(scheme);
        Ok(())
    }

    fn insert(&mut self, scheme: PunctuationScheme) {
        self.index.insert(scheme.code.clone(), self.schemes.len());
        self.schemes.push(scheme);
    }

    /// Look up a scheme. Unknown codes are not an error: callers score them as zero.
    pub fn resolve(&self, code: &str) -> Option<&PunctuationScheme> {
        self.index.get(code).map(|&i| &self.schemes[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// `(code, label)` for every scheme.
    pub fn labels(&self) -> Vec<(&str, &str)> {
        self.schemes
            .iter()
            .map(|s| (s.code.as_str(), s.label.as_str()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PunctuationScheme> {
        self.schemes.iter()
    }

    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }
}
