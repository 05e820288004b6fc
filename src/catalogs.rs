use std::sync::OnceLock;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::punctuation::{PunctuationCatalog, PunctuationScheme};
use crate::records::{RecordFilter, RecordFilterCatalog};

/// Punctuation schemes and record filters, built together and then frozen.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub punctuation: PunctuationCatalog,
    pub records: RecordFilterCatalog,
}

static INSTALLED: OnceLock<Catalogs> = OnceLock::new();

impl Catalogs {
    pub fn builtin() -> Self {
        Self {
            punctuation: PunctuationCatalog::builtin(),
            records: RecordFilterCatalog::builtin(),
        }
    }

    /// Built-in catalogs extended with `config`.
    ///
    /// Fails on the first duplicate code or malformed filter; a partially
    /// built catalog is never returned.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut catalogs = Self::builtin();
        for scheme in &config.punctuation {
            catalogs.punctuation.register(scheme.clone())?;
        }
        for record in &config.records {
            let filter = RecordFilter::parse(
                &record.code,
                &record.label,
                &record.filter,
                record.team_doubles_filter,
            )?;
            catalogs.records.register(filter)?;
        }
        tracing::debug!(
            schemes = catalogs.punctuation.len(),
            records = catalogs.records.len(),
            "catalogs built"
        );
        Ok(catalogs)
    }

    pub fn resolve_scheme(&self, code: &str) -> Option<&PunctuationScheme> {
        let scheme = self.punctuation.resolve(code);
        if scheme.is_none() {
            tracing::warn!(code, "unknown punctuation code, scoring as zero");
        }
        scheme
    }

    pub fn record(&self, code: &str) -> Result<&RecordFilter, EngineError> {
        self.records.get(code)
    }
}

/// Make `catalogs` the process-wide catalogs. Only the first call succeeds.
pub fn install(catalogs: Catalogs) -> Result<&'static Catalogs, EngineError> {
    INSTALLED
        .set(catalogs)
        .map_err(|_| EngineError::CatalogAlreadyInstalled)?;
    Ok(global())
}

/// The installed catalogs, or the built-in ones if nothing was installed.
///
/// Once this has been called, `install` fails.
pub fn global() -> &'static Catalogs {
    INSTALLED.get_or_init(Catalogs::builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecordFilterConfig;
    use crate::records::FilterValue;
    use std::collections::BTreeMap;

    fn hat_trick() -> RecordFilterConfig {
        let mut filter = BTreeMap::new();
        filter.insert("qualifying".to_string(), FilterValue::Int(1));
        filter.insert("finish".to_string(), FilterValue::Int(1));
        filter.insert("fastest_lap".to_string(), FilterValue::Bool(true));
        RecordFilterConfig {
            code: "HAT-TRICK".to_string(),
            label: "Hat trick".to_string(),
            filter,
            team_doubles_filter: false,
        }
    }

    #[test]
    fn test_from_config_extends_builtins() {
        let config = EngineConfig {
            punctuation: vec![PunctuationScheme::new("CLUB", "Club", vec![3.0, 2.0, 1.0])],
            records: vec![hat_trick()],
        };
        let catalogs = Catalogs::from_config(&config).unwrap();
        assert!(catalogs.resolve_scheme("CLUB").is_some());
        assert!(catalogs.resolve_scheme("F1-25").is_some());
        assert_eq!(catalogs.record("HAT-TRICK").unwrap().conditions.len(), 3);
        assert!(catalogs.record("POLE").is_ok());
    }

    #[test]
    fn test_from_config_duplicate_scheme_fails() {
        let config = EngineConfig {
            punctuation: vec![PunctuationScheme::new("MotoGP", "Again", vec![1.0])],
            records: vec![],
        };
        assert_eq!(
            Catalogs::from_config(&config).unwrap_err(),
            EngineError::DuplicateScheme("MotoGP".to_string())
        );
    }

    #[test]
    fn test_from_config_bad_filter_fails() {
        let mut bad = hat_trick();
        bad.filter.insert("laps__gte".to_string(), FilterValue::Int(10));
        let config = EngineConfig {
            punctuation: vec![],
            records: vec![bad],
        };
        assert!(matches!(
            Catalogs::from_config(&config),
            Err(EngineError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_install_only_once() {
        // global() fills the cell with the built-ins
        let _ = global();
        assert_eq!(
            install(Catalogs::builtin()).unwrap_err(),
            EngineError::CatalogAlreadyInstalled
        );
    }
}
