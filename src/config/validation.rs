use std::collections::HashSet;

use super::schema::EngineConfig;
use crate::punctuation::builtin_schemes;
use crate::records::{builtin_filters, RecordFilter};

/// Validate catalog extensions at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &EngineConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let mut scheme_codes: HashSet<String> =
        builtin_schemes().into_iter().map(|s| s.code).collect();
    for (i, scheme) in config.punctuation.iter().enumerate() {
        if scheme.code.trim().is_empty() {
            errors.push(format!("punctuation[{}].code: must not be empty", i));
        } else if !scheme_codes.insert(scheme.code.clone()) {
            errors.push(format!(
                "punctuation[{}].code: '{}' is already defined",
                i, scheme.code
            ));
        }
        if scheme.finish.is_empty() {
            errors.push(format!("punctuation[{}].finish: must not be empty", i));
        }
        if scheme.finish.iter().any(|p| *p < 0.0) {
            errors.push(format!("punctuation[{}].finish: must be non-negative", i));
        }
        if let Some(ref qualifying) = scheme.qualifying {
            if qualifying.iter().any(|p| *p < 0.0) {
                errors.push(format!("punctuation[{}].qualifying: must be non-negative", i));
            }
        }
        if let Some(bonus) = scheme.fastest_lap {
            if bonus < 0.0 {
                errors.push(format!("punctuation[{}].fastest_lap: must be non-negative", i));
            }
        }
    }

    let mut record_codes: HashSet<String> =
        builtin_filters().into_iter().map(|f| f.code).collect();
    for (i, record) in config.records.iter().enumerate() {
        if !record_codes.insert(record.code.clone()) {
            errors.push(format!(
                "records[{}].code: '{}' is already defined",
                i, record.code
            ));
        }
        if let Err(e) = RecordFilter::parse(
            &record.code,
            &record.label,
            &record.filter,
            record.team_doubles_filter,
        ) {
            errors.push(format!("records[{}].filter: {}", i, e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
