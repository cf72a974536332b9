use serde::Serialize;
use serde_json::Value;

pub(crate) const PORTABLE_FORMAT_TAG: &str = "GOOD";

/// Outcome of a pre-import check. Recoverable issues land in `warnings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    pub artifact_count: usize,
    pub character_count: usize,
    pub weapon_count: usize,
}

/// Checks a portable-export payload without normalizing it.
pub fn validate(payload: &Value) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let object = match payload {
        Value::Null => {
            errors.push("payload is empty or not valid JSON".to_string());
            return report(errors, warnings, ValidationStats::default());
        }
        Value::Object(object) => object,
        _ => {
            errors.push("payload is not a JSON object".to_string());
            return report(errors, warnings, ValidationStats::default());
        }
    };

    if let Some(format) = object.get("format").and_then(Value::as_str) {
        if format != PORTABLE_FORMAT_TAG {
            warnings.push(format!(
                "format is \"{format}\" instead of \"{PORTABLE_FORMAT_TAG}\"; parsing may be incomplete"
            ));
        }
    }

    match object.get("artifacts").and_then(Value::as_array) {
        None => errors.push("no artifacts array found in the payload".to_string()),
        Some(artifacts) if artifacts.is_empty() => {
            warnings.push("artifacts array is empty".to_string())
        }
        Some(_) => {}
    }

    let stats = ValidationStats {
        artifact_count: array_len(payload, "artifacts"),
        character_count: array_len(payload, "characters"),
        weapon_count: array_len(payload, "weapons"),
    };

    report(errors, warnings, stats)
}

fn array_len(payload: &Value, field: &str) -> usize {
    payload
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

fn report(errors: Vec<String>, warnings: Vec<String>, stats: ValidationStats) -> ValidationReport {
    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_artifacts_array_is_valid_with_warning() {
        let report = validate(&json!({ "artifacts": [] }));
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings, vec!["artifacts array is empty".to_string()]);
    }

    #[test]
    fn empty_object_is_missing_artifacts() {
        let report = validate(&json!({}));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("artifacts"));
    }

    #[test]
    fn non_object_payloads_are_rejected() {
        assert!(!validate(&json!([1, 2, 3])).valid);
        assert!(!validate(&json!("GOOD")).valid);
        let null_report = validate(&Value::Null);
        assert!(null_report.errors[0].contains("empty"));
    }

    #[test]
    fn mismatched_format_tag_only_warns() {
        let report = validate(&json!({
            "format": "EXPORT",
            "artifacts": [{}],
            "characters": [{}, {}],
            "weapons": [{}]
        }));
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("EXPORT"));
        assert_eq!(
            report.stats,
            ValidationStats {
                artifact_count: 1,
                character_count: 2,
                weapon_count: 1,
            }
        );
    }

    #[test]
    fn artifacts_must_be_an_array() {
        let report = validate(&json!({ "format": "GOOD", "artifacts": "none" }));
        assert!(!report.valid);
        assert!(report.warnings.is_empty());
    }
}
