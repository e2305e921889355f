//! Response normalizer: raw provider text to a fully-populated `CvInsights`.
//!
//! Flow: strip fences → parse JSON → require an object → drop nulls →
//! deserialize each top-level field on its own.
//!
//! A field of the wrong type falls back to its empty default and a malformed
//! list item is dropped, so one bad field never discards the whole result.
//! Text that is not JSON at all is a hard `LlmError::Parse`.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::analysis::insights::CvInsights;
use crate::llm_client::{strip_json_fences, LlmError};

/// Upper bound on suggested titles kept from the model output.
pub const MAX_TARGET_TITLES: usize = 3;

pub fn normalize(raw: &str) -> Result<CvInsights, LlmError> {
    let cleaned = strip_json_fences(raw);

    let mut value: Value = serde_json::from_str(&cleaned).map_err(|e| LlmError::Parse {
        raw: raw.to_string(),
        reason: e.to_string(),
    })?;

    prune_nulls(&mut value);

    let Value::Object(mut obj) = value else {
        return Err(LlmError::Parse {
            raw: raw.to_string(),
            reason: "expected a JSON object at the top level".to_string(),
        });
    };

    let mut insights = CvInsights {
        name: field(&mut obj, "name"),
        target_titles: list(&mut obj, "targetTitles"),
        summary: field(&mut obj, "summary"),
        contact: field(&mut obj, "contact"),
        experiences: list(&mut obj, "experiences"),
        skills: field(&mut obj, "skills"),
        education: list(&mut obj, "education"),
        languages: list(&mut obj, "languages"),
        certifications: list(&mut obj, "certifications"),
        references: list(&mut obj, "references"),
    };

    insights.target_titles.retain(|t| !t.trim().is_empty());
    insights.target_titles.truncate(MAX_TARGET_TITLES);
    ensure_unique_experience_ids(&mut insights);

    Ok(insights)
}

/// Removes `null` object members and array items, recursively.
fn prune_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(prune_nulls);
        }
        Value::Array(items) => {
            items.retain(|v| !v.is_null());
            items.iter_mut().for_each(prune_nulls);
        }
        _ => {}
    }
}

fn field<T: DeserializeOwned + Default>(obj: &mut Map<String, Value>, key: &str) -> T {
    let Some(value) = obj.remove(key) else {
        return T::default();
    };
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(field = key, error = %e, "Malformed field in model output, using empty default");
        T::default()
    })
}

fn list<T: DeserializeOwned>(obj: &mut Map<String, Value>, key: &str) -> Vec<T> {
    match obj.remove(key) {
        None => Vec::new(),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    warn!(field = key, index, error = %e, "Dropping malformed list item");
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!(
                field = key,
                found = json_kind(&other),
                "Expected an array in model output, using empty default"
            );
            Vec::new()
        }
    }
}

/// Re-numbers experiences 1..=n when any id is missing or repeated.
fn ensure_unique_experience_ids(insights: &mut CvInsights) {
    let mut seen = HashSet::new();
    let valid = insights
        .experiences
        .iter()
        .all(|exp| exp.id != 0 && seen.insert(exp.id));
    if valid {
        return;
    }

    warn!(
        count = insights.experiences.len(),
        "Experience ids missing or duplicated, re-numbering"
    );
    for (index, exp) in insights.experiences.iter_mut().enumerate() {
        exp.id = index as u32 + 1;
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_OUTPUT: &str = r#"{
        "name": "Ana Souza",
        "targetTitles": ["Backend Engineer", "Platform Engineer"],
        "summary": {"original": "Dev apaixonada", "suggested": "Backend engineer with 6 years in Go"},
        "contact": {"email": "ana@example.com", "linkedin": "linkedin.com/in/ana"},
        "experiences": [
            {"id": 1, "company": "Nubank", "title": "SWE", "period": "2020-2024",
             "originalBullets": ["Fiz APIs"], "suggestedBullets": ["Built payment APIs in Go"]}
        ],
        "skills": {"original": ["Go"], "suggested": ["Go", "Kafka"]},
        "education": [{"degree": "BSc CS", "institution": "USP", "year": 2017}],
        "languages": [{"language": "English", "level": "Fluent"}],
        "certifications": ["CKA"],
        "references": []
    }"#;

    #[test]
    fn test_normalize_full_output() {
        let insights = normalize(FULL_OUTPUT).unwrap();
        assert_eq!(insights.name, "Ana Souza");
        assert_eq!(insights.target_titles.len(), 2);
        assert_eq!(insights.contact.email, "ana@example.com");
        assert_eq!(insights.contact.phone, "");
        assert_eq!(insights.experiences[0].company, "Nubank");
        assert_eq!(insights.education[0].year, "2017");
        assert_eq!(insights.certifications, vec!["CKA".to_string()]);
        assert!(insights.references.is_empty());
    }

    #[test]
    fn test_normalize_strips_fences_before_parsing() {
        let fenced = format!("```json\n{FULL_OUTPUT}\n```");
        assert_eq!(normalize(&fenced).unwrap(), normalize(FULL_OUTPUT).unwrap());
    }

    #[test]
    fn test_not_json_is_parse_error_with_raw_text() {
        match normalize("not json") {
            Err(LlmError::Parse { raw, .. }) => assert_eq!(raw, "not json"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_is_parse_error() {
        assert!(matches!(normalize(""), Err(LlmError::Parse { .. })));
        assert!(matches!(normalize("```json\n```"), Err(LlmError::Parse { .. })));
    }

    #[test]
    fn test_top_level_array_is_parse_error() {
        assert!(matches!(normalize("[1, 2]"), Err(LlmError::Parse { .. })));
    }

    #[test]
    fn test_minimal_object_fills_every_default() {
        let insights = normalize("{}").unwrap();
        assert_eq!(insights, CvInsights::default());
    }

    #[test]
    fn test_nulls_become_defaults() {
        let insights = normalize(
            r#"{"name": null, "contact": {"email": null, "phone": "123"},
                "experiences": [null, {"id": 1, "company": "X", "title": "Y", "period": null,
                "originalBullets": null, "suggestedBullets": ["a", null]}],
                "skills": null}"#,
        )
        .unwrap();
        assert_eq!(insights.name, "");
        assert_eq!(insights.contact.email, "");
        assert_eq!(insights.contact.phone, "123");
        assert_eq!(insights.experiences.len(), 1);
        assert_eq!(insights.experiences[0].period, "");
        assert!(insights.experiences[0].original_bullets.is_empty());
        assert_eq!(insights.experiences[0].suggested_bullets, vec!["a".to_string()]);
        assert!(insights.skills.suggested.is_empty());
    }

    #[test]
    fn test_wrong_typed_field_falls_back_without_losing_others() {
        let insights = normalize(
            r#"{"name": "Bo", "summary": "just a string",
                "skills": {"original": [], "suggested": ["Rust"]},
                "certifications": "AWS"}"#,
        )
        .unwrap();
        assert_eq!(insights.name, "Bo");
        assert_eq!(insights.summary.suggested, "");
        assert_eq!(insights.skills.suggested, vec!["Rust".to_string()]);
        assert!(insights.certifications.is_empty());
    }

    #[test]
    fn test_malformed_list_items_are_dropped() {
        let insights = normalize(r#"{"certifications": ["CKA", 3, {"x": 1}, "AWS SAA"]}"#).unwrap();
        assert_eq!(
            insights.certifications,
            vec!["CKA".to_string(), "AWS SAA".to_string()]
        );
    }

    #[test]
    fn test_target_titles_capped_at_three() {
        let insights =
            normalize(r#"{"targetTitles": ["A", "", "B", "C", "D"]}"#).unwrap();
        assert_eq!(insights.target_titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_duplicate_experience_ids_are_renumbered() {
        let insights = normalize(
            r#"{"experiences": [
                {"id": 1, "company": "A"}, {"id": 1, "company": "B"}, {"company": "C"}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<u32> = insights.experiences.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_unique_experience_ids_are_kept() {
        let insights =
            normalize(r#"{"experiences": [{"id": 4, "company": "A"}, {"id": 9, "company": "B"}]}"#)
                .unwrap();
        let ids: Vec<u32> = insights.experiences.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 9]);
    }
}
