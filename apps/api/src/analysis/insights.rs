//! CVInsights: the structured result every provider path must produce.
//!
//! Every field has an identity default so absent upstream values serialize as
//! `""` or `[]`, never `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvInsights {
    pub name: String,
    pub target_titles: Vec<String>,
    pub summary: TextPair,
    pub contact: Contact,
    pub experiences: Vec<Experience>,
    pub skills: ListPair,
    pub education: Vec<Education>,
    pub languages: Vec<LanguageSkill>,
    pub certifications: Vec<String>,
    pub references: Vec<Reference>,
}

/// Original text next to its suggested rewrite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPair {
    pub original: String,
    pub suggested: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPair {
    pub original: Vec<String>,
    pub suggested: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    /// Unique within `CvInsights::experiences`; 0 means "not assigned yet".
    #[serde(deserialize_with = "lenient_id")]
    pub id: u32,
    pub company: String,
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub period: String,
    pub original_bullets: Vec<String>,
    pub suggested_bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(deserialize_with = "lenient_string")]
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSkill {
    pub language: String,
    /// Usually Native, Fluent, Advanced, Intermediate or Basic; other labels are kept as given.
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reference {
    pub name: String,
    pub title: String,
    pub company: String,
    pub contact: String,
}

/// Most providers send `2019`, some send `"2019"`.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// Response schema declared to schema-enforcing providers.
pub fn response_schema() -> Value {
    let string = json!({"type": "STRING"});
    let string_list = json!({"type": "ARRAY", "items": {"type": "STRING"}});
    let pair = |item: &Value| {
        json!({
            "type": "OBJECT",
            "properties": {"original": item, "suggested": item},
            "required": ["original", "suggested"]
        })
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "name": string,
            "targetTitles": string_list,
            "summary": pair(&string),
            "contact": {
                "type": "OBJECT",
                "properties": {
                    "email": string,
                    "phone": string,
                    "location": string,
                    "linkedin": string
                }
            },
            "experiences": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": {"type": "INTEGER"},
                        "company": string,
                        "title": string,
                        "period": string,
                        "originalBullets": string_list,
                        "suggestedBullets": string_list
                    },
                    "required": ["id", "company", "title", "originalBullets", "suggestedBullets"]
                }
            },
            "skills": pair(&string_list),
            "education": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {"degree": string, "institution": string, "year": string}
                }
            },
            "languages": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {"language": string, "level": string}
                }
            },
            "certifications": string_list,
            "references": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": string,
                        "title": string,
                        "company": string,
                        "contact": string
                    }
                }
            }
        },
        "required": ["summary", "experiences", "skills"]
    })
}
