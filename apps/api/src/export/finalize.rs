//! Export finalization: applies the user's accept/decline choices to an
//! analysis result and resolves everything the document renderer needs.
//!
//! Declined suggestions fall back to the original text; undecided ones keep the
//! suggestion. The renderer itself is out of process and only sees `RenderDocument`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analysis::insights::CvInsights;
use crate::analysis::language::OutputLanguage;
use crate::export::labels::{labels_for, SectionLabels};
use crate::export::themes::{Theme, ThemePalette};

pub const DEFAULT_FILENAME: &str = "Enhanced_CV.pdf";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Declined,
}

/// Per-section decisions. Experiences are keyed by `Experience::id`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Selections {
    pub summary: Option<Decision>,
    pub experiences: HashMap<u32, Decision>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialNetworks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialNetworks {
    /// Drops blank handles so the renderer never prints empty rows.
    fn without_blanks(self) -> Self {
        let keep = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            github: keep(self.github),
            portfolio: keep(self.portfolio),
            twitter: keep(self.twitter),
            instagram: keep(self.instagram),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub insights: CvInsights,
    #[serde(default)]
    pub selections: Selections,
    pub selected_title: Option<String>,
    pub custom_title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub social_networks: SocialNetworks,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub language: OutputLanguage,
    pub filename: Option<String>,
}

/// Input contract of the document renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDocument {
    pub data: CvInsights,
    pub name: String,
    pub target_role: String,
    pub labels: SectionLabels,
    pub theme: ThemePalette,
    pub social_networks: SocialNetworks,
    pub language: OutputLanguage,
    pub filename: String,
}

pub fn finalize(request: ExportRequest) -> RenderDocument {
    let ExportRequest {
        mut insights,
        selections,
        selected_title,
        custom_title,
        name,
        social_networks,
        theme,
        language,
        filename,
    } = request;

    if selections.summary == Some(Decision::Declined) {
        insights.summary.suggested = insights.summary.original.clone();
    }
    for exp in &mut insights.experiences {
        if selections.experiences.get(&exp.id) == Some(&Decision::Declined) {
            exp.suggested_bullets = exp.original_bullets.clone();
        }
    }

    let target_role = resolve_title(
        custom_title.as_deref(),
        selected_title.as_deref(),
        &insights.target_titles,
    );
    let name = non_blank(name.as_deref())
        .unwrap_or(insights.name.trim())
        .to_string();

    RenderDocument {
        data: insights,
        name,
        target_role,
        labels: labels_for(language),
        theme: theme.palette(),
        social_networks: social_networks.without_blanks(),
        language,
        filename: resolve_filename(filename.as_deref()),
    }
}

/// Custom title, else the picked suggestion, else the first suggestion, else empty.
pub fn resolve_title(custom: Option<&str>, selected: Option<&str>, suggested: &[String]) -> String {
    non_blank(custom)
        .or_else(|| non_blank(selected))
        .or_else(|| suggested.first().map(String::as_str))
        .unwrap_or_default()
        .to_string()
}

fn resolve_filename(filename: Option<&str>) -> String {
    let Some(base) = non_blank(filename) else {
        return DEFAULT_FILENAME.to_string();
    };
    let base = base.replace(['/', '\\'], "_");
    if base.to_ascii_lowercase().ends_with(".pdf") {
        base
    } else {
        format!("{base}.pdf")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
