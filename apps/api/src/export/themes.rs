use serde::{Deserialize, Serialize};

/// Colour theme of the exported document's sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Slate,
    Emerald,
    Violet,
    Rose,
    Amber,
}

/// Resolved colours handed to the renderer. All values are hex RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePalette {
    pub id: Theme,
    pub background: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub section_border: &'static str,
    pub name: &'static str,
    pub section_text: &'static str,
}

impl Theme {
    pub const fn palette(self) -> ThemePalette {
        let (background, text, accent, section_border, section_text) = match self {
            Theme::Slate => ("#1E293B", "#F8FAFC", "#38BDF8", "#334155", "#94A3B8"),
            Theme::Emerald => ("#064E3B", "#ECFDF5", "#34D399", "#065F46", "#A7F3D0"),
            Theme::Violet => ("#4C1D95", "#F5F3FF", "#A78BFA", "#5B21B6", "#C4B5FD"),
            Theme::Rose => ("#881337", "#FFF1F2", "#FB7185", "#9F1239", "#FECDD3"),
            Theme::Amber => ("#78350F", "#FFFBEB", "#FBBF24", "#92400E", "#FDE68A"),
        };
        ThemePalette {
            id: self,
            background,
            text,
            accent,
            section_border,
            name: "#FFFFFF",
            section_text,
        }
    }
}
