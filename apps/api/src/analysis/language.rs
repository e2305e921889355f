use serde::{Deserialize, Serialize};

/// Language the rewritten résumé is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLanguage {
    En,
    #[default]
    Pt,
    Es,
}

impl OutputLanguage {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en" => Some(OutputLanguage::En),
            "pt" => Some(OutputLanguage::Pt),
            "es" => Some(OutputLanguage::Es),
            _ => None,
        }
    }

    /// Full language name used in the prompt's output-language instruction.
    pub const fn display_name(self) -> &'static str {
        match self {
            OutputLanguage::En => "English",
            OutputLanguage::Pt => "Brazilian Portuguese",
            OutputLanguage::Es => "Spanish",
        }
    }
}
