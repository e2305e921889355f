use serde::Serialize;

use crate::analysis::language::OutputLanguage;

/// Section headings printed in the exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionLabels {
    pub summary: &'static str,
    pub experience: &'static str,
    pub skills: &'static str,
    pub education: &'static str,
    pub languages: &'static str,
    pub certifications: &'static str,
    pub references: &'static str,
    pub contact: &'static str,
}

pub const fn labels_for(language: OutputLanguage) -> SectionLabels {
    match language {
        OutputLanguage::En => SectionLabels {
            summary: "Professional Summary",
            experience: "Experience",
            skills: "Skills",
            education: "Education",
            languages: "Languages",
            certifications: "Certifications",
            references: "References",
            contact: "Contact",
        },
        OutputLanguage::Pt => SectionLabels {
            summary: "Resumo Profissional",
            experience: "Experiência",
            skills: "Habilidades",
            education: "Formação",
            languages: "Idiomas",
            certifications: "Certificações",
            references: "Referências",
            contact: "Contato",
        },
        OutputLanguage::Es => SectionLabels {
            summary: "Resumen Profesional",
            experience: "Experiencia",
            skills: "Habilidades",
            education: "Educación",
            languages: "Idiomas",
            certifications: "Certificaciones",
            references: "Referencias",
            contact: "Contacto",
        },
    }
}
