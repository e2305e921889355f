// Prompt for the résumé rewrite call.
// The objective and résumé text are spliced in verbatim; nothing is escaped or truncated.

use crate::analysis::language::OutputLanguage;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

const ROLE_INSTRUCTION: &str = "You are an expert career coach and résumé writer. \
    Rewrite the résumé below so that it targets the candidate's career objective.";

const REWRITE_RULES: &str = r#"RULES:
- Keep the result concise enough to fit on 1 to 2 printed pages.
- Remove subjective filler language ("passionate", "hard-working", "team player", "results-driven") unless a concrete fact backs it.
- Merge redundant or overlapping bullets into a single, stronger bullet.
- Never invent employers, job titles, dates, figures or degrees that are not in the résumé.
- Suggest 1 to 3 job titles aligned with the objective in "targetTitles".
- "summary.original", "originalBullets" and "skills.original" quote the résumé; "summary.suggested", "suggestedBullets" and "skills.suggested" hold your rewrite.
- Give every experience a unique integer "id", starting at 1.
- Extract every optional field that is present in the résumé: contact (email, phone, location, linkedin), languages with a proficiency level (Native, Fluent, Advanced, Intermediate or Basic), education, certifications and references.
- When an optional field is not present in the résumé, use an empty string or an empty array. Never use null."#;

/// Literal example of the exact JSON shape expected back.
pub const OUTPUT_SHAPE_EXAMPLE: &str = r#"{
  "name": "Full Name",
  "targetTitles": ["Title 1", "Title 2", "Title 3"],
  "summary": {
    "original": "Summary as written in the résumé",
    "suggested": "Rewritten summary"
  },
  "contact": {
    "email": "name@example.com",
    "phone": "+55 11 99999-9999",
    "location": "City, Country",
    "linkedin": "linkedin.com/in/name"
  },
  "experiences": [
    {
      "id": 1,
      "company": "Company",
      "title": "Job Title",
      "period": "Jan 2020 - Present",
      "originalBullets": ["Bullet as written in the résumé"],
      "suggestedBullets": ["Rewritten bullet"]
    }
  ],
  "skills": {
    "original": ["Skill as listed in the résumé"],
    "suggested": ["Suggested skill"]
  },
  "education": [
    {"degree": "Degree", "institution": "Institution", "year": "2019"}
  ],
  "languages": [
    {"language": "English", "level": "Fluent"}
  ],
  "certifications": ["Certification"],
  "references": [
    {"name": "Name", "title": "Title", "company": "Company", "contact": "Email or phone"}
  ]
}"#;

/// Builds the rewrite prompt. Pure and deterministic.
pub fn build_prompt(objective: &str, language: OutputLanguage, text: &str) -> String {
    format!(
        "{ROLE_INSTRUCTION}\n\n\
         CAREER OBJECTIVE:\n{objective}\n\n\
         OUTPUT LANGUAGE: Write every text value of the JSON output in {language}, \
         even when the résumé is written in another language.\n\n\
         {REWRITE_RULES}\n\n\
         {JSON_ONLY_INSTRUCTION}\n\n\
         Return a JSON object with EXACTLY this shape:\n{OUTPUT_SHAPE_EXAMPLE}\n\n\
         RÉSUMÉ TEXT:\n{text}\n",
        language = language.display_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CV_TEXT: &str = "John Doe\nSoftware Engineer\nAcme Corp 2019-2024\n- Built APIs";

    #[test]
    fn test_prompt_embeds_objective_verbatim() {
        let objective = "Senior Backend Role at a \"fintech\" <startup> & co";
        let prompt = build_prompt(objective, OutputLanguage::En, CV_TEXT);
        assert!(prompt.contains(objective));
    }

    #[test]
    fn test_prompt_names_output_language() {
        let prompt = build_prompt("Data Engineer", OutputLanguage::Pt, CV_TEXT);
        assert!(prompt.contains("in Brazilian Portuguese"));

        let prompt = build_prompt("Data Engineer", OutputLanguage::En, CV_TEXT);
        assert!(prompt.contains("in English"));
    }

    #[test]
    fn test_prompt_embeds_full_text_and_shape() {
        let long_text = CV_TEXT.repeat(500);
        let prompt = build_prompt("Staff Engineer", OutputLanguage::Es, &long_text);
        assert!(prompt.contains(&long_text));
        assert!(prompt.contains(OUTPUT_SHAPE_EXAMPLE));
        assert!(prompt.contains("Do NOT use markdown code fences"));
        assert!(prompt.contains("1 to 2 printed pages"));
        assert!(prompt.contains("references"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_prompt("SRE", OutputLanguage::En, CV_TEXT);
        let b = build_prompt("SRE", OutputLanguage::En, CV_TEXT);
        assert_eq!(a, b);
    }

    #[test]
    fn test_placeholder_like_objective_is_not_expanded() {
        let prompt = build_prompt("{text}", OutputLanguage::En, CV_TEXT);
        assert!(prompt.contains("CAREER OBJECTIVE:\n{text}\n"));
    }

    #[test]
    fn test_shape_example_is_valid_json() {
        let value: serde_json::Value = serde_json::from_str(OUTPUT_SHAPE_EXAMPLE).unwrap();
        assert!(value["experiences"][0]["suggestedBullets"].is_array());
    }
}
