// Prompt fragments shared by every provider path.
// Task-specific prompts live beside the code that sends them (analysis::prompts).

/// Output discipline appended to every structured-output prompt.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
