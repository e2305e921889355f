// Résumé analysis: prompt building, provider call, normalization, response assembly.
// All upstream calls go through llm_client; nothing here talks HTTP to a provider.

pub mod handlers;
pub mod insights;
pub mod language;
pub mod normalizer;
pub mod pipeline;
pub mod prompts;
