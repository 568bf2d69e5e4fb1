//! Naming oracle - Gemini integration for AI-assisted variable renaming.
//!
//! The oracle batches scanned variables, sends each batch to Gemini together
//! with a source excerpt, and maps the aligned suggestions back onto the
//! variables. Failures are confined to the batch they occur in: the affected
//! variables come back flagged as failed and every other batch proceeds.
//!
//! Batches are dispatched with bounded concurrency, but a single consumer
//! finalizes results in batch order, so reserved names never race and the
//! output is stable for a given set of responses.

pub mod gemini;
pub mod types;

#[cfg(test)]
mod tests;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::analysis::inferencer::sanitize_base;
use crate::analysis::registry::NameRegistry;
use crate::analysis::scanner::VariableOccurrence;
use crate::core::config::RenameConfig;
use crate::core::errors::{RelumeError, Result};
use crate::core::pipeline::{ProgressCallback, RenameResult};

// Re-export public types
pub use types::{BatchPlan, OracleConfig, Throughput};

// Re-export Gemini types for external use
pub use gemini::{
    GeminiCandidate, GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse, GeminiResponseContent, GeminiResponsePart, NameSuggestions,
};

/// AI naming oracle that suggests descriptive variable names using Gemini
pub struct NamingOracle {
    config: OracleConfig,
    client: reqwest::Client,
}

impl NamingOracle {
    /// Create a new naming oracle with the given configuration
    pub fn new(config: OracleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    /// The active configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Split variables into batches per the throughput setting, without
    /// touching the network. This is what dry-run mode prints.
    pub fn plan_batches(
        &self,
        variables: &[VariableOccurrence],
        throughput: Throughput,
    ) -> BatchPlan {
        let batch_size = throughput.batch_size();
        let batches = variables
            .chunks(batch_size)
            .map(|chunk| chunk.iter().map(|v| v.name.clone()).collect())
            .collect();

        BatchPlan {
            throughput,
            batch_size,
            total_variables: variables.len(),
            batches,
        }
    }

    /// Request name suggestions for every variable, batch by batch.
    ///
    /// Every variable produces exactly one result, in batch order. Variables
    /// in a failed batch are flagged `success: false` and left unrenamed;
    /// one bad batch never aborts the rest. The progress callback fires once
    /// per variable with cumulative counts.
    pub async fn suggest_names(
        &self,
        source: &str,
        variables: &[VariableOccurrence],
        rename_config: &RenameConfig,
        throughput: Throughput,
        progress: Option<&ProgressCallback>,
    ) -> Vec<RenameResult> {
        if variables.is_empty() {
            return Vec::new();
        }

        let total = variables.len();
        let mut registry = NameRegistry::with_reserved(rename_config.reserved_words.clone());
        let mut results = Vec::with_capacity(total);
        let mut completed = 0usize;

        // Create the batch futures eagerly so the buffered stream can drive
        // them without re-borrowing self.
        let requests: Vec<_> = variables
            .chunks(throughput.batch_size())
            .enumerate()
            .map(|(index, batch)| {
                let request = self.query_batch(source, batch, index);
                async move { (index, batch, request.await) }
            })
            .collect();

        let mut responses =
            stream::iter(requests).buffered(self.config.max_concurrency.max(1));

        while let Some((index, batch, outcome)) = responses.next().await {
            match outcome {
                Ok(names) => {
                    for (occurrence, raw) in batch.iter().zip(names) {
                        let base = sanitize_base(&raw, rename_config);
                        let final_name = registry.reserve(&base);
                        debug!(
                            "{} -> {} (batch {})",
                            occurrence.name, final_name, index
                        );

                        let result = RenameResult {
                            original: occurrence.name.clone(),
                            renamed: Some(final_name),
                            success: true,
                        };
                        completed += 1;
                        if let Some(callback) = progress {
                            callback(completed, total, &result);
                        }
                        results.push(result);
                    }
                }
                Err(error) => {
                    warn!(
                        "Batch {} failed, leaving its {} variables unrenamed: {}",
                        index,
                        batch.len(),
                        error
                    );
                    for occurrence in batch {
                        let result = RenameResult {
                            original: occurrence.name.clone(),
                            renamed: None,
                            success: false,
                        };
                        completed += 1;
                        if let Some(callback) = progress {
                            callback(completed, total, &result);
                        }
                        results.push(result);
                    }
                }
            }
        }

        results
    }

    /// Send one batch to Gemini and parse the aligned suggestion list.
    async fn query_batch(
        &self,
        source: &str,
        batch: &[VariableOccurrence],
        index: usize,
    ) -> Result<Vec<String>> {
        let prompt = self.build_prompt(source, batch);
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.config.api_endpoint, self.config.model, self.config.api_key
        );

        debug!("Dispatching batch {} ({} variables)", index, batch.len());

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&GeminiRequest::naming(prompt))
            .send()
            .await
            .map_err(|e| RelumeError::oracle_batch(format!("request failed: {e}"), index))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(RelumeError::oracle_batch(
                format!("Gemini API error {status}: {error_text}"),
                index,
            ));
        }

        let envelope: GeminiResponse = response.json().await.map_err(|e| {
            RelumeError::oracle_batch(format!("invalid response envelope: {e}"), index)
        })?;

        let text = envelope
            .primary_text()
            .ok_or_else(|| RelumeError::oracle_batch("response contained no candidates", index))?;

        parse_suggestions(text, batch.len(), index)
    }

    /// Assemble the naming prompt for one batch.
    fn build_prompt(&self, source: &str, batch: &[VariableOccurrence]) -> String {
        let mut prompt = String::from(
            "You are renaming obfuscated variables in a Lua script for Roblox. \
             For each variable below, propose one short descriptive identifier \
             (letters, digits and underscores only) based on how the variable is used.\n\
             \nVariables:\n",
        );

        for (position, occurrence) in batch.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. {} ({} occurrences), first seen on line {}: {}\n",
                position + 1,
                occurrence.name,
                occurrence.occurrence_count,
                occurrence.first_line,
                occurrence.context_line
            ));
        }

        prompt.push_str("\nSource excerpt:\n```lua\n");
        prompt.push_str(excerpt(source, self.config.context_chars));
        prompt.push_str("\n```\n\n");
        prompt.push_str(&format!(
            "Respond with JSON only, no prose: {{\"names\": [...]}} containing exactly {} \
             entries aligned to the variable list order.",
            batch.len()
        ));

        prompt
    }
}

/// Parse the model's reply into an aligned suggestion list.
///
/// Markdown code fences around the JSON are tolerated. Anything else
/// malformed is a batch failure, including a name count that does not match
/// the batch size.
fn parse_suggestions(text: &str, expected: usize, index: usize) -> Result<Vec<String>> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let body = body.strip_suffix("```").unwrap_or(body).trim();

    let suggestions: NameSuggestions = serde_json::from_str(body)
        .map_err(|e| RelumeError::oracle_batch(format!("malformed suggestion JSON: {e}"), index))?;

    if suggestions.names.len() != expected {
        return Err(RelumeError::oracle_batch(
            format!(
                "expected {} names, got {}",
                expected,
                suggestions.names.len()
            ),
            index,
        ));
    }

    Ok(suggestions.names)
}

/// Truncate the source on a char boundary so prompts stay inside the
/// configured context budget.
fn excerpt(source: &str, limit: usize) -> &str {
    match source.char_indices().nth(limit) {
        Some((cut, _)) => &source[..cut],
        None => source,
    }
}
