use once_cell::sync::Lazy;
use std::sync::Mutex;

use super::*;
use crate::core::errors::RelumeError;

// The from_env tests mutate process-wide environment state.
static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn occurrence(name: &str, count: usize, line: usize, context: &str) -> VariableOccurrence {
    VariableOccurrence {
        name: name.to_string(),
        occurrence_count: count,
        first_line: line,
        context_line: context.to_string(),
    }
}

fn occurrences(count: usize) -> Vec<VariableOccurrence> {
    (1..=count)
        .map(|n| occurrence(&format!("v{n}"), 1, n, "local x = 1"))
        .collect()
}

fn test_oracle() -> NamingOracle {
    NamingOracle::new(OracleConfig::with_api_key("test-key")).unwrap()
}

#[test]
fn test_from_env_requires_api_key() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::remove_var("GEMINI_API_KEY");

    let result = OracleConfig::from_env();
    assert!(matches!(result, Err(RelumeError::Config { .. })));
}

#[test]
fn test_from_env_reads_api_key() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::set_var("GEMINI_API_KEY", "key-from-env");

    let config = OracleConfig::from_env().unwrap();
    assert_eq!(config.api_key, "key-from-env");

    std::env::remove_var("GEMINI_API_KEY");
}

#[test]
fn test_builder_chain() {
    let config = OracleConfig::with_api_key("k")
        .with_model("custom-model")
        .with_endpoint("https://example.invalid/v1")
        .with_timeout_secs(5)
        .with_concurrency(3)
        .with_context_budget(1234);

    assert_eq!(config.api_key, "k");
    assert_eq!(config.model, "custom-model");
    assert_eq!(config.api_endpoint, "https://example.invalid/v1");
    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.max_concurrency, 3);
    assert_eq!(config.context_chars, 1234);
}

#[test]
fn test_concurrency_floor_is_one() {
    let config = OracleConfig::with_api_key("k").with_concurrency(0);
    assert_eq!(config.max_concurrency, 1);
}

#[test]
fn test_throughput_batch_sizes() {
    assert_eq!(Throughput::Normal.batch_size(), 8);
    assert_eq!(Throughput::Fast.batch_size(), 40);
}

#[test]
fn test_plan_batches_normal_splits_into_small_batches() {
    let plan = test_oracle().plan_batches(&occurrences(25), Throughput::Normal);

    assert_eq!(plan.batch_size, 8);
    assert_eq!(plan.total_variables, 25);
    assert_eq!(plan.batches.len(), 4);
    assert_eq!(plan.batches[0].len(), 8);
    assert_eq!(plan.batches[3].len(), 1);
    assert_eq!(plan.batches[0][0], "v1");
    assert_eq!(plan.batches[3][0], "v25");
}

#[test]
fn test_plan_batches_fast_uses_one_large_batch() {
    let plan = test_oracle().plan_batches(&occurrences(25), Throughput::Fast);

    assert_eq!(plan.batch_size, 40);
    assert_eq!(plan.batches.len(), 1);
    assert_eq!(plan.batches[0].len(), 25);
}

#[test]
fn test_plan_batches_empty_input() {
    let plan = test_oracle().plan_batches(&[], Throughput::Normal);
    assert_eq!(plan.total_variables, 0);
    assert!(plan.batches.is_empty());
}

#[test]
fn test_build_prompt_lists_variables_with_context() {
    let oracle = test_oracle();
    let batch = vec![
        occurrence("v1", 3, 1, "local v1 = game:GetService(\"Players\")"),
        occurrence("pu7", 1, 9, "local pu7 = v1.LocalPlayer"),
    ];

    let prompt = oracle.build_prompt("local v1 = game", &batch);

    assert!(prompt.contains("1. v1 (3 occurrences), first seen on line 1"));
    assert!(prompt.contains("2. pu7 (1 occurrences), first seen on line 9"));
    assert!(prompt.contains("GetService(\"Players\")"));
    assert!(prompt.contains("exactly 2"));
    assert!(prompt.contains("JSON only"));
}

#[test]
fn test_build_prompt_truncates_source_to_context_budget() {
    let oracle =
        NamingOracle::new(OracleConfig::with_api_key("test-key").with_context_budget(16)).unwrap();
    let source = "local v1 = game\n-- trailing text beyond the prompt budget";

    let prompt = oracle.build_prompt(source, &[occurrence("v1", 1, 1, "local v1 = game")]);

    assert!(!prompt.contains("trailing text"));
}

#[test]
fn test_parse_suggestions_plain_json() {
    let names = parse_suggestions(r#"{"names": ["Players", "LocalPlayer"]}"#, 2, 0).unwrap();
    assert_eq!(names, vec!["Players", "LocalPlayer"]);
}

#[test]
fn test_parse_suggestions_strips_markdown_fences() {
    let reply = "```json\n{\"names\": [\"HitCounter\"]}\n```";
    let names = parse_suggestions(reply, 1, 0).unwrap();
    assert_eq!(names, vec!["HitCounter"]);

    let bare_fence = "```\n{\"names\": [\"HitCounter\"]}\n```";
    let names = parse_suggestions(bare_fence, 1, 0).unwrap();
    assert_eq!(names, vec!["HitCounter"]);
}

#[test]
fn test_parse_suggestions_rejects_count_mismatch() {
    let result = parse_suggestions(r#"{"names": ["One", "Two"]}"#, 3, 5);
    match result {
        Err(RelumeError::Oracle { message, batch, .. }) => {
            assert!(message.contains("expected 3 names, got 2"));
            assert_eq!(batch, Some(5));
        }
        other => panic!("expected batch failure, got {other:?}"),
    }
}

#[test]
fn test_parse_suggestions_rejects_prose() {
    let result = parse_suggestions("Sure! Here are some names you could use.", 1, 2);
    assert!(matches!(result, Err(RelumeError::Oracle { .. })));
}

#[test]
fn test_excerpt_cuts_on_char_boundary() {
    assert_eq!(excerpt("abcdef", 4), "abcd");
    assert_eq!(excerpt("ab", 4), "ab");
    // Multi-byte chars count as one each; the cut never splits one.
    assert_eq!(excerpt("héllo wörld", 5), "héllo");
}

#[test]
fn test_oracle_construction() {
    let oracle = test_oracle();
    assert_eq!(oracle.config().api_key, "test-key");
    assert_eq!(oracle.config().max_concurrency, 1);
}

#[test]
fn test_naming_request_shape() {
    let request = GeminiRequest::naming("prompt text".to_string());
    let json = serde_json::to_string(&request).unwrap();

    assert!(json.contains("\"generationConfig\""));
    assert!(json.contains("\"responseMimeType\":\"application/json\""));
    assert!(json.contains("prompt text"));
}

#[test]
fn test_response_primary_text() {
    let reply: GeminiResponse = serde_json::from_str(
        r#"{"candidates": [{"content": {"parts": [{"text": "{\"names\": []}"}]}}]}"#,
    )
    .unwrap();
    assert_eq!(reply.primary_text(), Some("{\"names\": []}"));

    let empty: GeminiResponse = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.primary_text(), None);
}
