use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::domain::common::entities::app_errors::CoreError;

static JSON_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```json\b(.*?)```").expect("fenced block pattern is valid")
});

/// Returns the trimmed body of the single ```json fenced block in `reply`.
///
/// Zero blocks, more than one block, or an empty block are all rejected so a
/// plausible-looking reply never half-parses.
pub fn extract_fenced_block(reply: &str) -> Result<&str, CoreError> {
    let mut blocks = JSON_FENCE.captures_iter(reply);

    let block = blocks
        .next()
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| CoreError::MalformedResponse("no fenced json block found".to_string()))?;

    if blocks.next().is_some() {
        return Err(CoreError::MalformedResponse(
            "expected exactly one fenced json block".to_string(),
        ));
    }

    let content = block.as_str().trim();
    if content.is_empty() {
        return Err(CoreError::MalformedResponse(
            "fenced json block is empty".to_string(),
        ));
    }

    Ok(content)
}

/// Extracts the fenced block and deserializes it into `T` without coercion.
pub fn parse_fenced_json<T: DeserializeOwned>(reply: &str) -> Result<T, CoreError> {
    let content = extract_fenced_block(reply)?;

    serde_json::from_str(content).map_err(|e| {
        tracing::warn!("Fenced block did not match the response contract: {}", e);
        CoreError::MalformedResponse(format!("invalid structured data: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        vegan: bool,
        keywords: Vec<String>,
    }

    #[test]
    fn test_extract_trims_surrounding_whitespace() {
        let reply = "```json\n\n  {\"a\": 1}  \n\n```";
        assert_eq!(extract_fenced_block(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_tag_is_case_insensitive() {
        let reply = "Here you go:\n```JSON\n{\"a\": 1}\n```\n";
        assert_eq!(extract_fenced_block(reply).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_extract_without_block() {
        let reply = "{\"vegan\": true, \"keywords\": []}";
        assert!(matches!(
            extract_fenced_block(reply),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_untagged_block_is_rejected() {
        let reply = "```\n{\"a\": 1}\n```";
        assert!(extract_fenced_block(reply).is_err());
    }

    #[test]
    fn test_extract_other_tag_is_rejected() {
        let reply = "```jsonc\n{\"a\": 1}\n```";
        assert!(extract_fenced_block(reply).is_err());
    }

    #[test]
    fn test_extract_multiple_blocks() {
        let reply = "```json\n{\"a\": 1}\n```\nand\n```json\n{\"a\": 2}\n```";
        assert!(matches!(
            extract_fenced_block(reply),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_extract_empty_block() {
        assert!(extract_fenced_block("```json\n   \n```").is_err());
    }

    #[test]
    fn test_parse_exact_values() {
        let reply = "```json\n{\"vegan\": false, \"keywords\": [\"蜂蜜\", \"明膠\"]}\n```";
        let parsed: Sample = parse_fenced_json(reply).unwrap();
        assert_eq!(
            parsed,
            Sample {
                vegan: false,
                keywords: vec!["蜂蜜".to_string(), "明膠".to_string()],
            }
        );
    }

    #[test]
    fn test_parse_rejects_coercion() {
        let reply = "```json\n{\"vegan\": \"false\", \"keywords\": []}\n```";
        assert!(matches!(
            parse_fenced_json::<Sample>(reply),
            Err(CoreError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_missing_field() {
        let reply = "```json\n{\"vegan\": true}\n```";
        assert!(parse_fenced_json::<Sample>(reply).is_err());
    }
}
