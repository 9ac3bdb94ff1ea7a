// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Reading itineraries that were produced as JSON, typically by a language
//! model asked to follow the `TravelItinerary` schema.

use crate::error::ParsingError;
use crate::model::{ParserKind, RequestMetadata, TravelItinerary};

/// Strips Markdown code fences and any chatter around the outermost JSON
/// object.
pub fn clean_json_output(raw: &str) -> &str {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("```json").or_else(|| s.strip_prefix("```")) {
        s = rest;
    }
    if let Some(rest) = s.trim_end().strip_suffix("```") {
        s = rest;
    }
    let s = s.trim();

    match (s.find('{'), s.rfind('}')) {
        (Some(start), Some(end)) if start < end => &s[start..=end],
        _ => s,
    }
}

/// Decodes and validates a JSON itinerary. Metadata is attached when the
/// document carries none.
pub fn parse_structured(raw: &str) -> Result<TravelItinerary, ParsingError> {
    if raw.trim().is_empty() {
        return Err(ParsingError::InvalidText(
            "Response cannot be empty".to_string(),
        ));
    }

    let itinerary: TravelItinerary = serde_json::from_str(clean_json_output(raw))?;
    if itinerary.metadata().is_some() {
        return Ok(itinerary);
    }
    let metadata = RequestMetadata::new(raw, ParserKind::Ai)?;
    Ok(itinerary.with_metadata(metadata))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransportationType;

    const DOC: &str = r#"{
        "destination": "Amsterdam",
        "duration_days": 2,
        "transportation": "walking",
        "itinerary": [
            {"day": 1, "location": "Amsterdam", "activities": ["Van Gogh Museum"]},
            {"day": 2, "location": "Amsterdam", "activities": ["Anne Frank House"]}
        ]
    }"#;

    #[test]
    fn test_clean_json_output_with_code_blocks() {
        let input = "```json\n                {\"test\": \"value\"}\n                ```";
        assert_eq!(clean_json_output(input), r#"{"test": "value"}"#);
    }

    #[test]
    fn test_clean_json_output_extract_json() {
        let input = r#"Some text before {"test": "value"} some text after"#;
        assert_eq!(clean_json_output(input), r#"{"test": "value"}"#);
        assert_eq!(clean_json_output("no json here"), "no json here");
    }

    #[test]
    fn test_parse_structured_success() {
        let fenced = format!("Here you go:\n```json\n{}\n```", DOC);
        let result = parse_structured(&fenced).unwrap();
        assert_eq!(result.destination(), "Amsterdam");
        assert_eq!(result.duration_days(), 2);
        assert_eq!(result.transportation(), TransportationType::Walking);
        assert_eq!(
            result.metadata().map(|m| m.parser_used()),
            Some(ParserKind::Ai)
        );
    }

    #[test]
    fn test_parse_structured_keeps_existing_metadata() {
        let with_meta = DOC.replacen(
            "\"destination\"",
            r#""metadata": {"original_request": "2 days in Amsterdam", "parser_used": "manual"}, "destination""#,
            1,
        );
        let result = parse_structured(&with_meta).unwrap();
        let metadata = result.metadata().unwrap();
        assert_eq!(metadata.parser_used(), ParserKind::Manual);
        assert_eq!(metadata.original_request(), "2 days in Amsterdam");
    }

    #[test]
    fn test_parse_structured_errors() {
        assert!(matches!(
            parse_structured("Invalid JSON content"),
            Err(ParsingError::Json(_))
        ));
        assert!(parse_structured("  ").unwrap_err().is_invalid_text());

        let gap = DOC.replace("\"day\": 2", "\"day\": 3");
        let err = parse_structured(&gap).unwrap_err();
        assert!(err.to_string().contains("Days must be sequential"));
    }
}
