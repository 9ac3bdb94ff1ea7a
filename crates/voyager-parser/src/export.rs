// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Entry points for callers holding raw model output, and helpers to hand
//! the resulting days on as JSON.

use crate::error::ParsingError;
use crate::model::{
    check_sequence, ItineraryDay, ParserKind, RequestMetadata, TransportationType,
    TravelItinerary,
};
use crate::parser::{ManualItineraryParser, UNKNOWN_DESTINATION};
use crate::structured::parse_structured;
use serde_json::Value;

/// Activity of the last-resort itinerary when every parser gave up.
pub const FALLBACK_ACTIVITY: &str = "Plan your trip";

/// Tries the response as structured JSON, then as free text, then settles
/// for a one-day placeholder plan. Only an empty response is an error.
pub fn parse_with_fallback(
    response: &str,
    parser: &ManualItineraryParser,
) -> Result<TravelItinerary, ParsingError> {
    if response.trim().is_empty() {
        return Err(ParsingError::InvalidText(
            "Response cannot be empty".to_string(),
        ));
    }

    match parse_structured(response) {
        Ok(itinerary) => return Ok(itinerary),
        Err(e) => log::info!("[Pipeline] Structured parsing failed: {}. Trying manual parser", e),
    }

    match parser.parse_itinerary_text(response) {
        Ok(itinerary) => Ok(itinerary),
        Err(e) => {
            log::warn!("[Pipeline] Manual parsing also failed: {}", e);
            fallback_itinerary(response)
        }
    }
}

/// Like [`parse_with_fallback`], returning only the days.
pub fn parse_itinerary_output(
    response: &str,
    parser: &ManualItineraryParser,
) -> Result<Vec<ItineraryDay>, ParsingError> {
    parse_with_fallback(response, parser).map(TravelItinerary::into_days)
}

fn fallback_itinerary(response: &str) -> Result<TravelItinerary, ParsingError> {
    let day = ItineraryDay::new(1, UNKNOWN_DESTINATION, [FALLBACK_ACTIVITY])?;
    let metadata = RequestMetadata::new(response, ParserKind::Fallback)?;
    Ok(
        TravelItinerary::new(UNKNOWN_DESTINATION, TransportationType::Mixed, vec![day])?
            .with_metadata(metadata),
    )
}

/// True when `days` is non-empty and numbered exactly 1..=N.
pub fn validate_itinerary(days: &[ItineraryDay]) -> bool {
    match check_sequence(days) {
        Ok(()) => true,
        Err(e) => {
            log::debug!("[Export] Validation error: {}", e);
            false
        }
    }
}

/// Pretty JSON array of days. Non-ASCII text is written as-is.
pub fn export_to_json(days: &[ItineraryDay]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(days)
}

pub fn export_to_dict(days: &[ItineraryDay]) -> Result<Vec<Value>, serde_json::Error> {
    days.iter().map(serde_json::to_value).collect()
}
