// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Turns free-form travel plans (English and Ukrainian, usually written by a
//! language model) into a validated day-by-day [`TravelItinerary`].
//!
//! The pipeline is linear: normalize the text, then walk it line by line
//! looking for day markers and activity lines, with destination and
//! transportation detected over the whole text.
//!
//! ```no_run
//! use voyager_parser::ManualItineraryParser;
//!
//! let parser = ManualItineraryParser::new();
//! let plan = parser
//!     .parse_itinerary_text("Trip to Amsterdam for 2 days\nDay 1: Visit Van Gogh Museum")
//!     .unwrap();
//! println!("{}", plan.summary());
//! ```

pub mod activity;
pub mod config;
pub mod day;
pub mod destination;
pub mod error;
pub mod export;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod patterns;
pub mod structured;
pub mod transport;

pub use activity::ActivityExtractor;
pub use config::{ConfigError, ParsingConfig};
pub use day::DayParser;
pub use destination::DestinationExtractor;
pub use error::ParsingError;
pub use export::{
    export_to_dict, export_to_json, parse_itinerary_output, parse_with_fallback,
    validate_itinerary,
};
pub use model::{
    ItineraryDay, ParserKind, RequestMetadata, TransportationType, TravelItinerary,
    ValidationError,
};
pub use normalizer::TextNormalizer;
pub use parser::ManualItineraryParser;
pub use patterns::ParsingPatterns;
pub use structured::parse_structured;
pub use transport::TransportationDetector;
