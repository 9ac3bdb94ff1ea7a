// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::ConfigError;
use crate::model::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParsingError {
    /// The input fails the precondition check (empty or blank).
    #[error("{0}")]
    InvalidText(String),
    #[error("Itinerary validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parser configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ParsingError {
    pub fn is_invalid_text(&self) -> bool {
        matches!(self, ParsingError::InvalidText(_))
    }
}
