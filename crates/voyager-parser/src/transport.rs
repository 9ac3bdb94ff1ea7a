// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::TransportationType;
use crate::patterns::ParsingPatterns;
use std::sync::Arc;

pub struct TransportationDetector {
    patterns: Arc<ParsingPatterns>,
}

impl TransportationDetector {
    pub fn new(patterns: Arc<ParsingPatterns>) -> Self {
        Self { patterns }
    }

    /// Keyword hits per mode, in table order. Counting is by substring, so
    /// "walking" scores for both "walk" and "walking".
    pub fn scores(&self, full_text: &str) -> Vec<(TransportationType, usize)> {
        let text = full_text.to_lowercase();
        self.patterns
            .transport_keywords
            .iter()
            .map(|(mode, keywords)| {
                let score = keywords
                    .iter()
                    .filter(|k| !k.is_empty())
                    .map(|k| text.matches(k.to_lowercase().as_str()).count())
                    .sum();
                (*mode, score)
            })
            .collect()
    }

    /// Mode with the most keyword hits. Ties go to the mode listed first;
    /// no hits at all means `Mixed`.
    pub fn detect_transportation(&self, full_text: &str) -> TransportationType {
        let scores = self.scores(full_text);
        let mut best: Option<(TransportationType, usize)> = None;
        for &(mode, score) in &scores {
            if score > 0 && best.map_or(true, |(_, top)| score > top) {
                best = Some((mode, score));
            }
        }
        log::debug!("[Transport] scores: {:?}", scores);
        best.map_or(TransportationType::Mixed, |(mode, _)| mode)
    }
}
