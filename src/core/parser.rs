//! Line-based parser for recommendation completions.
//!
//! Each trimmed line is dispatched on its prefix:
//!
//! ```text
//! SUGGESTION: Title | Description | ActivityType | DurationMinutes | Intensity | MatchScore | Reasoning | Icon | Time | Participants
//! TIP: Title | Description | Category | Priority | Icon | Actionable
//! MOTIVATIONAL_MESSAGE: <text>
//! ANALYSIS: <text>
//! RECOMMENDATIONS:
//! - <text>
//! ```
//!
//! Parsing is strictly line-local. Fields are split on the literal `" | "`
//! with no escaping, so a field value containing that sequence shifts every
//! following field. Short records are dropped, never reported as errors.

use crate::core::fallback;
use crate::models::{Intensity, Priority, RecommendationResponse, Suggestion, Tip};

pub const FIELD_SEPARATOR: &str = " | ";

const SUGGESTION_TAG: &str = "SUGGESTION:";
const TIP_TAG: &str = "TIP:";
const MOTIVATION_TAG: &str = "MOTIVATIONAL_MESSAGE:";
const ANALYSIS_TAG: &str = "ANALYSIS:";
const RECOMMENDATIONS_TAG: &str = "RECOMMENDATIONS:";
const BULLET: &str = "- ";

const SUGGESTION_FIELDS: usize = 10;
const TIP_FIELDS: usize = 6;

pub const DEFAULT_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_MATCH_SCORE: u8 = 80;
pub const DEFAULT_PARTICIPANTS: u32 = 1;

/// Records found in a completion before any defaults are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScannedCompletion {
    pub suggestions: Vec<Suggestion>,
    pub tips: Vec<Tip>,
    pub motivational_message: Option<String>,
    pub analysis: Option<String>,
    pub recommendations: Vec<String>,
    /// `SUGGESTION:`/`TIP:` lines that had too few fields
    pub dropped_lines: usize,
}

impl ScannedCompletion {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
            && self.tips.is_empty()
            && self.motivational_message.is_none()
            && self.analysis.is_none()
            && self.recommendations.is_empty()
    }
}

/// Parse a completion into a response, filling any empty part from the fallback set
pub fn parse_completion(text: &str) -> RecommendationResponse {
    let scanned = scan_completion(text);

    if scanned.dropped_lines > 0 {
        tracing::debug!("Dropped {} malformed suggestion/tip lines", scanned.dropped_lines);
    }

    fallback::fill_defaults(scanned)
}

/// Scan a completion without applying defaults
pub fn scan_completion(text: &str) -> ScannedCompletion {
    let mut scanned = ScannedCompletion::default();

    for raw in text.lines() {
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix(SUGGESTION_TAG) {
            match parse_suggestion(rest) {
                Some(suggestion) => scanned.suggestions.push(suggestion),
                None => scanned.dropped_lines += 1,
            }
        } else if let Some(rest) = line.strip_prefix(TIP_TAG) {
            match parse_tip(rest) {
                Some(tip) => scanned.tips.push(tip),
                None => scanned.dropped_lines += 1,
            }
        } else if let Some(rest) = line.strip_prefix(MOTIVATION_TAG) {
            scanned.motivational_message = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(ANALYSIS_TAG) {
            scanned.analysis = Some(rest.trim().to_string());
        } else if line.starts_with(RECOMMENDATIONS_TAG) {
            // Section marker only
        } else if let Some(rest) = line.strip_prefix(BULLET) {
            if line.contains(SUGGESTION_TAG) || line.contains(TIP_TAG) {
                continue;
            }
            let item = rest.trim();
            if !item.is_empty() {
                scanned.recommendations.push(item.to_string());
            }
        }
    }

    scanned
}

/// Parse the part of a `SUGGESTION:` line after the tag.
///
/// Needs at least ten fields; extra fields are ignored. Numeric fields that
/// fail to parse take their defaults. The match score is clamped into 0-100.
/// Duration and participants are counts, so a negative value is a parse failure.
pub fn parse_suggestion(fields: &str) -> Option<Suggestion> {
    let f = split_fields(fields);
    if f.len() < SUGGESTION_FIELDS {
        return None;
    }

    Some(Suggestion {
        title: f[0].to_string(),
        description: f[1].to_string(),
        activity_type: f[2].to_string(),
        duration_minutes: f[3].parse().unwrap_or(DEFAULT_DURATION_MINUTES),
        intensity: Intensity::from_label(f[4]),
        match_score: f[5]
            .parse::<i64>()
            .map(|score| score.clamp(0, 100) as u8)
            .unwrap_or(DEFAULT_MATCH_SCORE),
        reasoning: f[6].to_string(),
        icon: f[7].to_string(),
        suggested_time: f[8].to_string(),
        participants: f[9].parse().unwrap_or(DEFAULT_PARTICIPANTS),
    })
}

/// Parse the part of a `TIP:` line after the tag. Needs at least six fields.
pub fn parse_tip(fields: &str) -> Option<Tip> {
    let f = split_fields(fields);
    if f.len() < TIP_FIELDS {
        return None;
    }

    Some(Tip {
        title: f[0].to_string(),
        description: f[1].to_string(),
        category: f[2].to_string(),
        priority: Priority::from_label(f[3]),
        icon: f[4].to_string(),
        actionable: f[5].eq_ignore_ascii_case("true"),
    })
}

fn split_fields(fields: &str) -> Vec<&str> {
    fields.trim().split(FIELD_SEPARATOR).map(str::trim).collect()
}
