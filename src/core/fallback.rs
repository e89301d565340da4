//! Fixed defaults used when a completion yields nothing usable.

use crate::core::parser::ScannedCompletion;
use crate::models::{Intensity, Priority, RecommendationResponse, Suggestion, Tip};

pub const DEFAULT_MOTIVATIONAL_MESSAGE: &str = "Every step counts! Keep moving forward.";

pub const DEFAULT_ANALYSIS: &str =
    "Based on your recent activity, you're building a solid foundation. Keep a steady routine and mix in some variety to keep improving.";

/// Morning Walk and Strength Training
pub fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            title: "Morning Walk".to_string(),
            description: "Start your day with a brisk 30-minute walk".to_string(),
            activity_type: "Walking".to_string(),
            duration_minutes: 30,
            intensity: Intensity::Low,
            match_score: 85,
            reasoning: "Low-impact activity that builds a consistent daily habit".to_string(),
            icon: "🚶".to_string(),
            suggested_time: "Morning".to_string(),
            participants: 1,
        },
        Suggestion {
            title: "Strength Training".to_string(),
            description: "Bodyweight circuit with squats, push-ups and planks".to_string(),
            activity_type: "Strength".to_string(),
            duration_minutes: 20,
            intensity: Intensity::Medium,
            match_score: 75,
            reasoning: "Builds muscle and supports joint health".to_string(),
            icon: "💪".to_string(),
            suggested_time: "Evening".to_string(),
            participants: 1,
        },
    ]
}

/// Stay Hydrated and Warm Up Properly
pub fn default_tips() -> Vec<Tip> {
    vec![
        Tip {
            title: "Stay Hydrated".to_string(),
            description: "Drink water before, during and after exercise".to_string(),
            category: "Hydration".to_string(),
            priority: Priority::High,
            icon: "💧".to_string(),
            actionable: true,
        },
        Tip {
            title: "Warm Up Properly".to_string(),
            description: "Spend 5-10 minutes warming up before intense activity".to_string(),
            category: "Safety".to_string(),
            priority: Priority::Medium,
            icon: "🔥".to_string(),
            actionable: true,
        },
    ]
}

pub fn default_recommendations() -> Vec<String> {
    vec![
        "Aim for at least 150 minutes of moderate activity per week".to_string(),
        "Include strength training at least twice a week".to_string(),
        "Get 7-9 hours of sleep to support recovery".to_string(),
    ]
}

/// Complete a scanned completion, replacing every empty part with its default
pub fn fill_defaults(scanned: ScannedCompletion) -> RecommendationResponse {
    let ScannedCompletion {
        suggestions,
        tips,
        motivational_message,
        analysis,
        recommendations,
        ..
    } = scanned;

    if suggestions.is_empty() || tips.is_empty() {
        tracing::warn!(
            "Completion missing records (suggestions: {}, tips: {}), using defaults",
            suggestions.len(),
            tips.len()
        );
    }

    RecommendationResponse {
        suggestions: non_empty_or(suggestions, default_suggestions),
        tips: non_empty_or(tips, default_tips),
        motivational_message: motivational_message
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| DEFAULT_MOTIVATIONAL_MESSAGE.to_string()),
        analysis: analysis
            .filter(|analysis| !analysis.is_empty())
            .unwrap_or_else(|| DEFAULT_ANALYSIS.to_string()),
        recommendations: non_empty_or(recommendations, default_recommendations),
    }
}

/// The full fallback set, used when no completion is available at all
pub fn fallback_response() -> RecommendationResponse {
    fill_defaults(ScannedCompletion::default())
}

fn non_empty_or<T>(items: Vec<T>, default: fn() -> Vec<T>) -> Vec<T> {
    if items.is_empty() {
        default()
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_response_is_complete() {
        let response = fallback_response();
        assert_eq!(response.suggestions, default_suggestions());
        assert_eq!(response.tips, default_tips());
        assert_eq!(response.recommendations.len(), 3);
        assert_eq!(response.motivational_message, DEFAULT_MOTIVATIONAL_MESSAGE);
        assert_eq!(response.analysis, DEFAULT_ANALYSIS);
    }

    #[test]
    fn test_fill_defaults_keeps_parsed_parts() {
        let scanned = ScannedCompletion {
            tips: default_tips().into_iter().take(1).collect(),
            analysis: Some("Custom".to_string()),
            ..Default::default()
        };

        let response = fill_defaults(scanned);

        assert_eq!(response.tips.len(), 1);
        assert_eq!(response.suggestions.len(), 2);
        assert_eq!(response.analysis, "Custom");
    }

    #[test]
    fn test_fill_defaults_replaces_empty_text() {
        let scanned = ScannedCompletion {
            motivational_message: Some(String::new()),
            analysis: Some(String::new()),
            ..Default::default()
        };

        let response = fill_defaults(scanned);

        assert_eq!(response.motivational_message, DEFAULT_MOTIVATIONAL_MESSAGE);
        assert_eq!(response.analysis, DEFAULT_ANALYSIS);
    }

    #[test]
    fn test_default_titles() {
        let titles: Vec<String> = default_suggestions().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Morning Walk", "Strength Training"]);

        let tips: Vec<String> = default_tips().into_iter().map(|t| t.title).collect();
        assert_eq!(tips, vec!["Stay Hydrated", "Warm Up Properly"]);
    }
}
