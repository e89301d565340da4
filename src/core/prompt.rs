use crate::core::format::{format_measurement, Unit};
use crate::models::{CandidateActivity, DailyTrend, HealthSnapshot, RecommendationRequest, WorkoutRecord};

/// Most recent workouts listed in the prompt
pub const MAX_RECENT_WORKOUTS: usize = 5;

/// Days of trend data listed in the prompt
pub const TREND_DAYS: usize = 7;

const ROLE_PREAMBLE: &str = "You are an expert fitness coach inside the Lume sports app. \
Analyze the user's health data, recent workouts and local conditions, then recommend \
activities they can join or do on their own. Prefer the available activities listed below \
when they suit the user's fitness level and preferences.";

const RESPONSE_INSTRUCTIONS: &str = "\
RESPONSE FORMAT:
Respond using exactly the line format below, one record per line. Do not use markdown, \
numbering or any other commentary. Provide 3 to 5 suggestions and 2 to 4 tips.

SUGGESTION: Title | Description | ActivityType | DurationMinutes | Intensity | MatchScore | Reasoning | Icon | Time | Participants
TIP: Title | Description | Category | Priority | Icon | Actionable
MOTIVATIONAL_MESSAGE: <short encouraging message, at most 50 characters>
ANALYSIS: <2-3 sentences about the user's current fitness state>
RECOMMENDATIONS:
- <recommendation>
- <recommendation>

Rules:
- DurationMinutes, MatchScore (0-100) and Participants are whole numbers.
- Intensity is one of Low, Medium, High.
- Priority is one of High, Medium, Low.
- Actionable is true or false.
- Icon is a single emoji.
- Never use the sequence \" | \" inside a field value.";

/// Assemble the full prompt for one analysis cycle.
///
/// Pure string assembly. Missing optional values degrade to placeholder text
/// and empty optional blocks (weather, activity summary) are left out.
pub fn build_prompt(request: &RecommendationRequest) -> String {
    let mut sections = vec![
        ROLE_PREAMBLE.to_string(),
        health_section(&request.health),
        workouts_section(&request.recent_workouts),
        trends_section(&request.daily_trends),
        preferences_section(request.preferences.iter().map(String::as_str)),
    ];

    let weather = request.weather_analysis.trim();
    if !weather.is_empty() {
        sections.push(format!("WEATHER ANALYSIS:\n{}", weather));
    }

    let summary = request.activity_summary.trim();
    if !summary.is_empty() {
        sections.push(format!("ACTIVITY SUMMARY:\n{}", summary));
    }

    sections.push(activities_section(&request.candidate_activities));
    sections.push(RESPONSE_INSTRUCTIONS.to_string());

    sections.join("\n\n")
}

fn health_section(health: &HealthSnapshot) -> String {
    let lines = [
        format!("HEALTH METRICS (as of {} UTC):", health.timestamp.format("%Y-%m-%d %H:%M")),
        format!("- Steps today: {}", health.step_count),
        format!("- Active calories: {}", format_measurement(Some(health.active_calories), Unit::Kilocalories)),
        format!("- Heart rate: {}", format_measurement(health.heart_rate, Unit::BeatsPerMinute)),
        format!("- Workout minutes: {}", health.workout_minutes),
        format!("- Sleep: {}", format_measurement(health.sleep_hours, Unit::Hours)),
        format!("- Body weight: {}", format_measurement(health.body_weight_kg, Unit::Kilograms)),
        format!("- Resting heart rate: {}", format_measurement(health.resting_heart_rate, Unit::BeatsPerMinute)),
        format!("- VO2 max: {}", format_measurement(health.vo2_max, Unit::Vo2Max)),
    ];
    lines.join("\n")
}

fn workouts_section(workouts: &[WorkoutRecord]) -> String {
    if workouts.is_empty() {
        return "RECENT WORKOUTS:\nNo recent workouts".to_string();
    }

    let mut recent: Vec<&WorkoutRecord> = workouts.iter().collect();
    recent.sort_by(|a, b| b.start.cmp(&a.start));

    let lines: Vec<String> = recent
        .into_iter()
        .take(MAX_RECENT_WORKOUTS)
        .map(|w| {
            format!(
                "- {}: {}, {} min, {}",
                w.start.format("%b %d"),
                w.activity_kind,
                w.duration_minutes(),
                format_measurement(Some(w.calories), Unit::Kilocalories),
            )
        })
        .collect();

    format!("RECENT WORKOUTS:\n{}", lines.join("\n"))
}

fn trends_section(trends: &[DailyTrend]) -> String {
    if trends.is_empty() {
        return "7-DAY TREND:\nNo trend data available".to_string();
    }

    let skip = trends.len().saturating_sub(TREND_DAYS);
    let lines: Vec<String> = trends
        .iter()
        .skip(skip)
        .map(|day| {
            format!(
                "- {}: {} steps, {}, {} workout min",
                day.date.format("%b %d"),
                day.step_count,
                format_measurement(Some(day.active_calories), Unit::Kilocalories),
                day.workout_minutes,
            )
        })
        .collect();

    format!("7-DAY TREND:\n{}", lines.join("\n"))
}

fn preferences_section<'a>(preferences: impl Iterator<Item = &'a str>) -> String {
    let joined = preferences
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if joined.is_empty() {
        "USER PREFERENCES: No specific preferences".to_string()
    } else {
        format!("USER PREFERENCES: {}", joined)
    }
}

fn activities_section(activities: &[CandidateActivity]) -> String {
    if activities.is_empty() {
        return "AVAILABLE ACTIVITIES:\nNo activities currently available".to_string();
    }

    let entries: Vec<String> = activities
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let when = a
                .starts_at
                .map(|t| t.format("%b %d, %H:%M").to_string())
                .unwrap_or_else(|| "Time to be announced".to_string());
            let distance = a
                .distance_km
                .map(|d| format!(" ({} away)", format_measurement(Some(d), Unit::Kilometers)))
                .unwrap_or_default();

            format!(
                "{}. {}\n   Sport: {} {}\n   Host: {}\n   When: {}\n   Where: {}{}\n   Skill level: {}\n   Spots: {}/{} available",
                i + 1,
                a.title,
                a.sport,
                a.icon,
                a.host_name,
                when,
                a.location,
                distance,
                a.skill_level,
                a.spots_available(),
                a.capacity,
            )
        })
        .collect();

    format!("AVAILABLE ACTIVITIES:\n{}", entries.join("\n"))
}
