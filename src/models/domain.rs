use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use validator::Validate;

/// Point-in-time health readings used to ground a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub step_count: u32,
    pub active_calories: f64,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    pub workout_minutes: u32,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
    #[serde(default)]
    pub body_weight_kg: Option<f64>,
    #[serde(default)]
    pub resting_heart_rate: Option<f64>,
    #[serde(default)]
    pub vo2_max: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// A completed workout from the user's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub activity_kind: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_secs: f64,
    pub calories: f64,
    #[serde(default)]
    pub distance_meters: Option<f64>,
}

impl WorkoutRecord {
    /// Workout duration rounded to whole minutes
    pub fn duration_minutes(&self) -> u32 {
        (self.duration_secs.max(0.0) / 60.0).round() as u32
    }
}

/// One day of aggregated activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub step_count: u32,
    pub active_calories: f64,
    pub workout_minutes: u32,
}

/// An activity the user could join, offered to the model as a recommendation option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateActivity {
    pub id: String,
    pub title: String,
    pub sport: String,
    pub icon: String,
    pub host_name: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub location: String,
    pub distance_km: Option<f64>,
    pub capacity: u32,
    pub taken_spots: u32,
    pub skill_level: String,
}

impl CandidateActivity {
    pub fn spots_available(&self) -> u32 {
        self.capacity.saturating_sub(self.taken_spots)
    }
}

/// Everything needed for one analysis cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub health: HealthSnapshot,
    #[validate(length(max = 100))]
    #[serde(default)]
    pub recent_workouts: Vec<WorkoutRecord>,
    #[validate(length(max = 31))]
    #[serde(default)]
    pub daily_trends: Vec<DailyTrend>,
    #[serde(default)]
    pub preferences: BTreeSet<String>,
    #[serde(default)]
    pub weather_analysis: String,
    #[validate(length(max = 50))]
    #[serde(default)]
    pub candidate_activities: Vec<CandidateActivity>,
    #[serde(default)]
    pub activity_summary: String,
}

impl RecommendationRequest {
    /// Request with only health readings; every other section is empty
    pub fn new(health: HealthSnapshot) -> Self {
        Self {
            health,
            recent_workouts: Vec::new(),
            daily_trends: Vec::new(),
            preferences: BTreeSet::new(),
            weather_analysis: String::new(),
            candidate_activities: Vec::new(),
            activity_summary: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Case-insensitive label match; anything unrecognized is `Medium`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Intensity::Low,
            "high" => Intensity::High,
            _ => Intensity::Medium,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intensity::Low => write!(f, "Low"),
            Intensity::Medium => write!(f, "Medium"),
            Intensity::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Case-insensitive label match; anything unrecognized is `Medium`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "high" => Priority::High,
            "low" => Priority::Low,
            _ => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Activity the model chose for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub activity_type: String,
    pub duration_minutes: u32,
    pub intensity: Intensity,
    pub match_score: u8,
    pub reasoning: String,
    pub icon: String,
    pub suggested_time: String,
    pub participants: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tip {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub icon: String,
    pub actionable: bool,
}

/// Parsed result of one analysis cycle.
///
/// `suggestions` and `tips` are never empty once built by the parser or the
/// fallback provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub suggestions: Vec<Suggestion>,
    pub tips: Vec<Tip>,
    pub motivational_message: String,
    pub analysis: String,
    pub recommendations: Vec<String>,
}

/// Where a recommendation response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Completion,
    Fallback,
}
