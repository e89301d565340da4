/// Placeholder rendered for any missing measurement
pub const NOT_AVAILABLE: &str = "N/A";

/// Units used when rendering health metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    BeatsPerMinute,
    Hours,
    Kilograms,
    Kilocalories,
    Kilometers,
    Vo2Max,
}

impl Unit {
    fn suffix(self) -> &'static str {
        match self {
            Unit::BeatsPerMinute => "bpm",
            Unit::Hours => "hours",
            Unit::Kilograms => "kg",
            Unit::Kilocalories => "kcal",
            Unit::Kilometers => "km",
            Unit::Vo2Max => "mL/kg/min",
        }
    }

    fn decimals(self) -> usize {
        match self {
            Unit::BeatsPerMinute | Unit::Kilocalories => 0,
            Unit::Hours | Unit::Kilograms | Unit::Kilometers | Unit::Vo2Max => 1,
        }
    }
}

/// Render an optional measurement with its unit, or `N/A` when unset
pub fn format_measurement(value: Option<f64>, unit: Unit) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*} {}", unit.decimals(), v, unit.suffix()),
        _ => NOT_AVAILABLE.to_string(),
    }
}
