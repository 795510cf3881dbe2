//! Static lookup tables shared by the time and weather tools.
//!
//! All three tables are total: any input produces a label, unknown values
//! map to a fallback instead of an error.

use std::borrow::Cow;

use serde_json::Value;

use super::common::Scalar;

/// WMO weather interpretation codes as reported by Open-Meteo.
pub const WEATHER_CODES: &[(i64, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Describe a weather code, e.g. `3` -> `"Overcast"`.
pub fn weather_description(code: i64) -> Cow<'static, str> {
    WEATHER_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| Cow::Borrowed(*label))
        .unwrap_or_else(|| Cow::Owned(format!("Unknown weather (code: {code})")))
}

/// Describe a weather code as reported upstream.
///
/// A missing code reads as `0`. Non-integral codes are never in the table
/// and are echoed with their JSON spelling.
pub fn weather_condition(code: Option<&Scalar>) -> Cow<'static, str> {
    match code {
        None => weather_description(0),
        Some(scalar) => match scalar.as_i64() {
            Some(code) => weather_description(code),
            None => Cow::Owned(format!("Unknown weather (code: {scalar})")),
        },
    }
}

/// US AQI bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiLevel {
    /// Upper bounds (inclusive) of every bucket except `Hazardous`.
    pub const THRESHOLDS: [(f64, AqiLevel); 5] = [
        (50.0, AqiLevel::Good),
        (100.0, AqiLevel::Moderate),
        (150.0, AqiLevel::UnhealthyForSensitiveGroups),
        (200.0, AqiLevel::Unhealthy),
        (300.0, AqiLevel::VeryUnhealthy),
    ];

    /// Bucket a numeric AQI value.
    ///
    /// NaN is deliberately `None` (reported as `Unknown`) rather than falling
    /// through every comparison into `Hazardous`.
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        let level = Self::THRESHOLDS
            .iter()
            .find(|(upper, _)| value <= *upper)
            .map(|(_, level)| *level)
            .unwrap_or(AqiLevel::Hazardous);
        Some(level)
    }

    pub fn label(self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::VeryUnhealthy => "Very Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }
}

/// Level label for an optional AQI reading, `Unknown` when absent.
pub fn aqi_label(value: Option<f64>) -> &'static str {
    value
        .and_then(AqiLevel::classify)
        .map(AqiLevel::label)
        .unwrap_or("Unknown")
}

/// Level label for a raw JSON value.
///
/// Numbers and numeric strings are classified; anything else is `Unknown`.
pub fn aqi_label_for(value: &Value) -> &'static str {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    aqi_label(number)
}

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Weekday name for worldtimeapi's `day_of_week`.
///
/// Numbering starts at 0 = Sunday (not ISO-8601). Out of range gives `N/A`.
pub fn weekday_name(index: i64) -> &'static str {
    usize::try_from(index)
        .ok()
        .and_then(|i| WEEKDAYS.get(i))
        .copied()
        .unwrap_or("N/A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_table_code_has_its_label() {
        for (code, label) in WEATHER_CODES {
            assert_eq!(weather_description(*code), *label);
        }
        assert_eq!(weather_description(0), "Clear sky");
        assert_eq!(weather_description(99), "Thunderstorm with heavy hail");
    }

    #[test]
    fn test_unknown_weather_code_mentions_code() {
        assert_eq!(weather_description(42), "Unknown weather (code: 42)");
        assert!(weather_description(-1).contains("-1"));
    }

    #[test]
    fn test_weather_condition_from_json() {
        let scalar = |v: Value| serde_json::from_value::<Scalar>(v).unwrap();
        assert_eq!(weather_condition(None), "Clear sky");
        assert_eq!(weather_condition(Some(&scalar(json!(3)))), "Overcast");
        assert_eq!(weather_condition(Some(&scalar(json!(3.0)))), "Overcast");
        assert_eq!(
            weather_condition(Some(&scalar(json!(3.5)))),
            "Unknown weather (code: 3.5)"
        );
        assert_eq!(
            weather_condition(Some(&scalar(json!("fog")))),
            "Unknown weather (code: fog)"
        );
    }

    #[test]
    fn test_aqi_boundaries() {
        assert_eq!(aqi_label(Some(0.0)), "Good");
        assert_eq!(aqi_label(Some(50.0)), "Good");
        assert_eq!(aqi_label(Some(51.0)), "Moderate");
        assert_eq!(aqi_label(Some(100.0)), "Moderate");
        assert_eq!(aqi_label(Some(101.0)), "Unhealthy for Sensitive Groups");
        assert_eq!(aqi_label(Some(150.0)), "Unhealthy for Sensitive Groups");
        assert_eq!(aqi_label(Some(151.0)), "Unhealthy");
        assert_eq!(aqi_label(Some(200.0)), "Unhealthy");
        assert_eq!(aqi_label(Some(300.0)), "Very Unhealthy");
        assert_eq!(aqi_label(Some(301.0)), "Hazardous");
        assert_eq!(aqi_label(Some(50.5)), "Moderate");
    }

    #[test]
    fn test_aqi_unknown_inputs() {
        assert_eq!(aqi_label(None), "Unknown");
        assert_eq!(aqi_label(Some(f64::NAN)), "Unknown");
        assert_eq!(aqi_label_for(&json!("abc")), "Unknown");
        assert_eq!(aqi_label_for(&Value::Null), "Unknown");
        assert_eq!(aqi_label_for(&json!([1])), "Unknown");
    }

    #[test]
    fn test_aqi_from_json() {
        assert_eq!(aqi_label_for(&json!(42)), "Good");
        assert_eq!(aqi_label_for(&json!("120")), "Unhealthy for Sensitive Groups");
        assert_eq!(aqi_label_for(&json!(500.5)), "Hazardous");
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(0), "Sunday");
        assert_eq!(weekday_name(3), "Wednesday");
        assert_eq!(weekday_name(6), "Saturday");
        assert_eq!(weekday_name(7), "N/A");
        assert_eq!(weekday_name(-1), "N/A");
    }
}
