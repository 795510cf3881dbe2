//! WMO weather code table resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;
use crate::domains::tools::definitions::lookup::WEATHER_CODES;

/// The weather code labels used in weather reports.
pub struct WeatherCodesResource;

impl ResourceDefinition for WeatherCodesResource {
    const URI: &'static str = "reference://weather-codes";
    const NAME: &'static str = "Weather Codes";
    const DESCRIPTION: &'static str =
        "WMO weather interpretation codes and the labels used in weather reports";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        let mut out = String::from("# Weather Codes\n\n| Code | Description |\n|------|-------------|\n");
        for (code, label) in WEATHER_CODES {
            out.push_str(&format!("| {code} | {label} |\n"));
        }
        out.push_str("\nAny other code is reported as `Unknown weather (code: N)`.\n");
        ResourceContent::Text(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_a_row_per_code() {
        let ResourceContent::Text(text) = WeatherCodesResource::content() else {
            panic!("expected static text");
        };
        let rows = text.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| Code")).count();
        assert_eq!(rows, WEATHER_CODES.len());
        assert!(text.contains("| 0 | Clear sky |"));
    }
}
