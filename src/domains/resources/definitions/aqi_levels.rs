//! US AQI level table resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;
use crate::domains::tools::definitions::lookup::AqiLevel;

/// The AQI buckets used to label air quality readings.
pub struct AqiLevelsResource;

impl ResourceDefinition for AqiLevelsResource {
    const URI: &'static str = "reference://aqi-levels";
    const NAME: &'static str = "AQI Levels";
    const DESCRIPTION: &'static str = "US AQI ranges and their level labels";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        let mut out = String::from("# US AQI Levels\n\n| Range | Level |\n|-------|-------|\n");
        let mut lower = 0.0;
        for (upper, level) in AqiLevel::THRESHOLDS {
            out.push_str(&format!("| {lower} - {upper} | {} |\n", level.label()));
            lower = upper;
        }
        out.push_str(&format!("| > {lower} | {} |\n", AqiLevel::Hazardous.label()));
        out.push_str("\nRanges are upper-inclusive. Missing readings are reported as `Unknown`.\n");
        ResourceContent::Text(out)
    }
}
