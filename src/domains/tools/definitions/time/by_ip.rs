//! Current time for the caller's IP address.

use tracing::instrument;

use super::super::{NoParams, ToolDefinition, common::ReportResult};
use super::current_time_sentence;
use crate::core::config::Config;

/// Time-by-IP tool implementation.
#[derive(Debug, Clone)]
pub struct TimeByIpTool;

impl ToolDefinition for TimeByIpTool {
    const NAME: &'static str = "time_by_ip";

    const DESCRIPTION: &'static str = "Get the current date, time, weekday and timezone based on the \
        public IP address of the server (worldtimeapi.org). Returns a single sentence, e.g. \
        'It is currently Tuesday, March 05, 2024, 02:03:12 PM in Europe/Berlin timezone'.";

    type Params = NoParams;

    #[instrument(name = "time_by_ip", skip_all)]
    fn report(_params: &NoParams, config: &Config) -> ReportResult {
        current_time_sentence(config)
    }
}
