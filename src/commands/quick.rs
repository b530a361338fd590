//! Quick commands: ping

use std::time::Duration;

use super::{CommandContext, CommandResult, Reply};

pub const PINGING: &str = "Pinging...";

/// The round trip is measured by whoever sends the reply.
pub async fn ping(_cx: &CommandContext<'_>, _args: &[String]) -> CommandResult {
    Ok(Reply::Pong)
}

/// Text the "Pinging..." message is edited to.
pub fn pong_message(latency: Duration, api_latency: Option<Duration>) -> String {
    match api_latency {
        Some(api) => format!(
            "Pong! Latency is {}ms. API Latency is {}ms.",
            latency.as_millis(),
            api.as_millis()
        ),
        None => format!(
            "Pong! Latency is {}ms. API Latency is unavailable.",
            latency.as_millis()
        ),
    }
}
