//! Bot status commands.

use crate::framework::{Context, Error};
use crate::plugins::{CommandSet, LoadReport, Plugin, PluginError};
use std::time::Duration;

/// Registers `ping` and `about`.
pub struct MetaPlugin;

impl Plugin for MetaPlugin {
    fn name(&self) -> &'static str {
        "meta"
    }

    fn description(&self) -> &'static str {
        "Latency and status information"
    }

    fn setup(&self, commands: &mut CommandSet) -> Result<(), PluginError> {
        commands.add(ping()).add(about());
        Ok(())
    }
}

/// Shows the gateway latency.
#[poise::command(prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    let response = if latency.is_zero() {
        "Pong! (latency not measured yet)".to_string()
    } else {
        format!("Pong! {} ms", latency.as_millis())
    };
    ctx.say(response).await?;
    Ok(())
}

/// Shows what the bot is running with.
#[poise::command(prefix_command)]
pub async fn about(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let libraries = data.state.libraries().map_or(0, |libraries| libraries.len());
    let response = format!(
        "**RTFM Bot** v{}\nUptime: {}\nPlugins:\n{}\nLibraries: {}",
        env!("CARGO_PKG_VERSION"),
        format_uptime(data.started_at.elapsed()),
        plugin_summary(&data.plugins),
        libraries
    );
    ctx.say(response).await?;
    Ok(())
}

/// One line per loaded plugin, with its description when it has one.
pub fn plugin_summary(report: &LoadReport) -> String {
    if report.loaded.is_empty() {
        return "- none".to_string();
    }
    report
        .loaded
        .iter()
        .map(|name| match report.description(name) {
            Some(description) => format!("- {name}: {description}"),
            None => format!("- {name}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats a duration as `1d 2h 3m 4s`, dropping leading zero units.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (days, hours, minutes, seconds) = (
        secs / 86_400,
        (secs % 86_400) / 3_600,
        (secs % 3_600) / 60,
        secs % 60,
    );
    match (days, hours, minutes) {
        (0, 0, 0) => format!("{seconds}s"),
        (0, 0, _) => format!("{minutes}m {seconds}s"),
        (0, _, _) => format!("{hours}h {minutes}m {seconds}s"),
        _ => format!("{days}d {hours}h {minutes}m {seconds}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(Duration::from_secs(5)), "5s");
        assert_eq!(format_uptime(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3_600)), "1h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "1d 1h 1m 1s");
    }

    #[test]
    fn test_setup_registers_commands() {
        let mut commands = CommandSet::default();
        MetaPlugin.setup(&mut commands).unwrap();
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn test_commands_are_prefix_only() {
        for command in [ping(), about()] {
            assert!(command.prefix_action.is_some(), "{}", command.name);
            assert!(command.slash_action.is_none(), "{}", command.name);
        }
    }

    #[test]
    fn test_plugin_summary() {
        let mut report = LoadReport::default();
        assert_eq!(plugin_summary(&report), "- none");

        report.loaded = vec!["meta".to_string(), "custom".to_string()];
        report
            .descriptions
            .insert("meta".to_string(), "Latency and status information".to_string());
        assert_eq!(
            plugin_summary(&report),
            "- meta: Latency and status information\n- custom"
        );
    }
}
