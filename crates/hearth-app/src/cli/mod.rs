//! Command-line interface of the `hearth` binary.

mod args;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use hearth_calendar::{BaseEvent, DisplayWindow, Materializer};
use hearth_core::config::Settings;
use hearth_rrule::rule::{OccurrenceGenerator, RecurrencePattern, pattern_to_rule, rule_to_pattern};
use serde_json::{Map, Value};

use args::LooseDateTime;

/// Stored event with every uninterpreted field kept as JSON.
type JsonEvent = BaseEvent<Map<String, Value>>;

#[derive(Debug, Parser)]
#[command(name = "hearth")]
#[command(about = "Recurring household events: expand, inspect and encode rules", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand a JSON array of events into the instances of a window
    Expand {
        /// Events file, or `-` for stdin
        #[arg(long, default_value = "-")]
        events: PathBuf,

        /// First instant of the window
        #[arg(long)]
        from: LooseDateTime,

        /// Last instant of the window; a bare date includes the whole day
        #[arg(long)]
        to: LooseDateTime,

        /// Instant used to decide whether a series has ended [default: now]
        #[arg(long)]
        now: Option<LooseDateTime>,
    },

    /// List the occurrence dates of a rule
    Occurrences {
        #[arg(long)]
        rule: String,

        /// Series start
        #[arg(long)]
        anchor: LooseDateTime,

        /// Maximum number of dates [default: recurrence.expansion_cap]
        #[arg(long)]
        limit: Option<usize>,

        /// Skip occurrences before this instant
        #[arg(long)]
        after: Option<LooseDateTime>,
    },

    /// Describe a rule in English
    Describe {
        #[arg(long)]
        rule: String,
    },

    /// Encode a JSON recurrence pattern as a rule string
    Encode {
        #[arg(long)]
        pattern: String,
    },
}

impl Command {
    /// ## Summary
    /// Runs the command, writing its output to `out`.
    ///
    /// ## Errors
    /// Returns an error if input cannot be read or parsed, a rule cannot be
    /// described, a pattern is invalid or writing to `out` fails.
    pub fn run(self, settings: &Settings, out: &mut impl Write) -> Result<()> {
        match self {
            Self::Expand {
                events,
                from,
                to,
                now,
            } => {
                let input = read_input(&events)?;
                let window = DisplayWindow::new(from.floor(), to.ceil())?;
                let now = now.map_or_else(|| chrono::Local::now().naive_local(), LooseDateTime::floor);
                expand(settings, &input, &window, now, out)
            }
            Self::Occurrences {
                rule,
                anchor,
                limit,
                after,
            } => {
                let limit = limit.unwrap_or(settings.recurrence.expansion_cap);
                list_occurrences(
                    settings,
                    &rule,
                    anchor.floor(),
                    limit,
                    after.map(LooseDateTime::floor),
                    out,
                )
            }
            Self::Describe { rule } => {
                let pattern = rule_to_pattern(&rule)
                    .with_context(|| format!("rule has no supported FREQ: {rule}"))?;
                writeln!(out, "{}", pattern.describe())?;
                Ok(())
            }
            Self::Encode { pattern } => {
                let pattern: RecurrencePattern =
                    serde_json::from_str(&pattern).context("invalid pattern JSON")?;
                pattern.validate()?;
                writeln!(out, "{}", pattern_to_rule(&pattern))?;
                Ok(())
            }
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("failed to read events from stdin")?;
        Ok(input)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read events from {}", path.display()))
    }
}

fn expand(
    settings: &Settings,
    input: &str,
    window: &DisplayWindow,
    now: NaiveDateTime,
    out: &mut impl Write,
) -> Result<()> {
    let events: Vec<JsonEvent> = serde_json::from_str(input).context("invalid events JSON")?;
    let materializer = Materializer::from_config(&settings.recurrence)?;

    let instances = materializer.expand(&events, window, now);
    tracing::info!(
        events = events.len(),
        instances = instances.len(),
        "Expanded events"
    );

    serde_json::to_writer_pretty(&mut *out, &instances)?;
    writeln!(out)?;
    Ok(())
}

fn list_occurrences(
    settings: &Settings,
    rule: &str,
    anchor: NaiveDateTime,
    limit: usize,
    after: Option<NaiveDateTime>,
    out: &mut impl Write,
) -> Result<()> {
    let Some(pattern) = rule_to_pattern(rule) else {
        tracing::warn!(rule, "Rule has no supported FREQ, no occurrences");
        return Ok(());
    };

    let dates = OccurrenceGenerator::new(&pattern, anchor)
        .with_ceiling_factor(settings.recurrence.ceiling_factor)
        .generate(limit, after);
    for date in dates {
        writeln!(out, "{}", date.format("%Y-%m-%d"))?;
    }
    Ok(())
}
