//! Headless script lines
//!
//! One command per line:
//!
//! ```text
//! # comment
//! start
//! left
//! wait 600        # let 600ms of game time pass
//! interval 250    # descent interval for timers started from now on
//! fastDown
//! ```
//!
//! Action names are the ones `Action::from_str` accepts.

use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

use crate::types::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptCommand {
    Dispatch(Action),
    Wait(Duration),
    SetDescentInterval(Duration),
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.split('#').next().unwrap_or("").trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let head = words.next().unwrap_or_default();
    let command = match head.to_ascii_lowercase().as_str() {
        "wait" => ScriptCommand::Wait(millis(words.next(), head)?),
        "interval" => {
            let interval = millis(words.next(), head)?;
            if interval.is_zero() {
                bail!("interval must be greater than zero");
            }
            ScriptCommand::SetDescentInterval(interval)
        }
        _ => ScriptCommand::Dispatch(
            Action::from_str(head).ok_or_else(|| anyhow!("unknown action '{head}'"))?,
        ),
    };

    if let Some(extra) = words.next() {
        bail!("unexpected '{extra}' after '{head}'");
    }
    Ok(Some(command))
}

fn millis(arg: Option<&str>, command: &str) -> Result<Duration> {
    let raw = arg.with_context(|| format!("'{command}' needs a duration in milliseconds"))?;
    let ms = raw
        .parse::<u64>()
        .with_context(|| format!("'{raw}' is not a number of milliseconds"))?;
    Ok(Duration::from_millis(ms))
}
