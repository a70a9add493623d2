//! Commit with a faked author/committer date.
//!
//! The date expression must be accepted by two independent parsers before
//! anything is committed: the system `date` command and an in-process
//! parser. The resolved timestamp is handed to that one `git commit` through
//! its environment; the calling process is never modified.

use crate::error::{Error, Result};
use crate::git::{GitCommand, GitRunner};
use chrono::{DateTime, Duration, FixedOffset, Local, Months, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::process::{Command, Stdio};

pub const AUTHOR_DATE_ENV: &str = "GIT_AUTHOR_DATE";
pub const COMMITTER_DATE_ENV: &str = "GIT_COMMITTER_DATE";

/// A backend able to turn a human date expression into a timestamp.
pub trait DateParser {
    fn parse(&self, expr: &str) -> Option<DateTime<FixedOffset>>;
}

/// The system `date -d <expr> -R` command.
#[derive(Debug, Default)]
pub struct SystemDate;

impl DateParser for SystemDate {
    fn parse(&self, expr: &str) -> Option<DateTime<FixedOffset>> {
        let out = Command::new("date")
            .arg("-d")
            .arg(expr)
            .arg("-R")
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match out {
            Ok(out) if out.status.success() => {
                parse_date_output(&String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                tracing::debug!(
                    stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                    "date rejected expression"
                );
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not run `date`");
                None
            }
        }
    }
}

/// Parses the RFC 2822 line printed by `date -R`.
fn parse_date_output(stdout: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(stdout.trim()).ok()
}

const RELATIVE: &str = r"^(?:(?P<in>in)\s+)?(?P<n>\d+)\s+(?P<unit>seconds?|secs?|minutes?|mins?|hours?|days?|weeks?|months?|years?)(?:\s+(?P<ago>ago))?$";

/// In-process parser for absolute timestamps and simple relative phrases.
///
/// Accepts RFC 3339, RFC 2822, `YYYY-MM-DD[ HH:MM[:SS]]`, `now`, `today`,
/// `yesterday`, `tomorrow`, `N <unit> ago` and `in N <unit>`.
#[derive(Debug, Default)]
pub struct NaturalDate {
    now: Option<DateTime<FixedOffset>>,
}

impl NaturalDate {
    /// A parser whose "now" is fixed, for reproducible results.
    pub fn at(now: DateTime<FixedOffset>) -> Self {
        NaturalDate { now: Some(now) }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.now.unwrap_or_else(|| Local::now().fixed_offset())
    }

    fn relative(&self, expr: &str) -> Option<DateTime<FixedOffset>> {
        let caps = Regex::new(RELATIVE).ok()?.captures(expr)?;
        let backwards = caps.name("ago").is_some();
        if backwards && caps.name("in").is_some() {
            return None;
        }

        let n: u32 = caps.name("n")?.as_str().parse().ok()?;
        let unit = caps.name("unit")?.as_str().trim_end_matches('s');
        let now = self.now();

        let months = match unit {
            "month" => Some(n),
            "year" => n.checked_mul(12),
            _ => None,
        };
        if let Some(months) = months {
            let months = Months::new(months);
            return if backwards {
                now.checked_sub_months(months)
            } else {
                now.checked_add_months(months)
            };
        }

        let n = i64::from(n);
        let step = match unit {
            "second" | "sec" => Duration::try_seconds(n)?,
            "minute" | "min" => Duration::try_minutes(n)?,
            "hour" => Duration::try_hours(n)?,
            "day" => Duration::try_days(n)?,
            "week" => Duration::try_weeks(n)?,
            _ => return None,
        };
        if backwards {
            now.checked_sub_signed(step)
        } else {
            now.checked_add_signed(step)
        }
    }

    fn absolute(&self, expr: &str) -> Option<DateTime<FixedOffset>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(expr) {
            return Some(dt);
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(expr) {
            return Some(dt);
        }

        let offset = *self.now().offset();
        for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(expr, fmt) {
                return naive.and_local_timezone(offset).single();
            }
        }
        NaiveDate::parse_from_str(expr, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .and_then(|naive| naive.and_local_timezone(offset).single())
    }
}

impl DateParser for NaturalDate {
    fn parse(&self, expr: &str) -> Option<DateTime<FixedOffset>> {
        let expr = expr.trim();
        let lowered = expr.to_lowercase();
        let now = self.now();

        match lowered.as_str() {
            "" => None,
            "now" | "today" => Some(now),
            "yesterday" => now.checked_sub_signed(Duration::days(1)),
            "tomorrow" => now.checked_add_signed(Duration::days(1)),
            other => self.relative(other).or_else(|| self.absolute(expr)),
        }
    }
}

/// Resolves `expr` with both backends.
///
/// The system backend's result is the one used; the second parser only has
/// to accept the expression.
///
/// # Errors
///
/// [`Error::SystemDateRejected`] or [`Error::TimeParserRejected`], naming the
/// backend that refused.
pub fn resolve(
    expr: &str,
    system: &dyn DateParser,
    secondary: &dyn DateParser,
) -> Result<DateTime<FixedOffset>> {
    let resolved = system
        .parse(expr)
        .ok_or_else(|| Error::SystemDateRejected(expr.to_string()))?;
    let checked = secondary
        .parse(expr)
        .ok_or_else(|| Error::TimeParserRejected(expr.to_string()))?;

    // Disagreement between the two is not treated as an error.
    tracing::debug!(%resolved, %checked, "date expression accepted");
    Ok(resolved)
}

/// `git commit -m <message> [extra...]` dated `date` for author and committer.
pub fn commit_command(
    message: &str,
    date: &DateTime<FixedOffset>,
    extra: &[String],
) -> GitCommand {
    let stamp = date.to_rfc2822();
    let mut args = vec!["commit".to_string(), "-m".to_string(), message.to_string()];
    args.extend(extra.iter().cloned());

    GitCommand::new(args)
        .env(AUTHOR_DATE_ENV, stamp.clone())
        .env(COMMITTER_DATE_ENV, stamp)
}

/// Validates `expr` and commits with the resolved date, returning git's exit
/// code. Nothing is committed when validation fails.
pub fn run<G: GitRunner>(
    git: &G,
    expr: &str,
    message: &str,
    extra: &[String],
    system: &dyn DateParser,
    secondary: &dyn DateParser,
) -> Result<i32> {
    let date = resolve(expr, system, secondary)?;
    git.status(&commit_command(message, &date, extra))
}
