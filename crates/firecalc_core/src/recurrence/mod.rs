//! Recurrence rules
//!
//! Turns an RFC 5545 rule string into the concrete dates it selects inside a
//! closed date interval. Rule semantics come from the `rrule` crate; this
//! module only brings the text into the form it accepts and converts its
//! `chrono` timestamps back to `jiff` dates. A rule that cannot be parsed is
//! an error, never an empty schedule.
//!
//! Accepted input, case-insensitive:
//! - a bare rule line, `FREQ=MONTHLY;BYMONTHDAY=1`, with or without an
//!   `RRULE:` prefix
//! - a start date inline, `FREQ=YEARLY;DTSTART=20250415`, or on its own
//!   `DTSTART:20250415` line
//! - `RDATE`, `EXDATE` and `EXRULE` lines, passed through unchanged
//!
//! Occurrences are whole days. The start defaults to the first day of the
//! window and `UNTIL` includes the whole of its day.

use chrono::Datelike;
use jiff::civil::Date;
use rrule::RRuleSet;

use crate::error::RuleError;

/// Parse `rule` into an `RRuleSet` anchored at its own start date, or at
/// `default_start` when it names none.
pub fn parse(rule: &str, default_start: Date) -> Result<RRuleSet, RuleError> {
    normalize(rule, default_start)?
        .parse::<RRuleSet>()
        .map_err(|err| RuleError::Rejected {
            message: err.to_string(),
        })
}

/// Parse `rule` and return its occurrences in `[first_day, last_day]`,
/// sorted and without duplicates.
pub fn expand(rule: &str, first_day: Date, last_day: Date) -> Result<Vec<Date>, RuleError> {
    let set = parse(rule, first_day)?;
    let mut dates: Vec<Date> = Vec::new();

    for occurrence in &set {
        // Past the end of jiff's calendar, so past any window
        let Some(day) = to_civil(occurrence.date_naive()) else {
            break;
        };
        if day > last_day {
            break;
        }
        if day >= first_day && dates.last() != Some(&day) {
            dates.push(day);
        }
    }

    Ok(dates)
}

// =============================================================================
// Text normalization
// =============================================================================

/// Rewrite `rule` as the multi-line `DTSTART`/`RRULE` text `rrule` parses.
fn normalize(rule: &str, default_start: Date) -> Result<String, RuleError> {
    let text = rule.trim().to_ascii_uppercase();
    if text.is_empty() {
        return Err(RuleError::Empty);
    }

    let mut start = None;
    let mut lines = Vec::new();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if line.starts_with("DTSTART:") || line.starts_with("DTSTART;") {
            // DTSTART:20250101 or DTSTART;VALUE=DATE:20250101
            let value = line.rsplit(':').next().unwrap_or_default();
            set_start(&mut start, value)?;
        } else if ["RDATE", "EXDATE", "EXRULE"]
            .iter()
            .any(|name| line.starts_with(name))
        {
            lines.push(line.to_string());
        } else {
            let body = line.strip_prefix("RRULE:").unwrap_or(line);
            lines.push(format!("RRULE:{}", rule_parts(body, &mut start)?));
        }
    }

    let start = start.unwrap_or(default_start);
    lines.insert(0, format!("DTSTART:{}T000000Z", compact(start)));
    Ok(lines.join("\n"))
}

/// Pull an inline `DTSTART` out of a rule line and widen `UNTIL` to the end
/// of its day.
fn rule_parts(body: &str, start: &mut Option<Date>) -> Result<String, RuleError> {
    let mut parts = Vec::new();

    for part in body.split(';').map(str::trim).filter(|part| !part.is_empty()) {
        let (name, value) = part.split_once('=').ok_or_else(|| RuleError::MalformedPart {
            part: part.to_string(),
        })?;
        match name.trim() {
            "DTSTART" => set_start(start, value.trim())?,
            "UNTIL" => {
                let until = parse_day("UNTIL", value.trim())?;
                parts.push(format!("UNTIL={}T235959Z", compact(until)));
            }
            _ => parts.push(part.to_string()),
        }
    }

    Ok(parts.join(";"))
}

fn set_start(start: &mut Option<Date>, value: &str) -> Result<(), RuleError> {
    if start.is_some() {
        return Err(RuleError::DuplicatePart {
            name: "DTSTART".to_string(),
        });
    }
    *start = Some(parse_day("DTSTART", value)?);
    Ok(())
}

/// `YYYYMMDD`, optionally followed by a time that is ignored.
fn parse_day(name: &'static str, value: &str) -> Result<Date, RuleError> {
    let digits = value.split('T').next().unwrap_or_default();
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RuleError::invalid(name, value, "expected YYYYMMDD"));
    }
    let field = |range: std::ops::Range<usize>| digits[range].parse::<i16>().unwrap_or_default();
    let (year, month, day) = (field(0..4), field(4..6), field(6..8));

    Date::new(year, month as i8, day as i8)
        .map_err(|_| RuleError::invalid(name, value, "not a calendar date"))
}

fn compact(day: Date) -> String {
    format!("{:04}{:02}{:02}", day.year(), day.month(), day.day())
}

// =============================================================================
// chrono -> jiff
// =============================================================================

fn to_civil(day: chrono::NaiveDate) -> Option<Date> {
    let year = i16::try_from(day.year()).ok()?;
    Date::new(year, day.month() as i8, day.day() as i8).ok()
}
