//! Bulk deadline import from a markdown list.
//!
//! One deadline per bullet:
//!
//! ```text
//! - [exam] Midterm (Math) due 2026-11-02 6h high
//! - [project] Capstone (CS) due 2026-12-10 20h
//! - [assignment] Essay draft (English) due 2026-10-28
//! ```
//!
//! Hours default to 2, priority to medium. Non-bullet lines are ignored;
//! bullets that don't match are reported back as skipped.

use anyhow::Result;
use deadliner_core::{DeadlineKind, NewDeadline, Priority};
use regex::Regex;

#[derive(Debug, Default)]
pub struct ImportReport {
    pub deadlines: Vec<NewDeadline>,
    /// (1-based line number, reason)
    pub skipped: Vec<(usize, String)>,
}

pub fn parse_deadlines_md(md: &str) -> Result<ImportReport> {
    let line_re = Regex::new(concat!(
        r"(?i)^\s*[-*]\s*\[(?P<kind>[a-z]+)\]\s+(?P<title>.+?)\s+\((?P<subject>[^)]+)\)",
        r"\s+due\s+(?P<due>\d{4}-\d{2}-\d{2})",
        r"(?:\s+(?P<hours>\d+(?:\.\d+)?)h)?",
        r"(?:\s+(?P<priority>low|medium|high))?\s*$",
    ))?;
    let bullet_re = Regex::new(r"^\s*[-*]\s+")?;

    let mut report = ImportReport::default();

    for (i, line) in md.lines().enumerate() {
        let lineno = i + 1;
        if !bullet_re.is_match(line) {
            continue;
        }
        let Some(caps) = line_re.captures(line) else {
            report.skipped.push((lineno, "unrecognized bullet".to_string()));
            continue;
        };

        let kind = match caps["kind"].parse::<DeadlineKind>() {
            Ok(k) => k,
            Err(e) => {
                report.skipped.push((lineno, e));
                continue;
            }
        };
        let due = match deadliner_core::time::parse_date(&caps["due"]) {
            Ok(d) => d,
            Err(e) => {
                report.skipped.push((lineno, e.to_string()));
                continue;
            }
        };

        let mut nd = NewDeadline::new(caps["title"].trim(), caps["subject"].trim(), kind, due);
        if let Some(h) = caps.name("hours") {
            nd = nd.with_hours(h.as_str().parse::<f64>()?);
        }
        if let Some(p) = caps.name("priority") {
            nd = nd.with_priority(p.as_str().parse::<Priority>().map_err(anyhow::Error::msg)?);
        }

        report.deadlines.push(nd);
    }

    Ok(report)
}
