//! `report` and `stats` commands

use anyhow::Result;
use chrono::{Duration, Utc};
use is_terminal::IsTerminal;

use crate::application::reporting::ReportRequest;
use crate::domain::entities::DateRange;
use crate::runtime::ComplianceCore;

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = if std::io::stdout().is_terminal() {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}

pub fn generate(
    core: &ComplianceCore,
    title: &str,
    description: &str,
    generated_by: &str,
    window_days: u32,
) -> Result<()> {
    let end = Utc::now();
    let report = core.reporting.generate_compliance_report(ReportRequest {
        title: title.to_string(),
        description: description.to_string(),
        date_range: DateRange {
            start: end - Duration::days(i64::from(window_days)),
            end,
        },
        generated_by: generated_by.to_string(),
    })?;
    print_json(&report)
}

pub fn stats(core: &ComplianceCore) -> Result<()> {
    print_json(&core.reporting.collect_statistics())
}
