//! One-way CSV export
//!
//! Fixed header row plus one row per entity; every field is
//! double-quoted with embedded quotes doubled. Dates are formatted
//! `%m/%d/%Y`. There is no CSV import path.

use chrono::{DateTime, Utc};

use crate::domain::entities::{CalendarEvent, Control, EvidenceItem, Policy, ReportData};

fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_date(date: DateTime<Utc>) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn csv_opt_date(date: Option<DateTime<Utc>>) -> String {
    date.map(csv_date).unwrap_or_default()
}

fn csv_document(header: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut out = String::new();
    out.push_str(&csv_row(
        &header.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
    ));
    out.push('\n');
    for row in rows {
        out.push_str(&csv_row(&row));
        out.push('\n');
    }
    out
}

/// Controls: practice id, title, family, status, effectiveness,
/// priority, owner, updated date
pub fn controls_to_csv(controls: &[Control]) -> String {
    csv_document(
        &[
            "Practice ID",
            "Title",
            "Family",
            "Status",
            "Priority",
            "Owner",
            "Last Updated",
        ],
        controls
            .iter()
            .map(|control| {
                vec![
                    control.practice_id.clone(),
                    control.title.clone(),
                    control.family.clone(),
                    control.status.to_string(),
                    control.priority.to_string(),
                    control.owner.clone(),
                    csv_date(control.updated_at),
                ]
            })
            .collect(),
    )
}

/// Policies: title, category, status, version, owner, review date
pub fn policies_to_csv(policies: &[Policy]) -> String {
    csv_document(
        &["Title", "Category", "Status", "Version", "Owner", "Review Date"],
        policies
            .iter()
            .map(|policy| {
                vec![
                    policy.title.clone(),
                    policy.category.clone(),
                    policy.status.to_string(),
                    policy.version.clone(),
                    policy.owner.clone(),
                    csv_opt_date(policy.review_date),
                ]
            })
            .collect(),
    )
}

/// Evidence: title, type, status, collected by/at, expiry
pub fn evidence_to_csv(items: &[EvidenceItem]) -> String {
    csv_document(
        &[
            "Title",
            "Type",
            "Status",
            "Collected By",
            "Collected At",
            "Expires At",
        ],
        items
            .iter()
            .map(|item| {
                vec![
                    item.title.clone(),
                    item.evidence_type.to_string(),
                    item.status.to_string(),
                    item.collected_by.clone(),
                    csv_date(item.collected_at),
                    csv_opt_date(item.expires_at),
                ]
            })
            .collect(),
    )
}

/// Calendar: title, type, date, status
pub fn calendar_to_csv(events: &[CalendarEvent]) -> String {
    csv_document(
        &["Title", "Type", "Date", "Status"],
        events
            .iter()
            .map(|event| {
                vec![
                    event.title.clone(),
                    event.event_type.to_string(),
                    csv_date(event.date),
                    event.status.to_string(),
                ]
            })
            .collect(),
    )
}

/// Reports: title, type, status, overall score, risk level, generated
pub fn reports_to_csv(reports: &[ReportData]) -> String {
    csv_document(
        &[
            "Title",
            "Type",
            "Status",
            "Overall Score",
            "Risk Level",
            "Generated At",
        ],
        reports
            .iter()
            .map(|report| {
                vec![
                    report.title.clone(),
                    report.report_type.to_string(),
                    report.status.to_string(),
                    report.summary.overall_score.to_string(),
                    report.summary.risk_level.to_string(),
                    csv_opt_date(report.generated_at),
                ]
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ControlStatus, EventType, EvidenceType};
    use chrono::TimeZone;

    #[test]
    fn fields_are_quoted_and_embedded_quotes_doubled() {
        assert_eq!(csv_field("plain"), "\"plain\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn controls_csv_has_header_and_one_row_per_control() {
        let mut control = Control::new("AC.L1-3.1.1", "Limit, access", "AC");
        control.status = ControlStatus::Implemented;
        control.updated_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).unwrap();

        let csv = controls_to_csv(&[control]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "\"Practice ID\",\"Title\",\"Family\",\"Status\",\"Priority\",\"Owner\",\"Last Updated\""
        );
        // The comma inside the title stays inside its quoted field.
        assert!(lines[1].contains("\"Limit, access\""));
        assert!(lines[1].contains("\"implemented\""));
        assert!(lines[1].contains("\"03/14/2026\""));
    }

    #[test]
    fn optional_dates_export_as_empty_fields() {
        let policy = Policy::new("Audit Policy", "audit");
        let csv = policies_to_csv(&[policy]);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].ends_with(",\"\""));
    }

    #[test]
    fn empty_collections_export_just_the_header() {
        assert_eq!(evidence_to_csv(&[]).lines().count(), 1);
        assert_eq!(calendar_to_csv(&[]).lines().count(), 1);
        assert_eq!(reports_to_csv(&[]).lines().count(), 1);
    }

    #[test]
    fn calendar_csv_formats_the_event_date() {
        let date = Utc.with_ymd_and_hms(2026, 11, 2, 12, 0, 0).unwrap();
        let event = CalendarEvent::new("Annual audit", EventType::Audit, date);
        let csv = calendar_to_csv(&[event]);
        assert!(csv.contains("\"11/02/2026\""));
    }

    #[test]
    fn evidence_csv_includes_type_names() {
        let item = EvidenceItem::new("SIEM capture", EvidenceType::LogExtract);
        let csv = evidence_to_csv(&[item]);
        assert!(csv.contains("\"log-extract\""));
    }
}
