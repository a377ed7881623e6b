use super::record::{CertStatus, ScanRecord};

pub const CSV_HEADER: &str = "Timestamp,Domain,Status,Grade,Issuer,Expiry Date";

/// Dashboard counters over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistorySummary {
    pub total: usize,
    pub secure: usize,
    pub warning: usize,
    pub expired: usize,
    /// Mean score rounded to the nearest integer, 0 for an empty history.
    pub average_score: i64,
}

impl HistorySummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ScanRecord>,
    {
        let mut summary = Self::default();
        let mut score_sum: i64 = 0;

        for record in records {
            summary.total += 1;
            score_sum += record.score;
            match record.status {
                CertStatus::Secure => summary.secure += 1,
                CertStatus::Warning => summary.warning += 1,
                CertStatus::Expired => summary.expired += 1,
            }
        }

        if summary.total > 0 {
            summary.average_score = (score_sum as f64 / summary.total as f64).round() as i64;
        }
        summary
    }
}

/// Renders records as CSV, header first, one line per record, no trailing newline.
pub fn to_csv<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ScanRecord>,
{
    let mut lines: Vec<String> = vec![CSV_HEADER.to_string()];
    lines.extend(records.into_iter().map(|r| {
        [
            r.timestamp.as_str(),
            r.domain.as_str(),
            &r.status.to_string(),
            r.grade.as_str(),
            r.issuer.as_str(),
            r.expiry_date.as_str(),
        ]
        .iter()
        .map(|field| csv_field(field))
        .collect::<Vec<String>>()
        .join(",")
    }));
    lines.join("\n")
}

// Expiry dates look like "Dec 24, 2026", so quoting is needed in practice.
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
