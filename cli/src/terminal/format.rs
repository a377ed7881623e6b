use ciphercert_common::history::record::{CertStatus, ScanRecord};
use colored::*;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn status_badge(status: CertStatus) -> ColoredString {
    match status {
        CertStatus::Secure => "● Secure".color(colors::SECURE).bold(),
        CertStatus::Warning => "● Warning".color(colors::WARNING).bold(),
        CertStatus::Expired => "● Expired".color(colors::EXPIRED).bold(),
    }
}

/// A and A+ are good, B and C are passable, everything else is a fail.
pub fn grade_color(grade: &str) -> Color {
    match grade {
        "A" | "A+" => colors::SECURE,
        "B" | "C" => colors::WARNING,
        _ => colors::EXPIRED,
    }
}

pub fn record_to_details(record: &ScanRecord) -> Vec<Detail> {
    let score: ColoredString = format!("{}/100", record.score).normal();
    let grade: ColoredString = record.grade.color(grade_color(&record.grade)).bold();

    vec![
        ("Status".to_string(), status_badge(record.status)),
        ("Grade".to_string(), grade),
        ("Score".to_string(), score),
        ("Issuer".to_string(), record.issuer.normal()),
        ("Expires".to_string(), record.expiry_date.normal()),
        ("Scanned".to_string(), record.timestamp.normal()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_map_to_traffic_lights() {
        assert_eq!(grade_color("A+"), colors::SECURE);
        assert_eq!(grade_color("A"), colors::SECURE);
        assert_eq!(grade_color("C"), colors::WARNING);
        assert_eq!(grade_color("F"), colors::EXPIRED);
        assert_eq!(grade_color(""), colors::EXPIRED);
    }

    #[test]
    fn details_cover_every_field() {
        let record = ScanRecord {
            id: "7".into(),
            domain: "example.com".into(),
            status: CertStatus::Warning,
            issuer: "R3".into(),
            expiry_date: "Nov 02, 2026".into(),
            grade: "B".into(),
            score: 70,
            timestamp: "2026-10-18 09:00:00".into(),
        };

        let keys: Vec<String> = record_to_details(&record)
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec!["Status", "Grade", "Score", "Issuer", "Expires", "Scanned"]);
    }
}
