use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Evidence categories a triage run can acquire, in fixed acquisition order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceCategory {
    CallLogs,
    Sms,
    Photos,
    Videos,
    MessagingBackup,
}

impl EvidenceCategory {
    pub const ALL: [EvidenceCategory; 5] = [
        EvidenceCategory::CallLogs,
        EvidenceCategory::Sms,
        EvidenceCategory::Photos,
        EvidenceCategory::Videos,
        EvidenceCategory::MessagingBackup,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EvidenceCategory::CallLogs => "Call Logs",
            EvidenceCategory::Sms => "Filtered SMS",
            EvidenceCategory::Photos => "Extracting Photos",
            EvidenceCategory::Videos => "Extracting Videos",
            EvidenceCategory::MessagingBackup => "Extracting WhatsApp Backup",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "call_logs" | "calls" => Some(EvidenceCategory::CallLogs),
            "sms" => Some(EvidenceCategory::Sms),
            "photos" => Some(EvidenceCategory::Photos),
            "videos" => Some(EvidenceCategory::Videos),
            "messaging_backup" | "whatsapp" => Some(EvidenceCategory::MessagingBackup),
            _ => None,
        }
    }
}

/// Inclusive-from date window. Either bound may be absent; an absent bound
/// imposes no constraint. `from <= to` is not enforced here.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Builds a range from user-supplied `YYYY-MM-DD` strings. A malformed or
    /// empty bound is treated as absent, widening the filter rather than
    /// rejecting the request.
    pub fn from_strs(from: &str, to: &str) -> Self {
        Self {
            from: parse_date_bound(from),
            to: parse_date_bound(to),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

fn parse_date_bound(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// One triage run's worth of selections; built once by the caller and
/// immutable while the run is in progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceRequest {
    pub categories: Vec<EvidenceCategory>,
    pub keyword: Option<String>,
    pub range: DateRange,
}

impl EvidenceRequest {
    pub fn new(categories: Vec<EvidenceCategory>, keyword: Option<String>, range: DateRange) -> Self {
        Self {
            categories,
            keyword,
            range,
        }
    }

    pub fn wants(&self, category: EvidenceCategory) -> bool {
        self.categories.contains(&category)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceSummary {
    pub serial: String,
    pub state: String,
    pub model: Option<String>,
    pub product: Option<String>,
    pub device: Option<String>,
    pub transport_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectivityStatus {
    pub connected: bool,
    pub devices: Vec<DeviceSummary>,
}

/// One row read from the messaging store. The timestamp is already rendered
/// to calendar form by the query itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageRow {
    pub timestamp: String,
    pub conversation_id: String,
    pub content: Option<String>,
}

/// Per-artifact result of one export attempt. The pdf writer is allowed to
/// fail without failing the export as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportOutcome {
    pub text_path: Option<String>,
    pub csv_path: Option<String>,
    pub pdf_path: Option<String>,
    pub pdf_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_date_bounds() {
        let range = DateRange::from_strs("2023-11-01", "2023-11-30");
        assert_eq!(
            range.from,
            Some(NaiveDate::from_ymd_opt(2023, 11, 1).expect("valid date"))
        );
        assert_eq!(
            range.to,
            Some(NaiveDate::from_ymd_opt(2023, 11, 30).expect("valid date"))
        );
    }

    #[test]
    fn malformed_bound_is_treated_as_absent() {
        let range = DateRange::from_strs("not-a-date", "2023/11/30");
        assert!(range.is_unbounded());
        let range = DateRange::from_strs("", "  ");
        assert!(range.is_unbounded());
    }

    #[test]
    fn parses_category_names() {
        assert_eq!(
            EvidenceCategory::parse("call_logs"),
            Some(EvidenceCategory::CallLogs)
        );
        assert_eq!(
            EvidenceCategory::parse("WhatsApp"),
            Some(EvidenceCategory::MessagingBackup)
        );
        assert_eq!(EvidenceCategory::parse("contacts"), None);
    }

    #[test]
    fn request_reports_selected_categories() {
        let request = EvidenceRequest::new(
            vec![EvidenceCategory::Sms, EvidenceCategory::Photos],
            Some("urgent".to_string()),
            DateRange::default(),
        );
        assert!(request.wants(EvidenceCategory::Sms));
        assert!(!request.wants(EvidenceCategory::CallLogs));
    }
}
