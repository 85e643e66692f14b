use std::path::Path;

use tracing::{info, warn};

use crate::app::backup::unpack_backup;
use crate::app::bridge::client::DeviceBridge;
use crate::app::config::TriageConfig;
use crate::app::devices::{connectivity_from_output, describe_connection_failure};
use crate::app::discovery::{discover_files, PREVIEW_CAP};
use crate::app::error::AppError;
use crate::app::export;
use crate::app::filter::{filter_by_date, filter_by_keyword_and_date};
use crate::app::models::{
    ConnectivityStatus, DateRange, EvidenceCategory, EvidenceRequest, ExportOutcome,
};
use crate::app::msgstore::{format_message, read_messages};
use crate::app::report::{EvidenceReport, ReportSection};

// Device-side contract: content-provider URIs and media folders the bridge
// is asked for. These mirror the stock Android layout.
const CALL_LOG_URI: &str = "content://call_log/calls";
const SMS_INBOX_URI: &str = "content://sms/inbox";
const PHOTO_SOURCES: &[&str] = &["/sdcard/DCIM", "/sdcard/Pictures"];
const VIDEO_SOURCES: &[&str] = &["/sdcard/Movies", "/sdcard/DCIM"];
const PHOTO_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".bmp", ".gif"];
const VIDEO_SUFFIXES: &[&str] = &[".mp4", ".avi", ".mov", ".mkv", ".3gp"];
const MESSAGING_PACKAGE: &str = "com.whatsapp";

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

/// Asks the bridge for its device list and scans it for a connected entry.
pub fn check_connectivity<B: DeviceBridge + ?Sized>(
    bridge: &B,
    trace_id: &str,
) -> Result<ConnectivityStatus, AppError> {
    let output = bridge.execute(&argv(&["devices", "-l"]), trace_id)?;
    Ok(connectivity_from_output(&output))
}

/// Runs acquisition for every requested category in fixed order and returns
/// the accumulated report.
///
/// Connectivity is a precondition: without a connected device nothing is
/// acquired. Past that point a category failure is rendered into the report
/// as an inline error section and the run continues with the next category.
pub fn acquire<B: DeviceBridge + ?Sized>(
    bridge: &B,
    request: &EvidenceRequest,
    config: &TriageConfig,
    trace_id: &str,
) -> Result<EvidenceReport, AppError> {
    let status = check_connectivity(bridge, trace_id)?;
    if !status.connected {
        return Err(AppError::transport(
            describe_connection_failure(&status),
            trace_id,
        ));
    }
    info!(trace_id = %trace_id, devices = status.devices.len(), "Starting acquisition");

    let mut report = EvidenceReport::new();
    for category in EvidenceCategory::ALL {
        if !request.wants(category) {
            continue;
        }
        let result = match category {
            EvidenceCategory::CallLogs => acquire_call_logs(bridge, &request.range, trace_id),
            EvidenceCategory::Sms => {
                acquire_sms(bridge, request.keyword.as_deref(), &request.range, trace_id)
            }
            EvidenceCategory::Photos => acquire_media(
                bridge,
                category,
                PHOTO_SOURCES,
                Path::new(&config.acquisition.photos_dir),
                PHOTO_SUFFIXES,
                "photos",
                trace_id,
            ),
            EvidenceCategory::Videos => acquire_media(
                bridge,
                category,
                VIDEO_SOURCES,
                Path::new(&config.acquisition.videos_dir),
                VIDEO_SUFFIXES,
                "videos",
                trace_id,
            ),
            EvidenceCategory::MessagingBackup => {
                acquire_messaging_backup(bridge, config, trace_id)
            }
        };
        match result {
            Ok(section) => report.push(section),
            Err(err) => {
                warn!(trace_id = %trace_id, category = ?category, error = %err, "Category acquisition failed");
                let mut section = ReportSection::new(category.label());
                section.push(err.error.clone());
                report.push(section);
            }
        }
    }
    Ok(report)
}

/// Writes the report's export artifacts into `dest`.
pub fn export_report(
    report: &EvidenceReport,
    dest: &Path,
    trace_id: &str,
) -> Result<ExportOutcome, AppError> {
    export::write_artifacts(&report.render(), dest, trace_id)
}

fn acquire_call_logs<B: DeviceBridge + ?Sized>(
    bridge: &B,
    range: &DateRange,
    trace_id: &str,
) -> Result<ReportSection, AppError> {
    let output = bridge.execute(
        &argv(&["shell", "content", "query", "--uri", CALL_LOG_URI]),
        trace_id,
    )?;
    let filtered = filter_by_date(&output, range);
    let mut section = ReportSection::new(EvidenceCategory::CallLogs.label());
    if !filtered.is_empty() {
        section.extend(filtered.split('\n'));
    }
    Ok(section)
}

fn acquire_sms<B: DeviceBridge + ?Sized>(
    bridge: &B,
    keyword: Option<&str>,
    range: &DateRange,
    trace_id: &str,
) -> Result<ReportSection, AppError> {
    let output = bridge.execute(
        &argv(&["shell", "content", "query", "--uri", SMS_INBOX_URI]),
        trace_id,
    )?;
    let filtered = filter_by_keyword_and_date(&output, keyword, range);
    let mut section = ReportSection::new(EvidenceCategory::Sms.label());
    if !filtered.is_empty() {
        section.extend(filtered.split('\n'));
    }
    Ok(section)
}

fn acquire_media<B: DeviceBridge + ?Sized>(
    bridge: &B,
    category: EvidenceCategory,
    sources: &[&str],
    local_dir: &Path,
    suffixes: &[&str],
    noun: &str,
    trace_id: &str,
) -> Result<ReportSection, AppError> {
    let local = local_dir.to_string_lossy().to_string();
    for source in sources {
        // Pull output carries no contract; files land under `local` or not.
        let _ = bridge.execute(&argv(&["pull", source, &local]), trace_id)?;
    }

    let mut section = ReportSection::new(category.label());
    section.push(format!(
        "{} saved to {}",
        capitalize(noun),
        local_dir.display()
    ));

    let found = discover_files(local_dir, suffixes);
    if found.is_empty() {
        section.push(format!("No {noun} found."));
        return Ok(section);
    }
    section.push(format!("--- {} Preview (filenames) ---", capitalize(noun)));
    for path in found.iter().take(PREVIEW_CAP) {
        if let Some(name) = path.file_name() {
            section.push(name.to_string_lossy().to_string());
        }
    }
    Ok(section)
}

fn acquire_messaging_backup<B: DeviceBridge + ?Sized>(
    bridge: &B,
    config: &TriageConfig,
    trace_id: &str,
) -> Result<ReportSection, AppError> {
    let backup_file = &config.acquisition.backup_file;
    bridge.execute(
        &argv(&["backup", "-f", backup_file, "-apk", MESSAGING_PACKAGE]),
        trace_id,
    )?;

    let mut section = ReportSection::new(EvidenceCategory::MessagingBackup.label());
    let located = unpack_backup(
        Path::new(backup_file),
        Path::new(&config.acquisition.backup_dir),
        trace_id,
    )?;
    match located {
        None => section.push("No data found."),
        Some(db_path) => match read_messages(&db_path, trace_id) {
            Ok(rows) => {
                section.push("--- WhatsApp Messages ---");
                for row in &rows {
                    section.push(format_message(row));
                }
            }
            // Database failures stay inside the category; the run goes on.
            Err(err) => section.push(format!("WhatsApp DB Error: {}", err.error)),
        },
    }
    Ok(section)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
