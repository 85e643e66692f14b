use std::path::PathBuf;
use std::process::ExitCode;

use evidence_triage_lib::app::bridge::client::AdbBridge;
use evidence_triage_lib::app::config::{load_config, TriageConfig};
use evidence_triage_lib::app::logging::init_logging;
use evidence_triage_lib::app::models::{DateRange, EvidenceCategory, EvidenceRequest};
use evidence_triage_lib::app::pipeline::{acquire, check_connectivity, export_report};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct Args {
    categories: Vec<EvidenceCategory>,
    keyword: Option<String>,
    from: String,
    to: String,
    export_dir: Option<PathBuf>,
    bridge_path: Option<String>,
    json: bool,
}

#[derive(Serialize)]
struct RunSummary {
    tool: &'static str,
    status: &'static str,
    trace_id: String,
    connected: bool,
    sections: usize,
    report: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    export: Option<evidence_triage_lib::app::models::ExportOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn usage() -> &'static str {
    "Usage: triage [--categories call_logs,sms,photos,videos,whatsapp] [--keyword WORD]\n              [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--export-dir DIR]\n              [--adb PATH] [--json]"
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        categories: EvidenceCategory::ALL.to_vec(),
        keyword: None,
        from: String::new(),
        to: String::new(),
        export_dir: None,
        bridge_path: None,
        json: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--categories" => {
                let value = iter.next().ok_or("--categories needs a value")?;
                let mut parsed = Vec::new();
                for part in value.split(',') {
                    match EvidenceCategory::parse(part) {
                        Some(category) => parsed.push(category),
                        None => return Err(format!("Unknown category: {part}")),
                    }
                }
                args.categories = parsed;
            }
            "--keyword" => args.keyword = Some(iter.next().ok_or("--keyword needs a value")?),
            "--from" => args.from = iter.next().ok_or("--from needs a value")?,
            "--to" => args.to = iter.next().ok_or("--to needs a value")?,
            "--export-dir" => {
                args.export_dir =
                    Some(PathBuf::from(iter.next().ok_or("--export-dir needs a value")?))
            }
            "--adb" => args.bridge_path = Some(iter.next().ok_or("--adb needs a value")?),
            "--json" => args.json = true,
            "--help" | "-h" => return Err(usage().to_string()),
            other => return Err(format!("Unknown flag: {other}\n{}", usage())),
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    init_logging();
    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let mut config = load_config().unwrap_or_else(|err| {
        warn!(error = %err, "Failed to load config; using defaults");
        TriageConfig::default()
    });
    if let Some(path) = &args.bridge_path {
        config.bridge.command_path = path.clone();
    }

    let trace_id = Uuid::new_v4().to_string();
    let bridge = AdbBridge::from_config(&config);

    let status = match check_connectivity(&bridge, &trace_id) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("{}", err.error);
            return ExitCode::from(3);
        }
    };
    if !status.connected {
        eprintln!("No device connected. Make sure ADB is enabled.");
        return ExitCode::from(3);
    }

    let request = EvidenceRequest::new(
        args.categories.clone(),
        args.keyword.clone(),
        DateRange::from_strs(&args.from, &args.to),
    );
    let report = match acquire(&bridge, &request, &config, &trace_id) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{}", err.error);
            return ExitCode::from(3);
        }
    };

    let mut summary = RunSummary {
        tool: "triage",
        status: "ok",
        trace_id: trace_id.clone(),
        connected: true,
        sections: report.sections().len(),
        report: report.render(),
        export: None,
        error: None,
    };

    if let Some(dest) = &args.export_dir {
        match export_report(&report, dest, &trace_id) {
            Ok(outcome) => summary.export = Some(outcome),
            Err(err) => {
                summary.status = "export_failed";
                summary.error = Some(err.error.clone());
            }
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("Failed to serialize summary: {err}");
                return ExitCode::from(1);
            }
        }
    } else {
        print!("{}", summary.report);
        if let Some(outcome) = &summary.export {
            if let Some(path) = &outcome.text_path {
                println!("Exported text to {path}");
            }
            if let Some(path) = &outcome.csv_path {
                println!("Exported csv to {path}");
            }
            match (&outcome.pdf_path, &outcome.pdf_error) {
                (Some(path), _) => println!("Exported pdf to {path}"),
                (None, Some(err)) => eprintln!("PDF export failed: {err}"),
                _ => {}
            }
        }
        if let Some(error) = &summary.error {
            eprintln!("{error}");
        }
    }

    if summary.status == "ok" {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
