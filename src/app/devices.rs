use crate::app::models::{ConnectivityStatus, DeviceSummary};

/// Parses `adb devices -l` output. The "List of devices attached" header and
/// daemon-startup chatter are skipped; remaining lines are
/// `<serial> <state> [key:value ...]`.
pub fn parse_device_list(output: &str) -> Vec<DeviceSummary> {
    let mut devices = Vec::new();
    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }
        if trimmed.to_lowercase().contains("list of devices") {
            continue;
        }
        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        if tokens.len() < 2 {
            continue;
        }
        let mut summary = DeviceSummary {
            serial: tokens[0].to_string(),
            state: tokens[1].to_string(),
            model: None,
            product: None,
            device: None,
            transport_id: None,
        };
        for token in tokens.iter().skip(2) {
            if let Some(value) = token.strip_prefix("model:") {
                summary.model = Some(value.to_string());
            } else if let Some(value) = token.strip_prefix("product:") {
                summary.product = Some(value.to_string());
            } else if let Some(value) = token.strip_prefix("device:") {
                summary.device = Some(value.to_string());
            } else if let Some(value) = token.strip_prefix("transport_id:") {
                summary.transport_id = Some(value.to_string());
            }
        }
        devices.push(summary);
    }
    devices
}

/// Connected means at least one non-header line carries the `device` state
/// token. This is a substring-level heuristic over bridge output, not a
/// protocol handshake; an `unauthorized` entry still counts as not connected.
pub fn connectivity_from_output(output: &str) -> ConnectivityStatus {
    let devices = parse_device_list(output);
    let connected = devices.iter().any(|d| d.state == "device");
    ConnectivityStatus { connected, devices }
}

pub fn describe_connection_failure(status: &ConnectivityStatus) -> String {
    if status
        .devices
        .iter()
        .any(|d| d.state == "unauthorized")
    {
        return "Device found but unauthorized. Accept the debugging prompt on the device."
            .to_string();
    }
    "No device connected. Make sure ADB is enabled.".to_string()
}
