pub mod app;

pub use app::bridge::client::{AdbBridge, DeviceBridge};
pub use app::models::{DateRange, EvidenceCategory, EvidenceRequest};
pub use app::pipeline::{acquire, check_connectivity, export_report};
pub use app::report::EvidenceReport;
