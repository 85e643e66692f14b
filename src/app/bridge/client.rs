use std::time::Duration;

use tracing::debug;

use crate::app::bridge::locator::resolve_bridge_program;
use crate::app::bridge::runner::run_bridge_command;
use crate::app::config::TriageConfig;
use crate::app::error::AppError;

/// Transport seam for everything that talks to the device. Production code
/// shells out to adb; tests substitute a scripted implementation so the
/// pipeline runs without a device attached.
///
/// A non-zero exit status is not an error at this layer: callers inspect the
/// returned text for success or failure markers. Side effects (pull, backup)
/// happen on the filesystem as directed by `args`; the client does not know
/// which argument vectors cause them.
pub trait DeviceBridge {
    fn execute(&self, args: &[String], trace_id: &str) -> Result<String, AppError>;
}

#[derive(Debug, Clone)]
pub struct AdbBridge {
    program: String,
    timeout: Duration,
}

impl AdbBridge {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_config(config: &TriageConfig) -> Self {
        Self::new(resolve_bridge_program(&config.bridge.command_path))
            .with_timeout(Duration::from_secs(config.bridge.command_timeout_secs))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl DeviceBridge for AdbBridge {
    fn execute(&self, args: &[String], trace_id: &str) -> Result<String, AppError> {
        debug!(trace_id = %trace_id, args = ?args, "Running device bridge command");
        let output = run_bridge_command(&self.program, args, self.timeout, trace_id)?;
        Ok(output.merged())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_config_defaults() {
        let bridge = AdbBridge::from_config(&TriageConfig::default());
        assert_eq!(bridge.program(), "adb");
    }

    #[test]
    fn builds_from_configured_path() {
        let mut config = TriageConfig::default();
        config.bridge.command_path = "\"/opt/platform-tools/adb\"".to_string();
        let bridge = AdbBridge::from_config(&config);
        assert_eq!(bridge.program(), "/opt/platform-tools/adb");
    }
}
