use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

impl AppError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        trace_id: impl Into<String>,
    ) -> Self {
        Self {
            error: message.into(),
            code: code.into(),
            trace_id: trace_id.into(),
        }
    }

    pub fn validation(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_VALIDATION", message, trace_id)
    }

    /// Device bridge unreachable, not spawnable, or timed out.
    pub fn transport(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_TRANSPORT", message, trace_id)
    }

    /// Backup container header/decompression/tar failures.
    pub fn archive(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_ARCHIVE", message, trace_id)
    }

    pub fn database(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_DATABASE", message, trace_id)
    }

    pub fn export(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_EXPORT", message, trace_id)
    }

    pub fn system(message: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self::new("ERR_SYSTEM", message, trace_id)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.code)
    }
}

impl std::error::Error for AppError {}
