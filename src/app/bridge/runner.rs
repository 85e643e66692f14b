use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::app::error::AppError;

#[derive(Debug, Clone)]
pub struct BridgeOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl BridgeOutput {
    /// Stdout followed by stderr, mirroring how the upstream tool captured
    /// both streams into one text blob. Callers scan this text for success
    /// markers; the exit code is informational only.
    pub fn merged(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        if self.stdout.is_empty() {
            return self.stderr.clone();
        }
        let mut text = self.stdout.clone();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }
}

fn drain_pipe<R: Read + Send + 'static>(reader: R) -> std::thread::JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut reader = reader;
        let mut buffer = Vec::<u8>::new();
        let mut temp = [0u8; 4096];
        loop {
            match reader.read(&mut temp) {
                Ok(0) => break,
                Ok(count) => buffer.extend_from_slice(&temp[..count]),
                Err(_) => break,
            }
        }
        buffer
    })
}

pub fn run_bridge_command(
    program: &str,
    args: &[String],
    timeout: Duration,
    trace_id: &str,
) -> Result<BridgeOutput, AppError> {
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            AppError::transport(format!("Failed to spawn device bridge: {err}"), trace_id)
        })?;

    // Drain stdout/stderr in parallel; otherwise a chatty bridge invocation
    // (content queries can emit thousands of records) blocks once the pipe
    // buffer fills and we would incorrectly hit the timeout.
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::transport("Failed to capture stdout", trace_id))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AppError::transport("Failed to capture stderr", trace_id))?;

    let stdout_handle = drain_pipe(stdout);
    let stderr_handle = drain_pipe(stderr);

    let start = Instant::now();
    let exit_code = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status.code(),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    return Err(AppError::transport(
                        "Device bridge command timed out".to_string(),
                        trace_id,
                    ));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(err) => {
                let _ = stdout_handle.join();
                let _ = stderr_handle.join();
                return Err(AppError::transport(
                    format!("Failed to poll device bridge: {err}"),
                    trace_id,
                ));
            }
        }
    };

    let stdout_bytes = stdout_handle.join().unwrap_or_default();
    let stderr_bytes = stderr_handle.join().unwrap_or_default();

    // Best-effort decoding: device output is not guaranteed to be valid
    // UTF-8 and a record with mojibake is still evidence.
    Ok(BridgeOutput {
        stdout: String::from_utf8_lossy(&stdout_bytes).to_string(),
        stderr: String::from_utf8_lossy(&stderr_bytes).to_string(),
        exit_code,
    })
}
