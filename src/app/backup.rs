use std::fs;
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use tar::Archive;
use tracing::info;

use crate::app::error::AppError;

/// Android backup containers open with a fixed-size text header
/// ("ANDROID BACKUP\n" plus version/compression/encryption lines) before the
/// compressed payload. The length is a protocol constant; reading the stream
/// from any other offset breaks decompression.
pub const AB_HEADER_LEN: usize = 24;

/// Where the messaging database lands inside an unpacked backup tree.
pub const MSGSTORE_RELATIVE_PATH: &str = "apps/com.whatsapp/db/msgstore.db";

/// Strips the container header, inflates the raw zlib stream, and extracts
/// the embedded tar archive into `dest`. Returns the path of the messaging
/// database if the backup contained one.
///
/// Header/decompression/tar failures are archive errors scoped to the
/// messaging-backup category. A structurally valid backup without the
/// database path is not an error; the caller reports "no data found".
pub fn unpack_backup(
    container: &Path,
    dest: &Path,
    trace_id: &str,
) -> Result<Option<PathBuf>, AppError> {
    let bytes = fs::read(container).map_err(|err| {
        AppError::archive(
            format!("Failed to read backup container {}: {err}", container.display()),
            trace_id,
        )
    })?;
    if bytes.len() < AB_HEADER_LEN {
        return Err(AppError::archive(
            format!(
                "Backup container is shorter than its {AB_HEADER_LEN}-byte header ({} bytes)",
                bytes.len()
            ),
            trace_id,
        ));
    }

    fs::create_dir_all(dest).map_err(|err| {
        AppError::archive(
            format!("Failed to create unpack directory {}: {err}", dest.display()),
            trace_id,
        )
    })?;

    let decoder = ZlibDecoder::new(&bytes[AB_HEADER_LEN..]);
    let mut archive = Archive::new(decoder);
    archive.unpack(dest).map_err(|err| {
        AppError::archive(format!("Failed to unpack backup archive: {err}"), trace_id)
    })?;

    let db_path = dest.join(MSGSTORE_RELATIVE_PATH);
    if db_path.exists() {
        info!(trace_id = %trace_id, db = %db_path.display(), "Located messaging store");
        Ok(Some(db_path))
    } else {
        Ok(None)
    }
}
