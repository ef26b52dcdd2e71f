use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::repository::StorageError;

/// Whole-file contents: username → raw record.
///
/// Records stay as JSON values until looked up, so one damaged entry only
/// affects its own user and is written back untouched.
pub(crate) type UserDocument = BTreeMap<String, serde_json::Value>;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Reads the whole store. A missing or blank file is an empty store.
pub(crate) async fn load(path: &Path) -> Result<UserDocument, StorageError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(UserDocument::new()),
        Err(e) => return Err(e.into()),
    };
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(UserDocument::new());
    }
    serde_json::from_slice(&bytes).map_err(ser)
}

/// Writes the whole store with 4-space indentation, via a sibling temp file + rename.
pub(crate) async fn save(path: &Path, document: &UserDocument) -> Result<(), StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document.serialize(&mut serializer).map_err(ser)?;
    buf.push(b'\n');

    let tmp = temp_path(path);
    tokio::fs::write(&tmp, &buf).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
