//! Reading and writing token files.
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! failed write never leaves a half-written token file behind. Symlinks are
//! followed and the target keeps its permissions.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;

use crate::error::{Result, TokenError};
use crate::token::TokenDocument;

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(TokenError::MissingFile(path.to_path_buf()));
        }
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            return Err(TokenError::MalformedInput(format!("{}: not valid UTF-8", path.display())));
        }
        Err(e) => return Err(e.into()),
    };
    debug!("Read {} bytes from {}", content.len(), path.display());

    serde_json::from_str(&content).map_err(|e| TokenError::MalformedInput(format!("{}: {}", path.display(), e)))
}

/// Load a token document, validating its shape.
pub fn load_document(path: &Path) -> Result<TokenDocument> {
    let value = read_json(path)?;
    TokenDocument::from_value(value).map_err(|e| match e {
        TokenError::MalformedInput(msg) => TokenError::MalformedInput(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

/// Overwrite `path` with the pretty-printed document.
pub fn write_document(path: &Path, document: &TokenDocument) -> Result<()> {
    let content = document.to_pretty_json()?;
    write_atomic(path, content.as_bytes())?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Replace the whole file at `path` with `content`.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    // Rename over the link's target, not the link itself
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp = temp_path(&target);
    let result = (|| -> io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(content)?;
        file.sync_all()?;
        if let Ok(metadata) = fs::metadata(&target) {
            fs::set_permissions(&tmp, metadata.permissions())?;
        }
        fs::rename(&tmp, &target)
    })();

    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(TokenError::WriteFailure {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tokens".to_string());
    path.with_file_name(format!(".{}.tmp-{}", name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_document(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, TokenError::MissingFile(_)));
    }

    #[test]
    fn test_unparsable_file_names_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tokens.json");
        fs::write(&path, "{ nope").unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, TokenError::MalformedInput(_)));
        assert!(err.to_string().contains("tokens.json"));
    }

    #[test]
    fn test_non_object_root_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tokens.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert!(matches!(load_document(&path), Err(TokenError::MalformedInput(_))));
    }

    #[test]
    fn test_write_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tokens.json");
        let doc = TokenDocument::from_value(json!({ "a": { "value": "#fff", "type": "color" } })).unwrap();

        write_document(&path, &doc).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.ends_with('\n'));
        assert!(content.starts_with("{\n  \"a\""));
        assert_eq!(load_document(&path).unwrap(), doc);

        let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tokens.json");
        fs::write(&path, [b'{', 0xff, 0xfe, b'}']).unwrap();
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, TokenError::MalformedInput(_)), "unexpected error {err}");
        assert!(err.to_string().contains("tokens.json"));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tokens.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_document(&path, &TokenDocument::new()).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_through_symlink() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real.json");
        let link = temp.path().join("tokens.json");
        fs::write(&real, "{}").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let doc = TokenDocument::from_value(json!({ "a": { "value": "1" } })).unwrap();
        write_document(&link, &doc).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(load_document(&real).unwrap(), doc);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no-such-dir").join("tokens.json");
        let err = write_document(&path, &TokenDocument::new()).unwrap_err();
        assert!(matches!(err, TokenError::WriteFailure { .. }));
    }
}
