use std::fs;
use std::io;
use std::path::Path;

use crate::competitor::CompetitorDirectory;

/// Errors from directory persistence.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to write directory file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to read directory file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed directory file {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize directory: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Persist the directory as pretty-printed JSON, overwriting any previous
/// file. Keys are full display names with non-ASCII preserved as-is.
pub fn save(directory: &CompetitorDirectory, path: &Path) -> Result<(), DirectoryError> {
    let json = serde_json::to_string_pretty(directory)?;
    fs::write(path, json).map_err(|e| DirectoryError::Write {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load a previously saved directory.
///
/// A missing file is not an error: it yields an empty directory so callers
/// can tell the user to run the crawl first. Malformed JSON is fatal.
pub fn load(path: &Path) -> Result<CompetitorDirectory, DirectoryError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CompetitorDirectory::new()),
        Err(e) => {
            return Err(DirectoryError::Read {
                path: path.display().to_string(),
                source: e,
            })
        }
    };
    serde_json::from_str(&contents).map_err(|e| DirectoryError::Malformed {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::competitor::Competitor;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("sonkal-model-{}-{}", std::process::id(), name))
    }

    fn sample_directory() -> CompetitorDirectory {
        let mut dir = CompetitorDirectory::new();
        dir.insert(
            "Jiří Dvořák".into(),
            Competitor {
                id: 12,
                first_name: "Jiří".into(),
                last_name: "Dvořák".into(),
            },
        );
        dir.insert(
            "Anna Malá Veselá".into(),
            Competitor {
                id: 310,
                first_name: "Anna".into(),
                last_name: "Malá Veselá".into(),
            },
        );
        dir
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round-trip.json");
        let dir = sample_directory();
        save(&dir, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, dir);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_json_shape() {
        // Wire format: {"Full Name": {"id": n, "first_name": ..., "last_name": ...}}
        let dir = sample_directory();
        let json = serde_json::to_string_pretty(&dir).unwrap();
        assert!(json.contains("\"Jiří Dvořák\""));
        assert!(json.contains("\"id\": 12"));
        assert!(json.contains("\"first_name\": \"Jiří\""));
        // Non-ASCII must not be escaped
        assert!(!json.contains("\\u"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_path("does-not-exist.json");
        let loaded = load(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_is_fatal() {
        let path = temp_path("malformed.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load(&path).unwrap_err();
        assert!(matches!(err, DirectoryError::Malformed { .. }));
        std::fs::remove_file(&path).ok();
    }
}
