//! On-disk import cache
//!
//! One JSON document per package, holding exactly the package's
//! [`ImportRecord`] list. Entries live under the cache root at the package's
//! workspace-relative directory, so distinct packages never share an entry.
//! Entries are trusted as-is; refreshing them is up to the caller.

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::types::ImportRecord;
use crate::constants::cache::{DEFAULT_CACHE_DIR, ENTRY_FILE};
use crate::error::CarouselError;

#[derive(Debug, Clone)]
pub struct ImportCache {
    cache_root: PathBuf,
}

impl ImportCache {
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
        }
    }

    /// Cache at the default location under the workspace root
    pub fn for_workspace(root: &Path) -> Self {
        Self::new(root.join(DEFAULT_CACHE_DIR))
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Location of the entry for a workspace-relative package directory.
    ///
    /// Absolute directories and `..` components would leave the cache root
    /// and are rejected.
    pub fn entry_path(&self, package_dir: &Path) -> Result<PathBuf, CarouselError> {
        let stays_inside = package_dir
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
        if !stays_inside {
            return Err(CarouselError::CachePathError {
                package_dir: package_dir.to_path_buf(),
            });
        }

        Ok(self.cache_root.join(package_dir).join(ENTRY_FILE))
    }

    /// Stored records, or `None` when there is no entry yet
    pub fn read(&self, package_dir: &Path) -> Result<Option<Vec<ImportRecord>>, CarouselError> {
        let path = self.entry_path(package_dir)?;
        if !path.is_file() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| CarouselError::CacheReadError {
            path: path.clone(),
            source: e,
        })?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| CarouselError::CacheDecodeError { path, source: e })
    }

    pub fn write(&self, package_dir: &Path, records: &[ImportRecord]) -> Result<(), CarouselError> {
        let path = self.entry_path(package_dir)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| CarouselError::CacheWriteError {
                path: path.clone(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(records)?;
        fs::write(&path, content).map_err(|e| CarouselError::CacheWriteError { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::imports::types::{ImportKind, ImportType};

    fn record(name: &str) -> ImportRecord {
        ImportRecord {
            package_name: "@org/app".to_string(),
            source_file: "packages/app/src/index.ts".to_string(),
            import_module: "@org/core".to_string(),
            import_kind: ImportKind::Named,
            import_name: name.to_string(),
            import_type: Some(ImportType::Value),
        }
    }

    #[test]
    fn test_entry_path_mirrors_package_dir() {
        let cache = ImportCache::for_workspace(Path::new("/repo"));

        assert_eq!(
            cache.entry_path(Path::new("packages/app")).unwrap(),
            PathBuf::from("/repo/node_modules/.cache/pkg-carousel/imports/packages/app/imports.json")
        );
        assert_eq!(
            cache.entry_path(Path::new("")).unwrap(),
            PathBuf::from("/repo/node_modules/.cache/pkg-carousel/imports/imports.json")
        );
    }

    #[test]
    fn test_entry_path_must_stay_under_cache_root() {
        let temp = TempDir::new().unwrap();
        let cache = ImportCache::new(temp.path().join("cache"));
        let outside = temp.path().join("shared-lib");

        for package_dir in [outside.as_path(), Path::new("../shared-lib"), Path::new("a/../../b")] {
            match cache.entry_path(package_dir) {
                Err(CarouselError::CachePathError { package_dir: reported }) => {
                    assert_eq!(reported, package_dir)
                }
                other => panic!("Expected CachePathError, got {other:?}"),
            }
        }

        assert!(cache.write(&outside, &[record("foo")]).is_err());
        assert!(!outside.join("imports.json").exists());
    }

    #[test]
    fn test_missing_entry_is_none() {
        let temp = TempDir::new().unwrap();
        let cache = ImportCache::new(temp.path());

        assert_eq!(cache.read(Path::new("packages/app")).unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let cache = ImportCache::new(temp.path().join("cache"));
        let records = vec![record("foo"), record("bar")];

        cache.write(Path::new("packages/app"), &records).unwrap();

        assert_eq!(cache.read(Path::new("packages/app")).unwrap(), Some(records));
        assert_eq!(cache.read(Path::new("packages/other")).unwrap(), None);
    }

    #[test]
    fn test_corrupt_entry_is_a_decode_error() {
        let temp = TempDir::new().unwrap();
        let cache = ImportCache::new(temp.path());
        let path = cache.entry_path(Path::new("pkg")).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not an array").unwrap();

        let err = cache.read(Path::new("pkg")).unwrap_err();
        match err {
            CarouselError::CacheDecodeError { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("Expected CacheDecodeError, got {other:?}"),
        }
    }
}
