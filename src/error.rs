use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid JSON syntax in '{file}'")]
#[diagnostic(
    code(pkg_carousel::manifest_parse_error),
    help("Check the package.json syntax near the highlighted position")
)]
pub struct ManifestParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum CarouselError {
    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(pkg_carousel::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    ManifestParseError(Box<ManifestParseError>),

    #[error("Manifest '{path}' does not declare a package name")]
    #[diagnostic(
        code(pkg_carousel::missing_package_name),
        help("Every package.json that is not a workspace root needs a \"name\" field")
    )]
    MissingPackageName { path: PathBuf },

    #[error("Package name '{name}' is declared by both '{first_dir}' and '{second_dir}'")]
    #[diagnostic(
        code(pkg_carousel::duplicate_name),
        help("Package names identify graph nodes and must be unique across the workspace tree")
    )]
    DuplicateNameError {
        name: String,
        first_dir: PathBuf,
        second_dir: PathBuf,
    },

    #[error("Invalid glob pattern '{pattern}'")]
    #[diagnostic(
        code(pkg_carousel::invalid_glob),
        help("Workspace and tsconfig entries must be valid glob patterns relative to their file")
    )]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read import cache '{path}'")]
    #[diagnostic(
        code(pkg_carousel::cache_read_error),
        help("Check permissions on the cache directory or run without --read-cache")
    )]
    CacheReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write import cache '{path}'")]
    #[diagnostic(
        code(pkg_carousel::cache_write_error),
        help("Check permissions and disk space for the cache directory")
    )]
    CacheWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Import cache '{path}' is not a valid import list")]
    #[diagnostic(
        code(pkg_carousel::cache_decode_error),
        help("Delete the entry or rerun with --write-cache and without --read-cache")
    )]
    CacheDecodeError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Package directory '{package_dir}' does not lie below the workspace root")]
    #[diagnostic(
        code(pkg_carousel::cache_path_error),
        help("Cache entries mirror workspace-relative package directories; move the package under the root")
    )]
    CachePathError { package_dir: PathBuf },

    #[error("Failed to parse source file '{path}': {message}")]
    #[diagnostic(
        code(pkg_carousel::source_parse_error),
        help("Fix the syntax error or exclude the file in tsconfig.json")
    )]
    SourceParseError { path: PathBuf, message: String },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(pkg_carousel::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(pkg_carousel::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(pkg_carousel::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },

    #[error("Package '{name}' was not found in the workspace")]
    #[diagnostic(
        code(pkg_carousel::package_not_found),
        help("Run `pkg-carousel lineup` to list the discovered package names")
    )]
    PackageNotFound { name: String },
}

impl CarouselError {
    /// Build a [`ManifestParseError`] pointing at the offending position
    pub fn manifest_parse(path: &std::path::Path, content: &str, source: serde_json::Error) -> Self {
        let span = offset_of(content, source.line(), source.column())
            .map(|offset| SourceSpan::new(offset.into(), 1));

        CarouselError::ManifestParseError(Box::new(ManifestParseError {
            file: path.display().to_string(),
            source_code: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            source,
        }))
    }
}

/// Byte offset of a 1-based line / column pair as reported by serde_json
fn offset_of(content: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }

    let line_start: usize = content
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);

    (offset < content.len()).then_some(offset)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;

    use super::*;

    #[test]
    fn test_manifest_parse_error_display() {
        let content = "{\n  \"name\": \"a\",\n  oops\n}";
        let json_err = serde_json::from_str::<serde_json::Value>(content).unwrap_err();

        let error = CarouselError::manifest_parse(Path::new("package.json"), content, json_err);

        assert_eq!(error.to_string(), "Invalid JSON syntax in 'package.json'");
        match error {
            CarouselError::ManifestParseError(inner) => assert!(inner.span.is_some()),
            _ => panic!("Expected ManifestParseError variant"),
        }
    }

    #[test]
    fn test_offset_of() {
        let content = "ab\ncd\nef";
        assert_eq!(offset_of(content, 1, 1), Some(0));
        assert_eq!(offset_of(content, 2, 2), Some(4));
        assert_eq!(offset_of(content, 0, 1), None);
        assert_eq!(offset_of(content, 9, 9), None);
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = CarouselError::FileReadError {
            path: PathBuf::from("/tmp/missing/package.json"),
            source: io_err,
        };

        assert_eq!(
            error.to_string(),
            "Failed to read file '/tmp/missing/package.json'"
        );
    }

    #[test]
    fn test_duplicate_name_error() {
        let error = CarouselError::DuplicateNameError {
            name: "@org/core".to_string(),
            first_dir: PathBuf::from("packages/core"),
            second_dir: PathBuf::from("legacy/core"),
        };

        assert_eq!(
            error.to_string(),
            "Package name '@org/core' is declared by both 'packages/core' and 'legacy/core'"
        );
    }

    #[test]
    fn test_error_codes() {
        use miette::Diagnostic;

        let error = CarouselError::CacheReadError {
            path: PathBuf::from("cache/imports.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };

        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let carousel_err: CarouselError = json_err.into();

        match carousel_err {
            CarouselError::Json(_) => {}
            _ => panic!("Expected Json variant"),
        }
    }
}
