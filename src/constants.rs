//! Configuration constants for pkg-carousel
//!
//! This module contains all configurable constants used throughout the
//! application. Some of these values can be overridden through command-line
//! arguments or environment variables.

use std::time::Duration;

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the carousel animation
    pub const SPINNER_FRAMES: &[&str] = &[
        "🎠 ", // Standard carousel
        "🎠⊙", // With center dot
        "🎠◐", // Quarter filled
        "🎠◓", // Half filled
        "🎠◑", // Three quarters
        "🎠◒", // Another quarter
        "🎠○", // Empty circle
        "🎠●", // Full circle
    ];
}

/// Output formatting configuration
pub mod output {
    /// Default output format when not specified
    pub const DEFAULT_FORMAT: &str = "human";
}

/// Package layout conventions
pub mod workspace {
    /// Manifest file describing a package or workspace root
    pub const MANIFEST_FILE: &str = "package.json";

    /// Per-package build configuration marking a package as a TypeScript
    /// project eligible for import extraction
    pub const PROJECT_MARKER: &str = "tsconfig.json";

    /// Directories that never contain package sources
    pub const IGNORED_DIRS: &[&str] = &[
        "node_modules",
        "dist",
        "build",
        "coverage",
        "out",
        ".git",
        ".next",
        ".turbo",
    ];

    /// Source file extensions handed to the parser
    pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];
}

/// Import cache layout
pub mod cache {
    /// Cache root, relative to the workspace root
    pub const DEFAULT_CACHE_DIR: &str = "node_modules/.cache/pkg-carousel/imports";

    /// File name of a single package's cache entry
    pub const ENTRY_FILE: &str = "imports.json";
}
