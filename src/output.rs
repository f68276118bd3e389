//! Batch processing of package sources.
//!
//! Expands source patterns, generates the symbol set of every package and
//! writes it as `<stem>.symbols.json`, beside the source or into a chosen
//! directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::PackageError;
use crate::package::load_package;
use crate::render::{Metrics, SymbolSet, Variant};

/// Extension appended to the source stem for generated files.
pub const OUTPUT_EXTENSION: &str = "symbols.json";

/// Settings shared by every source of a run.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Variants to generate.
    pub variants: Vec<Variant>,
    /// Grid and pin dimensions.
    pub metrics: Metrics,
    /// Output directory; beside each source when `None`.
    pub directory: Option<PathBuf>,
    /// Indent the generated JSON.
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            variants: Variant::ALL.to_vec(),
            metrics: Metrics::default(),
            directory: None,
            pretty: true,
        }
    }
}

fn has_glob_pattern(source: &str) -> bool {
    source.contains(['*', '?', '['])
}

/// Expands source arguments into existing files, in order, without duplicates.
///
/// Plain paths are kept as given even when they do not exist, so that the
/// read error names them.
///
/// # Errors
///
/// Returns an error if a pattern is not a valid glob.
pub fn expand_sources<S: AsRef<str>>(sources: &[S]) -> Result<Vec<PathBuf>, PackageError> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for source in sources {
        let source = source.as_ref();
        if !has_glob_pattern(source) {
            let path = PathBuf::from(source);
            if seen.insert(path.clone()) {
                paths.push(path);
            }
            continue;
        }

        let entries = glob::glob(source).map_err(|e| PackageError::InvalidPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
        let mut matched = 0_usize;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => {
                    matched += 1;
                    if seen.insert(path.clone()) {
                        paths.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!(pattern = %source, error = %e, "Unreadable glob match"),
            }
        }
        if matched == 0 {
            warn!(pattern = %source, "Pattern matched no file");
        }
    }

    Ok(paths)
}

/// Whether the tool reads this source.
#[must_use]
pub fn is_package_source(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        && !path.to_string_lossy().ends_with(OUTPUT_EXTENSION)
}

/// Path of the file generated for `source`.
#[must_use]
pub fn output_path(source: &Path, directory: Option<&Path>) -> PathBuf {
    let stem = source
        .file_stem()
        .map_or_else(|| "package".into(), |s| s.to_string_lossy());
    let file_name = format!("{stem}.{OUTPUT_EXTENSION}");
    match directory {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}

/// Serialises a symbol set to `path`.
///
/// # Errors
///
/// Returns an error if serialisation or the write fails.
pub fn write_symbol_set(set: &SymbolSet, path: &Path, pretty: bool) -> Result<(), PackageError> {
    let json = if pretty {
        serde_json::to_string_pretty(set)
    } else {
        serde_json::to_string(set)
    }
    .map_err(|e| PackageError::SerialiseError {
        name: set.package.clone(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PackageError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    std::fs::write(path, json).map_err(|e| PackageError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Generates and writes the symbols of one source, returning the output path.
///
/// # Errors
///
/// Returns an error if the source is not a package descriptor, cannot be
/// loaded, or the output cannot be written.
pub fn process_source(source: &Path, options: &OutputOptions) -> Result<PathBuf, PackageError> {
    if !is_package_source(source) {
        return Err(PackageError::UnsupportedSource {
            path: source.to_path_buf(),
        });
    }

    let package = load_package(source)?;
    let set = SymbolSet::generate(&package, &options.variants, options.metrics);
    if set.is_empty() {
        warn!(source = %source.display(), "No symbol could be generated");
    }
    let path = output_path(source, options.directory.as_deref());
    write_symbol_set(&set, &path, options.pretty)?;

    info!(
        source = %source.display(),
        output = %path.display(),
        symbols = set.symbols.len(),
        failed = set.failures.len(),
        "Wrote symbols"
    );
    Ok(path)
}

/// Outcome of a run over many sources.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files written.
    pub written: Vec<PathBuf>,
    /// Sources skipped because of their extension.
    pub skipped: Vec<PathBuf>,
    /// Sources that failed, with the error.
    pub failed: Vec<(PathBuf, PackageError)>,
}

impl RunSummary {
    /// Whether every readable source was processed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Processes every source in order; one failing source does not stop the run.
#[must_use]
pub fn process_sources(sources: &[PathBuf], options: &OutputOptions) -> RunSummary {
    let mut summary = RunSummary::default();
    for source in sources {
        match process_source(source, options) {
            Ok(path) => summary.written.push(path),
            Err(PackageError::UnsupportedSource { path }) => {
                warn!(source = %path.display(), "Skipping non-JSON source");
                summary.skipped.push(path);
            }
            Err(e) => {
                warn!(source = %source.display(), error = %e, "Failed to process source");
                summary.failed.push((source.clone(), e));
            }
        }
    }
    summary
}
