//! Subcommands and the file plumbing they share.

pub mod hash;
pub mod parse;
pub mod set;
pub mod strip;

use glob::glob;
use ignore::Walk;
use rayon::prelude::*;
use sigil_palette::SigilError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extensions treated as JavaScript sources.
const SOURCE_EXTENSIONS: &[&str] = &["js", "mjs", "cjs"];

/// Errors that abort a command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Engine(#[from] SigilError),

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid values in {}: {source}", path.display())]
    Values {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("expected HASH=VALUE, got {0:?}")]
    Assignment(String),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no JavaScript files found matching patterns: {0:?}")]
    NoFiles(Vec<String>),

    #[error("{0} file(s) could not be processed")]
    Files(usize),

    #[error("{0} value(s) could not be written")]
    Rejected(usize),
}

/// Collect JavaScript files from glob patterns or directories.
pub fn collect_files(patterns: &[String]) -> Result<Vec<PathBuf>, CommandError> {
    let mut files: Vec<PathBuf> = patterns
        .iter()
        .flat_map(|pattern| {
            if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|r| r.ok())
                    .filter(|p| is_source(p) && !in_node_modules(p))
                    .collect::<Vec<_>>()
            } else {
                // Directory walking respects .gitignore; a plain file walks to itself.
                Walk::new(pattern)
                    .filter_map(|e| e.ok())
                    .filter(|e| is_source(e.path()))
                    .map(|e| e.path().to_path_buf())
                    .collect::<Vec<_>>()
            }
        })
        .collect();

    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(CommandError::NoFiles(patterns.to_vec()));
    }
    Ok(files)
}

#[inline]
fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[inline]
fn in_node_modules(path: &Path) -> bool {
    path.components().any(|c| c.as_os_str() == "node_modules")
}

pub fn read_source(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_source(path: &Path, content: &str) -> Result<(), CommandError> {
    fs::write(path, content).map_err(|source| CommandError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply a text rewrite to every file in parallel.
///
/// With `write`, changed files are written back and a summary goes to
/// stderr; otherwise the rewritten sources are printed to stdout in path
/// order.
pub fn rewrite_files<F>(
    files: &[PathBuf],
    write: bool,
    verb: &str,
    rewrite: F,
) -> Result<(), CommandError>
where
    F: Fn(&str) -> String + Sync,
{
    let results: Vec<(&PathBuf, Result<(String, bool), CommandError>)> = files
        .par_iter()
        .map(|path| {
            let result = read_source(path).and_then(|source| {
                let output = rewrite(&source);
                let changed = output != source;
                if write && changed {
                    write_source(path, &output)?;
                }
                Ok((output, changed))
            });
            (path, result)
        })
        .collect();

    let mut changed = 0;
    let mut errored = 0;
    for (path, result) in results {
        match result {
            Ok((output, was_changed)) => {
                if was_changed {
                    changed += 1;
                    tracing::debug!("{} {}", verb, path.display());
                }
                if !write {
                    print!("{}", output);
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {}", path.display(), e);
                errored += 1;
            }
        }
    }

    if write {
        eprintln!("Processed {} file(s)", files.len());
        if changed > 0 {
            eprintln!("  {} file(s) {}", changed, verb);
        }
        if files.len() - changed - errored > 0 {
            eprintln!("  {} file(s) unchanged", files.len() - changed - errored);
        }
    }

    if errored > 0 {
        return Err(CommandError::Files(errored));
    }
    Ok(())
}

/// Serialize `value` as JSON, pretty when requested.
pub fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, CommandError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
