//! Parse command - Print the controls declared in JavaScript files

use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use sigil_palette::{Palette, VisualConfig};
use std::path::PathBuf;

use super::{collect_files, read_source, to_json, CommandError};
use crate::config::SigilConfig;

#[derive(Args)]
pub struct ParseArgs {
    /// Files, directories or glob patterns to read
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// User checked against `access` lists
    #[arg(short, long)]
    pub user: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Controls of one file.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub config: VisualConfig,
}

pub fn run(args: ParseArgs, config: &SigilConfig) -> Result<(), CommandError> {
    let palette = Palette::new()?;
    let files = collect_files(&args.patterns)?;
    let user = config.user(args.user.as_deref());

    let reports = parse_files(&palette, &files, user)?;
    println!("{}", to_json(&reports, args.pretty || config.pretty)?);
    Ok(())
}

/// Parse every file in parallel, keeping path order.
pub fn parse_files(
    palette: &Palette,
    files: &[PathBuf],
    user: Option<&str>,
) -> Result<Vec<FileReport>, CommandError> {
    files
        .par_iter()
        .map(|path| {
            let source = read_source(path)?;
            let config = palette.parse(&source, user);
            tracing::debug!(
                "{}: {} control(s)",
                path.display(),
                config.controls().count()
            );
            Ok(FileReport {
                file: path.display().to_string(),
                config,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.js");
        std::fs::write(
            &path,
            "// @toggle hash=\"v1\" access=\"alice\"\nvar a = true;\n// @input hash=\"v2\"\nvar b = 'x';\n",
        )
        .unwrap();
        let palette = Palette::new().unwrap();

        let reports = parse_files(&palette, &[path.clone()], None).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].config.controls().count(), 1);

        let reports = parse_files(&palette, &[path], Some("alice")).unwrap();
        assert_eq!(reports[0].config.controls().count(), 2);

        let json = serde_json::to_value(&reports[0]).unwrap();
        assert!(json["file"].as_str().unwrap().ends_with("site.js"));
        assert_eq!(json["groups"][0]["controls"][1]["value"], "x");
    }
}
