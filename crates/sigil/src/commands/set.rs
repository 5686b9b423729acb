//! Set command - Write values, keyed by hash, into a file's literals

use clap::Args;
use sigil_carton::{CompactString, FxHashMap};
use sigil_palette::{InjectOutput, Palette, TagValue};
use std::io;
use std::path::{Path, PathBuf};

use super::{read_source, write_source, CommandError};
use crate::config::SigilConfig;

#[derive(Args)]
pub struct SetArgs {
    /// JavaScript file to update
    pub file: PathBuf,

    /// JSON object mapping hashes to a string or an array of strings (`-` reads stdin)
    #[arg(long, value_name = "FILE")]
    pub values: Option<PathBuf>,

    /// Single text assignment, repeatable; applied after `--values`
    #[arg(short = 's', long = "set", value_name = "HASH=VALUE")]
    pub assignments: Vec<String>,

    /// User checked against `access` lists
    #[arg(short, long)]
    pub user: Option<String>,

    /// Write the result back to the file
    #[arg(short, long)]
    pub write: bool,
}

pub fn run(args: SetArgs, config: &SigilConfig) -> Result<(), CommandError> {
    let palette = Palette::new()?;

    let mut values = match &args.values {
        Some(path) => load_values(path)?,
        None => FxHashMap::default(),
    };
    for assignment in &args.assignments {
        let (hash, value) = parse_assignment(assignment)?;
        values.insert(hash, value);
    }

    let source = read_source(&args.file)?;
    let output = palette.inject(&source, &values, config.user(args.user.as_deref()));

    if args.write || config.write {
        if output.content != source {
            write_source(&args.file, &output.content)?;
        }
        eprintln!(
            "Set {} value(s) in {}",
            values.len().saturating_sub(output.failure_count()),
            args.file.display()
        );
    } else {
        print!("{}", output.content);
    }

    report_failures(&output)
}

/// Read a hash-to-value map from a JSON file, or stdin for `-`.
pub fn load_values(path: &Path) -> Result<FxHashMap<CompactString, TagValue>, CommandError> {
    let content = if path.as_os_str() == "-" {
        io::read_to_string(io::stdin()).map_err(|source| CommandError::Read {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        read_source(path)?
    };
    serde_json::from_str(&content).map_err(|source| CommandError::Values {
        path: path.to_path_buf(),
        source,
    })
}

/// Split `HASH=VALUE` on the first `=`.
pub fn parse_assignment(text: &str) -> Result<(CompactString, TagValue), CommandError> {
    match text.split_once('=') {
        Some((hash, value)) if !hash.is_empty() => {
            Ok((CompactString::new(hash), TagValue::from(value)))
        }
        _ => Err(CommandError::Assignment(text.to_string())),
    }
}

fn report_failures(output: &InjectOutput) -> Result<(), CommandError> {
    if output.failures.is_empty() {
        return Ok(());
    }
    for failure in &output.failures {
        eprintln!("  {}: {}", failure.hash, failure.reason);
    }
    Err(CommandError::Rejected(output.failure_count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCE: &str = "// @input hash=\"v1\"\nvar title = 'Home';\n// @checkbox hash=\"v2\"\nvar days = ['mon'];\n";

    #[test]
    fn test_parse_assignment() {
        let (hash, value) = parse_assignment("v1=a=b").unwrap();
        assert_eq!(hash.as_str(), "v1");
        assert_eq!(value, TagValue::from("a=b"));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }

    #[test]
    fn test_load_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("values.json");
        std::fs::write(&path, r#"{ "v1": "About", "v2": ["tue", "wed"] }"#).unwrap();

        let values = load_values(&path).unwrap();
        assert_eq!(values.get("v1"), Some(&TagValue::from("About")));
        let days: TagValue = ["tue", "wed"].into_iter().collect();
        assert_eq!(values.get("v2"), Some(&days));

        std::fs::write(&path, r#"{ "v1": 3 }"#).unwrap();
        assert!(matches!(load_values(&path), Err(CommandError::Values { .. })));
    }

    #[test]
    fn test_set_writes_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("site.js");
        std::fs::write(&file, SOURCE).unwrap();

        let args = SetArgs {
            file: file.clone(),
            values: None,
            assignments: vec!["v1=About".to_string()],
            user: None,
            write: true,
        };
        run(args, &SigilConfig::default()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&file).unwrap(),
            SOURCE.replace("'Home'", "'About'")
        );
    }

    #[test]
    fn test_set_reports_rejected_values() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("site.js");
        std::fs::write(&file, SOURCE).unwrap();

        let args = SetArgs {
            file: file.clone(),
            values: None,
            assignments: vec!["v1=About".to_string(), "missing=1".to_string()],
            user: None,
            write: true,
        };
        let err = run(args, &SigilConfig::default()).unwrap_err();
        assert!(matches!(err, CommandError::Rejected(1)));
        // Successful values are still written.
        assert!(std::fs::read_to_string(&file).unwrap().contains("'About'"));
    }
}
