//! Strip command - Remove every directive line

use clap::Args;
use sigil_palette::Palette;

use super::{collect_files, rewrite_files, CommandError};
use crate::config::SigilConfig;

#[derive(Args)]
pub struct StripArgs {
    /// Files, directories or glob patterns to process
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Write stripped sources back to the files
    #[arg(short, long)]
    pub write: bool,
}

pub fn run(args: StripArgs, config: &SigilConfig) -> Result<(), CommandError> {
    let palette = Palette::new()?;
    let files = collect_files(&args.patterns)?;
    rewrite_files(&files, args.write || config.write, "stripped", |source| {
        palette.strip(source)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_strip_uses_configured_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.js");
        std::fs::write(&path, "// @input hash=\"v1\"\nvar a = 1;\n").unwrap();
        let config = SigilConfig {
            write: true,
            ..Default::default()
        };

        let args = StripArgs {
            patterns: vec![path.display().to_string()],
            write: false,
        };
        run(args, &config).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "var a = 1;\n");
    }
}
