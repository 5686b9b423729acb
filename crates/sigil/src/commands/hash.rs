//! Hash command - Give every directive without a hash a fresh one

use clap::Args;
use sigil_palette::Palette;

use super::{collect_files, rewrite_files, CommandError};
use crate::config::SigilConfig;

#[derive(Args)]
pub struct HashArgs {
    /// Files, directories or glob patterns to process
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Write hashed sources back to the files
    #[arg(short, long)]
    pub write: bool,
}

pub fn run(args: HashArgs, config: &SigilConfig) -> Result<(), CommandError> {
    let palette = Palette::new()?;
    let files = collect_files(&args.patterns)?;
    rewrite_files(&files, args.write || config.write, "hashed", |source| {
        palette.allocate_hashes(source)
    })
}
