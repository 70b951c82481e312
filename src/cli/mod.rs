pub mod commands;

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BackendKind, Config};
use crate::report::Operation;

#[derive(Parser)]
#[command(name = "gramscope")]
#[command(about = "Collect and aggregate data about an Instagram account", long_about = None)]
pub struct Cli {
    /// Username of the target account
    pub target: String,

    /// Operation to run against the target
    #[arg(value_enum)]
    pub command: Operation,

    /// Backend to query (overrides the config file)
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendKind>,

    /// Output root directory; artifacts go to <output>/<target>/
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the text artifact
    #[arg(short = 'f', long = "file")]
    pub write_text: bool,

    /// Write the JSON artifact
    #[arg(short, long)]
    pub json: bool,

    /// Fail instead of fetching more than this many pages of one listing
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub max_pages: Option<usize>,

    /// Read configuration from this file instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Flags override whatever the file and environment provided.
    pub fn apply(&self, config: &mut Config) {
        if let Some(kind) = self.backend {
            config.backend.kind = kind;
        }
        if let Some(dir) = &self.output {
            config.output.dir = dir.clone();
        }
        if self.write_text {
            config.output.write_text = true;
        }
        if self.json {
            config.output.json_dump = true;
        }
        if self.max_pages.is_some() {
            config.backend.max_pages = self.max_pages;
        }
    }
}
