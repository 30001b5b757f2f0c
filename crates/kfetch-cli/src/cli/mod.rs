//! CLI for kfetch: locate the manifest, download every URL, extract every archive.

mod console;

use anyhow::{Context, Result};
use clap::Parser;
use kfetch_core::config::{self, DownloadFailurePolicy, FetchConfig};
use kfetch_core::layout::Layout;
use kfetch_core::pipeline;
use std::path::PathBuf;

use console::ConsoleReporter;

/// Download the archives listed in a dataset manifest and extract them.
#[derive(Debug, Parser)]
#[command(name = "kfetch")]
#[command(about = "kfetch: manifest-driven dataset downloader and extractor", long_about = None)]
pub struct Cli {
    /// Load settings from this TOML file instead of the XDG config.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Root directory holding the dataset directory and the extraction output.
    #[arg(long, value_name = "DIR")]
    pub data_root: Option<PathBuf>,

    /// Use this manifest instead of searching the usual locations.
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Extract into this directory instead of `<data-root>/<output_dir>`.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Continue with the remaining URLs when a download fails.
    #[arg(long)]
    pub keep_going: bool,

    /// Empty the output directory before extracting.
    #[arg(long)]
    pub clean: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        Cli::parse().run()
    }

    fn run(self) -> Result<()> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        self.apply_overrides(&mut cfg);
        tracing::debug!("effective config: {:?}", cfg);

        let layout = self.layout(&cfg)?;
        println!("kfetch: dataset download and extraction");

        let mut reporter = ConsoleReporter::new();
        let summary = pipeline::run(&layout, &cfg, &mut reporter)?;
        reporter.print_summary(&summary);
        Ok(())
    }

    /// Flags win over file values.
    fn apply_overrides(&self, cfg: &mut FetchConfig) {
        if let Some(root) = &self.data_root {
            cfg.data_root = root.clone();
        }
        if self.keep_going {
            cfg.on_download_error = DownloadFailurePolicy::KeepGoing;
        }
        if self.clean {
            cfg.clean_output = true;
        }
    }

    fn layout(&self, cfg: &FetchConfig) -> Result<Layout> {
        let mut layout =
            Layout::for_current_process(cfg).context("failed to resolve working directory")?;
        if let Some(manifest) = &self.manifest {
            layout = layout.with_manifest(manifest.clone());
        }
        if let Some(out) = &self.output_dir {
            layout = layout.with_output_dir(out.clone());
        }
        Ok(layout)
    }
}
