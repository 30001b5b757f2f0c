//! Resolved filesystem layout for a run: where to look for the manifest and
//! where extracted contents go.

use std::path::{Path, PathBuf};

use crate::config::FetchConfig;

/// Manifest candidates (in priority order) and the extraction root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub manifest_candidates: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

impl Layout {
    /// Build the layout from config.
    ///
    /// Candidates, in order:
    /// 1. `<data_root>/<dataset_dir>/<manifest_name>`
    /// 2. `<cwd>/<manifest_name>`
    /// 3. `<exe_dir>/<manifest_name>` (only when `exe_dir` is known)
    ///
    /// A relative `data_root` is taken relative to `cwd`.
    pub fn resolve(cfg: &FetchConfig, cwd: &Path, exe_dir: Option<&Path>) -> Self {
        let data_root = if cfg.data_root.is_absolute() {
            cfg.data_root.clone()
        } else {
            cwd.join(&cfg.data_root)
        };

        let mut manifest_candidates = vec![
            data_root.join(&cfg.dataset_dir).join(&cfg.manifest_name),
            cwd.join(&cfg.manifest_name),
        ];
        if let Some(dir) = exe_dir {
            manifest_candidates.push(dir.join(&cfg.manifest_name));
        }

        Layout {
            manifest_candidates,
            output_dir: data_root.join(&cfg.output_dir),
        }
    }

    /// Layout for the current process: working directory plus the directory of the running executable.
    pub fn for_current_process(cfg: &FetchConfig) -> std::io::Result<Self> {
        let cwd = std::env::current_dir()?;
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf));
        Ok(Self::resolve(cfg, &cwd, exe_dir.as_deref()))
    }

    /// Replace the candidate list with a single explicit manifest path.
    pub fn with_manifest(mut self, manifest: PathBuf) -> Self {
        self.manifest_candidates = vec![manifest];
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }
}
