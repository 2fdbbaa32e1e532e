use crate::cli::Args;
#[cfg(test)]
use crate::cli::BoundaryArg;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use grayscott_canvas::{sim::check_params, Boundary, Params};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) params: Params,
    pub(crate) fps_cap: u32,
    pub(crate) steps_per_frame: u32,
    pub(crate) seed: Option<u64>,
    pub(crate) boundary: Boundary,
    pub(crate) parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            params: Params::default(),
            fps_cap: 60,
            steps_per_frame: 1,
            seed: None,
            boundary: Boundary::Wrap,
            parallel: true,
        }
    }
}

impl Settings {
    /// Command-line flags win over the file.
    pub(crate) fn apply_args(&mut self, args: &Args) {
        let p = &mut self.params;
        if let Some(v) = args.feed {
            p.feed = v;
        }
        if let Some(v) = args.kill {
            p.kill = v;
        }
        if let Some(v) = args.diffusion_a {
            p.diffusion_a = v;
        }
        if let Some(v) = args.diffusion_b {
            p.diffusion_b = v;
        }
        if let Some(v) = args.fps {
            self.fps_cap = v;
        }
        if let Some(v) = args.steps_per_frame {
            self.steps_per_frame = v;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(b) = args.boundary {
            self.boundary = b.into();
        }
        if args.serial {
            self.parallel = false;
        }
    }

    /// Non-finite tunables, or finite ones that blow up on the first step, are
    /// fatal at startup.
    pub(crate) fn validate(&self) -> Result<()> {
        check_params(&self.params, self.boundary)
            .with_context(|| format!("unusable tunables: {}", self.params))
    }

    pub(crate) fn fps(&self) -> u32 {
        self.fps_cap.clamp(1, 240)
    }

    pub(crate) fn steps(&self) -> u32 {
        self.steps_per_frame.max(1)
    }
}

pub(crate) struct Paths {
    pub(crate) settings_path: PathBuf,
    pub(crate) log_path: PathBuf,
}

pub(crate) fn project_paths() -> Result<Paths> {
    let proj = ProjectDirs::from("com", "grayscott-canvas", "GrayScottCanvas")
        .context("could not resolve project directories")?;
    let dir = proj.data_local_dir();
    Ok(Paths {
        settings_path: dir.join("settings.json"),
        log_path: dir.join("grayscott-canvas.log"),
    })
}

/// Missing file gives defaults. A file that exists but cannot be read or
/// parsed is reported and also falls back to defaults.
pub(crate) fn load_settings(path: &Path) -> Settings {
    let text = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no settings at {}, using defaults", path.display());
            return Settings::default();
        }
        Err(e) => {
            log::warn!("could not read {}: {e}; using defaults", path.display());
            return Settings::default();
        }
    };
    match serde_json::from_str::<Settings>(&text) {
        Ok(s) => {
            log::info!("loaded settings from {}", path.display());
            s
        }
        Err(e) => {
            log::warn!("ignoring malformed {}: {e}", path.display());
            Settings::default()
        }
    }
}
