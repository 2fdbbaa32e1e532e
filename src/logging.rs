use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::{fs, fs::OpenOptions, path::Path};

/// The terminal is in raw mode on the alternate screen, so logs go to a file.
/// Filter comes from `RUST_LOG`, default `info`.
pub(crate) fn init(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("could not create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("could not open log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("logger already initialized")?;
    Ok(())
}
