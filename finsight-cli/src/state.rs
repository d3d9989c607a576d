//! Where finsight keeps its files: `$FINSIGHT_HOME`, else `~/.finsight`.

use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Overrides the default `~/.finsight` state directory
pub const HOME_ENV: &str = "FINSIGHT_HOME";

pub fn finsight_home() -> Result<PathBuf> {
    resolve_home(std::env::var_os(HOME_ENV), std::env::var_os("HOME"))
}

fn resolve_home(explicit: Option<OsString>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = explicit.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match home.filter(|h| !h.is_empty()) {
        Some(h) => Ok(PathBuf::from(h).join(".finsight")),
        None => bail!("neither {HOME_ENV} nor HOME is set"),
    }
}

/// Create the state directory if needed and return it
pub fn ensure_finsight_home() -> Result<PathBuf> {
    let dir = finsight_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
