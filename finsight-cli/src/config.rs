use anyhow::{Context, Result, bail};
use finsight_analytics::EngineConfig;
use finsight_analytics::engine::{DEFAULT_RECENT_LIMIT, DEFAULT_SERIES_WINDOW};
use finsight_core::{BenchmarkTable, Category, DEFAULT_TIMEZONE, DayPolicy};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_finsight_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisSection,
    /// Per-category overrides of the built-in benchmark table, keyed by category label
    pub benchmarks: BTreeMap<String, Decimal>,
    pub api: ApiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisSection {
    /// IANA zone deciding which calendar day a transaction lands on
    pub timezone: String,
    pub series_window: usize,
    pub recent_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            series_window: DEFAULT_SERIES_WINDOW,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.ynab.in".to_string(),
            username: None,
        }
    }
}

impl Config {
    pub fn day_policy(&self) -> Result<DayPolicy> {
        DayPolicy::new(&self.analysis.timezone).context("analysis.timezone in config")
    }

    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut overrides = BTreeMap::new();
        for (label, average) in &self.benchmarks {
            let category = Category::from_label(label)
                .with_context(|| format!("unknown category in [benchmarks]: {label}"))?;
            if *average < Decimal::ZERO {
                bail!("benchmark for {category} must not be negative: {average}");
            }
            overrides.insert(category, *average);
        }

        Ok(EngineConfig {
            benchmarks: BenchmarkTable::default().with_overrides(&overrides),
            series_window: self.analysis.series_window,
            recent_limit: self.analysis.recent_limit,
        })
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_finsight_home()?.join("config.toml"))
}

fn resolve(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => config_path(),
    }
}

/// Load the config, falling back to defaults when the file does not exist
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = resolve(path)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(path: Option<&Path>, cfg: &Config) -> Result<PathBuf> {
    let p = resolve(path)?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config(path: Option<&Path>) -> Result<()> {
    let p = resolve(path)?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let written = save_config(Some(&p), &Config::default())?;
    println!("Wrote {}", written.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.analysis.series_window, 7);
    }

    #[test]
    fn test_partial_file_with_benchmark_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        fs::write(
            &p,
            r#"
[analysis]
timezone = "UTC"

[benchmarks]
FOOD = 12000
travel = "2500.50"
"#,
        )
        .unwrap();

        let cfg = load_config(Some(&p)).unwrap();
        assert_eq!(cfg.analysis.timezone, "UTC");
        assert_eq!(cfg.analysis.recent_limit, 5);
        assert_eq!(cfg.api, ApiSection::default());

        let engine = cfg.engine_config().unwrap();
        assert_eq!(engine.benchmarks.average(Category::Food), Decimal::from(12_000));
        assert_eq!(engine.benchmarks.average(Category::Travel), Decimal::new(250050, 2));
        assert_eq!(engine.benchmarks.average(Category::Utilities), Decimal::from(4000));
        assert!(cfg.day_policy().is_ok());
    }

    #[test]
    fn test_bad_timezone_is_reported() {
        let mut cfg = Config::default();
        cfg.analysis.timezone = "Nowhere/Special".to_string();
        let err = cfg.day_policy().unwrap_err();
        assert!(err.to_string().contains("analysis.timezone"));
    }

    #[test]
    fn test_unknown_benchmark_category() {
        let mut cfg = Config::default();
        cfg.benchmarks.insert("CRYPTO".to_string(), Decimal::from(10));
        let err = cfg.engine_config().unwrap_err();
        assert!(err.to_string().contains("CRYPTO"));
    }

    #[test]
    fn test_init_then_reload() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("config.toml");
        init_config(Some(&p)).unwrap();
        assert_eq!(load_config(Some(&p)).unwrap(), Config::default());
    }
}
