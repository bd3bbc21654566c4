//! Clock configuration stored in `clock.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "clock.toml";

/// Clock configuration (TOML).
///
/// Missing fields default to the values of the stock single-page clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClockConfig {
    /// Delay between two samples of the clock, in milliseconds.
    pub tick_interval_ms: u64,

    pub display: DisplayConfig,

    pub commit: CommitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Browser tab title.
    pub page_title: String,
    pub heading: String,
    pub description: String,
    /// Clock colour as `#rgb` or `#rrggbb`.
    pub color: String,
    pub font_size_px: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_title: "Digital Clock".to_string(),
            heading: "Live Digital Clock".to_string(),
            description: "This simple application displays the current time, updating every second."
                .to_string(),
            color: "#4CAF50".to_string(),
            font_size_px: 80,
        }
    }
}

impl DisplayConfig {
    /// Parse [`DisplayConfig::color`] into RGB components.
    pub fn rgb(&self) -> Result<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// When to re-run the commit probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RefreshPolicy {
    /// Probe once per process and reuse the result.
    #[default]
    Once,
    /// Probe again on every tick.
    EveryTick,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommitConfig {
    /// Show the latest commit next to the clock.
    pub enabled: bool,
    /// VCS executable, resolved through `PATH`.
    pub program: String,
    /// Kill the probe after this many seconds.
    pub timeout_secs: u64,
    /// Truncate captured probe output beyond this many bytes.
    pub output_limit_bytes: usize,
    pub refresh: RefreshPolicy,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            program: "git".to_string(),
            timeout_secs: 10,
            output_limit_bytes: 16 * 1024,
            refresh: RefreshPolicy::Once,
        }
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            display: DisplayConfig::default(),
            commit: CommitConfig::default(),
        }
    }
}

impl ClockConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(anyhow!("tick_interval_ms must be > 0"));
        }
        if self.display.font_size_px == 0 {
            return Err(anyhow!("display.font_size_px must be > 0"));
        }
        self.display
            .rgb()
            .context("display.color must be #rgb or #rrggbb")?;
        if self.commit.program.trim().is_empty() {
            return Err(anyhow!("commit.program must be non-empty"));
        }
        if self.commit.timeout_secs == 0 {
            return Err(anyhow!("commit.timeout_secs must be > 0"));
        }
        if self.commit.output_limit_bytes == 0 {
            return Err(anyhow!("commit.output_limit_bytes must be > 0"));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ClockConfig::default()`.
pub fn load_config(path: &Path) -> Result<ClockConfig> {
    if !path.exists() {
        let cfg = ClockConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ClockConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ClockConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    let tmp_path = path.with_extension("toml.tmp");
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(&tmp_path, buf)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}

fn parse_hex_color(raw: &str) -> Result<(u8, u8, u8)> {
    let hex = raw
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("color '{raw}' must start with '#'"))?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(anyhow!("color '{raw}' has non-hex digits"));
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).context("parse color channel");
    match hex.len() {
        3 => {
            let expand = |i: usize| channel(&hex[i..=i].repeat(2));
            Ok((expand(0)?, expand(1)?, expand(2)?))
        }
        6 => Ok((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        n => Err(anyhow!("color '{raw}' has {n} digits, expected 3 or 6")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ClockConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("clock.toml");
        let mut cfg = ClockConfig::default();
        cfg.commit.enabled = true;
        cfg.commit.refresh = RefreshPolicy::EveryTick;
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("clock.toml");
        fs::write(&path, "[commit]\nenabled = true\nrefresh = \"every_tick\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert!(cfg.commit.enabled);
        assert_eq!(cfg.commit.refresh, RefreshPolicy::EveryTick);
        assert_eq!(cfg.commit.program, "git");
        assert_eq!(cfg.tick_interval_ms, 1000);
        assert_eq!(cfg.display.color, "#4CAF50");
    }

    #[test]
    fn rejects_zero_interval() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("clock.toml");
        fs::write(&path, "tick_interval_ms = 0\n").expect("write");
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("tick_interval_ms"));
    }

    fn load_from(contents: &str) -> Result<ClockConfig> {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("clock.toml");
        fs::write(&path, contents).expect("write");
        load_config(&path)
    }

    #[test]
    fn rejects_zero_font_size() {
        let err = load_from("[display]\nfont_size_px = 0\n").unwrap_err();
        assert!(err.to_string().contains("font_size_px"));
    }

    #[test]
    fn rejects_bad_color() {
        let err = load_from("[display]\ncolor = \"green\"\n").unwrap_err();
        assert!(err.to_string().contains("display.color"));
        assert!(load_from("[display]\ncolor = \"#12345\"\n").is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = load_from("[commit]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn rejects_zero_output_limit() {
        let err = load_from("[commit]\noutput_limit_bytes = 0\n").unwrap_err();
        assert!(err.to_string().contains("output_limit_bytes"));
    }

    #[test]
    fn rejects_empty_program() {
        let mut cfg = ClockConfig::default();
        cfg.commit.program = "  ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn parses_colors() {
        assert_eq!(parse_hex_color("#4CAF50").expect("long"), (0x4c, 0xaf, 0x50));
        assert_eq!(parse_hex_color("#fa0").expect("short"), (0xff, 0xaa, 0x00));
        assert!(parse_hex_color("4CAF50").is_err());
        assert!(parse_hex_color("#4CAF5").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
    }
}
