use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tracing::{debug, info, trace, warn};

use crate::sequence::WeekdayConfig;

pub const DEFAULT_HEADER_TEXT: &str = "Timetable";

#[derive(Debug, Clone)]
pub struct Config {
    map: HashMap<String, String>,
    pub loaded_files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let mut map = HashMap::new();
        for (key, value) in [
            ("weekends", "off"),
            ("start-with-sunday", "off"),
            ("long-names", "off"),
            ("all-caps-headers", "off"),
            ("refresh-enabled", "off"),
            ("header-text", DEFAULT_HEADER_TEXT),
            ("color", "on"),
        ] {
            map.insert(key.to_string(), value.to_string());
        }
        Self {
            map,
            loaded_files: vec![],
        }
    }
}

impl Config {
    #[tracing::instrument(skip(rc_override))]
    pub fn load(rc_override: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = Config::default();

        match resolve_rc_path(rc_override)? {
            Some(path) => {
                info!(timetablerc = %path.display(), "loading timetablerc");
                cfg.load_file(&path)?;
            }
            None => warn!("no timetablerc found; using defaults"),
        }

        Ok(cfg)
    }

    #[tracing::instrument(skip(self, overrides))]
    pub fn apply_overrides<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (k, v) in overrides {
            let key = k.strip_prefix("rc.").unwrap_or(&k).to_string();
            debug!(key = %key, value = %v, "applying override");
            self.map.insert(key, v);
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.map.get(key).map(|v| parse_bool(v))
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.map
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .map(|v| expand_tilde(Path::new(v.trim())))
    }

    #[tracing::instrument(skip(self))]
    fn load_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let path = expand_tilde(path);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        self.loaded_files.push(path.clone());

        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        for (line_num, raw_line) in text.lines().enumerate() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }

            if let Some(include_rest) = line.strip_prefix("include ") {
                let include_path = resolve_include_path(&base_dir, include_rest.trim())?;
                debug!(
                    file = %path.display(),
                    include = %include_path.display(),
                    line = line_num + 1,
                    "processing include"
                );
                if include_path.exists() {
                    self.load_file(&include_path)?;
                } else {
                    warn!(include = %include_path.display(), "include file does not exist; skipping");
                }
                continue;
            }

            let (k, v) = line.split_once('=').ok_or_else(|| {
                anyhow!(
                    "invalid config line {}:{}: {}",
                    path.display(),
                    line_num + 1,
                    raw_line
                )
            })?;

            let key = k.trim().to_string();
            let value = v.trim().to_string();
            trace!(key = %key, value = %value, "loaded config key");
            self.map.insert(key, value);
        }

        Ok(())
    }
}

/// Everything the component reads from its host attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimetableSettings {
    pub header_text: String,
    pub refresh_enabled: bool,
    pub weekdays: WeekdayConfig,
}

impl Default for TimetableSettings {
    fn default() -> Self {
        Self {
            header_text: DEFAULT_HEADER_TEXT.to_string(),
            refresh_enabled: false,
            weekdays: WeekdayConfig::default(),
        }
    }
}

impl TimetableSettings {
    pub fn from_config(cfg: &Config) -> Self {
        let flag = |key: &str| cfg.get_bool(key).unwrap_or(false);
        Self {
            header_text: cfg
                .get("header-text")
                .unwrap_or_else(|| DEFAULT_HEADER_TEXT.to_string()),
            refresh_enabled: flag("refresh-enabled"),
            weekdays: WeekdayConfig {
                include_weekends: flag("weekends"),
                start_with_sunday: flag("start-with-sunday"),
                use_long_names: flag("long-names"),
                all_caps_headers: flag("all-caps-headers"),
            },
        }
    }
}

#[tracing::instrument(skip(override_path))]
fn resolve_rc_path(override_path: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = override_path {
        return Ok(Some(path.to_path_buf()));
    }

    if let Ok(rc_env) = std::env::var("TIMETABLERC") {
        if rc_env == "/dev/null" {
            return Ok(None);
        }
        return Ok(Some(PathBuf::from(rc_env)));
    }

    let home = dirs::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
    let candidate = home.join(".timetablerc");
    if candidate.exists() {
        return Ok(Some(candidate));
    }

    Ok(None)
}

fn resolve_include_path(base_dir: &Path, include: &str) -> anyhow::Result<PathBuf> {
    if include.is_empty() {
        return Err(anyhow!("include path cannot be empty"));
    }

    let expanded = expand_tilde(Path::new(include));
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base_dir.join(expanded))
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// A `#` opens a comment at line start, or when it stands alone after
/// whitespace (`on # note`). `Team #3` and `#fc0` are values.
fn strip_comment(line: &str) -> &str {
    if line.trim_start().starts_with('#') {
        return "";
    }

    let mut prev_is_space = false;
    for (idx, ch) in line.char_indices() {
        if ch == '#' && prev_is_space {
            let next = line[idx + 1..].chars().next();
            if next.is_none_or(char::is_whitespace) {
                return &line[..idx];
            }
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}

fn parse_bool(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "y" | "yes" | "on" | "true"
    )
}
