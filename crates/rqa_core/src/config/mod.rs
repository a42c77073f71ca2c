use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::eval::DEFAULT_LOW_SCORE_THRESHOLD;

const CANDIDATE_NAMES: &[&str] = &[".ragqa.toml", "ragqa.toml"];

/// Bracket pair that encloses a citation key in answer text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Delimiters {
    pub open: char,
    pub close: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: '[',
            close: ']',
        }
    }
}

impl Delimiters {
    pub fn new(open: char, close: char) -> Result<Self, AppError> {
        let d = Self { open, close };
        d.validate()?;
        Ok(d)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.open == self.close {
            return Err(
                AppError::new("CONFIG_INVALID", "Citation delimiters must differ")
                    .with_details(format!("open={:?}; close={:?}", self.open, self.close)),
            );
        }
        for c in [self.open, self.close] {
            if c.is_alphanumeric() || c.is_whitespace() {
                return Err(AppError::new(
                    "CONFIG_INVALID",
                    "Citation delimiters must be punctuation characters",
                )
                .with_details(format!("delimiter={c:?}")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmailConfig {
    pub recipients: Vec<String>,
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            recipients: Vec::new(),
            subject: "Question Follow-up".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub delimiters: Delimiters,
    /// Prefix for the backend's content route, e.g. `https://host/api`.
    pub content_base: String,
    pub email: EmailConfig,
    pub low_score_threshold: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            content_base: String::new(),
            email: EmailConfig::default(),
            low_score_threshold: DEFAULT_LOW_SCORE_THRESHOLD,
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, AppError> {
        let cfg: RenderConfig = toml::from_str(s).map_err(|e| {
            AppError::new("CONFIG_INVALID", "Failed to parse config").with_details(e.to_string())
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.delimiters.validate()?;
        if !self.low_score_threshold.is_finite() {
            return Err(AppError::new(
                "CONFIG_INVALID",
                "low_score_threshold must be a finite number",
            ));
        }
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<RenderConfig, AppError> {
    log::debug!("Reading config from: {}", path.display());
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new("CONFIG_UNREADABLE", "Failed to read config file")
            .with_details(format!("path={}; err={e}", path.display()))
    })?;
    let cfg = RenderConfig::from_toml_str(&raw).map_err(|e| {
        let details = format!(
            "path={}; err={}",
            path.display(),
            e.details.as_deref().unwrap_or(&e.message)
        );
        e.with_details(details)
    })?;
    log::info!("Loaded config from: {}", path.display());
    Ok(cfg)
}

fn find_in_tree(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        for name in CANDIDATE_NAMES {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    None
}

/// Load configuration with precedence:
/// 1) explicit path (error if unreadable/invalid)
/// 2) walk up from start_dir: .ragqa.toml, ragqa.toml
/// 3) defaults
pub fn load(
    explicit: Option<&Path>,
    start_dir: &Path,
) -> Result<(RenderConfig, Option<PathBuf>), AppError> {
    if let Some(path) = explicit {
        let cfg = read_config(path)?;
        return Ok((cfg, Some(path.to_path_buf())));
    }

    if let Some(p) = find_in_tree(start_dir) {
        match read_config(&p) {
            Ok(cfg) => return Ok((cfg, Some(p))),
            Err(e) => log::warn!("Ignoring config {}: {e}", p.display()),
        }
    }

    log::debug!("No config file found, using defaults");
    Ok((RenderConfig::default(), None))
}
