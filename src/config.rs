use crate::error::{Error, Result};
use serde::Deserialize;
use std::{fs, path::Path};

pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
    pub build: BuildConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub root: String,
    pub language: String,
    pub post_pattern: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: "/".to_string(),
            language: "en".to_string(),
            post_pattern: "source/_posts/**/*.md".to_string(),
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub limit: usize,
    pub date_format: String,
    pub template_dir: Option<String>,
    pub locale_dir: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            limit: crate::widget::DEFAULT_LIMIT,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            template_dir: None,
            locale_dir: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BuildConfig {
    pub out_dir: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let text = fs::read_to_string(path.as_ref()).map_err(Error::Io)?;
        Self::parse(text.as_str())
    }

    pub fn parse(text: &str) -> Result<Config> {
        toml::from_str(text).map_err(Error::Toml)
    }
}
