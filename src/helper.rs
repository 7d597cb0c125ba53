//! Functions the widget needs from its surroundings: url resolution,
//! translation and date formatting.

use crate::config::Config;
use crate::error::Result;
use crate::i18n::Locale;
use chrono::{DateTime, SecondsFormat, Utc};

type UrlFn<'a> = Box<dyn Fn(&str) -> String + 'a>;
type TranslateFn<'a> = Box<dyn Fn(&str) -> String + 'a>;
type PluralizeFn<'a> = Box<dyn Fn(&str, usize) -> String + 'a>;
type DateFn<'a> = Box<dyn Fn(&DateTime<Utc>) -> String + 'a>;

pub struct Helper<'a> {
    pub url_for: UrlFn<'a>,
    pub translate: TranslateFn<'a>,
    pub pluralize: PluralizeFn<'a>,
    pub date: DateFn<'a>,
    pub date_xml: DateFn<'a>,
    /// Identifies the collaborators' configuration. Two helpers with the same
    /// signature must produce the same output for the same input.
    pub signature: String,
}

impl<'a> Helper<'a> {
    pub fn new(
        urls: &'a UrlResolver,
        locale: &'a Locale,
        dates: &'a DateFormatter,
        language: &str,
    ) -> Result<Self> {
        let signature = format!(
            "root={};lang={};locale={};date={}",
            urls.root(),
            language,
            locale.digest()?,
            dates.format()
        );

        Ok(Self {
            url_for: Box::new(move |path: &str| urls.url_for(path)),
            translate: Box::new(move |key: &str| locale.translate(key)),
            pluralize: Box::new(move |key: &str, count: usize| locale.pluralize(key, count)),
            date: Box::new(move |value: &DateTime<Utc>| dates.date(value)),
            date_xml: Box::new(DateFormatter::date_xml),
            signature,
        })
    }
}

/// Owned collaborators built from the site configuration.
pub struct HelperContext {
    pub urls: UrlResolver,
    pub locale: Locale,
    pub dates: DateFormatter,
    pub language: String,
}

impl HelperContext {
    pub fn new(config: &Config, locale: Locale) -> Self {
        Self {
            urls: UrlResolver::new(config.site.root.as_str()),
            locale,
            dates: DateFormatter::new(config.widget.date_format.as_str()),
            language: config.site.language.clone(),
        }
    }

    pub fn helper(&self) -> Result<Helper<'_>> {
        Helper::new(&self.urls, &self.locale, &self.dates, self.language.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct UrlResolver {
    root: String,
}

impl UrlResolver {
    pub fn new(root: &str) -> Self {
        let trimmed = root.trim_matches('/');
        let root = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        Self { root }
    }

    pub fn root(&self) -> &str {
        self.root.as_str()
    }

    pub fn url_for(&self, path: &str) -> String {
        if is_external(path) {
            return path.to_string();
        }
        format!("{}{}", self.root, path.trim_start_matches('/'))
    }
}

fn is_external(path: &str) -> bool {
    path.starts_with("//")
        || path.starts_with('#')
        || path.starts_with("mailto:")
        || path.starts_with("data:")
        || path.contains("://")
}

#[derive(Clone, Debug)]
pub struct DateFormatter {
    format: String,
}

impl DateFormatter {
    pub fn new(format: &str) -> Self {
        Self {
            format: format.to_string(),
        }
    }

    pub fn format(&self) -> &str {
        self.format.as_str()
    }

    pub fn date(&self, value: &DateTime<Utc>) -> String {
        value.format(self.format.as_str()).to_string()
    }

    pub fn date_xml(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}
