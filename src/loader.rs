use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::site::{Post, Site, TermRef};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use glob::glob;
use markdown::mdast::{Node, Root, Toml};
use markdown::{Constructs, ParseOptions};
use std::path::Path;
use tokio::fs;

#[derive(Debug, serde::Deserialize)]
struct FrontMatter {
    title: String,
    date: toml::Value,
    path: Option<String>,
    link: Option<String>,
    thumbnail: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

pub struct PostLoader {
    fm_parse_options: ParseOptions,
}

impl PostLoader {
    pub fn new() -> Self {
        let constructs = Constructs {
            frontmatter: true,
            ..Default::default()
        };

        let fm_parse_options = ParseOptions {
            constructs,
            ..Default::default()
        };

        Self { fm_parse_options }
    }

    /// Loads every post matching the configured pattern, plus the declared
    /// categories and tags.
    pub async fn load_site(&self, config: &SiteConfig) -> Result<Site> {
        let mut site = Site::new();
        let posts = glob(config.post_pattern.as_str()).map_err(Error::Pattern)?;

        for post in posts {
            let post = post.map_err(Error::Glob)?;
            match self.load_post(post.as_path()).await {
                Ok(loaded) => {
                    log::debug!("loaded {:?} -> {}", post, loaded.path);
                    site.add_post(loaded);
                }
                Err(Error::MissingFrontMatter) => {
                    log::warn!("skipping {:?}: no front matter", post);
                }
                Err(e) => return Err(e),
            }
        }

        for category in &config.categories {
            site.declare_category(category);
        }
        for tag in &config.tags {
            site.declare_tag(tag);
        }

        log::info!(
            "loaded {} posts, {} categories, {} tags",
            site.posts().len(),
            site.categories().len(),
            site.tags().len()
        );

        Ok(site)
    }

    async fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path).await.map_err(Error::Io)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        self.parse_post(content.as_str(), stem)
    }

    pub fn parse_post(&self, content: &str, stem: &str) -> Result<Post> {
        let fm = self.parse_front_matter(content)?;
        let date = match &fm.date {
            toml::Value::Datetime(value) => parse_date(value.to_string().as_str())?,
            toml::Value::String(value) => parse_date(value.as_str())?,
            other => return Err(Error::Date(other.to_string())),
        };

        Ok(Post {
            title: fm.title,
            path: fm.path.unwrap_or_else(|| format!("{}/", stem)),
            link: fm.link,
            date,
            thumbnail: fm.thumbnail,
            categories: fm.categories.iter().map(|c| TermRef::category(c)).collect(),
            tags: fm.tags.iter().map(|t| TermRef::tag(t)).collect(),
        })
    }

    fn parse_front_matter(&self, content: &str) -> Result<FrontMatter> {
        let ast = markdown::to_mdast(content, &self.fm_parse_options)
            .map_err(|e| Error::Markdown(e.to_string()))?;

        match ast {
            Node::Root(Root { children, .. }) => match children.first() {
                Some(Node::Toml(Toml { value, .. })) => toml::from_str(value).map_err(Error::Toml),
                _ => Err(Error::MissingFrontMatter),
            },
            _ => Err(Error::MissingFrontMatter),
        }
    }
}

/// Accepts RFC 3339, a local date-time (read as UTC) or a bare date.
pub fn parse_date(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Ok(value.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(Utc.from_utc_datetime(&value));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|value| Utc.from_utc_datetime(&value))
        .ok_or_else(|| Error::Date(text.to_string()))
}
