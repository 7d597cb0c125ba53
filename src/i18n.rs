//! Translation tables addressed by dotted keys (`widget.recents`).

use crate::error::{Error, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use toml::Value;

const BUILTIN_EN: &str = include_str!("../languages/en.toml");

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
enum Entry {
    Text(String),
    Plural { one: String, other: String },
}

#[derive(Clone, Debug, Default)]
pub struct Locale {
    entries: HashMap<String, Entry>,
}

impl Locale {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_EN)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let table: toml::value::Table = toml::from_str(text).map_err(Error::Toml)?;
        let mut locale = Self::default();
        locale.flatten("", &table);
        Ok(locale)
    }

    /// Builtin English, overridden by `<dir>/<language>.toml` when it exists.
    pub fn load<P: AsRef<Path>>(dir: Option<P>, language: &str) -> Result<Self> {
        let mut locale = Self::builtin()?;

        if let Some(dir) = dir {
            let path = dir.as_ref().join(format!("{}.toml", language));
            if path.exists() {
                log::debug!("loading locale {:?}", path);
                let text = std::fs::read_to_string(&path).map_err(Error::Io)?;
                locale.merge(Self::parse(text.as_str())?);
            } else {
                log::warn!("no locale file {:?}, using builtin strings", path);
            }
        }

        Ok(locale)
    }

    pub fn merge(&mut self, other: Locale) {
        self.entries.extend(other.entries);
    }

    /// Hex sha256 over the entries in key order. Equal tables give equal digests.
    pub fn digest(&self) -> Result<String> {
        let sorted: BTreeMap<&String, &Entry> = self.entries.iter().collect();
        let json = serde_json::to_vec(&sorted).map_err(Error::Json)?;
        Ok(hex::encode(Sha256::digest(json.as_slice())))
    }

    pub fn translate(&self, key: &str) -> String {
        match self.entries.get(key) {
            Some(Entry::Text(text)) => text.clone(),
            Some(Entry::Plural { other, .. }) => other.clone(),
            None => key.to_string(),
        }
    }

    pub fn pluralize(&self, key: &str, count: usize) -> String {
        let form = match self.entries.get(key) {
            Some(Entry::Text(text)) => text.as_str(),
            Some(Entry::Plural { one, .. }) if count == 1 => one.as_str(),
            Some(Entry::Plural { other, .. }) => other.as_str(),
            None => key,
        };
        form.replace("%d", count.to_string().as_str())
    }

    fn flatten(&mut self, prefix: &str, table: &toml::value::Table) {
        for (name, value) in table {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };

            match value {
                Value::String(text) => {
                    self.entries.insert(key, Entry::Text(text.clone()));
                }
                Value::Table(inner) => match plural_forms(inner) {
                    Some(entry) => {
                        self.entries.insert(key, entry);
                    }
                    None => self.flatten(key.as_str(), inner),
                },
                _ => log::warn!("ignoring non-string translation {}", key),
            }
        }
    }
}

fn plural_forms(table: &toml::value::Table) -> Option<Entry> {
    let one = table.get("one")?.as_str()?;
    let other = table.get("other")?.as_str()?;
    Some(Entry::Plural {
        one: one.to_string(),
        other: other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_strings() {
        let locale = Locale::builtin().unwrap();

        assert_eq!(locale.translate("widget.recents"), "Recents");
        assert_eq!(locale.pluralize("common.post", 1), "Post");
        assert_eq!(locale.pluralize("common.post", 0), "Posts");
        assert_eq!(locale.pluralize("common.category", 2), "Categories");
        assert_eq!(locale.pluralize("common.tag", 1), "Tag");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let locale = Locale::builtin().unwrap();

        assert_eq!(locale.translate("widget.nope"), "widget.nope");
        assert_eq!(locale.pluralize("common.nope", 3), "common.nope");
    }

    #[test]
    fn test_plural_substitutes_count() {
        let locale = Locale::parse("[common]\npost = { one = \"%d post\", other = \"%d posts\" }\n")
            .unwrap();

        assert_eq!(locale.pluralize("common.post", 1), "1 post");
        assert_eq!(locale.pluralize("common.post", 12), "12 posts");
        assert_eq!(locale.translate("common.post"), "%d posts");
    }

    #[test]
    fn test_plain_text_used_for_every_count() {
        let locale = Locale::parse("[common]\ntag = \"Schlagworte\"\n").unwrap();

        assert_eq!(locale.pluralize("common.tag", 1), "Schlagworte");
        assert_eq!(locale.pluralize("common.tag", 7), "Schlagworte");
    }

    #[test]
    fn test_merge_overrides_builtin() {
        let mut locale = Locale::builtin().unwrap();
        locale.merge(Locale::parse("[widget]\nrecents = \"Récents\"\n").unwrap());

        assert_eq!(locale.translate("widget.recents"), "Récents");
        assert_eq!(locale.pluralize("common.post", 2), "Posts");
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("de.toml"),
            "[common]\npost = { one = \"Beitrag\", other = \"Beiträge\" }\n",
        )
        .unwrap();

        let locale = Locale::load(Some(dir.path()), "de").unwrap();
        assert_eq!(locale.pluralize("common.post", 4), "Beiträge");
        assert_eq!(locale.translate("widget.recents"), "Recents");

        let fallback = Locale::load(Some(dir.path()), "ja").unwrap();
        assert_eq!(fallback.pluralize("common.post", 4), "Posts");
    }

    #[test]
    fn test_digest_tracks_contents() {
        let builtin = Locale::builtin().unwrap();
        let mut changed = Locale::builtin().unwrap();
        changed.merge(Locale::parse("[widget]\nrecents = \"Latest\"\n").unwrap());
        let mut same = Locale::builtin().unwrap();
        same.merge(Locale::parse("[widget]\nrecents = \"Recents\"\n").unwrap());

        assert_eq!(builtin.digest().unwrap(), same.digest().unwrap());
        assert_ne!(builtin.digest().unwrap(), changed.digest().unwrap());
        assert_eq!(builtin.digest().unwrap().len(), 64);
    }

    #[test]
    fn test_malformed_locale_is_an_error() {
        assert!(matches!(Locale::parse("post = ["), Err(Error::Toml(_))));
    }
}
