//! Memoized widget rendering.
//!
//! A [`FragmentCache`] maps a [`CacheKey`] to a stored value and only runs the
//! compute callback on a miss. [`CachedRenderer`] uses it to skip building and
//! rendering the widget when the inputs are unchanged.

use crate::error::{Error, Result};
use crate::helper::Helper;
use crate::site::Site;
use crate::templates::Render;
use crate::widget::{build_view_model, effective_limit};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// `{namespace}-{sha256(json(input))}`.
    pub fn derive<T: Serialize>(namespace: &str, input: &T) -> Result<Self> {
        let json = serde_json::to_vec(input).map_err(Error::Json)?;
        let digest = Sha256::digest(json.as_slice());
        Ok(Self(format!("{}-{}", namespace, hex::encode(digest))))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct FragmentCache<V> {
    entries: HashMap<CacheKey, V>,
    hits: usize,
    misses: usize,
}

impl<V> Default for FragmentCache<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }
}

impl<V> FragmentCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn get(&self, key: &CacheKey) -> Option<&V> {
        self.entries.get(key)
    }

    /// Returns the stored value, computing and storing it on a miss. A failed
    /// computation leaves the cache untouched.
    pub fn get_or_try_insert_with<F>(&mut self, key: CacheKey, compute: F) -> Result<&V>
    where
        F: FnOnce() -> Result<V>,
    {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                log::debug!("cache hit {}", entry.key());
                Ok(&*entry.into_mut())
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                log::debug!("cache miss {}", entry.key());
                let value = compute()?;
                Ok(&*entry.insert(value))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Inputs for one widget render.
pub struct Props<'a, 'h> {
    pub site: &'a Site,
    pub helper: &'a Helper<'h>,
    pub limit: usize,
}

#[derive(Serialize)]
struct KeyInput<'a> {
    site: &'a Site,
    limit: usize,
    helper: &'a str,
}

impl Props<'_, '_> {
    pub fn cache_key(&self, namespace: &str) -> Result<CacheKey> {
        let input = KeyInput {
            site: self.site,
            limit: effective_limit(self.limit),
            helper: self.helper.signature.as_str(),
        };
        CacheKey::derive(namespace, &input)
    }
}

pub struct CachedRenderer<R> {
    namespace: String,
    renderer: R,
    cache: FragmentCache<Option<String>>,
}

impl<R: Render> CachedRenderer<R> {
    pub fn new(namespace: &str, renderer: R) -> Self {
        Self {
            namespace: namespace.to_string(),
            renderer,
            cache: FragmentCache::new(),
        }
    }

    /// Markup for the widget, or `None` when the site has no posts.
    pub fn render(&mut self, props: &Props<'_, '_>) -> Result<Option<String>> {
        let key = props.cache_key(self.namespace.as_str())?;
        let renderer = &self.renderer;

        let stored = self.cache.get_or_try_insert_with(key, || {
            match build_view_model(props.site, props.helper, props.limit) {
                Some(model) => renderer.render(&model).map(Some),
                None => Ok(None),
            }
        })?;

        Ok(stored.clone())
    }

    pub fn cache(&self) -> &FragmentCache<Option<String>> {
        &self.cache
    }
}
