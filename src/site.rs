use chrono::{DateTime, Utc};
use serde::Serialize;

/// A reference from a post to one of its categories or tags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermRef {
    pub name: String,
    pub path: String,
}

pub type CategoryRef = TermRef;

impl TermRef {
    pub fn category(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: format!("categories/{}/", slugify(name)),
        }
    }

    pub fn tag(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: format!("tags/{}/", slugify(name)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Post {
    pub title: String,
    pub path: String,
    pub link: Option<String>,
    pub date: DateTime<Utc>,
    pub thumbnail: Option<String>,
    pub categories: Vec<CategoryRef>,
    pub tags: Vec<TermRef>,
}

/// A category or tag grouping. Declared groupings may hold no posts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Taxonomy {
    pub name: String,
    pub path: String,
    pub post_count: usize,
}

impl Taxonomy {
    pub fn is_empty(&self) -> bool {
        self.post_count == 0
    }
}

/// Read-only snapshot of the site's posts and groupings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Site {
    posts: Vec<Post>,
    categories: Vec<Taxonomy>,
    tags: Vec<Taxonomy>,
}

impl Site {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_post(&mut self, post: Post) {
        for category in &post.categories {
            count_term(&mut self.categories, category);
        }
        for tag in &post.tags {
            count_term(&mut self.tags, tag);
        }
        self.posts.push(post);
    }

    pub fn declare_category(&mut self, name: &str) {
        declare_term(&mut self.categories, TermRef::category(name));
    }

    pub fn declare_tag(&mut self, name: &str) {
        declare_term(&mut self.tags, TermRef::tag(name));
    }

    pub fn posts(&self) -> &[Post] {
        self.posts.as_slice()
    }

    pub fn categories(&self) -> &[Taxonomy] {
        self.categories.as_slice()
    }

    pub fn tags(&self) -> &[Taxonomy] {
        self.tags.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.iter().filter(|c| !c.is_empty()).count()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.iter().filter(|t| !t.is_empty()).count()
    }

    /// Posts newest first, at most `limit` of them. Equal dates keep load order.
    pub fn recent(&self, limit: usize) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts.truncate(limit);
        posts
    }
}

fn count_term(terms: &mut Vec<Taxonomy>, term: &TermRef) {
    match terms.iter_mut().find(|t| t.path == term.path) {
        Some(existing) => existing.post_count += 1,
        None => terms.push(Taxonomy {
            name: term.name.clone(),
            path: term.path.clone(),
            post_count: 1,
        }),
    }
}

fn declare_term(terms: &mut Vec<Taxonomy>, term: TermRef) {
    if terms.iter().all(|t| t.path != term.path) {
        terms.push(Taxonomy {
            name: term.name,
            path: term.path,
            post_count: 0,
        });
    }
}

pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
