//! Recent posts view-model: the newest posts plus post, category and tag
//! counters, shaped for the widget template.

use crate::helper::Helper;
use crate::site::{Post, Site};
use serde::Serialize;

pub const NAMESPACE: &str = "widget.recentposts";
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CategoryLink {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub url: String,
    pub title: String,
    pub date: String,
    pub date_xml: String,
    pub thumbnail: Option<String>,
    pub categories: Vec<CategoryLink>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Counter {
    pub count: usize,
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub post: Counter,
    pub category: Counter,
    pub tag: Counter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    pub posts: Vec<PostView>,
    pub title: String,
    pub counter: Counters,
}

/// Zero falls back to the default.
pub fn effective_limit(limit: usize) -> usize {
    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit
    }
}

/// Returns `None` when the site has no posts; the widget is then not rendered.
pub fn build_view_model(site: &Site, helper: &Helper<'_>, limit: usize) -> Option<ViewModel> {
    if site.is_empty() {
        return None;
    }

    let post_count = site.posts().len();
    let category_count = site.category_count();
    let tag_count = site.tag_count();

    let posts = site
        .recent(effective_limit(limit))
        .into_iter()
        .map(|post| post_view(post, helper))
        .collect();

    let counter = |count: usize, key: &str, archive: &str| Counter {
        count,
        title: (helper.pluralize)(key, count),
        url: (helper.url_for)(archive),
    };

    Some(ViewModel {
        posts,
        title: (helper.translate)("widget.recents"),
        counter: Counters {
            post: counter(post_count, "common.post", "/archives"),
            category: counter(category_count, "common.category", "/categories"),
            tag: counter(tag_count, "common.tag", "/tags"),
        },
    })
}

fn post_view(post: &Post, helper: &Helper<'_>) -> PostView {
    let target = match post.link.as_deref() {
        Some(link) if !link.is_empty() => link,
        _ => post.path.as_str(),
    };

    PostView {
        url: (helper.url_for)(target),
        title: post.title.clone(),
        date: (helper.date)(&post.date),
        date_xml: (helper.date_xml)(&post.date),
        thumbnail: post.thumbnail.as_deref().map(|t| (helper.url_for)(t)),
        categories: post
            .categories
            .iter()
            .map(|category| CategoryLink {
                name: category.name.clone(),
                url: (helper.url_for)(category.path.as_str()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::{DateFormatter, UrlResolver};
    use crate::i18n::Locale;
    use crate::site::tests::post;
    use pretty_assertions::assert_eq;

    struct Fixture {
        urls: UrlResolver,
        locale: Locale,
        dates: DateFormatter,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                urls: UrlResolver::new("/"),
                locale: Locale::builtin().unwrap(),
                dates: DateFormatter::new("%Y-%m-%d"),
            }
        }

        fn helper(&self) -> Helper<'_> {
            Helper::new(&self.urls, &self.locale, &self.dates, "en").unwrap()
        }
    }

    fn site_with(days: &[u32]) -> Site {
        let mut site = Site::new();
        for (i, day) in days.iter().enumerate() {
            site.add_post(post(format!("post {}", i).as_str(), *day, &[], &[]));
        }
        site
    }

    #[test]
    fn test_empty_site_builds_nothing() {
        let fixture = Fixture::new();
        let mut site = Site::new();
        site.declare_category("Rust");

        assert!(build_view_model(&site, &fixture.helper(), 5).is_none());
    }

    #[test]
    fn test_six_posts_limit_five() {
        let fixture = Fixture::new();
        let mut site = Site::new();
        site.add_post(post("a", 1, &["Rust"], &["async"]));
        site.add_post(post("b", 6, &["Rust"], &[]));
        site.add_post(post("c", 3, &["Web"], &["http"]));
        site.add_post(post("d", 4, &[], &["async"]));
        site.add_post(post("e", 2, &[], &[]));
        site.add_post(post("f", 5, &[], &[]));
        site.declare_tag("unused");

        let model = build_view_model(&site, &fixture.helper(), 5).unwrap();

        let titles: Vec<&str> = model.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "f", "d", "c", "e"]);
        assert_eq!(model.counter.post.count, 6);
        assert_eq!(model.counter.category.count, 2);
        assert_eq!(model.counter.tag.count, 2);
        assert_eq!(model.title, "Recents");
    }

    #[test]
    fn test_limit_larger_than_post_count() {
        let fixture = Fixture::new();
        let site = site_with(&[4, 2, 9]);

        let model = build_view_model(&site, &fixture.helper(), 10).unwrap();
        assert_eq!(model.posts.len(), 3);
    }

    #[test]
    fn test_limit_exactly_respected_and_sorted() {
        let fixture = Fixture::new();
        let site = site_with(&[4, 2, 9, 7, 1, 3, 8]);

        for limit in 1..=7 {
            let model = build_view_model(&site, &fixture.helper(), limit).unwrap();
            assert_eq!(model.posts.len(), limit);
            let dates: Vec<&str> = model.posts.iter().map(|p| p.date_xml.as_str()).collect();
            let mut sorted = dates.clone();
            sorted.sort_by(|a, b| b.cmp(a));
            assert_eq!(dates, sorted);
        }
    }

    #[test]
    fn test_zero_limit_uses_default() {
        let fixture = Fixture::new();
        let site = site_with(&[1, 2, 3, 4, 5, 6, 7]);

        let model = build_view_model(&site, &fixture.helper(), 0).unwrap();
        assert_eq!(model.posts.len(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_post_view_fields() {
        let fixture = Fixture::new();
        let mut entry = post("Hello World", 2, &["Rust Tips"], &[]);
        entry.thumbnail = Some("/img/hello.png".to_string());
        let mut site = Site::new();
        site.add_post(entry);

        let model = build_view_model(&site, &fixture.helper(), 5).unwrap();

        assert_eq!(
            model.posts,
            vec![PostView {
                url: "/hello-world/".to_string(),
                title: "Hello World".to_string(),
                date: "2024-01-02".to_string(),
                date_xml: "2024-01-02T12:00:00Z".to_string(),
                thumbnail: Some("/img/hello.png".to_string()),
                categories: vec![CategoryLink {
                    name: "Rust Tips".to_string(),
                    url: "/categories/rust-tips/".to_string(),
                }],
            }]
        );
    }

    #[test]
    fn test_external_link_wins_over_path() {
        let fixture = Fixture::new();
        let mut entry = post("Elsewhere", 2, &[], &[]);
        entry.link = Some("https://example.com/elsewhere".to_string());
        let mut blank = post("Blank link", 1, &[], &[]);
        blank.link = Some(String::new());
        let mut site = Site::new();
        site.add_post(entry);
        site.add_post(blank);

        let model = build_view_model(&site, &fixture.helper(), 5).unwrap();
        assert_eq!(model.posts[0].url, "https://example.com/elsewhere");
        assert_eq!(model.posts[1].url, "/blank-link/");
        assert_eq!(model.posts[1].thumbnail, None);
    }

    #[test]
    fn test_counters_use_plural_labels_and_archive_urls() {
        let fixture = Fixture::new();
        let mut site = Site::new();
        site.add_post(post("only", 1, &["Rust"], &[]));

        let model = build_view_model(&site, &fixture.helper(), 5).unwrap();

        assert_eq!(
            model.counter,
            Counters {
                post: Counter {
                    count: 1,
                    title: "Post".to_string(),
                    url: "/archives".to_string(),
                },
                category: Counter {
                    count: 1,
                    title: "Category".to_string(),
                    url: "/categories".to_string(),
                },
                tag: Counter {
                    count: 0,
                    title: "Tags".to_string(),
                    url: "/tags".to_string(),
                },
            }
        );
    }
}
