use crate::cache::{CachedRenderer, Props};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::helper::HelperContext;
use crate::i18n::Locale;
use crate::loader::PostLoader;
use crate::templates::HandlebarsRenderer;
use crate::widget::NAMESPACE;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const OUTPUT_FILE: &str = "widgets/recent_posts.html";

/// Renders the widget into `<out_dir>/widgets/recent_posts.html`. Returns the
/// written path, or `None` when the site has no posts.
pub async fn build(config: &Config) -> Result<Option<PathBuf>> {
    let site = PostLoader::new().load_site(&config.site).await?;
    let locale = Locale::load(
        config.widget.locale_dir.as_deref(),
        config.site.language.as_str(),
    )?;
    let context = HelperContext::new(config, locale);
    let helper = context.helper()?;

    let mut templates = HandlebarsRenderer::new()?;
    if let Some(dir) = config.widget.template_dir.as_deref() {
        templates.add_overrides(dir)?;
    }

    let mut renderer = CachedRenderer::new(NAMESPACE, templates);
    let props = Props {
        site: &site,
        helper: &helper,
        limit: config.widget.limit,
    };

    let rendered = renderer.render(&props)?;
    log::debug!(
        "fragment cache: {} entries, {} hits, {} misses",
        renderer.cache().len(),
        renderer.cache().hits(),
        renderer.cache().misses()
    );

    let html = match rendered {
        Some(html) => html,
        None => {
            log::info!("no posts, skipping recent posts widget");
            return Ok(None);
        }
    };

    let path = Path::new(config.build.out_dir.as_str()).join(OUTPUT_FILE);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(Error::Io)?;
    }
    fs::write(&path, html).await.map_err(Error::Io)?;

    log::info!("Build complete: {:?}", path);

    Ok(Some(path))
}
