use crate::error::{Error, Result};
use crate::widget::ViewModel;
use glob::glob;
use handlebars::Handlebars;
use std::fs;
use std::path::Path;

pub const WIDGET_TEMPLATE: &str = "recent_posts";

const BUILTIN: [(&str, &str); 3] = [
    (WIDGET_TEMPLATE, include_str!("../templates/recent_posts.hbs")),
    ("article_media", include_str!("../templates/article_media.hbs")),
    ("counter_item", include_str!("../templates/counter_item.hbs")),
];

/// Turns a view-model into markup.
pub trait Render {
    fn render(&self, model: &ViewModel) -> Result<String>;
}

pub struct HandlebarsRenderer<'a> {
    registry: Handlebars<'a>,
}

impl<'a> HandlebarsRenderer<'a> {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();

        for (name, template) in BUILTIN {
            registry
                .register_template_string(name, template)
                .map_err(|e| Error::Template(Box::new(e)))?;
        }

        Ok(Self { registry })
    }

    /// Replaces builtin templates with `*.hbs` files found in `dir`. The file
    /// stem names the template, so `article_media.hbs` overrides the entry
    /// preview.
    pub fn add_overrides<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let pattern = dir.as_ref().join("*.hbs");
        let templates = glob(pattern.to_string_lossy().as_ref()).map_err(Error::Pattern)?;

        for template in templates {
            let template = template.map_err(Error::Glob)?;
            let name = match template.file_stem().and_then(|s| s.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            let content = fs::read_to_string(&template).map_err(Error::Io)?;

            log::info!("overriding template {}", name);
            self.registry
                .register_template_string(name.as_str(), content)
                .map_err(|e| Error::Template(Box::new(e)))?;
        }

        Ok(())
    }
}

impl Render for HandlebarsRenderer<'_> {
    fn render(&self, model: &ViewModel) -> Result<String> {
        self.registry
            .render(WIDGET_TEMPLATE, model)
            .map_err(Error::Render)
    }
}
