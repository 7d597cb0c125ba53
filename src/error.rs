use std::{fmt::Display, io};

use glob::{GlobError, PatternError};

#[derive(Debug)]
pub enum Error {
    Date(String),
    Glob(GlobError),
    Io(io::Error),
    Json(serde_json::Error),
    Markdown(String),
    MissingFrontMatter,
    Pattern(PatternError),
    Render(handlebars::RenderError),
    Template(Box<handlebars::TemplateError>),
    Toml(toml::de::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Date(value) => write!(f, "invalid date: {}", value),
            Error::Glob(e) => write!(f, "glob: {}", e),
            Error::Io(e) => write!(f, "io: {}", e),
            Error::Json(e) => write!(f, "json: {}", e),
            Error::Markdown(msg) => write!(f, "markdown: {}", msg),
            Error::MissingFrontMatter => write!(f, "missing front matter"),
            Error::Pattern(e) => write!(f, "pattern: {}", e),
            Error::Render(e) => write!(f, "render: {}", e),
            Error::Template(e) => write!(f, "template: {}", e),
            Error::Toml(e) => write!(f, "toml: {}", e),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
