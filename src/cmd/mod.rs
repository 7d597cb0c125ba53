mod build;
mod clean;

pub use build::build;
pub use clean::clean;
