// ABOUTME: Error types for title rendering
// ABOUTME: Surfaces unknown placeholders and render failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TitleError {
    #[error("Title render error: {0}")]
    RenderError(#[from] handlebars::RenderError),
}

pub type Result<T> = std::result::Result<T, TitleError>;
