// ABOUTME: Title templating module for task display names
// ABOUTME: Renders descriptor fields into human-readable titles

pub mod engine;
pub mod error;

pub use engine::{TitleContext, TitleEngine};
pub use error::{Result, TitleError};
