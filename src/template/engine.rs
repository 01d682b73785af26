// ABOUTME: Title rendering over strict-mode Handlebars
// ABOUTME: Exposes exactly four descriptor fields to title templates

use handlebars::Handlebars;
use serde::Serialize;

use super::error::Result;
use crate::task::TaskDescriptor;

/// Context exposed to title templates. These four fields are the entire
/// recognized vocabulary; anything else fails the render.
#[derive(Debug, Clone, Serialize)]
pub struct TitleContext {
    pub fn_key: String,
    pub fn_name: String,
    pub fn_run_id: String,
    pub fn_seq_id: String,
}

impl TitleContext {
    pub fn for_descriptor(descriptor: &TaskDescriptor) -> Self {
        Self {
            fn_key: descriptor.key().to_string(),
            fn_name: descriptor.name().to_string(),
            fn_run_id: descriptor.run_id().to_string(),
            fn_seq_id: descriptor.seq_id().to_string(),
        }
    }
}

#[derive(Clone)]
pub struct TitleEngine {
    handlebars: Handlebars<'static>,
}

impl TitleEngine {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        // Unknown placeholders must fail the task, not render empty
        handlebars.set_strict_mode(true);

        // Titles are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        Self { handlebars }
    }

    /// Resolve a descriptor's title.
    ///
    /// Titles without placeholder syntax are returned untouched, and
    /// re-rendering an already-resolved title is a no-op.
    pub fn render_title(&self, descriptor: &TaskDescriptor) -> Result<String> {
        if !descriptor.title.contains("{{") {
            return Ok(descriptor.title.clone());
        }

        let context = TitleContext::for_descriptor(descriptor);
        Ok(self
            .handlebars
            .render_template(&descriptor.title, &context)?)
    }
}

impl Default for TitleEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskCallable, TaskParams};
    use serde_json::Value;

    fn descriptor_with_title(title: &str) -> TaskDescriptor {
        let callable = TaskCallable::new("fetch", |_: &TaskParams| Ok(Value::Null)).unwrap();
        TaskDescriptor::new(
            callable,
            TaskParams::new(),
            "nightly",
            "3",
            Some(title.to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_renders_all_recognized_fields() {
        let engine = TitleEngine::new();
        let descriptor = descriptor_with_title(
            "{{fn_name}} #{{fn_seq_id}} of {{fn_run_id}} ({{fn_key}})",
        );

        let title = engine.render_title(&descriptor).unwrap();
        assert_eq!(title, "fetch #3 of nightly (fetch.3.nightly)");
    }

    #[test]
    fn test_plain_title_untouched() {
        let engine = TitleEngine::new();
        let descriptor = descriptor_with_title("Fetch the data");

        assert_eq!(engine.render_title(&descriptor).unwrap(), "Fetch the data");
    }

    #[test]
    fn test_unrecognized_placeholder_fails() {
        let engine = TitleEngine::new();
        let descriptor = descriptor_with_title("step {{fn_step_id}}");

        assert!(engine.render_title(&descriptor).is_err());
    }

    #[test]
    fn test_render_is_idempotent() {
        let engine = TitleEngine::new();
        let mut descriptor = descriptor_with_title("run {{fn_run_id}}");

        let first = engine.render_title(&descriptor).unwrap();
        descriptor.title = first.clone();

        let second = engine.render_title(&descriptor).unwrap();
        assert_eq!(first, second);
        assert_eq!(second, "run nightly");
    }
}
