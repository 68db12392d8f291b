//! HTML email templates, embedded at compile time.

use anyhow::{Context, Result};
use handlebars::{Handlebars, RenderError};
use rust_embed::RustEmbed;
use serde::Serialize;

#[derive(RustEmbed)]
#[folder = "templates"]
struct TemplateAssets;

/// Named template registry. Templates are registered once at startup under
/// their file name with the `.hbs` extension stripped.
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        for path in TemplateAssets::iter() {
            let file = TemplateAssets::get(&path)
                .with_context(|| format!("embedded template {} should be readable", path))?;
            let source = std::str::from_utf8(file.data.as_ref())
                .with_context(|| format!("template {} is not valid UTF-8", path))?;
            let name = path.trim_end_matches(".hbs");
            registry
                .register_template_string(name, source)
                .with_context(|| format!("template {} failed to parse", path))?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        self.registry.render(name, data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn registration_email_renders_the_confirmation_url() {
        let templates = Templates::new().unwrap();
        let url = "http://localhost:8080/registration/complete?token=abc-123";

        let html = templates
            .render("registration-email", &json!({ "url": url }))
            .unwrap();

        assert!(html.contains(url));
        assert!(html.contains("<html>"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let templates = Templates::new().unwrap();
        assert!(templates.render("no-such-template", &json!({})).is_err());
    }
}
