use tera::{Context, Tera};

use crate::error::ExportError;
use crate::view::PageView;

const PAGE_TEMPLATE_NAME: &str = "page.html";
const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

/// Parsed page template, built once and reused for every request.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    pub fn new() -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)
            .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    /// Render the calculator page.
    ///
    /// The view's fields become the template context variables.
    pub fn render(&self, view: &PageView) -> Result<String, ExportError> {
        // Convert the view to a Tera context via serde_json
        let value = serde_json::to_value(view)?;
        let context = Context::from_value(value)
            .map_err(|e| ExportError::TemplateRender(e.to_string()))?;

        let rendered = self.tera.render(PAGE_TEMPLATE_NAME, &context)?;
        tracing::debug!(bytes = rendered.len(), "page rendered");
        Ok(rendered)
    }
}
