use crate::color::ColorHelper;
use crate::{RenderError, RenderableSummary};
use handlebars::Handlebars;
use licguard_types::Summary;

const TEMPLATE_NAME: &str = "summary";

/// One line per module: `<path>: <licenses> (<explanation>)`, the
/// explanation green when allowed and red otherwise.
pub const DEFAULT_TEMPLATE: &str = r##"{{#each modules}}
{{module.path}}: {{#each module.licenses}}{{#unless @first}}, {{/unless}}{{name}}{{/each}} ({{#if allowed}}{{color "#00ff00" explanation}}{{else}}{{color "#ff0000" explanation}}{{/if}})
{{/each}}
"##;

/// Handlebars renderer over [`RenderableSummary`].
pub struct TextRenderer {
    registry: Handlebars<'static>,
}

impl TextRenderer {
    /// Compile `template`, or [`DEFAULT_TEMPLATE`] when `None`. Colour is
    /// off until [`TextRenderer::with_color`] turns it on.
    pub fn new(template: Option<&str>) -> Result<Self, RenderError> {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_helper("color", Box::new(ColorHelper { enabled: false }));
        registry.register_template_string(TEMPLATE_NAME, template.unwrap_or(DEFAULT_TEMPLATE))?;
        Ok(Self { registry })
    }

    /// Whether the `color` helper emits ANSI escapes.
    pub fn with_color(mut self, enabled: bool) -> Self {
        self.registry.register_helper("color", Box::new(ColorHelper { enabled }));
        self
    }

    pub fn render(&self, summary: &Summary) -> Result<String, RenderError> {
        let ctx = RenderableSummary::from(summary);
        Ok(self.registry.render(TEMPLATE_NAME, &ctx)?)
    }
}
