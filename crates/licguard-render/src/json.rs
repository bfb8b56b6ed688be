use crate::RenderError;
use licguard_types::Summary;

/// Pretty-printed JSON summary, newline terminated.
pub fn render_json(summary: &Summary) -> Result<String, RenderError> {
    let mut out = serde_json::to_string_pretty(summary)?;
    out.push('\n');
    Ok(out)
}
