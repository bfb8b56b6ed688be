use anyhow::Context;
use licguard_types::Summary;
use std::path::Path;

/// Write the pretty JSON summary to `path`, creating parent directories.
pub fn write_json(path: &Path, summary: &Summary) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let json = licguard_render::render_json(summary).context("serialize summary")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
