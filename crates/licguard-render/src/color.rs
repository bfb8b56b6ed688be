use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};

/// `{{color "#rrggbb" value}}`: writes `value` in a 24-bit foreground colour,
/// or unchanged when colour output is off.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ColorHelper {
    pub(crate) enabled: bool,
}

impl HelperDef for ColorHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let spec = h
            .param(0)
            .and_then(|p| p.value().as_str())
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("color", 0))?;
        let text = h
            .param(1)
            .map(|p| p.render())
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("color", 1))?;
        let (r, g, b) = parse_hex(spec).ok_or_else(|| {
            RenderError::from(RenderErrorReason::Other(format!(
                "color: expected #rrggbb, got {spec:?}"
            )))
        })?;

        if self.enabled {
            out.write(&format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"))?;
        } else {
            out.write(&text)?;
        }
        Ok(())
    }
}

fn parse_hex(spec: &str) -> Option<(u8, u8, u8)> {
    let hex = spec.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
