use licguard_types::{BuildInfo, Decision, EvaluatedModule, Module, Summary};
use serde::Serialize;

/// Template context: the summary with per-module derived fields spelled out.
#[derive(Clone, Debug, Serialize)]
pub struct RenderableSummary<'a> {
    pub binaries: &'a [BuildInfo],
    pub modules: Vec<RenderableModule<'a>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RenderableModule<'a> {
    pub module: &'a Module,
    pub decision: Decision,
    pub not_permitted: &'a [String],
    pub binaries: &'a [String],
    pub allowed: bool,
    pub explanation: String,
}

impl<'a> From<&'a EvaluatedModule> for RenderableModule<'a> {
    fn from(m: &'a EvaluatedModule) -> Self {
        Self {
            module: &m.module,
            decision: m.decision,
            not_permitted: &m.not_permitted,
            binaries: &m.binaries,
            allowed: m.allowed(),
            explanation: m.explain(),
        }
    }
}

impl<'a> From<&'a Summary> for RenderableSummary<'a> {
    fn from(s: &'a Summary) -> Self {
        Self {
            binaries: &s.binaries,
            modules: s.modules.iter().map(RenderableModule::from).collect(),
        }
    }
}
