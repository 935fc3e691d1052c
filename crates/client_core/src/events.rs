//! UI events consumed by the dispatcher and the diagnostics it publishes.

use shared::{
    domain::{DisplayRegion, Module},
    error::CommandError,
};

/// Events raised by the rendering surface. Module names arrive as the surface
/// stores them (button data attributes), so they are parsed on intake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ModuleSelected { module: String, form: String },
    SearchSubmitted { module: String },
}

impl UiEvent {
    pub fn module_selected(module: Module) -> Self {
        let binding = crate::bindings::binding_for(module);
        UiEvent::ModuleSelected {
            module: module.as_str().to_string(),
            form: binding.form_id.to_string(),
        }
    }

    pub fn search_submitted(module: Module) -> Self {
        UiEvent::SearchSubmitted {
            module: module.as_str().to_string(),
        }
    }
}

/// Backend failure recorded for the operator instead of being thrown at the caller.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub module: Module,
    pub region: DisplayRegion,
    pub command: &'static str,
    pub error: CommandError,
}

impl Diagnostic {
    pub fn summary(&self) -> String {
        format!(
            "{} failed for {} ({}): {}",
            self.command, self.module, self.region, self.error
        )
    }
}
