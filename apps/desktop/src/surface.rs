//! Terminal rendering surface standing in for the webview.

use std::{collections::BTreeSet, io::Write, sync::Mutex};

use client_core::RenderSurface;
use shared::domain::{DisplayRegion, Module};

struct TerminalState<W> {
    out: W,
    visible_forms: BTreeSet<String>,
}

pub struct TerminalSurface<W: Write + Send> {
    state: Mutex<TerminalState<W>>,
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                out,
                visible_forms: BTreeSet::new(),
            }),
        }
    }

    #[cfg(test)]
    pub fn visible_forms(&self) -> Vec<String> {
        self.state
            .lock()
            .map(|state| state.visible_forms.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> Option<W> {
        self.state.into_inner().ok().map(|state| state.out)
    }

    fn print(&self, line: &str) {
        if let Ok(mut state) = self.state.lock() {
            let _ = writeln!(state.out, "{line}");
            let _ = state.out.flush();
        }
    }
}

impl<W: Write + Send> RenderSurface for TerminalSurface<W> {
    fn set_region(&self, region: DisplayRegion, markup: &str) {
        if markup.is_empty() {
            self.print(&format!("[{region}] (cleared)"));
        } else {
            self.print(&format!("[{region}] {markup}"));
        }
    }

    fn hide_form(&self, form_id: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.visible_forms.remove(form_id);
        }
    }

    fn show_form(&self, form_id: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.visible_forms.insert(form_id.to_string());
        }
        self.print(&format!("form: {form_id}"));
    }

    fn set_module_label(&self, module: Module) {
        self.print(&format!("== {module} =="));
    }
}
