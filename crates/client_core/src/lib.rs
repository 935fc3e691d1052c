use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shared::{
    domain::{DisplayRegion, Module},
    error::{CommandError, UnknownModule},
    protocol::CommandParams,
};
use thiserror::Error;
use tokio::{sync::broadcast, task::JoinHandle};
use tracing::{debug, error, info, warn};

pub mod bindings;
pub mod events;
mod regions;

pub use bindings::{binding_for, ModuleBinding, MODULE_BINDINGS};
pub use events::{Diagnostic, UiEvent};
pub use regions::RenderToken;

const DIAGNOSTIC_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    UnknownModule(#[from] UnknownModule),
}

/// Bridge to the process that executes backend commands by name.
#[async_trait]
pub trait CommandBackend: Send + Sync {
    async fn invoke(&self, command: &str, params: CommandParams) -> Result<String, CommandError>;
}

/// Display surface driven by the dispatcher. Implementations own their
/// interior mutability; every call replaces prior state.
pub trait RenderSurface: Send + Sync {
    fn set_region(&self, region: DisplayRegion, markup: &str);
    fn hide_form(&self, form_id: &str);
    fn show_form(&self, form_id: &str);
    fn set_module_label(&self, module: Module);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Applied,
    Superseded,
    Failed,
}

/// Handles for the two loads started by a search. Dropping it detaches them.
pub struct SearchHandle {
    pub header: JoinHandle<RenderOutcome>,
    pub body: JoinHandle<RenderOutcome>,
}

impl SearchHandle {
    pub async fn join(self) -> (RenderOutcome, RenderOutcome) {
        let header = self.header.await.unwrap_or(RenderOutcome::Failed);
        let body = self.body.await.unwrap_or(RenderOutcome::Failed);
        (header, body)
    }
}

pub struct Dispatcher {
    backend: Arc<dyn CommandBackend>,
    surface: Arc<dyn RenderSurface>,
    regions: regions::RegionTokens,
    active: Mutex<Option<Module>>,
    diagnostics: broadcast::Sender<Diagnostic>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn CommandBackend>, surface: Arc<dyn RenderSurface>) -> Arc<Self> {
        let (diagnostics, _) = broadcast::channel(DIAGNOSTIC_CHANNEL_CAPACITY);
        Arc::new(Self {
            backend,
            surface,
            regions: regions::RegionTokens::default(),
            active: Mutex::new(None),
            diagnostics,
        })
    }

    pub fn active_module(&self) -> Option<Module> {
        self.active.lock().map(|guard| *guard).unwrap_or(None)
    }

    pub fn subscribe_diagnostics(&self) -> broadcast::Receiver<Diagnostic> {
        self.diagnostics.subscribe()
    }

    pub fn latest_token(&self, region: DisplayRegion) -> RenderToken {
        self.regions.latest(region)
    }

    /// Single entry point for surface events. Module names are resolved before
    /// anything else happens, so an unknown module never reaches the backend.
    pub async fn handle_event(
        self: &Arc<Self>,
        event: UiEvent,
    ) -> Result<Option<SearchHandle>, DispatchError> {
        match event {
            UiEvent::ModuleSelected { module, form } => {
                let binding = bindings::resolve(&module)?;
                if binding.form_id != form {
                    warn!(
                        module = %binding.module,
                        requested_form = %form,
                        bound_form = binding.form_id,
                        "module selection named a different form; showing the bound one"
                    );
                }
                self.activate_module(binding.module).await;
                Ok(None)
            }
            UiEvent::SearchSubmitted { module } => {
                let binding = bindings::resolve(&module)?;
                Ok(Some(self.run_search(binding.module)))
            }
        }
    }

    pub async fn activate_module(&self, module: Module) {
        for form_id in bindings::form_ids() {
            self.surface.hide_form(form_id);
        }
        for region in DisplayRegion::ALL {
            self.claim_region(region);
        }

        self.surface.show_form(binding_for(module).form_id);
        self.surface.set_module_label(module);

        if let Ok(mut active) = self.active.lock() {
            *active = Some(module);
        }
        info!(module = %module, "module activated");
    }

    pub async fn load_table_header(&self, module: Module) -> RenderOutcome {
        let token = self.claim_region(DisplayRegion::TableHead);
        self.render_header(module, token).await
    }

    pub async fn load_table_body(&self, module: Module) -> RenderOutcome {
        let token = self.claim_region(DisplayRegion::TableBody);
        self.render_body(module, token).await
    }

    /// Body load keyed by a raw module name; fails before any backend call
    /// when the name has no binding.
    pub async fn load_table_body_named(&self, module: &str) -> Result<RenderOutcome, DispatchError> {
        let binding = bindings::resolve(module)?;
        Ok(self.load_table_body(binding.module).await)
    }

    /// Starts header and body loads without waiting on either. Both regions
    /// are claimed before the tasks are spawned, so anything dispatched after
    /// this call returns supersedes them.
    pub fn run_search(self: &Arc<Self>, module: Module) -> SearchHandle {
        let header_token = self.claim_region(DisplayRegion::TableHead);
        let body_token = self.claim_region(DisplayRegion::TableBody);
        debug!(
            module = %module,
            header_token = header_token.value(),
            body_token = body_token.value(),
            "search dispatched"
        );

        let dispatcher = Arc::clone(self);
        let header =
            tokio::spawn(async move { dispatcher.render_header(module, header_token).await });

        let dispatcher = Arc::clone(self);
        let body = tokio::spawn(async move { dispatcher.render_body(module, body_token).await });

        SearchHandle { header, body }
    }

    fn claim_region(&self, region: DisplayRegion) -> RenderToken {
        self.regions.issue_and_clear(region, self.surface.as_ref())
    }

    async fn render_header(&self, module: Module, token: RenderToken) -> RenderOutcome {
        let (command, params) = bindings::header_command(module);
        self.render_region(module, DisplayRegion::TableHead, token, command, params)
            .await
    }

    async fn render_body(&self, module: Module, token: RenderToken) -> RenderOutcome {
        let command = binding_for(module).body_command;
        self.render_region(
            module,
            DisplayRegion::TableBody,
            token,
            command,
            CommandParams::new(),
        )
        .await
    }

    async fn render_region(
        &self,
        module: Module,
        region: DisplayRegion,
        token: RenderToken,
        command: &'static str,
        params: CommandParams,
    ) -> RenderOutcome {
        match self.backend.invoke(command, params).await {
            Ok(markup) => {
                let applied =
                    self.regions
                        .apply_if_latest(region, token, self.surface.as_ref(), &markup);
                if applied {
                    debug!(module = %module, %region, command, token = token.value(), "region rendered");
                    RenderOutcome::Applied
                } else {
                    debug!(
                        module = %module,
                        %region,
                        command,
                        token = token.value(),
                        "discarded superseded result"
                    );
                    RenderOutcome::Superseded
                }
            }
            Err(err) => {
                error!(module = %module, %region, command, error = %err, "backend command failed");
                let diagnostic = Diagnostic {
                    module,
                    region,
                    command,
                    error: err,
                };
                if self.diagnostics.send(diagnostic).is_err() {
                    debug!(module = %module, %region, command, "no diagnostics subscriber");
                }
                RenderOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
