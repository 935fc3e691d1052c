//! Bridge between the dispatcher's command calls and the in-process command host.

use std::sync::Arc;

use async_trait::async_trait;
use client_core::CommandBackend;
use command_host::CommandHost;
use shared::{error::CommandError, protocol::CommandParams};

pub struct HostBridge {
    host: Arc<CommandHost>,
}

impl HostBridge {
    pub fn new(host: Arc<CommandHost>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl CommandBackend for HostBridge {
    async fn invoke(&self, command: &str, params: CommandParams) -> Result<String, CommandError> {
        tracing::debug!(command, "invoking host command");
        self.host
            .execute(command, params)
            .await
            .map_err(CommandError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{domain::Module, error::ErrorCode, protocol::TableHeadArgs};

    fn bridge() -> HostBridge {
        let host = CommandHost::new("http://127.0.0.1:9", None).expect("host");
        HostBridge::new(Arc::new(host))
    }

    #[tokio::test]
    async fn forwards_header_command_to_host() {
        let markup = bridge()
            .invoke(
                "create_table_head",
                TableHeadArgs {
                    module: Module::Author,
                }
                .into_params(),
            )
            .await
            .expect("head");
        assert_eq!(markup, "<tr><th>Name</th><th>Born</th></tr>");
    }

    #[tokio::test]
    async fn host_errors_become_command_errors() {
        let err = bridge()
            .invoke("handle_actual_endpoint", CommandParams::new())
            .await
            .expect_err("unknown command");
        assert_eq!(err.code, ErrorCode::UnknownCommand);
    }
}
