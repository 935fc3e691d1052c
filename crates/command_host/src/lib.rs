//! Backend side of the command bridge: answers table commands by name.

use std::time::Duration;

use shared::{
    domain::Module,
    error::{CommandError, ErrorCode},
    protocol::{
        AuthorRecord, BodySearchArgs, BookRecord, CommandParams, CustomerRecord, RentalRecord,
        TableHeadArgs, CREATE_TABLE_HEAD,
    },
};
use thiserror::Error;
use tracing::{info, warn};

pub mod api;
pub mod markup;

pub use api::LibraryApi;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("invalid parameters for {command}: {reason}")]
    InvalidParams {
        command: &'static str,
        reason: String,
    },
    #[error("library api request failed: {0}")]
    Transport(String),
    #[error("library api returned an unreadable payload: {0}")]
    Decode(String),
    #[error("{0}")]
    Config(String),
}

impl From<HostError> for CommandError {
    fn from(value: HostError) -> Self {
        let code = match &value {
            HostError::UnknownCommand(_) => ErrorCode::UnknownCommand,
            HostError::InvalidParams { .. } => ErrorCode::InvalidParams,
            HostError::Transport(_) => ErrorCode::Transport,
            HostError::Decode(_) => ErrorCode::Decode,
            HostError::Config(_) => ErrorCode::Internal,
        };
        CommandError::new(code, value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    TableHead,
    SearchBody(Module),
}

impl HostCommand {
    pub fn parse(name: &str) -> Result<Self, HostError> {
        if name == CREATE_TABLE_HEAD {
            return Ok(HostCommand::TableHead);
        }
        Module::from_body_command(name)
            .map(HostCommand::SearchBody)
            .ok_or_else(|| HostError::UnknownCommand(name.to_string()))
    }
}

pub struct CommandHost {
    api: LibraryApi,
}

impl CommandHost {
    pub fn new(api_base_url: &str, timeout: Option<Duration>) -> Result<Self, HostError> {
        Ok(Self {
            api: LibraryApi::new(api_base_url, timeout)?,
        })
    }

    pub fn api(&self) -> &LibraryApi {
        &self.api
    }

    pub async fn execute(&self, command: &str, params: CommandParams) -> Result<String, HostError> {
        match HostCommand::parse(command)? {
            HostCommand::TableHead => {
                let args: TableHeadArgs = parse_args(CREATE_TABLE_HEAD, params)?;
                Ok(markup::table_head(args.module))
            }
            HostCommand::SearchBody(module) => {
                let command = module.body_command();
                let args: BodySearchArgs = parse_args(command, params)?;
                let rows = self.search_rows(module, &args.term).await;
                match &rows {
                    Ok(_) => info!(module = %module, term = %args.term, "search rendered"),
                    Err(err) => warn!(module = %module, error = %err, "search failed"),
                }
                rows
            }
        }
    }

    async fn search_rows(&self, module: Module, term: &str) -> Result<String, HostError> {
        Ok(match module {
            Module::Author => markup::table_rows(&self.api.search::<AuthorRecord>(module, term).await?),
            Module::Book => markup::table_rows(&self.api.search::<BookRecord>(module, term).await?),
            Module::Customer => {
                markup::table_rows(&self.api.search::<CustomerRecord>(module, term).await?)
            }
            Module::Rental => markup::table_rows(&self.api.search::<RentalRecord>(module, term).await?),
        })
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(
    command: &'static str,
    params: CommandParams,
) -> Result<T, HostError> {
    serde_json::from_value(serde_json::Value::Object(params)).map_err(|err| {
        HostError::InvalidParams {
            command,
            reason: err.to_string(),
        }
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
