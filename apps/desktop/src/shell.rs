//! Line-oriented input for the terminal shell.

use client_core::UiEvent;
use shared::domain::Module;
use thiserror::Error;

pub const HELP: &str = "commands: <module> | select <module> | search [module] | help | quit\nmodules: Author, Book, Customer, Rental";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Event(UiEvent),
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error("no module selected; pick one before searching")]
    NoActiveModule,
}

pub fn parse_line(line: &str, active: Option<Module>) -> Result<ShellCommand, ShellError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ShellCommand::Empty);
    };
    let rest = words.collect::<Vec<_>>().join(" ");

    let command = match head.to_ascii_lowercase().as_str() {
        "quit" | "exit" => ShellCommand::Quit,
        "help" | "?" => ShellCommand::Help,
        "search" if rest.is_empty() => {
            let module = active.ok_or(ShellError::NoActiveModule)?;
            ShellCommand::Event(UiEvent::search_submitted(module))
        }
        "search" => ShellCommand::Event(UiEvent::SearchSubmitted { module: rest }),
        "select" => ShellCommand::Event(selection(&rest)),
        _ => ShellCommand::Event(selection(line.trim())),
    };
    Ok(command)
}

fn selection(raw: &str) -> UiEvent {
    match raw.parse::<Module>() {
        Ok(module) => UiEvent::module_selected(module),
        // Unknown names still go through the dispatcher, which rejects them.
        Err(_) => UiEvent::ModuleSelected {
            module: raw.to_string(),
            form: format!("{}-form", raw.to_ascii_lowercase()),
        },
    }
}
