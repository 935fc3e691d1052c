//! Static module bindings: which form and which backend commands belong to each module.

use shared::{
    domain::Module,
    protocol::{CommandParams, TableHeadArgs, CREATE_TABLE_HEAD},
};

use crate::DispatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleBinding {
    pub module: Module,
    pub form_id: &'static str,
    pub body_command: &'static str,
}

pub const MODULE_BINDINGS: [ModuleBinding; 4] = [
    ModuleBinding {
        module: Module::Author,
        form_id: "author-form",
        body_command: Module::Author.body_command(),
    },
    ModuleBinding {
        module: Module::Book,
        form_id: "book-form",
        body_command: Module::Book.body_command(),
    },
    ModuleBinding {
        module: Module::Customer,
        form_id: "customer-form",
        body_command: Module::Customer.body_command(),
    },
    ModuleBinding {
        module: Module::Rental,
        form_id: "rental-form",
        body_command: Module::Rental.body_command(),
    },
];

pub fn binding_for(module: Module) -> &'static ModuleBinding {
    match module {
        Module::Author => &MODULE_BINDINGS[0],
        Module::Book => &MODULE_BINDINGS[1],
        Module::Customer => &MODULE_BINDINGS[2],
        Module::Rental => &MODULE_BINDINGS[3],
    }
}

/// Resolves a raw module name as delivered by the UI surface.
pub fn resolve(name: &str) -> Result<&'static ModuleBinding, DispatchError> {
    let module = name.parse::<Module>()?;
    Ok(binding_for(module))
}

/// Header building is generic: one command, parameterised by module.
pub fn header_command(module: Module) -> (&'static str, CommandParams) {
    (CREATE_TABLE_HEAD, TableHeadArgs { module }.into_params())
}

pub fn form_ids() -> impl Iterator<Item = &'static str> {
    MODULE_BINDINGS.iter().map(|binding| binding.form_id)
}
