use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownModule;

/// Entity kinds managed by the library application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Module {
    Author,
    Book,
    Customer,
    Rental,
}

impl Module {
    pub const ALL: [Module; 4] = [Module::Author, Module::Book, Module::Customer, Module::Rental];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Author => "Author",
            Module::Book => "Book",
            Module::Customer => "Customer",
            Module::Rental => "Rental",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = UnknownModule;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Module::ALL
            .into_iter()
            .find(|module| module.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownModule(raw.to_string()))
    }
}

/// Surfaces that receive backend markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRegion {
    TableHead,
    TableBody,
}

impl DisplayRegion {
    pub const ALL: [DisplayRegion; 2] = [DisplayRegion::TableHead, DisplayRegion::TableBody];

    pub fn element_id(self) -> &'static str {
        match self {
            DisplayRegion::TableHead => "table-head",
            DisplayRegion::TableBody => "output",
        }
    }
}

impl fmt::Display for DisplayRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_module_names_case_insensitively() {
        assert_eq!("Book".parse::<Module>().expect("book"), Module::Book);
        assert_eq!(" rental ".parse::<Module>().expect("rental"), Module::Rental);
        assert_eq!("CUSTOMER".parse::<Module>().expect("customer"), Module::Customer);
    }

    #[test]
    fn rejects_names_outside_the_fixed_set() {
        let err = "Publisher".parse::<Module>().expect_err("unknown module");
        assert_eq!(err.0, "Publisher");
    }

    #[test]
    fn serializes_module_as_display_name() {
        let raw = serde_json::to_string(&Module::Customer).expect("serialize");
        assert_eq!(raw, "\"Customer\"");
    }
}
