use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Module;

pub const CREATE_TABLE_HEAD: &str = "create_table_head";
pub const SEARCH_AUTHOR_BODY: &str = "create_table_body_search_author";
pub const SEARCH_BOOK_BODY: &str = "create_table_body_search_book";
pub const SEARCH_CUSTOMER_BODY: &str = "create_table_body_search_customer";
pub const SEARCH_RENTAL_BODY: &str = "create_table_body_search_rental";

impl Module {
    /// Backend command producing the search-results rows for this module.
    pub const fn body_command(self) -> &'static str {
        match self {
            Module::Author => SEARCH_AUTHOR_BODY,
            Module::Book => SEARCH_BOOK_BODY,
            Module::Customer => SEARCH_CUSTOMER_BODY,
            Module::Rental => SEARCH_RENTAL_BODY,
        }
    }

    pub fn from_body_command(command: &str) -> Option<Module> {
        Module::ALL
            .into_iter()
            .find(|module| module.body_command() == command)
    }
}

/// Named arguments passed alongside a bridge command.
pub type CommandParams = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableHeadArgs {
    pub module: Module,
}

impl TableHeadArgs {
    pub fn into_params(self) -> CommandParams {
        let mut params = CommandParams::new();
        params.insert(
            "module".to_string(),
            serde_json::Value::String(self.module.as_str().to_string()),
        );
        params
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodySearchArgs {
    #[serde(default)]
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: Uuid,
    pub name: String,
    pub born: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: Uuid,
    pub name: String,
    pub author_name: String,
    pub editor: String,
    pub release: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub born: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalRecord {
    pub id: Uuid,
    #[serde(alias = "costumer_name")]
    pub customer_name: String,
    pub book_name: String,
    pub borrowed_at: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<NaiveDate>,
}
