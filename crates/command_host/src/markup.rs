//! HTML fragments for the results table.

use chrono::NaiveDate;
use shared::{
    domain::Module,
    protocol::{AuthorRecord, BookRecord, CustomerRecord, RentalRecord},
};

pub fn header_columns(module: Module) -> &'static [&'static str] {
    match module {
        Module::Author => &["Name", "Born"],
        Module::Book => &["Name", "Author", "Editor", "Release"],
        Module::Customer => &["Name", "Document", "Born"],
        Module::Rental => &["Customer", "Book", "Borrowed at", "Due Date", "Returned at"],
    }
}

pub fn table_head(module: Module) -> String {
    let mut out = String::from("<tr>");
    for column in header_columns(module) {
        out.push_str("<th>");
        out.push_str(column);
        out.push_str("</th>");
    }
    out.push_str("</tr>");
    out
}

pub trait TableRow {
    fn cells(&self) -> Vec<String>;
}

impl TableRow for AuthorRecord {
    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), date_cell(Some(self.born))]
    }
}

impl TableRow for BookRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.author_name.clone(),
            self.editor.clone(),
            date_cell(Some(self.release)),
        ]
    }
}

impl TableRow for CustomerRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.document.clone(),
            date_cell(Some(self.born)),
        ]
    }
}

impl TableRow for RentalRecord {
    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_name.clone(),
            self.book_name.clone(),
            date_cell(Some(self.borrowed_at)),
            date_cell(Some(self.due_date)),
            date_cell(self.returned_at),
        ]
    }
}

pub fn table_rows<T: TableRow>(records: &[T]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str("<tr>");
        for cell in record.cells() {
            out.push_str("<td>");
            out.push_str(&escape_html(&cell));
            out.push_str("</td>");
        }
        out.push_str("</tr>");
    }
    out
}

fn date_cell(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
