//! Console command parsing.
//!
//! Each stdin line is one command; the first word picks the command and the
//! rest of the line is its argument, whitespace inside it kept.

use super::editor::FormField;
use super::handler::Event;
use super::pipeline::SortColumn;
use crate::domain::{CatalogError, Result};
use chrono::NaiveDate;
use std::time::Instant;

/// Parses one command line into an event.
///
/// Blank lines yield `Ok(None)`. `now` stamps debounced search input and
/// `today` dates exports.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] for an unknown command or a
/// malformed argument.
///
/// # Example
///
/// ```rust
/// use catalog_console::app::command::parse_command;
/// use catalog_console::Event;
/// use chrono::NaiveDate;
/// use std::time::Instant;
///
/// let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let event = parse_command("search  blue shirt ", Instant::now(), today)?;
/// assert_eq!(event, Some(Event::Search("blue shirt".to_string())));
/// # Ok::<(), catalog_console::CatalogError>(())
/// ```
pub fn parse_command(line: &str, now: Instant, today: NaiveDate) -> Result<Option<Event>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    let event = match command.to_ascii_lowercase().as_str() {
        "reload" | "load" => Event::Load,
        "search" => Event::Search(rest.to_string()),
        "type" => Event::SearchInput {
            term: rest.to_string(),
            at: now,
        },
        "sort" => Event::SortBy(
            SortColumn::parse(rest)
                .ok_or_else(|| invalid(format!("sort expects 'title' or 'price', got {rest:?}")))?,
        ),
        "size" => Event::SetPageSize(
            rest.parse()
                .map_err(|_| invalid(format!("size expects a number, got {rest:?}")))?,
        ),
        "page" => Event::GoToPage(
            rest.parse()
                .map_err(|_| invalid(format!("page expects a number, got {rest:?}")))?,
        ),
        "next" => Event::NextPage,
        "prev" | "previous" => Event::PrevPage,
        "down" | "j" => Event::ScrollDown,
        "up" | "k" => Event::ScrollUp,
        "view" | "show" => Event::ViewProduct(required_id(command, rest)?),
        "edit" => Event::EditProduct(optional_id(command, rest)?),
        "new" | "create" => Event::OpenCreate,
        "set" => {
            let (name, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(name, value)| (name, value.trim()));
            let field = FormField::parse(name).ok_or_else(|| {
                invalid(format!(
                    "unknown field {name:?}; use title, price, description, category or images"
                ))
            })?;
            Event::SetField {
                field,
                value: value.to_string(),
            }
        }
        "save" | "submit" => Event::SubmitForm,
        "delete" | "rm" => Event::RequestDelete(optional_id(command, rest)?),
        "yes" | "y" => Event::ConfirmDelete,
        "no" | "n" | "close" | "cancel" | "back" => Event::Cancel,
        "export" => Event::Export { date: today },
        "quit" | "q" | "exit" => Event::Quit,
        other => return Err(invalid(format!("unknown command {other:?}"))),
    };

    Ok(Some(event))
}

fn invalid(message: String) -> CatalogError {
    CatalogError::Validation(message)
}

fn required_id(command: &str, rest: &str) -> Result<i64> {
    rest.parse()
        .map_err(|_| invalid(format!("{command} expects a product id, got {rest:?}")))
}

fn optional_id(command: &str, rest: &str) -> Result<Option<i64>> {
    if rest.is_empty() {
        Ok(None)
    } else {
        required_id(command, rest).map(Some)
    }
}
