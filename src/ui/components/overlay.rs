//! Detail view, create/edit form and delete prompt.
//!
//! Overlays replace the table body with a bordered box. Lines that do not fit
//! the available height are dropped from the bottom.

use crate::ui::helpers::{fit, position_cursor};
use crate::ui::projection::DetailView;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ConfirmView, FormView, Overlay};
use std::io::{self, Write};

const OVERLAY_MARGIN: usize = 3;
const LABEL_WIDTH: usize = 13;
const EMPTY_FIELD: &str = "_";

enum Tone {
    Heading,
    Normal,
    Dim,
    Price,
    Warning,
}

fn field(label: &str, value: &str, tone: Tone) -> (String, Tone) {
    (format!("{}{value}", fit(label, LABEL_WIDTH)), tone)
}

fn detail_lines(detail: &DetailView) -> Vec<(String, Tone)> {
    let mut lines = vec![
        (format!("Product #{}", detail.id), Tone::Heading),
        (String::new(), Tone::Normal),
        field("Title", &detail.title, Tone::Normal),
        field("Price", &detail.price, Tone::Price),
        field(
            "Category",
            &format!("{} (id {})", detail.category, detail.category_id),
            Tone::Normal,
        ),
        field("Description", &detail.description, Tone::Normal),
        field("Image", &detail.main_image, Tone::Dim),
    ];
    if detail.thumbnails.len() > 1 {
        lines.push((format!("Thumbnails ({})", detail.thumbnails.len()), Tone::Dim));
        lines.extend(
            detail
                .thumbnails
                .iter()
                .map(|url| (format!("  {url}"), Tone::Dim)),
        );
    }
    lines
}

fn form_lines(form: &FormView) -> Vec<(String, Tone)> {
    let mut lines = vec![(form.heading.clone(), Tone::Heading), (String::new(), Tone::Normal)];
    lines.extend(form.fields.iter().map(|(label, value)| {
        let value = if value.is_empty() { EMPTY_FIELD } else { value.as_str() };
        field(label, value, Tone::Normal)
    }));
    lines
}

fn confirm_lines(confirm: &ConfirmView) -> Vec<(String, Tone)> {
    vec![
        ("Delete product".to_string(), Tone::Heading),
        (String::new(), Tone::Normal),
        (
            format!("Delete #{} \"{}\"? This cannot be undone.", confirm.id, confirm.title),
            Tone::Warning,
        ),
        ("Type 'yes' to delete or 'no' to cancel.".to_string(), Tone::Dim),
    ]
}

/// Renders `overlay` in the rows `first..=last`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_overlay(
    out: &mut impl Write,
    first: usize,
    last: usize,
    overlay: &Overlay,
    theme: &Theme,
    cols: usize,
) -> io::Result<()> {
    if last < first + 2 {
        return Ok(());
    }

    let lines = match overlay {
        Overlay::Detail(detail) => detail_lines(detail),
        Overlay::Form(form) => form_lines(form),
        Overlay::ConfirmDelete(confirm) => confirm_lines(confirm),
    };

    let inner_width = cols.saturating_sub(OVERLAY_MARGIN * 2 + 4);
    let margin = " ".repeat(OVERLAY_MARGIN);
    let border = Theme::fg(&theme.colors.border);
    let capacity = last - first - 1;
    let shown = lines.len().min(capacity);

    position_cursor(out, first, 1)?;
    write!(out, "{margin}{border}┌{}┐{}", "─".repeat(inner_width + 2), Theme::reset())?;

    for (offset, (text, tone)) in lines.iter().take(shown).enumerate() {
        let style = match tone {
            Tone::Heading => format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg)),
            Tone::Normal => Theme::fg(&theme.colors.text_normal),
            Tone::Dim => Theme::fg(&theme.colors.text_dim),
            Tone::Price => Theme::fg(&theme.colors.price_fg),
            Tone::Warning => Theme::fg(&theme.colors.warning_fg),
        };
        position_cursor(out, first + 1 + offset, 1)?;
        write!(
            out,
            "{margin}{border}│ {style}{}{} {border}│{}",
            fit(text, inner_width),
            Theme::reset(),
            Theme::reset()
        )?;
    }

    position_cursor(out, first + 1 + shown, 1)?;
    write!(out, "{margin}{border}└{}┘{}", "─".repeat(inner_width + 2), Theme::reset())?;

    Ok(())
}
