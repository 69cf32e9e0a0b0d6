//! Footer component renderer: command hints and the notification toast.

use crate::app::notification::{Notification, NotificationKind};
use crate::ui::helpers::{center_padding, position_cursor, truncate, visual_len};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Renders the centered, dimmed command hints at `row`. Returns `row + 1`.
///
/// Hints wider than the terminal are truncated.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_footer(out: &mut impl Write, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> io::Result<usize> {
    let help_text = truncate(&footer.keybindings, cols);
    let text_len = visual_len(&help_text);
    let padding = center_padding(text_len, cols);

    position_cursor(out, row, 1)?;
    write!(out, "{}", Theme::fg(&theme.colors.text_dim))?;
    write!(out, "{}", " ".repeat(padding))?;
    write!(out, "{help_text}")?;
    write!(out, "{}", " ".repeat(cols.saturating_sub(padding + text_len)))?;
    write!(out, "{}", Theme::reset())?;
    Ok(row + 1)
}

const fn icon(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::Success => "✓",
        NotificationKind::Error => "✗",
        NotificationKind::Warning => "!",
    }
}

/// Renders the toast line at `row`: `✓ Title: message`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_notification(
    out: &mut impl Write,
    row: usize,
    notification: &Notification,
    theme: &Theme,
    cols: usize,
) -> io::Result<usize> {
    let text = if notification.message.is_empty() {
        format!(" {} {}", icon(notification.kind), notification.title)
    } else {
        format!(
            " {} {}: {}",
            icon(notification.kind),
            notification.title,
            notification.message
        )
    };

    position_cursor(out, row, 1)?;
    write!(
        out,
        "{}{}{}{}",
        Theme::bold(),
        Theme::fg(theme.colors.notification(notification.kind)),
        truncate(&text, cols),
        Theme::reset()
    )?;
    Ok(row + 1)
}
