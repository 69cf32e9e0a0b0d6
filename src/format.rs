//! Pure formatting helpers shared by the view projection, stats and CSV export.
//!
//! Nothing here touches state; every function maps a value to its display form.

/// Placeholder shown when a product has no usable image.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/55?text=No+Image";

/// Placeholder shown for a missing category name or id.
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder shown for an empty description.
pub const NO_DESCRIPTION: &str = "No description";

/// Abbreviates large numbers for the stats panel.
///
/// Values of at least one thousand, million or billion are divided down, printed
/// with one decimal, and suffixed `K`, `M` or `B`; a trailing `.0` is dropped.
/// Smaller values are rounded to an integer. Halves round away from zero.
///
/// # Examples
///
/// ```
/// use catalog_console::format::format_number;
///
/// assert_eq!(format_number(999.6), "1000");
/// assert_eq!(format_number(1_000.0), "1K");
/// assert_eq!(format_number(1_260.0), "1.3K");
/// assert_eq!(format_number(1_250.0), "1.3K");
/// assert_eq!(format_number(2_500_000.0), "2.5M");
/// assert_eq!(format_number(3_000_000_000.0), "3B");
/// ```
#[must_use]
pub fn format_number(num: f64) -> String {
    const UNITS: [(f64, &str); 3] = [(1e9, "B"), (1e6, "M"), (1e3, "K")];

    for (threshold, suffix) in UNITS {
        if num >= threshold {
            // `{:.1}` alone would round exact halves to even.
            let scaled = format!("{:.1}", (num / threshold * 10.0).round() / 10.0);
            let trimmed = scaled.strip_suffix(".0").unwrap_or(&scaled);
            return format!("{trimmed}{suffix}");
        }
    }

    format!("{:.0}", num.round())
}

/// Formats a price as `$` followed by the raw number, without rounding.
///
/// ```
/// use catalog_console::format::format_price;
///
/// assert_eq!(format_price(10.0), "$10");
/// assert_eq!(format_price(10.5), "$10.5");
/// ```
#[must_use]
pub fn format_price(price: f64) -> String {
    format!("${price}")
}

/// Escapes the five HTML-significant characters.
///
/// ```
/// use catalog_console::format::escape_html;
///
/// assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Strips stray brackets and quotes from an image URL.
///
/// The catalog API occasionally returns image entries that are themselves
/// JSON-encoded arrays (`["https://..."]`). Returns `None` when nothing is left.
///
/// ```
/// use catalog_console::format::clean_image_url;
///
/// assert_eq!(clean_image_url(r#"["https://i.imgur.com/a.jpeg""#).as_deref(),
///     Some("https://i.imgur.com/a.jpeg"));
/// assert_eq!(clean_image_url(r#"[""]"#), None);
/// ```
#[must_use]
pub fn clean_image_url(url: &str) -> Option<String> {
    let cleaned: String = url.chars().filter(|c| !matches!(c, '[' | ']' | '"')).collect();
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Returns the cleaned first image URL, or the placeholder.
#[must_use]
pub fn primary_image(images: &[String]) -> String {
    images
        .first()
        .and_then(|url| clean_image_url(url))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_numbers_round_to_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(42.4), "42");
        assert_eq!(format_number(42.5001), "43");
    }

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(format_number(0.5), "1");
        assert_eq!(format_number(2.5), "3");
        assert_eq!(format_number(1_250.0), "1.3K");
        assert_eq!(format_number(3_250_000_000.0), "3.3B");
    }

    #[test]
    fn abbreviation_keeps_single_decimal() {
        assert_eq!(format_number(12_340.0), "12.3K");
        assert_eq!(format_number(1_000_000.0), "1M");
        assert_eq!(format_number(1_080_000_000.0), "1.1B");
    }

    #[test]
    fn primary_image_falls_back_to_placeholder() {
        assert_eq!(primary_image(&[]), PLACEHOLDER_IMAGE);
        assert_eq!(primary_image(&["  ".to_string()]), PLACEHOLDER_IMAGE);
        assert_eq!(
            primary_image(&[" https://a/1.png ".to_string(), "https://a/2.png".to_string()]),
            "https://a/1.png"
        );
    }

    #[test]
    fn escape_html_leaves_plain_text_alone() {
        assert_eq!(escape_html("Classic Red Pullover"), "Classic Red Pullover");
    }
}
