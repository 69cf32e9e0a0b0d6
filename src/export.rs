//! CSV export of the current page.
//!
//! Output layout:
//!
//! ```text
//! \u{feff}ID,Title,Price,Category,Description,Images
//! 4,"Handmade Fresh Table",687,"Others","Andy shoes ""are"" designed","https://a; https://b"
//! ```
//!
//! Id and price are written bare; text columns are quoted with embedded
//! quotes doubled. Images are joined with `"; "`. Lines end with `\n`.
//!
//! Records go through [`csv::Writer`] with [`QuoteStyle::NonNumeric`], so a
//! text value that parses as a number (a title of `1984`) is written bare.
//! Readers get the same value back either way.

use crate::domain::{CatalogError, Product, Result};
use crate::format::NOT_AVAILABLE;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const BOM: &str = "\u{feff}";
/// Written before the writer takes over; `NonNumeric` would quote it.
const HEADER: &str = "ID,Title,Price,Category,Description,Images\n";

/// A rendered CSV file waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub contents: String,
    /// Number of product rows.
    pub count: usize,
}

impl CsvExport {
    /// Writes the file into `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`](crate::CatalogError::Io) if the directory
    /// or file cannot be written.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.contents)?;
        tracing::info!(path = %path.display(), count = self.count, "csv export written");
        Ok(path)
    }
}

/// `products_page_<page>_<YYYY-MM-DD>.csv`
#[must_use]
pub fn export_filename(page: usize, date: NaiveDate) -> String {
    format!("products_page_{page}_{}.csv", date.format("%Y-%m-%d"))
}

/// Renders `products` (the current page) as CSV. Returns `None` for an empty page.
///
/// # Errors
///
/// Returns [`CatalogError::Csv`] if a record cannot be encoded.
pub fn export_page(products: &[Product], page: usize, date: NaiveDate) -> Result<Option<CsvExport>> {
    if products.is_empty() {
        return Ok(None);
    }

    let mut buffer = Vec::with_capacity(BOM.len() + HEADER.len() + products.len() * 128);
    buffer.extend_from_slice(BOM.as_bytes());
    buffer.extend_from_slice(HEADER.as_bytes());

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(buffer);

    for product in products {
        wtr.write_record([
            product.id.to_string().as_str(),
            product.title.as_str(),
            product.price.to_string().as_str(),
            product.category_name().unwrap_or(NOT_AVAILABLE),
            product.description.as_str(),
            product.images.join("; ").as_str(),
        ])?;
    }

    let buffer = wtr
        .into_inner()
        .map_err(|e| CatalogError::Io(io::Error::new(e.error().kind(), e.to_string())))?;
    let contents = String::from_utf8(buffer).map_err(|e| CatalogError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

    Ok(Some(CsvExport {
        filename: export_filename(page, date),
        contents,
        count: products.len(),
    }))
}
