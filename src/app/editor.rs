//! Record editor: selection tracking and form conversion.
//!
//! The editor remembers which product the detail, edit and delete views are
//! about, and converts between [`Product`] records and the text-only
//! [`EditForm`] the console edits field by field.

use crate::app::pipeline::CollectionPipeline;
use crate::domain::{CatalogError, Product, ProductDraft, Result};

/// Category id pre-filled when a product has none.
pub const DEFAULT_CATEGORY_ID: &str = "1";

/// Editable fields of an [`EditForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Description,
    CategoryId,
    Images,
}

impl FormField {
    /// Parses a field name as typed in the console.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "price" => Some(Self::Price),
            "description" | "desc" => Some(Self::Description),
            "category" | "category_id" | "categoryid" => Some(Self::CategoryId),
            "images" | "image" => Some(Self::Images),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Price => "Price",
            Self::Description => "Description",
            Self::CategoryId => "Category ID",
            Self::Images => "Images",
        }
    }
}

/// Text fields of the create and edit forms.
///
/// `id` is `None` for the create form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditForm {
    pub id: Option<i64>,
    pub title: String,
    pub price: String,
    pub description: String,
    pub category_id: String,
    /// Comma-separated image URLs.
    pub images: String,
}

impl EditForm {
    /// An empty create form with the default category.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            ..Self::default()
        }
    }

    /// Overwrites one field with raw user input.
    pub fn set(&mut self, field: FormField, value: &str) {
        let slot = match field {
            FormField::Title => &mut self.title,
            FormField::Price => &mut self.price,
            FormField::Description => &mut self.description,
            FormField::CategoryId => &mut self.category_id,
            FormField::Images => &mut self.images,
        };
        value.clone_into(slot);
    }

    /// Fields in display order, paired with their current text.
    #[must_use]
    pub fn fields(&self) -> [(FormField, &str); 5] {
        [
            (FormField::Title, &self.title),
            (FormField::Price, &self.price),
            (FormField::Description, &self.description),
            (FormField::CategoryId, &self.category_id),
            (FormField::Images, &self.images),
        ]
    }
}

/// Fills an edit form from a product.
///
/// Images are joined with `", "`; a missing category becomes
/// [`DEFAULT_CATEGORY_ID`].
#[must_use]
pub fn to_edit_form(product: &Product) -> EditForm {
    EditForm {
        id: Some(product.id),
        title: product.title.clone(),
        price: product.price.to_string(),
        description: product.description.clone(),
        category_id: product
            .category_id()
            .map_or_else(|| DEFAULT_CATEGORY_ID.to_string(), |id| id.to_string()),
        images: product.images.join(", "),
    }
}

/// Validates a form and builds the create/update payload.
///
/// # Errors
///
/// Returns [`CatalogError::Validation`] naming the field when the title is
/// blank, the price is not a finite number, or the category id is not an
/// integer.
///
/// # Examples
///
/// ```
/// use catalog_console::app::editor::{from_edit_form, EditForm};
///
/// let form = EditForm {
///     title: "Desk".into(),
///     price: "120.5".into(),
///     images: "https://a/1.png, , https://a/2.png".into(),
///     ..EditForm::blank()
/// };
/// let draft = from_edit_form(&form).unwrap();
/// assert_eq!(draft.category_id, 1);
/// assert_eq!(draft.images, vec!["https://a/1.png", "https://a/2.png"]);
///
/// assert!(from_edit_form(&EditForm::blank()).is_err());
/// ```
pub fn from_edit_form(form: &EditForm) -> Result<ProductDraft> {
    if form.title.trim().is_empty() {
        return Err(CatalogError::Validation("title is required".to_string()));
    }

    let price = form
        .price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| CatalogError::Validation(format!("price must be a number, got {:?}", form.price)))?;

    let category_id = form.category_id.trim().parse::<i64>().map_err(|_| {
        CatalogError::Validation(format!(
            "category id must be an integer, got {:?}",
            form.category_id
        ))
    })?;

    let images = form
        .images
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(String::from)
        .collect();

    Ok(ProductDraft {
        title: form.title.clone(),
        price,
        description: form.description.clone(),
        category_id,
        images,
    })
}

/// Tracks the product the detail, edit and delete views refer to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordEditor {
    selected: Option<i64>,
}

impl RecordEditor {
    #[must_use]
    pub const fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// Selects `id` if it is in the filtered view.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] and keeps the previous selection
    /// when the id is not visible.
    pub fn select<'a>(&mut self, pipeline: &'a CollectionPipeline, id: i64) -> Result<&'a Product> {
        let product = pipeline.find_in_view(id).ok_or(CatalogError::NotFound(id))?;
        self.selected = Some(id);
        Ok(product)
    }

    /// Selects `id` and returns its edit form.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the id is not visible.
    pub fn begin_edit(&mut self, pipeline: &CollectionPipeline, id: i64) -> Result<EditForm> {
        self.select(pipeline, id).map(to_edit_form)
    }

    /// Drops the selection if its product left the dataset. Returns whether it did.
    pub fn forget_if_removed(&mut self, pipeline: &CollectionPipeline) -> bool {
        match self.selected {
            Some(id) if !pipeline.contains(id) => {
                tracing::debug!(id = id, "selected product removed, clearing selection");
                self.selected = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn lamp() -> Product {
        Product {
            id: 7,
            title: "Desk Lamp".to_string(),
            price: 24.99,
            description: "Warm light".to_string(),
            category: Some(Category {
                id: 3,
                name: "Furniture".to_string(),
            }),
            images: vec![
                "https://img/lamp-1.png".to_string(),
                "https://img/lamp-2.png".to_string(),
            ],
        }
    }

    fn pipeline_with(products: Vec<Product>) -> CollectionPipeline {
        let mut pipeline = CollectionPipeline::default();
        pipeline.load(products);
        pipeline
    }

    #[test]
    fn form_round_trip_keeps_fields() {
        let product = lamp();
        let draft = from_edit_form(&to_edit_form(&product)).unwrap();

        assert_eq!(draft.title, product.title);
        assert_eq!(draft.price, product.price);
        assert_eq!(draft.description, product.description);
        assert_eq!(draft.category_id, 3);
        assert_eq!(draft.images, product.images);
    }

    #[test]
    fn edit_form_defaults_missing_category_and_joins_images() {
        let product = Product {
            category: None,
            ..lamp()
        };
        let form = to_edit_form(&product);
        assert_eq!(form.category_id, "1");
        assert_eq!(form.images, "https://img/lamp-1.png, https://img/lamp-2.png");
        assert_eq!(form.id, Some(7));
    }

    #[test]
    fn blank_title_is_rejected() {
        let form = EditForm {
            title: "   ".to_string(),
            ..to_edit_form(&lamp())
        };
        let err = from_edit_form(&form).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(msg) if msg.contains("title")));
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        for price in ["", "abc", "inf", "NaN"] {
            let form = EditForm {
                price: price.to_string(),
                ..to_edit_form(&lamp())
            };
            let err = from_edit_form(&form).unwrap_err();
            assert!(matches!(err, CatalogError::Validation(msg) if msg.contains("price")));
        }
    }

    #[test]
    fn non_integer_category_is_rejected() {
        let form = EditForm {
            category_id: "2.5".to_string(),
            ..to_edit_form(&lamp())
        };
        let err = from_edit_form(&form).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(msg) if msg.contains("category")));
    }

    #[test]
    fn set_overwrites_single_field() {
        let mut form = EditForm::blank();
        form.set(FormField::Title, "Chair");
        form.set(FormField::Price, "12");
        assert_eq!(form.title, "Chair");
        assert_eq!(form.price, "12");
        assert_eq!(form.category_id, "1");
    }

    #[test]
    fn select_absent_id_keeps_previous_selection() {
        let pipeline = pipeline_with(vec![lamp()]);
        let mut editor = RecordEditor::default();

        editor.select(&pipeline, 7).unwrap();
        let err = editor.select(&pipeline, 99).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(99)));
        assert_eq!(editor.selected(), Some(7));
    }

    #[test]
    fn select_only_sees_filtered_view() {
        let mut pipeline = pipeline_with(vec![lamp()]);
        pipeline.search("sofa");
        let mut editor = RecordEditor::default();
        assert!(editor.select(&pipeline, 7).is_err());
    }

    #[test]
    fn forget_if_removed_clears_stale_selection() {
        let mut pipeline = pipeline_with(vec![lamp()]);
        let mut editor = RecordEditor::default();
        editor.begin_edit(&pipeline, 7).unwrap();

        assert!(!editor.forget_if_removed(&pipeline));
        pipeline.remove(7);
        assert!(editor.forget_if_removed(&pipeline));
        assert_eq!(editor.selected(), None);
    }

    #[test]
    fn form_field_names_parse() {
        assert_eq!(FormField::parse("Category"), Some(FormField::CategoryId));
        assert_eq!(FormField::parse("images"), Some(FormField::Images));
        assert_eq!(FormField::parse("colour"), None);
    }
}
