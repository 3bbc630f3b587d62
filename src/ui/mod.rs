/// UI building blocks
///
/// Small presentational widgets shared by the application views:
/// - Labeled form field with inline validation text (field.rs)
/// - One product tile for the catalog grid (product_card.rs)

pub mod field;
pub mod product_card;
