/// State management module
///
/// This module handles all application state, including:
/// - The product data model (product.rs)
/// - The catalog store: mutations and derived views (store.rs)
/// - Durable storage backends for the persisted snapshot (storage.rs)

pub mod product;
pub mod storage;
pub mod store;
