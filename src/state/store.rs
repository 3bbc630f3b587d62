/// The catalog store: authoritative product state, mutators, derived views
///
/// One store per application session, owned by the UI shell and handed
/// into event handlers. Every mutation runs to completion synchronously;
/// the durable slice (products + liked set) is written through to storage
/// after each mutation that changes it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::{FilterType, Product, ProductFormData, ProductUpdate};
use super::storage::{Storage, STORAGE_KEY};

/// The slice of state that survives across sessions.
///
/// Exactly these two fields are persisted; filter, search query and the
/// loading/error flags are transient and reset each session.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    liked_products: Vec<String>,
    products: Vec<Product>,
}

pub struct ProductStore {
    /// Insertion-ordered product collection; new items are prepended
    products: Vec<Product>,
    /// Identifiers the user has marked as favorite
    liked_products: Vec<String>,
    filter: FilterType,
    search_query: String,
    loading: bool,
    error: Option<String>,
    storage: Box<dyn Storage>,
}

impl ProductStore {
    /// Create a store over the given storage backend, rehydrating the
    /// persisted snapshot if one exists.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let mut store = ProductStore {
            products: Vec::new(),
            liked_products: Vec::new(),
            filter: FilterType::default(),
            search_query: String::new(),
            loading: false,
            error: None,
            storage,
        };
        store.rehydrate();
        store
    }

    /// Load the persisted snapshot, if any. A missing record starts the
    /// catalog empty; an unreadable one is logged and ignored.
    fn rehydrate(&mut self) {
        let snapshot = match self.storage.get(STORAGE_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return,
            Err(e) => {
                eprintln!("⚠️  Could not read persisted catalog: {e}");
                return;
            }
        };

        match serde_json::from_str::<PersistedState>(&snapshot) {
            Ok(persisted) => {
                self.liked_products = persisted.liked_products;
                self.products = persisted.products;
                for product in &mut self.products {
                    product.is_liked = Some(self.liked_products.contains(&product.id));
                }
            }
            Err(e) => eprintln!("⚠️  Ignoring corrupt catalog snapshot: {e}"),
        }
    }

    /// Write the durable slice through to storage.
    ///
    /// Best effort: a failed write is logged and the in-memory state
    /// stays authoritative for the rest of the session.
    fn persist(&mut self) {
        let snapshot = PersistedState {
            liked_products: self.liked_products.clone(),
            products: self.products.clone(),
        };

        let json = match serde_json::to_string(&snapshot) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("⚠️  Could not serialize catalog snapshot: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.set(STORAGE_KEY, &json) {
            eprintln!("⚠️  Could not persist catalog: {e}");
        }
    }

    /// Replace the whole product collection.
    ///
    /// Each incoming item's liked flag is recomputed from the current
    /// liked set; whatever the caller put there is discarded.
    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products
            .into_iter()
            .map(|mut product| {
                product.is_liked = Some(self.liked_products.contains(&product.id));
                product
            })
            .collect();
        self.persist();
    }

    /// Build a product from form data and prepend it to the collection,
    /// so the newest item is always first in iteration order.
    pub fn add_product(&mut self, form: ProductFormData) {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            title: form.title,
            description: form.description,
            price: form.price,
            discount_percentage: 0.0,
            rating: 0.0,
            stock: 0,
            brand: form.brand,
            category: form.category,
            images: vec![form.thumbnail.clone()],
            thumbnail: form.thumbnail,
            is_liked: None,
            create_at: Some(Utc::now()),
            update_at: None,
        };

        self.products.insert(0, product);
        self.persist();
    }

    /// Merge a partial update into the matching product and stamp its
    /// update time. Silent no-op when the id is absent.
    pub fn update_product(&mut self, id: &str, update: ProductUpdate) {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return;
        };

        if let Some(title) = update.title {
            product.title = title;
        }
        if let Some(description) = update.description {
            product.description = description;
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(discount_percentage) = update.discount_percentage {
            product.discount_percentage = discount_percentage;
        }
        if let Some(rating) = update.rating {
            product.rating = rating;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        if let Some(brand) = update.brand {
            product.brand = brand;
        }
        if let Some(category) = update.category {
            product.category = category;
        }
        if let Some(thumbnail) = update.thumbnail {
            product.thumbnail = thumbnail;
        }
        if let Some(images) = update.images {
            product.images = images;
        }
        product.update_at = Some(Utc::now());

        self.persist();
    }

    /// Remove a product and its liked-set entry in one transition.
    /// No-op when the id is absent.
    pub fn delete_product(&mut self, id: &str) {
        let before = self.products.len() + self.liked_products.len();

        self.products.retain(|product| product.id != id);
        self.liked_products.retain(|liked| liked != id);

        if self.products.len() + self.liked_products.len() != before {
            self.persist();
        }
    }

    /// Flip liked-set membership and the product's flag in the same
    /// transition. Applying twice restores the prior state.
    pub fn toggle_like(&mut self, id: &str) {
        let was_liked = self.liked_products.iter().any(|liked| liked == id);

        if was_liked {
            self.liked_products.retain(|liked| liked != id);
        } else {
            self.liked_products.push(id.to_string());
        }

        if let Some(product) = self.products.iter_mut().find(|p| p.id == id) {
            product.is_liked = Some(!was_liked);
        }

        self.persist();
    }

    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter = filter;
    }

    pub fn set_search_query(&mut self, query: String) {
        self.search_query = query;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Set or clear the error string. The store never sets this itself;
    /// it belongs to callers signalling failures from surrounding flows.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    /// Derived view: the products visible under the current filter and
    /// search query, in the collection's order. Returns a fresh sequence;
    /// stored state is never touched.
    pub fn filtered_products(&self) -> Vec<Product> {
        let mut filtered = self.products.clone();

        if self.filter == FilterType::Favorites {
            filtered.retain(|product| product.is_liked == Some(true));
        }

        if !self.search_query.is_empty() {
            let query = self.search_query.to_lowercase();
            filtered.retain(|product| {
                product.title.to_lowercase().contains(&query)
                    || product.description.to_lowercase().contains(&query)
                    || product.category.to_lowercase().contains(&query)
                    || product.brand.to_lowercase().contains(&query)
            });
        }

        filtered
    }

    /// Look up a product by id. Never panics; absent ids are `None`.
    pub fn get_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn liked_products(&self) -> &[String] {
        &self.liked_products
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::MemoryStorage;

    fn empty_store() -> ProductStore {
        ProductStore::new(Box::new(MemoryStorage::new()))
    }

    fn sample_product(id: &str, title: &str, brand: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{title} description"),
            price: 10.0,
            discount_percentage: 0.0,
            rating: 4.0,
            stock: 5,
            brand: brand.to_string(),
            category: category.to_string(),
            thumbnail: format!("{id}.png"),
            images: vec![format!("{id}.png")],
            is_liked: None,
            create_at: None,
            update_at: None,
        }
    }

    fn form(title: &str) -> ProductFormData {
        ProductFormData {
            title: title.to_string(),
            description: "some description".to_string(),
            price: 19.99,
            brand: "Acme".to_string(),
            category: "clothing".to_string(),
            thumbnail: "thumb.png".to_string(),
        }
    }

    #[test]
    fn test_add_product_prepends_with_distinct_ids() {
        let mut store = empty_store();

        store.add_product(form("First"));
        store.add_product(form("Second"));
        store.add_product(form("Third"));

        let products = store.products();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].title, "Third");
        assert_eq!(products[1].title, "Second");
        assert_eq!(products[2].title, "First");

        assert_ne!(products[0].id, products[1].id);
        assert_ne!(products[1].id, products[2].id);
        assert_ne!(products[0].id, products[2].id);
    }

    #[test]
    fn test_add_product_fills_defaults_from_form() {
        let mut store = empty_store();

        store.add_product(form("Red Shirt"));

        let product = &store.products()[0];
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.discount_percentage, 0.0);
        assert_eq!(product.stock, 0);
        assert_eq!(product.images, vec!["thumb.png".to_string()]);
        assert_eq!(product.thumbnail, "thumb.png");
        assert!(product.create_at.is_some());
        assert!(product.update_at.is_none());
    }

    #[test]
    fn test_set_products_round_trips_in_order() {
        let mut store = empty_store();
        let list = vec![
            sample_product("1", "Red Shirt", "Acme", "clothing"),
            sample_product("2", "Blue Hat", "Acme", "clothing"),
        ];

        store.set_products(list.clone());

        let visible = store.filtered_products();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, "1");
        assert_eq!(visible[1].id, "2");
        // isLiked is recomputed, nothing is liked yet
        assert!(visible.iter().all(|p| p.is_liked == Some(false)));
    }

    #[test]
    fn test_set_products_recomputes_liked_flags() {
        let mut store = empty_store();
        store.set_products(vec![sample_product("1", "Red Shirt", "Acme", "clothing")]);
        store.toggle_like("1");

        // Replace the collection; the caller's flags are discarded
        let mut replacement = sample_product("1", "Red Shirt v2", "Acme", "clothing");
        replacement.is_liked = Some(false);
        store.set_products(vec![
            replacement,
            sample_product("2", "Blue Hat", "Acme", "clothing"),
        ]);

        assert_eq!(store.get_product("1").unwrap().is_liked, Some(true));
        assert_eq!(store.get_product("2").unwrap().is_liked, Some(false));
    }

    #[test]
    fn test_toggle_like_is_its_own_inverse() {
        let mut store = empty_store();
        store.set_products(vec![sample_product("1", "Red Shirt", "Acme", "clothing")]);

        store.toggle_like("1");
        assert_eq!(store.liked_products(), ["1".to_string()]);
        assert_eq!(store.get_product("1").unwrap().is_liked, Some(true));

        store.toggle_like("1");
        assert!(store.liked_products().is_empty());
        assert_eq!(store.get_product("1").unwrap().is_liked, Some(false));
    }

    #[test]
    fn test_toggle_like_on_absent_product_only_touches_liked_set() {
        let mut store = empty_store();
        store.set_products(vec![sample_product("1", "Red Shirt", "Acme", "clothing")]);

        store.toggle_like("ghost");

        assert_eq!(store.liked_products(), ["ghost".to_string()]);
        assert_eq!(store.get_product("1").unwrap().is_liked, Some(false));

        store.toggle_like("ghost");
        assert!(store.liked_products().is_empty());
    }

    #[test]
    fn test_update_product_merges_partial_fields() {
        let mut store = empty_store();
        store.set_products(vec![sample_product("1", "Red Shirt", "Acme", "clothing")]);

        store.update_product(
            "1",
            ProductUpdate {
                title: Some("Crimson Shirt".to_string()),
                price: Some(24.5),
                ..ProductUpdate::default()
            },
        );

        let product = store.get_product("1").unwrap();
        assert_eq!(product.title, "Crimson Shirt");
        assert_eq!(product.price, 24.5);
        // Untouched fields survive the merge
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.category, "clothing");
        assert!(product.update_at.is_some());
    }

    #[test]
    fn test_update_product_absent_id_is_a_no_op() {
        let mut store = empty_store();
        store.set_products(vec![sample_product("1", "Red Shirt", "Acme", "clothing")]);
        let before = store.products().to_vec();

        store.update_product(
            "ghost",
            ProductUpdate {
                title: Some("Never applied".to_string()),
                ..ProductUpdate::default()
            },
        );

        assert_eq!(store.products(), before.as_slice());
    }

    #[test]
    fn test_delete_product_removes_from_liked_set() {
        let mut store = empty_store();
        store.set_products(vec![
            sample_product("1", "Red Shirt", "Acme", "clothing"),
            sample_product("2", "Blue Hat", "Acme", "clothing"),
        ]);
        store.toggle_like("1");

        store.delete_product("1");

        assert!(store.get_product("1").is_none());
        assert!(store.liked_products().is_empty());
        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn test_delete_absent_product_is_a_no_op() {
        let mut store = empty_store();
        store.set_products(vec![sample_product("1", "Red Shirt", "Acme", "clothing")]);

        store.delete_product("ghost");

        assert_eq!(store.products().len(), 1);
    }

    #[test]
    fn test_filtered_products_favorites_only_preserves_order() {
        let mut store = empty_store();
        store.set_products(vec![
            sample_product("1", "Red Shirt", "Acme", "clothing"),
            sample_product("2", "Blue Hat", "Acme", "clothing"),
            sample_product("3", "Green Scarf", "Acme", "clothing"),
        ]);
        store.toggle_like("3");
        store.toggle_like("1");

        store.set_filter(FilterType::Favorites);

        let favorites = store.filtered_products();
        let ids: Vec<&str> = favorites.iter().map(|p| p.id.as_str()).collect();
        // Collection order, not like order
        assert_eq!(ids, ["1", "3"]);
        assert!(favorites.iter().all(|p| p.is_liked == Some(true)));
    }

    #[test]
    fn test_filtered_products_search_is_case_insensitive_across_fields() {
        let mut store = empty_store();
        store.set_products(vec![
            sample_product("1", "Red Shirt", "Acme", "clothing"),
            sample_product("2", "Blue Hat", "ShirtCo", "headwear"),
            sample_product("3", "Green Scarf", "Acme", "shirts"),
            sample_product("4", "Socks", "Acme", "footwear"),
        ]);

        store.set_search_query("SHIRT".to_string());

        let filtered = store.filtered_products();
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        // Matches title ("Red Shirt"), brand ("ShirtCo") and category ("shirts");
        // plain "Socks" matches nothing
        assert_eq!(ids.len(), 3);
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn test_filtered_products_combines_favorites_and_search() {
        let mut store = empty_store();
        store.set_products(vec![
            sample_product("1", "Red Shirt", "Acme", "clothing"),
            sample_product("2", "Blue Hat", "Acme", "clothing"),
        ]);
        store.toggle_like("1");
        store.set_filter(FilterType::Favorites);
        store.set_search_query("shirt".to_string());

        let visible = store.filtered_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "1");
        assert_eq!(visible[0].is_liked, Some(true));

        // A query matching nothing liked empties the view
        store.set_search_query("hat".to_string());
        assert!(store.filtered_products().is_empty());
    }

    #[test]
    fn test_get_product_not_found() {
        let store = empty_store();
        assert!(store.get_product("anything").is_none());
    }

    #[test]
    fn test_mutations_write_through_to_storage() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        let mut store = ProductStore::new(Box::new(storage));

        store.set_products(vec![sample_product("1", "Red Shirt", "Acme", "clothing")]);
        store.toggle_like("1");

        let snapshot = handle.get(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&snapshot).unwrap();

        assert_eq!(value["likedProducts"], serde_json::json!(["1"]));
        assert_eq!(value["products"][0]["id"], "1");
        assert_eq!(value["products"][0]["isLiked"], true);
        // Exactly the two persisted fields, nothing transient
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_rehydration_restores_persisted_slice_only() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        let mut store = ProductStore::new(Box::new(storage));
        store.set_products(vec![
            sample_product("1", "Red Shirt", "Acme", "clothing"),
            sample_product("2", "Blue Hat", "Acme", "clothing"),
        ]);
        store.toggle_like("2");
        store.set_filter(FilterType::Favorites);
        store.set_search_query("shirt".to_string());
        store.set_error(Some("boom".to_string()));
        drop(store);

        let restored = ProductStore::new(Box::new(handle));

        assert_eq!(restored.products().len(), 2);
        assert_eq!(restored.liked_products(), ["2".to_string()]);
        assert_eq!(restored.get_product("2").unwrap().is_liked, Some(true));
        assert_eq!(restored.get_product("1").unwrap().is_liked, Some(false));
        // Transient fields reset each session
        assert_eq!(restored.filter(), FilterType::All);
        assert_eq!(restored.search_query(), "");
        assert!(!restored.is_loading());
        assert!(restored.error().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "not json at all").unwrap();

        let store = ProductStore::new(Box::new(storage));

        assert!(store.products().is_empty());
        assert!(store.liked_products().is_empty());
    }

    #[test]
    fn test_transient_setters() {
        let mut store = empty_store();

        store.set_loading(true);
        assert!(store.is_loading());

        store.set_error(Some("fetch failed".to_string()));
        assert_eq!(store.error(), Some("fetch failed"));

        store.set_error(None);
        assert!(store.error().is_none());
    }
}
