use iced::widget::{button, column, container, row, scrollable, text, text_input};
use iced::{Alignment, Element, Length, Task, Theme};
use iced_aw::Wrap;
use rfd::FileDialog;

// Declare the application modules
mod state;
mod ui;

use state::product::{FilterType, ProductFormData};
use state::storage::JsonFileStorage;
use state::store::ProductStore;
use ui::field::field;
use ui::product_card::product_card;

/// Buffered input for the add-product form.
///
/// Text buffers are kept as typed; validation happens on submit and
/// fills the per-field error strings rendered by the Field wrapper.
#[derive(Debug, Clone, Default)]
struct ProductForm {
    title: String,
    description: String,
    price: String,
    brand: String,
    category: String,
    thumbnail: String,
    errors: FormErrors,
}

/// One inline error string per form field; empty means no error
#[derive(Debug, Clone, Default)]
struct FormErrors {
    title: String,
    description: String,
    price: String,
    brand: String,
    category: String,
    thumbnail: String,
}

impl ProductForm {
    /// Check the form and build the data for `add_product`.
    ///
    /// Presence checks plus parsing the price buffer; the store itself
    /// never validates. Returns `None` and fills the error strings when
    /// anything is missing.
    fn validate(&mut self) -> Option<ProductFormData> {
        self.errors = FormErrors::default();
        let mut valid = true;

        if self.title.trim().is_empty() {
            self.errors.title = "Title is required".to_string();
            valid = false;
        }
        if self.description.trim().is_empty() {
            self.errors.description = "Description is required".to_string();
            valid = false;
        }
        if self.brand.trim().is_empty() {
            self.errors.brand = "Brand is required".to_string();
            valid = false;
        }
        if self.category.trim().is_empty() {
            self.errors.category = "Category is required".to_string();
            valid = false;
        }
        if self.thumbnail.is_empty() {
            self.errors.thumbnail = "Pick a product image".to_string();
            valid = false;
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(price) if price >= 0.0 => price,
            Ok(_) => {
                self.errors.price = "Price must not be negative".to_string();
                valid = false;
                0.0
            }
            Err(_) => {
                self.errors.price = "Price must be a number".to_string();
                valid = false;
                0.0
            }
        };

        if !valid {
            return None;
        }

        Some(ProductFormData {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            brand: self.brand.trim().to_string(),
            category: self.category.trim().to_string(),
            thumbnail: self.thumbnail.clone(),
        })
    }
}

/// Main application state
struct CatalogApp {
    /// The catalog store, rehydrated from disk at startup
    store: ProductStore,
    /// Add-product form buffers
    form: ProductForm,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User edited the search box
    SearchChanged(String),
    /// User picked a filter (All / Favorites)
    FilterSelected(FilterType),
    /// User clicked the like button on a card
    ToggleLike(String),
    /// User clicked the delete button on a card
    DeleteProduct(String),
    FormTitleChanged(String),
    FormDescriptionChanged(String),
    FormPriceChanged(String),
    FormBrandChanged(String),
    FormCategoryChanged(String),
    /// User clicked "Pick image..." on the form
    PickThumbnail,
    /// User submitted the add-product form
    SubmitForm,
    /// User cleared the add-product form
    ClearForm,
}

impl CatalogApp {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Initialize storage
        // If this fails, we panic because the app cannot function without it
        let storage = JsonFileStorage::new()
            .expect("Failed to initialize catalog storage. Check permissions and disk space.");

        let store = ProductStore::new(Box::new(storage));

        let product_count = store.products().len();
        println!("🛍️  Product catalog initialized with {} products", product_count);

        let status = format!("Ready. {} products in catalog.", product_count);

        (
            CatalogApp {
                store,
                form: ProductForm::default(),
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SearchChanged(query) => {
                self.store.set_search_query(query);
            }
            Message::FilterSelected(filter) => {
                self.store.set_filter(filter);
            }
            Message::ToggleLike(id) => {
                self.store.toggle_like(&id);
            }
            Message::DeleteProduct(id) => {
                self.store.delete_product(&id);
                self.status = format!(
                    "Deleted product. {} products in catalog.",
                    self.store.products().len()
                );
            }
            Message::FormTitleChanged(title) => self.form.title = title,
            Message::FormDescriptionChanged(description) => self.form.description = description,
            Message::FormPriceChanged(price) => self.form.price = price,
            Message::FormBrandChanged(brand) => self.form.brand = brand,
            Message::FormCategoryChanged(category) => self.form.category = category,
            Message::PickThumbnail => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select Product Image")
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp"])
                    .pick_file();

                if let Some(path) = picked {
                    self.form.thumbnail = path.to_string_lossy().to_string();
                }
            }
            Message::SubmitForm => {
                if let Some(form_data) = self.form.validate() {
                    let title = form_data.title.clone();
                    self.store.add_product(form_data);
                    self.form = ProductForm::default();
                    self.status = format!(
                        "✅ Added \"{}\". {} products in catalog.",
                        title,
                        self.store.products().len()
                    );
                }
            }
            Message::ClearForm => {
                self.form = ProductForm::default();
            }
        }

        Task::none()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = row![
            text("Product Catalog").size(28),
            text_input("Search products...", self.store.search_query())
                .on_input(Message::SearchChanged)
                .padding(8)
                .width(Length::Fixed(280.0)),
            filter_button("All", FilterType::All, self.store.filter()),
            filter_button("Favorites", FilterType::Favorites, self.store.filter()),
        ]
        .spacing(16)
        .align_y(Alignment::Center);

        let status_line: Element<Message> = if let Some(error) = self.store.error() {
            text(format!("⚠️  {error}")).size(14).style(text::danger).into()
        } else if self.store.is_loading() {
            text("Loading...").size(14).into()
        } else {
            text(&self.status).size(14).into()
        };

        let visible = self.store.filtered_products();
        let grid: Element<Message> = if visible.is_empty() {
            let hint = if self.store.products().is_empty() {
                "No products yet. Add one below."
            } else {
                "No products match the current filter."
            };
            text(hint).size(16).into()
        } else {
            let cards = visible
                .into_iter()
                .map(|product| {
                    let on_toggle_like = Message::ToggleLike(product.id.clone());
                    let on_delete = Message::DeleteProduct(product.id.clone());
                    product_card(product, on_toggle_like, on_delete)
                })
                .collect();

            Wrap::with_elements(cards)
                .spacing(12.0)
                .line_spacing(12.0)
                .into()
        };

        let content = column![
            header,
            status_line,
            grid,
            self.form_view(),
        ]
        .spacing(20)
        .padding(24);

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// The add-product form, every input wrapped in a labeled field
    fn form_view(&self) -> Element<Message> {
        let thumbnail_label = if self.form.thumbnail.is_empty() {
            "No image selected".to_string()
        } else {
            self.form.thumbnail.clone()
        };

        column![
            text("Add a product").size(20),
            field(
                "Title",
                &self.form.errors.title,
                text_input("Red Shirt", &self.form.title)
                    .on_input(Message::FormTitleChanged)
                    .padding(8),
            ),
            field(
                "Description",
                &self.form.errors.description,
                text_input("100% cotton, classic fit", &self.form.description)
                    .on_input(Message::FormDescriptionChanged)
                    .padding(8),
            ),
            row![
                field(
                    "Price",
                    &self.form.errors.price,
                    text_input("19.99", &self.form.price)
                        .on_input(Message::FormPriceChanged)
                        .padding(8),
                ),
                field(
                    "Brand",
                    &self.form.errors.brand,
                    text_input("Acme", &self.form.brand)
                        .on_input(Message::FormBrandChanged)
                        .padding(8),
                ),
                field(
                    "Category",
                    &self.form.errors.category,
                    text_input("clothing", &self.form.category)
                        .on_input(Message::FormCategoryChanged)
                        .padding(8),
                ),
            ]
            .spacing(12),
            field(
                "Thumbnail",
                &self.form.errors.thumbnail,
                row![
                    button("Pick image...")
                        .on_press(Message::PickThumbnail)
                        .padding(8),
                    text(thumbnail_label).size(12),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            ),
            row![
                button("Add Product").on_press(Message::SubmitForm).padding(10),
                button("Clear").on_press(Message::ClearForm).padding(10),
            ]
            .spacing(8),
        ]
        .spacing(12)
        .max_width(640)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Filter selector button, highlighted when active
fn filter_button(label: &str, filter: FilterType, active: FilterType) -> Element<'_, Message> {
    let style: fn(&Theme, button::Status) -> button::Style = if filter == active {
        button::primary
    } else {
        button::secondary
    };

    button(text(label).size(14))
        .style(style)
        .on_press(Message::FilterSelected(filter))
        .padding(8)
        .into()
}

fn main() -> iced::Result {
    iced::application(
        "Product Catalog",
        CatalogApp::update,
        CatalogApp::view,
    )
    .theme(CatalogApp::theme)
    .centered()
    .run_with(CatalogApp::new)
}
