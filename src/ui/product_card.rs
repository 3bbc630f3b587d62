/// One product tile for the catalog grid
use iced::widget::{button, column, container, image, row, text, Column};
use iced::{Alignment, Element, Length};

use crate::state::product::Product;

/// Width of one card in the wrap grid
const CARD_WIDTH: f32 = 210.0;

/// Build a card showing the thumbnail, title, brand/category line, price
/// (discounted when a discount applies) and the like/delete actions.
///
/// The card takes the product by value so it can hand its strings straight
/// to the widgets; callers work from the derived view, which is already a
/// fresh sequence.
pub fn product_card<'a, Message: Clone + 'a>(
    product: Product,
    on_toggle_like: Message,
    on_delete: Message,
) -> Element<'a, Message> {
    let like_icon = if product.is_liked == Some(true) {
        "♥"
    } else {
        "♡"
    };

    let price_line = if product.discount_percentage > 0.0 {
        let discounted = product.price * (1.0 - product.discount_percentage / 100.0);
        format!("${discounted:.2} (was ${:.2})", product.price)
    } else {
        format!("${:.2}", product.price)
    };

    let meta_line = format!("{} · {}", product.brand, product.category);
    let stock_line = format!("★ {:.1} · {} in stock", product.rating, product.stock);

    let details: Column<'a, Message> = column![
        image(image::Handle::from_path(&product.thumbnail))
            .width(Length::Fill)
            .height(Length::Fixed(130.0)),
        text(product.title).size(16),
        text(meta_line).size(12),
        text(stock_line).size(12),
        text(price_line).size(14),
        row![
            button(text(like_icon).size(16)).on_press(on_toggle_like).padding(6),
            button(text("Delete").size(12)).on_press(on_delete).padding(6),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    ]
    .spacing(6);

    container(details)
        .padding(10)
        .width(Length::Fixed(CARD_WIDTH))
        .into()
}
