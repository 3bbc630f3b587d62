/// Labeled form field wrapper
use iced::widget::{column, text, Column};
use iced::Element;

/// Render a label above the injected child widget and, only when `error`
/// is non-empty, a danger-styled error line beneath it.
///
/// Stateless: the caller owns validation and passes the message in.
pub fn field<'a, Message: 'a>(
    label: &'a str,
    error: &'a str,
    child: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut content: Column<'a, Message> = column![
        text(label).size(14),
        child.into(),
    ]
    .spacing(4);

    if !error.is_empty() {
        content = content.push(text(error).size(12).style(text::danger));
    }

    content.into()
}
