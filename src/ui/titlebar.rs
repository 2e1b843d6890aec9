//! Title bar
//!
//! Dragging the title moves the window. The buttons on the right toggle
//! always-on-top, show or hide the toolbar, minimize and close.

use super::panel::PanelColors;
use super::ViewContext;
use crate::config::APP_NAME;
use crate::menu::{self, Action as MenuAction};
use crate::message::{Message, ViewMessage, WindowMessage};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, container, mouse_area, text, tooltip, Row};
use cosmic::Element;

/// Height of the title bar in pixels
pub const TITLE_BAR_HEIGHT: f32 = 32.0;

fn chrome_button<'a>(label: &'a str, tip: String, message: Message) -> Element<'a, Message> {
    tooltip(
        button::text(label).on_press(message),
        text(tip),
        tooltip::Position::Bottom,
    )
    .into()
}

/// Build the title bar
pub fn view<'a>(cx: &ViewContext<'a>, colors: &PanelColors) -> Element<'a, Message> {
    let title = mouse_area(
        container(
            text(APP_NAME)
                .size(13)
                .class(cosmic::theme::Text::Color(colors.title)),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(Alignment::Center)
        .padding([0, 10]),
    )
    .on_press(Message::Window(WindowMessage::DragStart));

    let pin_label = if cx.state.always_on_top { "📌" } else { "📍" };
    let pin_tip = if cx.state.always_on_top {
        "Unpin from top"
    } else {
        "Keep on top"
    };

    Row::new()
        .push(title)
        .push(chrome_button(
            pin_label,
            menu::tooltip(cx.key_binds, pin_tip, MenuAction::TogglePin),
            Message::Window(WindowMessage::TogglePin),
        ))
        .push(chrome_button(
            "⚙",
            "Show or hide toolbar".to_string(),
            Message::View(ViewMessage::ToggleToolbar),
        ))
        .push(chrome_button(
            "—",
            "Minimize".to_string(),
            Message::Window(WindowMessage::Minimize),
        ))
        .push(chrome_button(
            "✕",
            menu::tooltip(cx.key_binds, "Close", MenuAction::Close),
            Message::Window(WindowMessage::Close),
        ))
        .spacing(2)
        .align_y(Alignment::Center)
        .height(Length::Fixed(TITLE_BAR_HEIGHT))
        .into()
}
