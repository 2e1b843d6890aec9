//! Settings toolbar and the right-click format row

use super::panel::PanelColors;
use super::ViewContext;
use crate::config::{ALPHA_STEP, MAX_ALPHA, MIN_ALPHA};
use crate::editor::StyleAction;
use crate::menu::{self, Action as MenuAction};
use crate::message::{
    AppearanceMessage, ColorPicker, EditorMessage, FontMessage, Message, SystemMessage,
    ViewMessage,
};
use crate::state::ColorChannel;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, dropdown, slider, text, tooltip, Column, Row};
use cosmic::Element;

fn tip<'a>(content: impl Into<Element<'a, Message>>, label: String) -> Element<'a, Message> {
    tooltip(content, text(label), tooltip::Position::Bottom).into()
}

fn label<'a>(value: String, colors: &PanelColors) -> Element<'a, Message> {
    text(value)
        .size(12)
        .class(cosmic::theme::Text::Color(colors.text))
        .into()
}

/// Tooltip text of a formatting action
///
/// Sized runs are kept in the note but drawn at the base size, which the
/// size tooltips say.
fn action_label(action: &StyleAction) -> &'static str {
    match action {
        StyleAction::Bold => "Bold selection",
        StyleAction::Grow => "Larger selection (saved, shown at base size)",
        StyleAction::Shrink => "Smaller selection (saved, shown at base size)",
        StyleAction::Color(_) => "Color selection",
    }
}

/// Base font sizes offered by the − and + buttons
fn size_steps(size: i32) -> (i32, i32) {
    (size.saturating_sub(1), size.saturating_add(1))
}

/// Buttons that format the selection
pub fn format_buttons<'a>(cx: &ViewContext<'a>) -> Row<'a, Message> {
    let style = |action: StyleAction| Message::Editor(EditorMessage::Style(action));

    Row::new()
        .push(tip(
            button::text("B").on_press(style(StyleAction::Bold)),
            menu::tooltip(cx.key_binds, action_label(&StyleAction::Bold), MenuAction::Bold),
        ))
        .push(tip(
            button::text("A+").on_press(style(StyleAction::Grow)),
            menu::tooltip(cx.key_binds, action_label(&StyleAction::Grow), MenuAction::Grow),
        ))
        .push(tip(
            button::text("A−").on_press(style(StyleAction::Shrink)),
            menu::tooltip(cx.key_binds, action_label(&StyleAction::Shrink), MenuAction::Shrink),
        ))
        .push(
            button::text("Color")
                .on_press(Message::View(ViewMessage::OpenPicker(ColorPicker::Selection))),
        )
        .spacing(2)
        .align_y(Alignment::Center)
}

/// Right-click format row
pub fn format_row<'a>(cx: &ViewContext<'a>) -> Element<'a, Message> {
    format_buttons(cx)
        .push(button::text("✕").on_press(Message::View(ViewMessage::ClosePopup)))
        .padding([2, 8])
        .into()
}

/// Build the settings toolbar
pub fn view<'a>(cx: &ViewContext<'a>, colors: &PanelColors) -> Element<'a, Message> {
    let base = &cx.state.base_font;
    let families = cx.fonts.families();
    let selected = families.iter().position(|f| *f == base.family);
    let (smaller, larger) = size_steps(base.size);

    let font_row = Row::new()
        .push(
            dropdown(families, selected, |i| Message::Font(FontMessage::SelectFamily(i)))
                .width(Length::Fixed(180.0)),
        )
        .push(button::text("−").on_press(Message::Font(FontMessage::SetSize(smaller))))
        .push(label(base.display_size().to_string(), colors))
        .push(button::text("+").on_press(Message::Font(FontMessage::SetSize(larger))))
        .push(tip(
            button::text("Load font").on_press(Message::Font(FontMessage::Import)),
            "Load a .ttf or .otf file".to_string(),
        ))
        .push(format_buttons(cx))
        .spacing(4)
        .align_y(Alignment::Center);

    let mut color_row = Row::new().spacing(2).align_y(Alignment::Center);
    for channel in ColorChannel::ALL {
        color_row = color_row.push(
            button::text(channel.label()).on_press(Message::View(ViewMessage::OpenPicker(
                ColorPicker::Channel(channel),
            ))),
        );
    }

    let border = cx.state.display_border();
    let alpha = cx.state.display_alpha() as f32;
    let set_border = |b: u32| Message::Appearance(AppearanceMessage::SetBorder(b));

    let appearance_row = color_row
        .push(label("Border".to_string(), colors))
        .push(button::text("−").on_press(set_border(border.saturating_sub(1))))
        .push(label(border.to_string(), colors))
        .push(button::text("+").on_press(set_border(border.saturating_add(1))))
        .push(label("Opacity".to_string(), colors))
        .push(
            slider(MIN_ALPHA as f32..=MAX_ALPHA as f32, alpha, |a| {
                Message::Appearance(AppearanceMessage::SetAlpha(a))
            })
            .step(ALPHA_STEP as f32)
            .width(Length::Fixed(100.0)),
        )
        .push(label(format!("{:.2}", alpha), colors))
        .push(tip(
            button::text("Save").on_press(Message::System(SystemMessage::Save)),
            menu::tooltip(cx.key_binds, "Save now", MenuAction::Save),
        ))
        .spacing(4);

    Column::new()
        .push(font_row)
        .push(appearance_row)
        .spacing(4)
        .padding([4, 8])
        .into()
}
