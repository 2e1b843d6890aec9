//! Color picker popup
//!
//! A grid of swatches plus a hex entry. The same popup edits a widget color
//! channel or colors the current selection.

use super::highlighter::to_color;
use super::panel::PanelColors;
use super::ViewContext;
use crate::config::PALETTE;
use crate::editor::StyleAction;
use crate::message::{AppearanceMessage, ColorPicker, EditorMessage, Message, ViewMessage};
use crate::state::Rgb;
use cosmic::iced::{Alignment, Background, Border, Length};
use cosmic::widget::{button, container, text, text_input, Column, Row};
use cosmic::Element;

const SWATCH_SIZE: f32 = 20.0;
const SWATCHES_PER_ROW: usize = 8;

fn pick(picker: ColorPicker, hex: String) -> Message {
    match picker {
        ColorPicker::Channel(channel) => {
            Message::Appearance(AppearanceMessage::SetColor(channel, hex))
        }
        ColorPicker::Selection => Message::Editor(EditorMessage::Style(StyleAction::Color(hex))),
    }
}

fn swatch<'a>(picker: ColorPicker, hex: &'static str) -> Element<'a, Message> {
    let rgb = Rgb::parse_or(hex, Rgb::new(0, 0, 0));
    let fill = container(Column::new())
        .width(Length::Fixed(SWATCH_SIZE))
        .height(Length::Fixed(SWATCH_SIZE))
        .class(cosmic::theme::Container::custom(move |_| {
            cosmic::iced::widget::container::Style {
                background: Some(Background::Color(to_color(rgb, 1.0))),
                border: Border {
                    radius: 3.0.into(),
                    width: 1.0,
                    color: to_color(Rgb::new(0x80, 0x80, 0x80), 1.0),
                },
                ..Default::default()
            }
        }));

    button::custom(fill)
        .padding(1)
        .on_press(pick(picker, rgb.to_hex()))
        .into()
}

/// Build the picker popup for the open picker
pub fn view<'a>(
    cx: &ViewContext<'a>,
    picker: ColorPicker,
    colors: &PanelColors,
) -> Element<'a, Message> {
    let title = match picker {
        ColorPicker::Channel(channel) => format!("{} color", channel.label()),
        ColorPicker::Selection => "Selection color".to_string(),
    };

    let mut grid = Column::new().spacing(2);
    for chunk in PALETTE.chunks(SWATCHES_PER_ROW) {
        let row = chunk
            .iter()
            .fold(Row::new().spacing(2), |row, hex| row.push(swatch(picker, hex)));
        grid = grid.push(row);
    }

    let on_input = move |value: String| match picker {
        ColorPicker::Channel(channel) => {
            Message::Appearance(AppearanceMessage::ColorInput(channel, value))
        }
        ColorPicker::Selection => Message::Editor(EditorMessage::SelectionColorInput(value)),
    };
    let submit = match picker {
        ColorPicker::Channel(channel) => Message::Appearance(AppearanceMessage::ColorSubmit(channel)),
        ColorPicker::Selection => Message::Editor(EditorMessage::SelectionColorSubmit),
    };
    let valid = cx.panel.color_input.parse::<Rgb>().is_ok();

    let entry = Row::new()
        .push(
            text_input("#RRGGBB", cx.panel.color_input.as_str())
                .on_input(on_input)
                .width(Length::Fixed(110.0)),
        )
        .push(button::text("Apply").on_press_maybe(valid.then_some(submit)))
        .push(button::text("Cancel").on_press(Message::View(ViewMessage::ClosePopup)))
        .spacing(4)
        .align_y(Alignment::Center);

    Column::new()
        .push(
            text(title)
                .size(12)
                .class(cosmic::theme::Text::Color(colors.text)),
        )
        .push(grid)
        .push(entry)
        .spacing(6)
        .padding([6, 8])
        .into()
}
