//! Main panel layout and composition
//!
//! The border is the outer container's padding over the border color. Inside
//! it, the title bar, toolbar, popups and text area share the background
//! color. Opacity is applied to every painted color.

use super::highlighter::{self, to_color, RichHighlighter};
use super::{palette, titlebar, toolbar, ViewContext};
use crate::config;
use crate::message::{EditorMessage, Message, ViewMessage, WindowMessage};
use crate::state::{ColorChannel, Rgb, WidgetState};
use cosmic::iced::{Alignment, Background, Border, Color, Length};
use cosmic::widget::text_editor::Catalog;
use cosmic::widget::{container, horizontal_space, mouse_area, text, Column, Row};
use cosmic::Element;

/// Size of the corner resize grip
const GRIP_SIZE: f32 = 14.0;

/// Colors of the panel at the current opacity
#[derive(Debug, Clone, Copy)]
pub struct PanelColors {
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub border: Color,
    pub title: Color,
}

fn channel_rgb(state: &WidgetState, channel: ColorChannel) -> Rgb {
    let fallback = match channel {
        ColorChannel::Background => config::DEFAULT_BACKGROUND,
        ColorChannel::Text => config::DEFAULT_TEXT,
        ColorChannel::Accent => config::DEFAULT_ACCENT,
        ColorChannel::Border => config::DEFAULT_BORDER_COLOR,
    };
    Rgb::parse_or(
        state.colors.get(channel),
        Rgb::parse_or(fallback, Rgb::new(0, 0, 0)),
    )
}

impl PanelColors {
    pub fn from_state(state: &WidgetState) -> Self {
        let alpha = state.display_alpha() as f32;
        let color = |channel| to_color(channel_rgb(state, channel), alpha);
        Self {
            background: color(ColorChannel::Background),
            text: color(ColorChannel::Text),
            accent: color(ColorChannel::Accent),
            border: color(ColorChannel::Border),
            title: to_color(Rgb::parse_or(config::TITLE_COLOR, Rgb::new(0xB8, 0xC1, 0xD1)), alpha),
        }
    }
}

fn filled<'a>(
    content: impl Into<Element<'a, Message>>,
    color: Color,
    padding: u16,
) -> Element<'a, Message> {
    container(content)
        .padding(padding)
        .width(Length::Fill)
        .height(Length::Fill)
        .class(cosmic::theme::Container::custom(move |_| cosmic::iced::widget::container::Style {
            background: Some(Background::Color(color)),
            ..Default::default()
        }))
        .into()
}

fn editor<'a>(cx: &ViewContext<'a>, colors: PanelColors) -> Element<'a, Message> {
    let base = &cx.state.base_font;
    let font = highlighter::to_font(&base.to_spec());

    let editor = cosmic::widget::text_editor(cx.content)
        .on_action(|action| Message::Editor(EditorMessage::Action(action)))
        .highlight_with::<RichHighlighter>(cx.highlight.clone(), highlighter::to_format)
        .font(font)
        .size(base.display_size() as f32)
        .height(Length::Fill)
        .padding(10)
        .style(move |theme: &cosmic::Theme, status| {
            let mut style = theme.style(&<cosmic::Theme as Catalog>::default(), status);
            style.background = Background::Color(colors.background);
            style.border = Border::default();
            style.value = colors.text;
            style.placeholder = Color {
                a: colors.text.a * 0.5,
                ..colors.text
            };
            style.selection = Color {
                a: colors.accent.a * 0.4,
                ..colors.accent
            };
            style
        });

    mouse_area(editor)
        .on_right_press(Message::View(ViewMessage::ContextMenu))
        .into()
}

fn footer<'a>(cx: &ViewContext<'a>, colors: PanelColors) -> Element<'a, Message> {
    let status = cx.panel.status.clone().unwrap_or_default();
    let grip = mouse_area(
        container(text("◢").size(GRIP_SIZE).class(cosmic::theme::Text::Color(colors.title)))
            .width(Length::Fixed(GRIP_SIZE))
            .height(Length::Fixed(GRIP_SIZE)),
    )
    .on_press(Message::Window(WindowMessage::ResizeStart));

    Row::new()
        .push(
            text(status)
                .size(11)
                .class(cosmic::theme::Text::Color(colors.title)),
        )
        .push(horizontal_space())
        .push(grip)
        .align_y(Alignment::End)
        .padding([0, 4])
        .into()
}

/// Build the whole panel
pub fn view<'a>(cx: &ViewContext<'a>) -> Element<'a, Message> {
    let colors = PanelColors::from_state(cx.state);

    let mut body = Column::new().push(titlebar::view(cx, &colors));
    if cx.panel.toolbar_visible {
        body = body.push(toolbar::view(cx, &colors));
    }
    if let Some(picker) = cx.panel.picker {
        body = body.push(palette::view(cx, picker, &colors));
    }
    if cx.panel.format_row {
        body = body.push(toolbar::format_row(cx));
    }
    body = body.push(editor(cx, colors)).push(footer(cx, colors));

    let inner = filled(body, colors.background, 0);
    filled(inner, colors.border, cx.state.display_border() as u16)
}
