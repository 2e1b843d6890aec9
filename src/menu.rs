//! Keyboard shortcut handling
//!
//! Provides the shortcut table shown in tooltips and the subscription that
//! turns key presses into messages.

use cosmic::iced::keyboard::Key;
use cosmic::iced::{event, keyboard, Event, Subscription};
use cosmic::iced_futures::event::listen_raw;
use cosmic::widget::menu::key_bind::Modifier;
use cosmic::widget::menu::KeyBind;
use std::collections::HashMap;

use crate::editor::StyleAction;
use crate::message::{EditorMessage, Message, SystemMessage, WindowMessage};

/// Actions that can be triggered from keyboard shortcuts
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Action {
    Bold,
    Grow,
    Shrink,
    Save,
    TogglePin,
    Close,
}

impl Action {
    /// Convert action to application message
    pub fn to_message(self) -> Message {
        match self {
            Action::Bold => Message::Editor(EditorMessage::Style(StyleAction::Bold)),
            Action::Grow => Message::Editor(EditorMessage::Style(StyleAction::Grow)),
            Action::Shrink => Message::Editor(EditorMessage::Style(StyleAction::Shrink)),
            Action::Save => Message::System(SystemMessage::Save),
            Action::TogglePin => Message::Window(WindowMessage::TogglePin),
            Action::Close => Message::Window(WindowMessage::Close),
        }
    }

    /// Action bound to a Ctrl+character combination
    pub fn from_ctrl_char(c: &str) -> Option<Action> {
        match c {
            "b" => Some(Action::Bold),
            "=" | "+" => Some(Action::Grow),
            "-" => Some(Action::Shrink),
            "s" => Some(Action::Save),
            "t" => Some(Action::TogglePin),
            "q" => Some(Action::Close),
            _ => None,
        }
    }
}

/// Create default keyboard shortcuts
pub fn key_binds() -> HashMap<KeyBind, Action> {
    [
        ("b", Action::Bold),
        ("=", Action::Grow),
        ("-", Action::Shrink),
        ("s", Action::Save),
        ("t", Action::TogglePin),
        ("q", Action::Close),
    ]
    .into_iter()
    .map(|(c, action)| {
        (
            KeyBind {
                modifiers: vec![Modifier::Ctrl],
                key: Key::Character(c.into()),
            },
            action,
        )
    })
    .collect()
}

/// Tooltip label for an action, with its shortcut when it has one
pub fn tooltip(binds: &HashMap<KeyBind, Action>, label: &str, action: Action) -> String {
    match binds.iter().find(|(_, a)| **a == action) {
        Some((bind, _)) => format!("{} ({})", label, bind),
        None => label.to_string(),
    }
}

/// Keyboard shortcuts subscription
///
/// Listens for keyboard events and matches against defined shortcuts.
pub fn keyboard_shortcuts_subscription() -> Subscription<Message> {
    listen_raw(|event, status, _| {
        // Only process if event wasn't already handled
        if event::Status::Ignored != status {
            return None;
        }

        match event {
            Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                if let Key::Character(ref c) = key {
                    if modifiers.control() && !modifiers.alt() {
                        return Action::from_ctrl_char(&c.to_lowercase()).map(Action::to_message);
                    }
                }
                None
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_chars() {
        assert_eq!(Action::from_ctrl_char("b"), Some(Action::Bold));
        assert_eq!(Action::from_ctrl_char("+"), Some(Action::Grow));
        assert_eq!(Action::from_ctrl_char("="), Some(Action::Grow));
        assert_eq!(Action::from_ctrl_char("q"), Some(Action::Close));
        assert_eq!(Action::from_ctrl_char("z"), None);
    }

    #[test]
    fn test_every_binding_resolves() {
        for (bind, action) in key_binds() {
            if let Key::Character(c) = &bind.key {
                assert_eq!(Action::from_ctrl_char(c), Some(action));
            }
        }
    }
}
