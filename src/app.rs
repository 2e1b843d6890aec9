//! Main application module implementing the Cosmic Application trait
//!
//! This is the central hub of the application, implementing libCosmic's
//! Application trait for window management and message routing. Every
//! handler that changes the widget state ends with a full save.

use crate::config::{APP_ID, APP_NAME};
use crate::editor::{selection_span, Span, StyleAction};
use crate::error::{AppError, StoreResult};
use crate::fonts::{self, FontCatalog};
use crate::menu::{keyboard_shortcuts_subscription, Action as MenuAction};
use crate::message::{
    AppearanceMessage, ColorPicker, EditorMessage, FontMessage, Message, SystemMessage,
    ViewMessage, WindowMessage,
};
use crate::model::WidgetModel;
use crate::state::{ColorChannel, ResizeDrag, Rgb, WidgetState};
use crate::store::StateStore;
use crate::ui::{self, PanelState, RichSettings, ViewContext};

use cosmic::app::{Core, Task};
use cosmic::iced::{mouse, window, Event, Point, Size, Subscription};
use cosmic::iced_futures::event::listen_raw;
use cosmic::widget::menu::KeyBind;
use cosmic::widget::text_editor;
use cosmic::{Application, ApplicationExt, Element};
use std::collections::HashMap;
use std::time::Duration;

/// How long transient status text stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(4);

/// Motivation Widget application
pub struct MotivationWidget {
    /// libCosmic core reference
    core: Core,

    /// Persisted state, rich text and the store they are saved to
    model: WidgetModel,

    /// Contents of the text_editor widget
    content: text_editor::Content,

    /// Line formats derived from `rich`
    highlight: RichSettings,

    /// Selectable base font families
    fonts: FontCatalog,

    /// Transient UI state
    panel: PanelState,

    /// Corner-grip resize in progress
    resize: Option<ResizeDrag>,

    /// Last known pointer position in window coordinates
    pointer: Option<Point>,

    /// Keyboard shortcut bindings
    key_binds: HashMap<KeyBind, MenuAction>,
}

/// Application flags passed during initialization
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Store the state was loaded from
    pub store: StateStore,

    /// State loaded before the window was created
    pub state: WidgetState,
}

impl Application for MotivationWidget {
    /// Executor for async tasks
    type Executor = cosmic::executor::Default;

    /// Application flags
    type Flags = Flags;

    /// Application message type
    type Message = Message;

    /// Application ID following reverse-DNS convention
    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Initialize the application
    fn init(mut core: Core, flags: Self::Flags) -> (Self, Task<Self::Message>) {
        // The title bar is drawn by the widget itself
        core.window.show_headerbar = false;

        let Flags { store, state } = flags;
        let model = WidgetModel::new(store, state);
        let content = text_editor::Content::with_text(&model.rich().text());
        let fonts = FontCatalog::from_families([model.state().base_font.family.clone()]);

        let mut app = Self {
            core,
            model,
            content,
            highlight: RichSettings::default(),
            fonts,
            panel: PanelState::default(),
            resize: None,
            pointer: None,
            key_binds: crate::menu::key_binds(),
        };
        app.refresh_highlight();

        let mut tasks: Vec<Task<Message>> = vec![Task::perform(
            FontCatalog::system_async(),
            |catalog| Self::app_message(Message::Font(FontMessage::CatalogLoaded(catalog))),
        )];

        if let Some(id) = app.core.main_window_id() {
            let g = app.model.state().geometry;
            tasks.push(app.set_window_title(APP_NAME.to_string(), id));
            tasks.push(window::resize(
                id,
                Size::new(g.width as f32, g.height as f32),
            ));
            tasks.push(window::move_to(id, Point::new(g.x as f32, g.y as f32)));
            tasks.push(window::change_level(id, window_level(app.model.state().always_on_top)));
        }

        (app, Task::batch(tasks))
    }

    /// Handle incoming messages
    fn update(&mut self, message: Self::Message) -> Task<Self::Message> {
        match message {
            Message::Window(msg) => self.handle_window_message(msg),
            Message::Editor(msg) => self.handle_editor_message(msg),
            Message::Appearance(msg) => self.handle_appearance_message(msg),
            Message::Font(msg) => self.handle_font_message(msg),
            Message::View(msg) => self.handle_view_message(msg),
            Message::System(msg) => self.handle_system_message(msg),
        }
    }

    /// Render the application view
    fn view(&self) -> Element<'_, Self::Message> {
        ui::view(&ViewContext {
            state: self.model.state(),
            content: &self.content,
            highlight: &self.highlight,
            fonts: &self.fonts,
            panel: &self.panel,
            key_binds: &self.key_binds,
        })
    }

    /// Handle subscription events
    fn subscription(&self) -> Subscription<Self::Message> {
        Subscription::batch([keyboard_shortcuts_subscription(), window_events_subscription()])
    }

    /// Escape closes any open popup
    fn on_escape(&mut self) -> Task<Self::Message> {
        self.panel.close_popups();
        Task::none()
    }

    /// Save before the window goes away
    fn on_close_requested(&self, _id: window::Id) -> Option<Self::Message> {
        Some(Message::Window(WindowMessage::Close))
    }
}

/// Window level for the pin state
fn window_level(always_on_top: bool) -> window::Level {
    if always_on_top {
        window::Level::AlwaysOnTop
    } else {
        window::Level::Normal
    }
}

/// Text of the editor widget
fn editor_text(content: &text_editor::Content) -> String {
    without_reported_newline(content.text(), content.line_count())
}

/// Drop the line break the editor appends to text that does not end in one
///
/// Text of `line_count` lines holds `line_count - 1` line breaks; a reported
/// text with one more carries the appended break.
fn without_reported_newline(mut text: String, line_count: usize) -> String {
    let breaks = text.matches('\n').count();
    if breaks >= line_count.max(1) && text.ends_with('\n') {
        text.pop();
    }
    text
}

/// Window move/resize and pointer events
fn window_events_subscription() -> Subscription<Message> {
    listen_raw(|event, _status, _id| match event {
        Event::Window(window::Event::Moved(position)) => {
            Some(Message::Window(WindowMessage::Moved {
                x: position.x.round() as i32,
                y: position.y.round() as i32,
            }))
        }
        Event::Window(window::Event::Resized(size)) => {
            Some(Message::Window(WindowMessage::Resized {
                width: size.width,
                height: size.height,
            }))
        }
        Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::Window(WindowMessage::PointerMoved {
                x: position.x,
                y: position.y,
            }))
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::Window(WindowMessage::PointerReleased))
        }
        _ => None,
    })
}

impl MotivationWidget {
    /// Helper to wrap message in cosmic Action
    fn app_message(msg: Message) -> cosmic::Action<Message> {
        cosmic::Action::App(msg)
    }

    /// Take the outcome of a model change, returning whether state changed
    ///
    /// A failed save is logged and shown in the status line; the widget
    /// keeps running with its in-memory state.
    fn commit(&mut self, result: StoreResult<bool>) -> bool {
        match result {
            Ok(changed) => changed,
            Err(e) => {
                log::error!("{}", e);
                self.panel.status = Some(AppError::from(e).user_message());
                true
            }
        }
    }

    /// Save the whole document now
    fn save_all(&mut self) {
        let result = self.model.save().map(|_| true);
        self.commit(result);
    }

    /// Show a status line message that clears itself
    fn flash_status(&mut self, status: impl Into<String>) -> Task<Message> {
        self.panel.status = Some(status.into());
        Task::perform(tokio::time::sleep(STATUS_TIMEOUT), |_| {
            Self::app_message(Message::System(SystemMessage::ClearStatus))
        })
    }

    fn refresh_highlight(&mut self) {
        let state = self.model.state();
        let rich = self.model.rich();
        self.highlight = RichSettings::build(
            &rich.text(),
            &rich.runs(&state.base_font),
            &state.base_font.to_spec(),
            state.display_alpha() as f32,
        );
    }

    /// Span of the current selection in the text, if any
    fn current_selection(&self) -> Option<Span> {
        let selected = self.content.selection()?;
        let cursor = self.content.cursor();
        selection_span(
            self.model.rich().buffer(),
            cursor.selection.map(|anchor| (anchor.line, anchor.column)),
            (cursor.position.line, cursor.position.column),
            &selected,
        )
    }

    fn main_window(&self) -> Option<window::Id> {
        self.core.main_window_id()
    }

    /// Handle window chrome messages
    fn handle_window_message(&mut self, msg: WindowMessage) -> Task<Message> {
        match msg {
            WindowMessage::DragStart => {
                if let Some(id) = self.main_window() {
                    return window::drag(id);
                }
            }

            WindowMessage::ResizeStart => {
                if let Some(p) = self.pointer {
                    self.resize = Some(ResizeDrag::begin(self.model.state().geometry, p.x, p.y));
                }
            }

            WindowMessage::PointerMoved { x, y } => {
                self.pointer = Some(Point::new(x, y));
                if let (Some(drag), Some(id)) = (self.resize, self.main_window()) {
                    let geometry = drag.update(self.model.state().geometry, x, y);
                    if self.model.preview_geometry(geometry) {
                        return window::resize(
                            id,
                            Size::new(geometry.width as f32, geometry.height as f32),
                        );
                    }
                }
            }

            WindowMessage::PointerReleased => {
                if self.resize.take().is_some() {
                    log::debug!("Resized to {}", self.model.state().geometry);
                    self.save_all();
                }
            }

            WindowMessage::Moved { x, y } => {
                let result = self.model.move_to(x, y);
                self.commit(result);
            }

            WindowMessage::Resized { width, height } => {
                if self.resize.is_none() {
                    let result = self.model.resize_to(width, height);
                    self.commit(result);
                }
            }

            WindowMessage::TogglePin => {
                let result = self.model.toggle_pin();
                self.commit(result);
                if let Some(id) = self.main_window() {
                    let level = window_level(self.model.state().always_on_top);
                    return window::change_level(id, level);
                }
            }

            WindowMessage::Minimize => {
                self.save_all();
                if let Some(id) = self.main_window() {
                    return window::change_mode(id, window::Mode::Hidden);
                }
            }

            WindowMessage::Close => {
                self.save_all();
                log::info!("Closing {}", APP_NAME);
                match self.main_window() {
                    Some(id) => return window::close(id),
                    None => std::process::exit(0),
                }
            }
        }
        Task::none()
    }

    /// Apply a formatting action to the selection
    fn apply_style(&mut self, action: StyleAction) -> Task<Message> {
        if matches!(action, StyleAction::Color(_)) {
            self.panel.picker = None;
        }
        self.panel.format_row = false;

        let selection = self.current_selection();
        let result = self.model.apply_style(&action, selection);
        if self.commit(result) {
            self.refresh_highlight();
        }
        Task::none()
    }

    /// Handle text editing messages
    fn handle_editor_message(&mut self, msg: EditorMessage) -> Task<Message> {
        match msg {
            EditorMessage::Action(action) => {
                let is_edit = action.is_edit();
                self.content.perform(action);

                if is_edit {
                    let result = self.model.edit_text(&editor_text(&self.content));
                    if self.commit(result) {
                        self.refresh_highlight();
                    }
                }
            }

            EditorMessage::Style(action) => return self.apply_style(action),

            EditorMessage::SelectionColorInput(value) => {
                self.panel.color_input = value;
            }

            EditorMessage::SelectionColorSubmit => {
                if let Ok(rgb) = self.panel.color_input.parse::<Rgb>() {
                    return self.apply_style(StyleAction::Color(rgb.to_hex()));
                }
            }
        }
        Task::none()
    }

    fn set_color(&mut self, channel: ColorChannel, value: &str) {
        let result = self.model.set_color(channel, value);
        if self.commit(result) {
            self.panel.picker = None;
        }
    }

    /// Handle appearance messages
    fn handle_appearance_message(&mut self, msg: AppearanceMessage) -> Task<Message> {
        match msg {
            AppearanceMessage::SetColor(channel, value) => self.set_color(channel, &value),

            AppearanceMessage::ColorInput(_, value) => {
                self.panel.color_input = value;
            }

            AppearanceMessage::ColorSubmit(channel) => {
                let value = self.panel.color_input.clone();
                self.set_color(channel, &value);
            }

            AppearanceMessage::SetBorder(thickness) => {
                let result = self.model.set_border(thickness);
                self.commit(result);
            }

            AppearanceMessage::SetAlpha(alpha) => {
                let result = self.model.set_alpha(alpha as f64);
                if self.commit(result) {
                    self.refresh_highlight();
                }
            }
        }
        Task::none()
    }

    /// Switch the base font family
    fn select_family(&mut self, family: String) {
        let result = self.model.set_family(family);
        if self.commit(result) {
            self.refresh_highlight();
        }
    }

    /// Handle font messages
    fn handle_font_message(&mut self, msg: FontMessage) -> Task<Message> {
        match msg {
            FontMessage::CatalogLoaded(catalog) => {
                self.fonts.extend(catalog);
            }

            FontMessage::SelectFamily(index) => {
                if let Some(family) = self.fonts.families().get(index).cloned() {
                    self.select_family(family);
                }
            }

            FontMessage::SetSize(size) => {
                let result = self.model.set_font_size(size);
                if self.commit(result) {
                    self.refresh_highlight();
                }
            }

            FontMessage::Import => {
                let start_dir = dirs::font_dir().or_else(dirs::home_dir);
                return Task::perform(
                    async move {
                        let mut dialog = rfd::AsyncFileDialog::new()
                            .set_title("Load a font")
                            .add_filter("Fonts", &["ttf", "otf", "ttc"])
                            .add_filter("All files", &["*"]);
                        if let Some(dir) = start_dir {
                            dialog = dialog.set_directory(dir);
                        }
                        let Some(file) = dialog.pick_file().await else {
                            return FontMessage::ImportCancelled;
                        };
                        match fonts::import_font_file(file.path().to_path_buf()).await {
                            Ok(font) => FontMessage::Imported(font),
                            Err(e) => {
                                log::error!("{}", e);
                                FontMessage::ImportFailed {
                                    title: "Font load failed".to_string(),
                                    message: AppError::from(e).user_message(),
                                }
                            }
                        }
                    },
                    |msg| Self::app_message(Message::Font(msg)),
                );
            }

            FontMessage::ImportCancelled => {
                log::debug!("Font import cancelled");
            }

            FontMessage::Imported(font) => {
                if self.fonts.register(&font.family) {
                    log::debug!(
                        "Added family {:?} from {}",
                        font.family,
                        font.path.display()
                    );
                }
                let data = (*font.data).clone();
                self.select_family(font.family);
                return cosmic::iced::font::load(data).map(|result| {
                    if let Err(e) = result {
                        log::warn!("Renderer rejected font: {:?}", e);
                    }
                    Self::app_message(Message::Font(FontMessage::Registered))
                });
            }

            FontMessage::ImportFailed { title, message } => {
                return error_dialog(title, message);
            }

            FontMessage::Registered => {
                log::debug!("Font data loaded into the renderer");
            }
        }
        Task::none()
    }

    /// Handle popup and panel messages
    fn handle_view_message(&mut self, msg: ViewMessage) -> Task<Message> {
        match msg {
            ViewMessage::ToggleToolbar => {
                self.panel.toolbar_visible = !self.panel.toolbar_visible;
            }

            ViewMessage::OpenPicker(picker) => {
                let colors = &self.model.state().colors;
                let current = match picker {
                    ColorPicker::Channel(channel) => colors.get(channel).to_string(),
                    ColorPicker::Selection => colors.text.clone(),
                };
                self.panel.open_picker(picker, &current);
            }

            ViewMessage::ClosePopup => self.panel.close_popups(),

            ViewMessage::ContextMenu => {
                self.panel.format_row = true;
            }
        }
        Task::none()
    }

    /// Handle saving, errors and status messages
    fn handle_system_message(&mut self, msg: SystemMessage) -> Task<Message> {
        match msg {
            SystemMessage::Save => {
                self.save_all();
                if self.panel.status.is_none() {
                    return self.flash_status("Saved");
                }
            }

            SystemMessage::ErrorShown => {}

            SystemMessage::ClearStatus => {
                self.panel.status = None;
            }
        }
        Task::none()
    }
}

/// Blocking error dialog; the widget resumes once it is dismissed
fn error_dialog(title: String, message: String) -> Task<Message> {
    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title(title)
                .set_description(message)
                .set_buttons(rfd::MessageButtons::Ok)
                .show()
                .await;
        },
        |_| MotivationWidget::app_message(Message::System(SystemMessage::ErrorShown)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reported_newline_is_dropped() {
        assert_eq!(without_reported_newline("Hello\n".to_string(), 1), "Hello");
        assert_eq!(without_reported_newline("\n".to_string(), 1), "");
        assert_eq!(without_reported_newline("a\nb\n".to_string(), 2), "a\nb");
    }

    #[test]
    fn test_trailing_newline_of_text_is_kept() {
        // "Hello!\n" is two lines, the second one empty
        assert_eq!(without_reported_newline("Hello!\n".to_string(), 2), "Hello!\n");
        assert_eq!(without_reported_newline("a\n\n".to_string(), 3), "a\n\n");
        assert_eq!(without_reported_newline("Hello".to_string(), 1), "Hello");
    }

    #[test]
    fn test_window_level() {
        assert_eq!(window_level(true), window::Level::AlwaysOnTop);
        assert_eq!(window_level(false), window::Level::Normal);
    }
}
