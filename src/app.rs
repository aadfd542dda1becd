use crate::ui;
use iced::widget::{button, column, container, pick_list, row, scrollable, text, text_input, Space};
use iced::{Element, Fill, Task};
use tracing::warn;
use win_utilities::domain::{AppSettings, RegistryValue, ValueKind};
use win_utilities::repositories::process;
use win_utilities::services::{registry, settings};

#[derive(Debug, Clone)]
pub enum Message {
    PathChanged(String),
    NameChanged(String),
    KindSelected(ValueKind),
    DataChanged(String),
    Read,
    Write,
    ValueRead(Result<RegistryValue, String>),
    ValueWritten(Result<String, String>),
    RestartAsAdmin,
}

#[derive(Default)]
pub struct State {
    path: String,
    value_name: String,
    kind: Option<ValueKind>,
    data: String,
    status_message: String,
    is_error: bool,
    is_admin: bool,
}

impl State {
    fn from_settings(saved: AppSettings) -> Self {
        Self {
            path: saved.path,
            value_name: saved.value_name,
            kind: Some(saved.kind),
            is_admin: process::is_elevated(),
            ..Default::default()
        }
    }

    fn settings(&self) -> AppSettings {
        AppSettings {
            path: self.path.clone(),
            value_name: self.value_name.clone(),
            kind: self.kind.unwrap_or(ValueKind::Dword),
        }
    }

    fn report(&mut self, result: Result<String, String>) {
        self.is_error = result.is_err();
        self.status_message = result.unwrap_or_else(|e| format!("Error: {}", e));
    }
}

pub fn init() -> (State, Task<Message>) {
    let state = match settings::load() {
        Ok(saved) => State::from_settings(saved),
        Err(e) => {
            let mut state = State::from_settings(AppSettings::default());
            state.report(Err(format!("Failed to load settings: {}", e)));
            state
        }
    };
    (state, Task::none())
}

/// Parse the data field for `kind`. DWORDs accept decimal or `0x` hex.
fn parse_data(kind: ValueKind, data: &str) -> Result<RegistryValue, String> {
    match kind {
        ValueKind::Dword => {
            let data = data.trim();
            let parsed = match data.strip_prefix("0x").or_else(|| data.strip_prefix("0X")) {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => data.parse(),
            };
            parsed
                .map(RegistryValue::Dword)
                .map_err(|e| format!("Invalid DWORD {:?}: {}", data, e))
        }
        ValueKind::String => Ok(RegistryValue::String(data.to_string())),
    }
}

pub fn update(state: &mut State, message: Message) -> Task<Message> {
    match message {
        Message::PathChanged(path) => {
            state.path = path;
            Task::none()
        }
        Message::NameChanged(name) => {
            state.value_name = name;
            Task::none()
        }
        Message::KindSelected(kind) => {
            state.kind = Some(kind);
            Task::none()
        }
        Message::DataChanged(data) => {
            state.data = data;
            Task::none()
        }
        Message::Read => {
            let saved = state.settings();
            Task::perform(read_async(saved), Message::ValueRead)
        }
        Message::Write => {
            let saved = state.settings();
            match parse_data(saved.kind, &state.data) {
                Ok(value) => Task::perform(write_async(saved, value), Message::ValueWritten),
                Err(e) => {
                    state.report(Err(e));
                    Task::none()
                }
            }
        }
        Message::ValueRead(result) => {
            match result {
                Ok(value) => {
                    state.data = value.to_string();
                    state.report(Ok(format!("Read {} value", value.kind())));
                }
                Err(e) => state.report(Err(e)),
            }
            Task::none()
        }
        Message::ValueWritten(result) => {
            state.report(result);
            Task::none()
        }
        Message::RestartAsAdmin => {
            match process::relaunch_elevated() {
                Ok(()) => std::process::exit(0),
                Err(e) => state.report(Err(e.to_user_string())),
            }
            Task::none()
        }
    }
}

pub fn view(state: &State) -> Element<'_, Message> {
    let mut content = column![view_header()].spacing(5).padding(15);

    if !state.is_admin {
        content = content.push(ui::warning_box(
            "HKEY_LOCAL_MACHINE writes need administrator rights",
            Message::RestartAsAdmin,
        ));
    }

    content = content
        .push(Space::with_height(15))
        .push(view_editor_card(state));

    if !state.status_message.is_empty() {
        content = content
            .push(Space::with_height(10))
            .push(ui::status_text(&state.status_message, !state.is_error));
    }

    container(scrollable(content))
        .width(Fill)
        .height(Fill)
        .into()
}

fn view_header() -> Element<'static, Message> {
    row![text("Registry Editor")
        .size(26)
        .color(iced::Color::from_rgb(0.9, 0.9, 1.0))]
    .padding(15)
    .align_y(iced::Alignment::Center)
    .into()
}

fn view_editor_card(state: &State) -> Element<'_, Message> {
    let content = column![
        ui::info_row(
            "Key path:",
            text_input(r"HKEY_CURRENT_USER\Software\...", &state.path)
                .on_input(Message::PathChanged)
                .padding(8),
        ),
        ui::info_row(
            "Value name:",
            text_input("(Default)", &state.value_name)
                .on_input(Message::NameChanged)
                .padding(8),
        ),
        ui::info_row(
            "Type:",
            pick_list(&ValueKind::ALL[..], state.kind, Message::KindSelected),
        ),
        ui::info_row(
            "Data:",
            text_input("", &state.data)
                .on_input(Message::DataChanged)
                .padding(8),
        ),
        Space::with_height(10),
        row![
            button("Read").on_press(Message::Read).padding([8, 16]),
            button("Write").on_press(Message::Write).padding([8, 16]),
        ]
        .spacing(10),
    ]
    .spacing(10)
    .padding(22);

    container(content)
        .style(|theme| {
            ui::card_style(
                theme,
                iced::Color::from_rgb(0.15, 0.2, 0.25),
                iced::Color::from_rgb(0.3, 0.4, 0.5),
            )
        })
        .into()
}

fn remember(saved: &AppSettings) {
    if let Err(e) = settings::save(saved) {
        warn!("Failed to save settings: {}", e);
    }
}

async fn read_async(saved: AppSettings) -> Result<RegistryValue, String> {
    tokio::task::spawn_blocking(move || -> Result<RegistryValue, String> {
        let value = registry::read_value(&saved.path, &saved.value_name, saved.kind)
            .map_err(|e| e.to_string())?;
        remember(&saved);
        Ok(value)
    })
    .await
    .map_err(|e| e.to_string())?
}

async fn write_async(saved: AppSettings, value: RegistryValue) -> Result<String, String> {
    tokio::task::spawn_blocking(move || -> Result<String, String> {
        registry::write_value(&saved.path, &saved.value_name, &value)
            .map_err(|e| e.to_string())?;
        remember(&saved);
        Ok(format!("Wrote {} to {}", value, saved.path))
    })
    .await
    .map_err(|e| e.to_string())?
}
