//! Reusable UI components.

use iced::widget::{button, container, row, text};
use iced::{Color, Element, Fill};

pub fn label_text(label: &str) -> text::Text<'_> {
    text(label).size(15).color(Color::from_rgb(0.7, 0.7, 0.7))
}

pub fn status_text(value: &str, is_ok: bool) -> text::Text<'_> {
    text(value).size(15).color(if is_ok {
        Color::from_rgb(0.4, 1.0, 0.4)
    } else {
        Color::from_rgb(1.0, 0.4, 0.4)
    })
}

pub fn info_row<'a, M: 'a>(
    label: &'a str,
    value: impl Into<Element<'a, M>>,
) -> iced::widget::Row<'a, M> {
    row![label_text(label).width(120), value.into()]
        .spacing(10)
        .align_y(iced::Alignment::Center)
}

pub fn card_style(_theme: &iced::Theme, bg_color: Color, border_color: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: border_color,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    }
}

pub fn warning_box<'a, M: Clone + 'static>(
    message: &'a str,
    on_restart: M,
) -> container::Container<'a, M> {
    container(
        row![
            text(message).size(13).width(Fill),
            restart_button(on_restart).padding([5, 10]),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center),
    )
    .padding(10)
    .style(|_theme| container::Style {
        background: Some(iced::Background::Color(Color::from_rgb(0.25, 0.2, 0.15))),
        border: iced::Border {
            color: Color::from_rgb(0.6, 0.5, 0.3),
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    })
}

pub fn restart_button<M: Clone>(on_press: M) -> button::Button<'static, M> {
    button("Restart as admin")
        .on_press(on_press)
        .style(|_theme, status| {
            let base_color = match status {
                button::Status::Hovered => Color::from_rgb(0.5, 0.4, 0.3),
                button::Status::Pressed => Color::from_rgb(0.35, 0.25, 0.15),
                _ => Color::from_rgb(0.4, 0.3, 0.2),
            };
            button::Style {
                background: Some(iced::Background::Color(base_color)),
                text_color: Color::WHITE,
                border: iced::Border {
                    radius: 6.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
}
