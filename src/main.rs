#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
mod app;
#[cfg(windows)]
mod ui;

#[cfg(windows)]
fn main() -> anyhow::Result<()> {
    use iced::Theme;

    win_utilities::logger::init();

    iced::application("Registry Editor", app::update, app::view)
        .theme(|_| Theme::Dark)
        .window(iced::window::Settings {
            size: iced::Size::new(640.0, 520.0),
            ..Default::default()
        })
        .run_with(app::init)?;
    Ok(())
}

#[cfg(not(windows))]
fn main() -> anyhow::Result<()> {
    win_utilities::logger::init();
    anyhow::bail!("the registry editor only runs on Windows")
}
