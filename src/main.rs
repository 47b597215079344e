use std::sync::Arc;

use anyhow::{Context, Result};
use skylook_core::{AppError, Config};
use skylook_ui::{render_suggestions, render_view, SearchController, SearchSettings, ServiceMessage};
use skylook_weather::{GeocodingClient, WeatherProvider};
use tokio::io::{AsyncBufReadExt, BufReader};

/// One line typed at the prompt
#[derive(Debug, PartialEq, Eq)]
enum Command {
    /// Replace the search text
    Text(String),
    /// Pick a suggestion (1-based)
    Select(usize),
    Quit,
}

fn parse_command(line: &str) -> Command {
    match line.strip_prefix(':') {
        Some("q") => Command::Quit,
        Some(rest) => match rest.trim().parse() {
            Ok(n) => Command::Select(n),
            Err(_) => Command::Text(line.to_string()),
        },
        None => Command::Text(line.to_string()),
    }
}

enum Event {
    Line(Option<String>),
    /// A line that could not be read (e.g. invalid UTF-8); skipped
    Unreadable(std::io::Error),
    Message(Option<ServiceMessage>),
}

impl Event {
    fn from_line(line: std::io::Result<Option<String>>) -> Self {
        match line {
            Ok(line) => Event::Line(line),
            Err(e) => Event::Unreadable(e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    skylook_core::init()?;

    let (config, _) = Config::load_validated(None).map_err(|e| {
        let error = AppError::from(e);
        eprintln!("{}", error.user_message());
        error
    })?;

    let search = GeocodingClient::new(
        &config.geocoding.base_url,
        config.http.timeout(),
        &config.http.user_agent,
    )
    .context("Failed to create geocoding client")?
    .with_count(config.geocoding.result_count)
    .with_language(config.geocoding.language.clone());

    let forecast = WeatherProvider::new(
        &config.forecast.base_url,
        config.http.timeout(),
        &config.http.user_agent,
    )
    .context("Failed to create weather provider")?;

    let mut controller = SearchController::new(
        Arc::new(search),
        Arc::new(forecast),
        SearchSettings::from(&config.search),
    )?;

    tracing::info!("Skylook started");
    println!("Skylook - city weather lookup");
    println!("Type a city name, :N to pick suggestion N, :q to quit.\n");
    print!("{}", render_view(controller.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::from_line(line),
            message = controller.next_message() => Event::Message(message),
        };

        match event {
            Event::Line(None) | Event::Message(None) => break,
            Event::Unreadable(e) => {
                tracing::warn!("Skipping unreadable input line: {}", e);
                println!("Could not read that line, please type it again.");
            }
            Event::Line(Some(line)) => match parse_command(&line) {
                Command::Quit => break,
                Command::Select(n) => {
                    match n.checked_sub(1).and_then(|i| controller.select(i)) {
                        Some(city) => {
                            println!("Selected {}", city.label());
                            print!("{}", render_view(controller.view()));
                        }
                        None => println!("No suggestion {}", n),
                    }
                }
                Command::Text(text) => controller.on_query_changed(text),
            },
            Event::Message(Some(message)) => {
                let is_weather = matches!(message, ServiceMessage::WeatherReady { .. });
                if !controller.apply(message) {
                    continue;
                }
                if is_weather {
                    print!("{}", render_view(controller.view()));
                } else if controller.suggestions().is_empty() {
                    println!("No matching cities.");
                } else {
                    print!("{}", render_suggestions(controller.suggestions()));
                }
            }
        }
    }

    tracing::info!("Skylook shutting down");
    Ok(())
}
