use anyhow::Result;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use weather_widget_core::{
    Config, FileStore, HistoryStore, OpenWeatherClient, TemperatureUnit, WeatherController,
};

use crate::render::TerminalRenderer;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "City weather search widget")]
pub struct Cli {
    /// With no subcommand, starts the interactive widget.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// One-shot: show current weather for a city.
    Search {
        /// City name.
        city: String,

        /// Show temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Some(Command::Configure) => configure(),
            Some(Command::Search { city, fahrenheit }) => {
                let mut controller = build_controller()?;
                if fahrenheit {
                    controller.set_unit(TemperatureUnit::Fahrenheit);
                }
                controller.search(&city).await;
                Ok(())
            }
            None => interactive().await,
        }
    }
}

fn build_controller() -> Result<WeatherController<FileStore>> {
    let config = Config::load()?;
    let api_key = config.api_key()?;

    Ok(WeatherController::new(
        Box::new(OpenWeatherClient::new(api_key)),
        HistoryStore::load(FileStore::open_default()?),
        Box::new(TerminalRenderer),
    ))
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

const ACTION_SEARCH: &str = "Search a city";
const ACTION_HISTORY: &str = "Search from history";
const ACTION_TOGGLE: &str = "Toggle °C/°F";
const ACTION_REMOVE: &str = "Remove a history entry";
const ACTION_CLEAR: &str = "Clear history";
const ACTION_QUIT: &str = "Quit";

/// The widget loop: one controller for the whole session, every user
/// action mapped onto a controller method.
async fn interactive() -> Result<()> {
    let mut controller = build_controller()?;
    controller.render_now();

    loop {
        let mut actions = vec![ACTION_SEARCH];
        if !controller.history().is_empty() {
            actions.extend([ACTION_HISTORY, ACTION_REMOVE, ACTION_CLEAR]);
        }
        actions.extend([ACTION_TOGGLE, ACTION_QUIT]);

        let prompt = format!("What next? (showing {})", controller.unit().symbol());
        let action = match Select::new(&prompt, actions).prompt() {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match action {
            ACTION_SEARCH => {
                let initial = controller.view().retained_input.unwrap_or_default();
                match Text::new("City:").with_initial_value(&initial).prompt() {
                    Ok(city) => controller.search(&city).await,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(err) => return Err(err.into()),
                }
            }
            ACTION_HISTORY => {
                if let Some(city) = pick_history_entry(&controller, "Recent searches:")? {
                    controller.search(&city).await;
                }
            }
            ACTION_REMOVE => {
                if let Some(city) = pick_history_entry(&controller, "Remove which entry?")? {
                    controller.remove_history_entry(&city);
                }
            }
            ACTION_CLEAR => controller.clear_history(),
            ACTION_TOGGLE => controller.toggle_unit(),
            _ => break,
        }
    }

    Ok(())
}

fn pick_history_entry(
    controller: &WeatherController<FileStore>,
    prompt: &str,
) -> Result<Option<String>> {
    match Select::new(prompt, controller.history().to_vec()).prompt() {
        Ok(city) => Ok(Some(city)),
        Err(InquireError::OperationCanceled) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
