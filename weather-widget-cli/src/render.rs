use weather_widget_core::{RenderSink, TemperatureUnit, ViewModel, ViewState, WeatherReading};

/// Prints controller state to stdout — the terminal stand-in for the
/// widget's display area.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl RenderSink for TerminalRenderer {
    fn render(&mut self, view: &ViewModel) {
        match &view.state {
            ViewState::Idle => {}
            ViewState::Loading { city } => println!("Loading weather for {city}..."),
            ViewState::Loaded(reading) => {
                println!("{}", format_reading(reading, view.unit));
            }
            ViewState::Failed { message, .. } => println!("Error: {message}"),
        }

        if !view.history.is_empty() {
            println!("Recent: {}", view.history.join(", "));
        }
    }
}

/// Rounding happens here, after conversion; the reading itself stays
/// unrounded Celsius.
fn format_reading(reading: &WeatherReading, unit: TemperatureUnit) -> String {
    let temp = unit.from_celsius(reading.temperature_c).round();
    let feels = unit.from_celsius(reading.feels_like_c).round();

    format!(
        "\n{}\n  {}{}  {}\n  Feels like: {}{}\n  Humidity:   {}%\n  Wind speed: {} m/s\n  Observed:   {}\n  Icon:       {}",
        reading.city_name,
        temp,
        unit.symbol(),
        reading.condition,
        feels,
        unit.symbol(),
        reading.humidity_pct,
        reading.wind_speed_ms,
        reading.observed_at.format("%Y-%m-%d %H:%M UTC"),
        reading.icon_url(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn london() -> WeatherReading {
        WeatherReading {
            city_name: "London".to_string(),
            temperature_c: 15.0,
            feels_like_c: 13.4,
            humidity_pct: 72,
            wind_speed_ms: 4.1,
            condition: "light rain".to_string(),
            icon_id: "10d".to_string(),
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn celsius_display_rounds_to_whole_degrees() {
        let out = format_reading(&london(), TemperatureUnit::Celsius);
        assert!(out.contains("15°C"));
        assert!(out.contains("Feels like: 13°C"));
    }

    #[test]
    fn fahrenheit_display_converts_then_rounds() {
        let out = format_reading(&london(), TemperatureUnit::Fahrenheit);
        assert!(out.contains("59°F"));
        assert!(out.contains("light rain"));
    }
}
