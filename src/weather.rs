use std::time::Duration;

use tracing::{debug, warn};
use ureq::{Agent, AgentBuilder};
use urlencoding::encode;

use crate::error::{Error, Result};
use crate::models::WeatherResponse;

const WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const WEATHER_TIMEOUT: Duration = Duration::from_secs(5);

/// The weather boundary: a city in, a short description out, or nothing at all
#[cfg_attr(test, mockall::automock)]
pub trait WeatherProvider {
    /// Never fails; any problem means "no weather data"
    fn lookup(&self, city: &str) -> Option<String>;
}

/// OpenWeatherMap current-weather client
pub struct WeatherClient {
    agent: Agent,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(api_key: Option<String>) -> Self {
        let agent = AgentBuilder::new().timeout(WEATHER_TIMEOUT).build();
        Self { agent, api_key }
    }

    fn fetch(&self, api_key: &str, city: &str) -> Result<String> {
        let url = format!(
            "{WEATHER_API_URL}?q={}&appid={}&units=metric",
            encode(city),
            encode(api_key)
        );

        let response = self.agent.get(&url).call()?;
        let parsed: WeatherResponse = response
            .into_json()
            .map_err(|e| Error::malformed(format!("weather body: {e}")))?;

        describe(&parsed).ok_or_else(|| Error::malformed("weather response had no conditions"))
    }
}

impl WeatherProvider for WeatherClient {
    fn lookup(&self, city: &str) -> Option<String> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("No weather API key configured, skipping lookup");
            return None;
        };

        match self.fetch(api_key, city) {
            Ok(description) => {
                debug!(city, %description, "Weather lookup succeeded");
                Some(description)
            }
            Err(e) => {
                warn!(city, error = %e, "Weather lookup failed, continuing without weather");
                None
            }
        }
    }
}

/// Summarize a weather response as e.g. `light rain, 11°C`
pub fn describe(response: &WeatherResponse) -> Option<String> {
    let condition = response.weather.first()?.description.trim();
    if condition.is_empty() {
        return None;
    }
    Some(match &response.main {
        Some(readings) => format!("{condition}, {:.0}°C", readings.temp),
        None => condition.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WeatherCondition, WeatherReadings};

    fn response(description: &str, temp: Option<f64>) -> WeatherResponse {
        WeatherResponse {
            weather: vec![WeatherCondition {
                description: description.to_string(),
            }],
            main: temp.map(|temp| WeatherReadings { temp }),
        }
    }

    #[test]
    fn test_describe_with_temperature() {
        assert_eq!(
            describe(&response("light rain", Some(11.4))).as_deref(),
            Some("light rain, 11°C")
        );
        assert_eq!(describe(&response("clear sky", None)).as_deref(), Some("clear sky"));
    }

    #[test]
    fn test_describe_without_conditions() {
        let empty = WeatherResponse {
            weather: vec![],
            main: None,
        };
        assert!(describe(&empty).is_none());
        assert!(describe(&response("  ", Some(3.0))).is_none());
    }

    #[test]
    fn test_lookup_without_key_or_city_is_absent() {
        let no_key = WeatherClient::new(None);
        assert!(no_key.lookup("Seoul").is_none());

        let keyed = WeatherClient::new(Some("key".to_string()));
        assert!(keyed.lookup("   ").is_none());
    }
}
