//! Open-Meteo current conditions

use crate::client::ThelewaleClient;
use crate::error::ApiResult;
use serde::Deserialize;
use thelewale_geo::Coordinate;
use thelewale_vendors::CurrentWeather;

/// Weather API interface
#[derive(Clone)]
pub struct WeatherApi {
    client: ThelewaleClient,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    temperature_2m: f64,
    relative_humidity_2m: f64,
}

impl From<ForecastResponse> for CurrentWeather {
    fn from(response: ForecastResponse) -> Self {
        CurrentWeather {
            temperature_c: response.current.temperature_2m,
            humidity_pct: response.current.relative_humidity_2m,
        }
    }
}

impl WeatherApi {
    pub(crate) fn new(client: ThelewaleClient) -> Self {
        Self { client }
    }

    /// GET {weather}/forecast?latitude=..&longitude=..&current=temperature_2m,relative_humidity_2m
    pub async fn current(&self, at: &Coordinate) -> ApiResult<CurrentWeather> {
        let latitude = at.latitude.to_string();
        let longitude = at.longitude.to_string();
        let url = self.client.external_url(
            &self.client.config().weather_url,
            "forecast",
            &[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", "temperature_2m,relative_humidity_2m"),
            ],
        )?;
        let response: ForecastResponse = self.client.get_url(&url).await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_meteo_current() {
        let response: ForecastResponse = serde_json::from_str(
            r#"{
                "latitude": 28.625,
                "longitude": 77.25,
                "current_units": {"temperature_2m": "°C", "relative_humidity_2m": "%"},
                "current": {"time": "2024-12-20T08:00", "interval": 900, "temperature_2m": 13.6, "relative_humidity_2m": 72}
            }"#,
        )
        .unwrap();
        let weather = CurrentWeather::from(response);
        assert_eq!(weather.temperature_c, 13.6);
        assert_eq!(weather.humidity_pct, 72.0);
    }
}
