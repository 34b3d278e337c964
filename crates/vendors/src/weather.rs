//! Weather-based food suggestions for the landing banner.

use crate::error::StoreResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thelewale_geo::Coordinate;

/// Current conditions at a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    /// Air temperature in °C
    pub temperature_c: f64,
    /// Relative humidity, 0-100
    pub humidity_pct: f64,
}

/// Source of current conditions.
pub trait WeatherSource: Send + Sync {
    fn current(&self, at: &Coordinate) -> impl Future<Output = StoreResult<CurrentWeather>> + Send;
}

/// Which banner to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherMood {
    Hot,
    Cold,
    Humid,
    Pleasant,
}

pub const HOT_FROM_C: f64 = 35.0;
pub const COLD_UP_TO_C: f64 = 15.0;
pub const HUMID_FROM_PCT: f64 = 80.0;

impl WeatherMood {
    /// Temperature extremes win over humidity.
    pub fn classify(weather: &CurrentWeather) -> Self {
        if weather.temperature_c >= HOT_FROM_C {
            WeatherMood::Hot
        } else if weather.temperature_c <= COLD_UP_TO_C {
            WeatherMood::Cold
        } else if weather.humidity_pct >= HUMID_FROM_PCT {
            WeatherMood::Humid
        } else {
            WeatherMood::Pleasant
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            WeatherMood::Hot => "Beat the heat with kulfi, lassi and nimbu pani",
            WeatherMood::Cold => "Order hot soups, chai and samosas on a cold day",
            WeatherMood::Humid => "Rainy mood? Pakoras and masala chai are calling",
            WeatherMood::Pleasant => "Perfect weather for a chaat crawl",
        }
    }

    /// Dishes worth searching for in this weather.
    pub fn dishes(&self) -> &'static [&'static str] {
        match self {
            WeatherMood::Hot => &["Kulfi", "Lassi", "Nimbu Pani", "Gola"],
            WeatherMood::Cold => &["Chai", "Samosa", "Momos", "Soup"],
            WeatherMood::Humid => &["Pakora", "Masala Chai", "Bhutta"],
            WeatherMood::Pleasant => &["Pani Puri", "Aloo Tikki", "Chole Bhature"],
        }
    }
}

/// Banner content derived from the weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherBanner {
    pub weather: CurrentWeather,
    pub mood: WeatherMood,
}

impl WeatherBanner {
    pub fn new(weather: CurrentWeather) -> Self {
        Self {
            mood: WeatherMood::classify(&weather),
            weather,
        }
    }
}

impl fmt::Display for WeatherBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0}°C, {:.0}% humidity. {}",
            self.weather.temperature_c,
            self.weather.humidity_pct,
            self.mood.headline()
        )
    }
}

/// Fetch conditions and build the banner.
pub async fn banner<W: WeatherSource>(source: &W, at: &Coordinate) -> StoreResult<WeatherBanner> {
    let weather = source.current(at).await?;
    tracing::debug!(temperature = weather.temperature_c, humidity = weather.humidity_pct, "weather fetched");
    Ok(WeatherBanner::new(weather))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temperature_c: f64, humidity_pct: f64) -> CurrentWeather {
        CurrentWeather { temperature_c, humidity_pct }
    }

    struct Fixed(CurrentWeather);

    impl WeatherSource for Fixed {
        async fn current(&self, _at: &Coordinate) -> StoreResult<CurrentWeather> {
            Ok(self.0)
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(WeatherMood::classify(&weather(41.0, 20.0)), WeatherMood::Hot);
        assert_eq!(WeatherMood::classify(&weather(35.0, 90.0)), WeatherMood::Hot);
        assert_eq!(WeatherMood::classify(&weather(9.0, 85.0)), WeatherMood::Cold);
        assert_eq!(WeatherMood::classify(&weather(28.0, 88.0)), WeatherMood::Humid);
        assert_eq!(WeatherMood::classify(&weather(24.0, 50.0)), WeatherMood::Pleasant);
    }

    #[tokio::test]
    async fn test_banner_text() {
        let source = Fixed(weather(12.4, 60.0));
        let banner = banner(&source, &Coordinate::new(28.6139, 77.2090)).await.unwrap();
        assert_eq!(banner.mood, WeatherMood::Cold);
        assert!(banner.to_string().starts_with("12°C, 60% humidity."));
        assert!(banner.mood.dishes().contains(&"Chai"));
    }
}
