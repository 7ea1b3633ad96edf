use weather_compare_core::{ViewMode, WeatherRecord};

pub fn record(record: &WeatherRecord) -> String {
    let mut out = format!(
        "{}\n  Temp: {}°C\n  Humidity: {}%\n  Condition: {}",
        record.name, record.temperature, record.humidity, record.condition
    );
    if let Some(at) = record.observed_at {
        out.push_str(&format!("\n  Observed: {}", at.format("%Y-%m-%d %H:%M UTC")));
    }
    out
}

pub fn view(view: &ViewMode) -> String {
    match view {
        ViewMode::Idle => "No weather looked up yet.".to_string(),
        ViewMode::Single(r) => record(r),
        ViewMode::Comparing { left, right } => {
            format!("[left]  {}\n[right] {}", slot(left.as_ref()), slot(right.as_ref()))
        }
    }
}

fn slot(record: Option<&WeatherRecord>) -> String {
    match record {
        Some(r) => self::record(r),
        None => "(empty)".to_string(),
    }
}

pub fn favorites(favorites: &[String]) -> String {
    if favorites.is_empty() {
        return "No favorite cities yet.".to_string();
    }
    let mut out = String::from("Favorite cities:");
    for city in favorites {
        out.push_str(&format!("\n  * {city}"));
    }
    out
}
