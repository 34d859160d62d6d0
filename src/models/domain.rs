use serde::{Deserialize, Deserializer, Serialize};

/// A car listed in the storefront inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    /// Listing price in whole AED
    pub price: u64,
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub reviews_count: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_ai_hint: Option<String>,
}

impl Car {
    /// First image, used as the thumbnail
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// "Make Model" label
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }
}

/// Customer review attached to a car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub car_id: String,
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Cart line: a car plus the requested quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub car: Car,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> u64 {
        self.car.price * self.quantity as u64
    }
}

/// Loosely structured search criteria
///
/// Every field is optional and independent. A missing (or blank) field means
/// "do not filter on this dimension".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Kept as text: it arrives from URLs and LLM output and is parsed lazily
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, rename = "q")]
    pub query: Option<String>,
    #[serde(default)]
    pub exact_match_id: Option<String>,
}

impl SearchCriteria {
    /// Drop blank values so that `Some("")` behaves like `None`
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.make,
            &mut self.model,
            &mut self.year,
            &mut self.color,
            &mut self.query,
            &mut self.exact_match_id,
        ] {
            *field = field
                .take()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
        }
        self
    }

    pub fn make(&self) -> Option<&str> {
        non_blank(&self.make)
    }

    pub fn model(&self) -> Option<&str> {
        non_blank(&self.model)
    }

    pub fn color(&self) -> Option<&str> {
        non_blank(&self.color)
    }

    pub fn query(&self) -> Option<&str> {
        non_blank(&self.query)
    }

    pub fn exact_match_id(&self) -> Option<&str> {
        non_blank(&self.exact_match_id)
    }

    /// Year as an integer, read from the leading digits
    ///
    /// `"2020-2022"` reads as 2020 and `"2023 (approx.)"` as 2023. Text with
    /// no leading digits means no year constraint.
    pub fn parsed_year(&self) -> Option<i32> {
        non_blank(&self.year).and_then(leading_integer)
    }

    pub fn is_empty(&self) -> bool {
        self.make().is_none()
            && self.model().is_none()
            && non_blank(&self.year).is_none()
            && self.color().is_none()
            && self.query().is_none()
            && self.exact_match_id().is_none()
    }

    /// Human readable summary, e.g. `Make: Toyota, Year: 2023`
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(make) = self.make() {
            parts.push(format!("Make: {}", make));
        }
        if let Some(model) = self.model() {
            parts.push(format!("Model: {}", model));
        }
        if let Some(year) = non_blank(&self.year) {
            parts.push(format!("Year: {}", year));
        }
        if let Some(color) = self.color() {
            parts.push(format!("Color: {}", color));
        }
        if let Some(query) = self.query() {
            parts.push(format!("Keywords: \"{}\"", query));
        }
        parts.join(", ")
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Optional sign followed by the leading run of ASCII digits
fn leading_integer(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    let value = rest[..end].parse::<i32>().ok()?;
    Some(if negative { -value } else { value })
}

/// Output of the search matcher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub exact_match: Option<Car>,
    pub similar: Vec<Car>,
}

/// Car details extracted from a photo by the assistant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedCarInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// LLMs return the year as text (sometimes as a number)
    #[serde(default, deserialize_with = "string_or_number", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Full identification answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationOutcome {
    #[serde(default)]
    pub car_info: IdentifiedCarInfo,
    #[serde(default)]
    pub match_found: bool,
    #[serde(default)]
    pub reasoning: String,
}

impl IdentificationOutcome {
    /// Empty outcome used when identification could not run
    pub fn unidentified(reasoning: impl Into<String>) -> Self {
        Self {
            car_info: IdentifiedCarInfo::default(),
            match_found: false,
            reasoning: reasoning.into(),
        }
    }
}

/// Suggested alternative to a selected car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Inventory id when the recommendation is a listed car
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    #[serde(default)]
    pub features: Vec<String>,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Aggregate figures shown in the admin overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStats {
    pub total_cars: usize,
    pub total_reviews: u32,
    pub average_price: f64,
    pub makes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_drops_blank_fields() {
        let criteria = SearchCriteria {
            make: Some("  ".to_string()),
            model: Some(" Camry ".to_string()),
            ..Default::default()
        }
        .normalized();

        assert_eq!(criteria.make, None);
        assert_eq!(criteria.model.as_deref(), Some("Camry"));
    }

    #[test]
    fn test_parsed_year_reads_leading_digits() {
        let year = |text: &str| SearchCriteria {
            year: Some(text.to_string()),
            ..Default::default()
        }
        .parsed_year();

        assert_eq!(year("2020-2022"), Some(2020));
        assert_eq!(year("2023 (approx.)"), Some(2023));
        assert_eq!(year("  2019"), Some(2019));
        assert_eq!(year("+2024"), Some(2024));
        assert_eq!(year("late 90s"), None);
        assert_eq!(year("-"), None);
    }

    #[test]
    fn test_parsed_year_ignores_garbage() {
        let criteria = SearchCriteria {
            year: Some("circa 2020".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.parsed_year(), None);

        let criteria = SearchCriteria {
            year: Some("2021".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.parsed_year(), Some(2021));
    }

    #[test]
    fn test_describe() {
        let criteria = SearchCriteria {
            make: Some("Toyota".to_string()),
            query: Some("family sedan".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.describe(), "Make: Toyota, Keywords: \"family sedan\"");
    }

    #[test]
    fn test_identification_deserializes_partial_payload() {
        let outcome: IdentificationOutcome =
            serde_json::from_str(r#"{"carInfo":{"make":"Honda"},"matchFound":false,"reasoning":"blurry"}"#)
                .unwrap();
        assert_eq!(outcome.car_info.make.as_deref(), Some("Honda"));
        assert_eq!(outcome.car_info.model, None);
        assert!(!outcome.match_found);
    }

    #[test]
    fn test_identified_year_accepts_number() {
        let info: IdentifiedCarInfo = serde_json::from_str(r#"{"make":"Ford","year":2024}"#).unwrap();
        assert_eq!(info.year.as_deref(), Some("2024"));
    }
}
