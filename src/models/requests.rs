use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of the search results page
///
/// `aiScanResult` carries a URL-encoded identification outcome and takes
/// precedence over the individual fields when it parses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchParams {
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<String>,
    pub color: Option<String>,
    pub q: Option<String>,
    #[serde(alias = "exact_match_id", rename = "exactMatchId")]
    pub exact_match_id: Option<String>,
    #[serde(alias = "ai_scan_result", rename = "aiScanResult")]
    pub ai_scan_result: Option<String>,
}

/// Landing page text search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListCarsParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Request to identify a car from a photo
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanRequest {
    /// `data:<mime>;base64,<payload>`
    #[validate(length(min = 1))]
    #[serde(alias = "photo_data_uri", rename = "photoDataUri")]
    pub photo_data_uri: String,
}

/// Add a car to the cart or wishlist
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CarRefRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "car_id", rename = "carId")]
    pub car_id: String,
}

/// Change the quantity of a cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i64,
}

/// New review for a car
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(min = 1, max = 50))]
    #[serde(alias = "user_name", rename = "userName")]
    pub user_name: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    #[validate(length(min = 1))]
    pub comment: String,
}

/// Optional free-text preferences for recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationParams {
    #[serde(default)]
    pub preferences: Option<String>,
}

/// Contact form submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}
