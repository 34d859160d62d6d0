use serde::{Deserialize, Serialize};
use crate::models::domain::{Car, CartItem, IdentificationOutcome, InventoryStats, Recommendation};

/// Response for the search results endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub exact_match: Option<Car>,
    pub similar: Vec<Car>,
    /// Summary of the criteria that produced the result
    pub criteria: String,
}

/// Response for the image scan endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResponse {
    pub identification: IdentificationOutcome,
    pub exact_match: Option<Car>,
    pub similar: Vec<Car>,
    pub criteria: String,
}

/// Response for the car listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarListResponse {
    pub cars: Vec<Car>,
    pub total_results: usize,
}

/// Cart contents with derived totals
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total: u64,
    pub item_count: u32,
    /// WhatsApp enquiry link for the first cart item, when a number is configured
    pub whatsapp_link: Option<String>,
}

/// Wishlist contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<Car>,
    pub count: usize,
}

/// Wishlist add outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistAddResponse {
    pub added: bool,
    pub message: String,
    pub count: usize,
}

/// Recommendations for a selected car
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
    /// "assistant", "inventory" or "generic"
    pub source: String,
}

/// WhatsApp enquiry link
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryResponse {
    pub car_id: String,
    pub message: String,
    pub link: String,
}

/// Admin overview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverviewResponse {
    pub user_id: String,
    pub stats: InventoryStats,
    pub active_sessions: usize,
    pub cached_recommendations: u64,
}

/// Contact form acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message_id: String,
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
