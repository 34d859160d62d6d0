// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Car, Review, CartItem, SearchCriteria, MatchResult, IdentifiedCarInfo, IdentificationOutcome, Recommendation, InventoryStats};
pub use requests::{SearchParams, ListCarsParams, ScanRequest, CarRefRequest, UpdateQuantityRequest, ReviewRequest, RecommendationParams, ContactRequest};
pub use responses::{SearchResponse, ScanResponse, CarListResponse, CartResponse, WishlistResponse, WishlistAddResponse, RecommendationsResponse, EnquiryResponse, AdminOverviewResponse, ContactResponse, HealthResponse, ErrorResponse};
