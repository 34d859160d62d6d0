// Core algorithm exports
pub mod criteria;
pub mod filters;
pub mod matcher;
pub mod recommend;
pub mod reviews;

pub use criteria::{criteria_from_identification, criteria_from_params};
pub use filters::{quick_search, soft_filter, hard_filter};
pub use matcher::{SearchMatcher, DEFAULT_SIMILAR_LIMIT};
pub use recommend::{recommend_from_inventory, RecommendationSource, RECOMMENDATION_LIMIT};
pub use reviews::{apply_review, validate_review, ReviewError};
