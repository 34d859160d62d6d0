//! CarHub - storefront service for a used car dealership
//!
//! This library provides the inventory, search matching, cart, wishlist,
//! review and AI assistant features behind the CarHub storefront.
//! The search pipeline narrows the inventory with hard and soft filters
//! so a shopper always sees something close to what they asked for.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{SearchMatcher, quick_search, DEFAULT_SIMILAR_LIMIT};
pub use models::{Car, SearchCriteria, MatchResult, IdentifiedCarInfo, Recommendation};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let cars = services::inventory::seed_cars();
        let result = SearchMatcher::default().find(&SearchCriteria::default(), &cars);
        assert_eq!(result.similar.len(), DEFAULT_SIMILAR_LIMIT);
    }
}
