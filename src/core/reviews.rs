use crate::models::{Car, Review};
use thiserror::Error;

/// Longest accepted reviewer name
pub const MAX_USER_NAME_LEN: usize = 50;

/// Reasons a review is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Name is required")]
    MissingName,

    #[error("Name must be at most 50 characters")]
    NameTooLong,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Comment is required")]
    MissingComment,
}

/// Check the user-supplied parts of a review
pub fn validate_review(user_name: &str, rating: u8, comment: &str) -> Result<(), ReviewError> {
    let name = user_name.trim();
    if name.is_empty() {
        return Err(ReviewError::MissingName);
    }
    if name.chars().count() > MAX_USER_NAME_LEN {
        return Err(ReviewError::NameTooLong);
    }
    if !(1..=5).contains(&rating) {
        return Err(ReviewError::InvalidRating(rating));
    }
    if comment.trim().is_empty() {
        return Err(ReviewError::MissingComment);
    }
    Ok(())
}

/// Attach a review to a car and recompute its rating aggregates
///
/// The average is rounded to one decimal place.
pub fn apply_review(car: &mut Car, review: Review) {
    car.reviews.push(review);
    car.reviews_count = car.reviews.len() as u32;

    let total: u32 = car.reviews.iter().map(|r| r.rating as u32).sum();
    let average = total as f64 / car.reviews.len() as f64;
    car.average_rating = (average * 10.0).round() / 10.0;
}
