use crate::models::{Car, MatchResult, SearchCriteria};
use crate::core::filters::{
    hard_filter, matches_make, matches_model, mentions_any_keyword, mentions_color,
    query_keywords, soft_filter, year_within,
};

/// Default number of similar cars returned next to the exact match
pub const DEFAULT_SIMILAR_LIMIT: usize = 6;

/// Year tolerance used when the exact year finds nothing
const YEAR_TOLERANCE: i32 = 1;

/// Search orchestrator - maps loosely identified criteria onto the inventory
///
/// # Pipeline Stages
/// 1. Exact match by id (excluded from the working set)
/// 2. Make (hard)
/// 3. Model (soft within a make, hard on its own)
/// 4. Year (exact, then widened by one year)
/// 5. Color (soft)
/// 6. Free-text keywords (soft)
/// 7. Late exact match on make + model
/// 8. Truncation, inventory order preserved
///
/// Soft stages fall back to their input when they would eliminate every
/// candidate. The make stage never falls back.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    similar_limit: usize,
}

impl SearchMatcher {
    pub fn new(similar_limit: usize) -> Self {
        Self { similar_limit }
    }

    pub fn similar_limit(&self) -> usize {
        self.similar_limit
    }

    /// Match criteria against an inventory snapshot
    ///
    /// Pure and deterministic: the same criteria and inventory always give
    /// the same result. Never fails; no match is an empty `similar` list.
    pub fn find(&self, criteria: &SearchCriteria, inventory: &[Car]) -> MatchResult {
        let make = criteria.make();
        let model = criteria.model();

        // Stage 1: exact match by id
        let mut exact_match: Option<&Car> = criteria
            .exact_match_id()
            .and_then(|id| inventory.iter().find(|car| car.id == id));

        let mut working: Vec<&Car> = match exact_match {
            Some(exact) => inventory.iter().filter(|car| car.id != exact.id).collect(),
            None => inventory.iter().collect(),
        };

        // Stage 2: make
        if let Some(make) = make {
            working = hard_filter(working, |car| matches_make(car, make));
        }

        // Stage 3: model
        match (make, model) {
            (Some(_), Some(model)) => {
                // Other models of the same make stay candidates
                working = soft_filter(working, |car| matches_model(car, model));
            }
            (None, Some(model)) => {
                working = hard_filter(working, |car| matches_model(car, model));
            }
            _ => {}
        }

        tracing::debug!("After make/model stages: {} candidates", working.len());

        // Stage 4: year
        if let Some(target) = criteria.parsed_year() {
            let has_identity = make.is_some() || model.is_some();

            let mut by_year: Vec<&Car> = working
                .iter()
                .copied()
                .filter(|car| car.year == target)
                .collect();

            if by_year.is_empty() && has_identity {
                by_year = working
                    .iter()
                    .copied()
                    .filter(|car| year_within(car, target, YEAR_TOLERANCE))
                    .collect();
            }

            // Without make or model the year is the primary signal, even if empty
            if !by_year.is_empty() || !has_identity {
                working = by_year;
            }
        }

        // Stage 5: color
        if let Some(color) = criteria.color() {
            working = soft_filter(working, |car| mentions_color(car, color));
        }

        // Stage 6: free text
        if let Some(query) = criteria.query() {
            let keywords = query_keywords(query);
            if !keywords.is_empty() {
                working = soft_filter(working, |car| mentions_any_keyword(car, &keywords));
            }
        }

        // Stage 7: late exact match
        if exact_match.is_none() {
            if let (Some(make), Some(model)) = (make, model) {
                if let Some(position) = working
                    .iter()
                    .position(|car| matches_make(car, make) && matches_model(car, model))
                {
                    exact_match = Some(working.remove(position));
                }
            }
        }

        // Stage 8: truncate
        working.truncate(self.similar_limit);

        tracing::debug!(
            "Search matched exact={:?}, similar={}",
            exact_match.map(|car| car.id.as_str()),
            working.len()
        );

        MatchResult {
            exact_match: exact_match.cloned(),
            similar: working.into_iter().cloned().collect(),
        }
    }
}

impl Default for SearchMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SIMILAR_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_car(id: &str, make: &str, model: &str, year: i32, description: &str) -> Car {
        Car {
            id: id.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
            price: 100_000,
            description: description.to_string(),
            image_urls: vec![],
            features: vec![],
            average_rating: 0.0,
            reviews_count: 0,
            reviews: vec![],
            data_ai_hint: None,
        }
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria::default()
    }

    fn ids(cars: &[Car]) -> Vec<&str> {
        cars.iter().map(|c| c.id.as_str()).collect()
    }

    fn sample_inventory() -> Vec<Car> {
        vec![
            create_car("1", "Toyota", "Camry", 2023, "Silver family sedan"),
            create_car("2", "Toyota", "Corolla", 2023, "Red compact"),
            create_car("3", "Honda", "Civic", 2023, "Red sporty compact"),
            create_car("4", "Ford", "Explorer", 2024, "Blue SUV with three rows"),
            create_car("5", "Toyota", "Camry", 2021, "Older silver sedan"),
        ]
    }

    #[test]
    fn test_make_only() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria { make: Some("toyota".into()), ..criteria() },
            &inventory,
        );

        assert!(result.exact_match.is_none());
        assert_eq!(ids(&result.similar), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_exact_match_by_id_is_excluded_from_similar() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria {
                make: Some("Toyota".into()),
                exact_match_id: Some("2".into()),
                ..criteria()
            },
            &inventory,
        );

        assert_eq!(result.exact_match.as_ref().map(|c| c.id.as_str()), Some("2"));
        assert_eq!(ids(&result.similar), vec!["1", "5"]);
    }

    #[test]
    fn test_unknown_exact_id_is_ignored() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria { exact_match_id: Some("missing".into()), ..criteria() },
            &inventory,
        );

        assert!(result.exact_match.is_none());
        assert_eq!(result.similar.len(), 5);
    }

    #[test]
    fn test_late_exact_match_promotes_first_make_model_hit() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria {
                make: Some("Toyota".into()),
                model: Some("camry".into()),
                ..criteria()
            },
            &inventory,
        );

        assert_eq!(result.exact_match.as_ref().map(|c| c.id.as_str()), Some("1"));
        assert_eq!(ids(&result.similar), vec!["5"]);
    }

    #[test]
    fn test_model_backs_off_within_make() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria {
                make: Some("Toyota".into()),
                model: Some("Supra".into()),
                ..criteria()
            },
            &inventory,
        );

        assert!(result.exact_match.is_none());
        assert_eq!(ids(&result.similar), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_model_only_is_hard() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria { model: Some("Supra".into()), ..criteria() },
            &inventory,
        );

        assert!(result.similar.is_empty());
    }

    #[test]
    fn test_year_alone_is_authoritative() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria { year: Some("2022".into()), ..criteria() },
            &inventory,
        );

        // No widening and no back-off without make or model
        assert!(result.similar.is_empty());
    }

    #[test]
    fn test_year_widens_with_make() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria {
                make: Some("Toyota".into()),
                year: Some("2022".into()),
                ..criteria()
            },
            &inventory,
        );

        assert_eq!(ids(&result.similar), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_year_backs_off_when_widening_fails() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria {
                make: Some("Ford".into()),
                year: Some("1999".into()),
                ..criteria()
            },
            &inventory,
        );

        assert_eq!(ids(&result.similar), vec!["4"]);
    }

    #[test]
    fn test_unparseable_year_skips_stage() {
        let inventory = sample_inventory();
        let result = SearchMatcher::default().find(
            &SearchCriteria { year: Some("late 90s".into()), ..criteria() },
            &inventory,
        );

        assert_eq!(result.similar.len(), 5);
    }

    #[test]
    fn test_color_is_soft() {
        let inventory = sample_inventory();
        let matcher = SearchMatcher::default();

        let red = matcher.find(&SearchCriteria { color: Some("RED".into()), ..criteria() }, &inventory);
        assert_eq!(ids(&red.similar), vec!["2", "3"]);

        let green = matcher.find(&SearchCriteria { color: Some("green".into()), ..criteria() }, &inventory);
        assert_eq!(green.similar.len(), 5);
    }

    #[test]
    fn test_free_text_any_keyword() {
        let inventory = sample_inventory();
        let matcher = SearchMatcher::default();

        let result = matcher.find(&SearchCriteria { query: Some("an suv".into()), ..criteria() }, &inventory);
        assert_eq!(ids(&result.similar), vec!["4"]);

        let result = matcher.find(&SearchCriteria { query: Some("spaceship".into()), ..criteria() }, &inventory);
        assert_eq!(result.similar.len(), 5);
    }

    #[test]
    fn test_respects_limit() {
        let inventory: Vec<Car> = (0..20)
            .map(|i| create_car(&i.to_string(), "Toyota", "Camry", 2023, ""))
            .collect();

        let result = SearchMatcher::new(4).find(&criteria(), &inventory);
        assert_eq!(ids(&result.similar), vec!["0", "1", "2", "3"]);
    }
}
