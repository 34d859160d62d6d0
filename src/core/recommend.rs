use crate::models::{Car, Recommendation};

/// Number of recommendations shown next to a car
pub const RECOMMENDATION_LIMIT: usize = 3;

/// Minimum shared features for a car of another make to qualify
const MIN_SHARED_FEATURES: usize = 2;

/// Where a list of recommendations came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationSource {
    /// Produced by the LLM assistant
    Assistant,
    /// Inventory cars related to the selection by make or features
    Inventory,
    /// Nothing related was found; first cars of the inventory instead
    Generic,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Assistant => "assistant",
            RecommendationSource::Inventory => "inventory",
            RecommendationSource::Generic => "generic",
        }
    }
}

/// Count features the two cars have in common (exact string equality)
#[inline]
pub fn shared_feature_count(a: &Car, b: &Car) -> usize {
    a.features.iter().filter(|f| b.features.contains(f)).count()
}

/// Recommend alternatives to `selected` from the inventory alone
///
/// Same-make cars come first, then cars sharing at least two features.
/// When nothing is related the first other cars of the inventory are used
/// and the source is `Generic`.
pub fn recommend_from_inventory(
    selected: &Car,
    inventory: &[Car],
) -> (Vec<Recommendation>, RecommendationSource) {
    let others = move || inventory.iter().filter(move |car| car.id != selected.id);

    let mut picked: Vec<&Car> = others().filter(|car| car.make == selected.make).collect();

    if picked.len() < RECOMMENDATION_LIMIT {
        for car in others().filter(|car| shared_feature_count(car, selected) >= MIN_SHARED_FEATURES) {
            if !picked.iter().any(|p| p.id == car.id) {
                picked.push(car);
            }
        }
    }

    let source = if picked.is_empty() {
        picked = others().take(RECOMMENDATION_LIMIT).collect();
        RecommendationSource::Generic
    } else {
        picked.truncate(RECOMMENDATION_LIMIT);
        RecommendationSource::Inventory
    };

    let recommendations = picked
        .into_iter()
        .map(|car| {
            let reasoning = match source {
                RecommendationSource::Generic => "Popular pick from our collection".to_string(),
                _ if car.make == selected.make => format!("Similar make to {}", selected.make),
                _ => "Shares common features".to_string(),
            };
            to_recommendation(car, reasoning)
        })
        .collect();

    (recommendations, source)
}

/// Present an inventory car as a recommendation
pub fn to_recommendation(car: &Car, reasoning: String) -> Recommendation {
    Recommendation {
        id: Some(car.id.clone()),
        make: car.make.clone(),
        model: car.model.clone(),
        year: car.year,
        price: car.price as f64,
        features: car.features.clone(),
        reasoning,
        image_url: car.primary_image().map(str::to_string),
    }
}
