use crate::models::Car;

/// Minimum length (exclusive) of a free-text word to be used as a keyword
const MIN_KEYWORD_LEN: usize = 2;

/// Case-insensitive equality on the make
#[inline]
pub fn matches_make(car: &Car, make: &str) -> bool {
    car.make.to_lowercase() == make.to_lowercase()
}

/// Case-insensitive equality on the model
#[inline]
pub fn matches_model(car: &Car, model: &str) -> bool {
    car.model.to_lowercase() == model.to_lowercase()
}

/// Model year within `tolerance` years of `target`
#[inline]
pub fn year_within(car: &Car, target: i32, tolerance: i32) -> bool {
    (car.year - target).abs() <= tolerance
}

/// Does the car's description or feature list mention the color?
///
/// Cars carry no color attribute, so this is a substring check over the
/// listing text.
#[inline]
pub fn mentions_color(car: &Car, color: &str) -> bool {
    let text = format!("{} {}", car.description, car.features.join(" ")).to_lowercase();
    text.contains(&color.to_lowercase())
}

/// Split a free-text query into lowercase keywords, dropping short words
pub fn query_keywords(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
        .map(str::to_string)
        .collect()
}

/// Does any keyword appear in the car's make, model, description or features?
#[inline]
pub fn mentions_any_keyword(car: &Car, keywords: &[String]) -> bool {
    let text = format!(
        "{} {} {} {}",
        car.make,
        car.model,
        car.description,
        car.features.join(" ")
    )
    .to_lowercase();
    keywords.iter().any(|word| text.contains(word.as_str()))
}

/// Keep only the cars satisfying `predicate`, even if none remain
pub fn hard_filter<'a, F>(cars: Vec<&'a Car>, predicate: F) -> Vec<&'a Car>
where
    F: Fn(&Car) -> bool,
{
    cars.into_iter().filter(|car| predicate(car)).collect()
}

/// Keep only the cars satisfying `predicate`, unless that would leave none,
/// in which case the input comes back untouched
pub fn soft_filter<'a, F>(cars: Vec<&'a Car>, predicate: F) -> Vec<&'a Car>
where
    F: Fn(&Car) -> bool,
{
    let filtered: Vec<&Car> = cars.iter().copied().filter(|car| predicate(car)).collect();
    if filtered.is_empty() {
        cars
    } else {
        filtered
    }
}

/// Landing page search box
///
/// Single pass, case-insensitive substring match of the query against the
/// make, the model, the year and the "make model" / "make model year"
/// labels. A blank query returns the whole inventory. Surrounding spaces
/// are part of the needle, so `"toyota "` only matches where a space follows.
pub fn quick_search<'a>(query: &str, inventory: &'a [Car]) -> Vec<&'a Car> {
    if query.trim().is_empty() {
        return inventory.iter().collect();
    }
    let needle = query.to_lowercase();

    inventory
        .iter()
        .filter(|car| {
            let make = car.make.to_lowercase();
            let model = car.model.to_lowercase();
            let year = car.year.to_string();

            make.contains(&needle)
                || model.contains(&needle)
                || year.contains(&needle)
                || format!("{} {}", make, model).contains(&needle)
                || format!("{} {} {}", make, model, year).contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_car(id: &str, make: &str, model: &str, year: i32) -> Car {
        Car {
            id: id.to_string(),
            make: make.to_string(),
            model: model.to_string(),
            year,
            price: 100_000,
            description: "A reliable sedan in metallic silver".to_string(),
            image_urls: vec![],
            features: vec!["Fuel Efficient".to_string(), "Apple CarPlay".to_string()],
            average_rating: 0.0,
            reviews_count: 0,
            reviews: vec![],
            data_ai_hint: None,
        }
    }

    #[test]
    fn test_make_and_model_ignore_case() {
        let car = create_test_car("1", "Toyota", "Camry", 2023);
        assert!(matches_make(&car, "TOYOTA"));
        assert!(matches_model(&car, "camry"));
        assert!(!matches_make(&car, "Toyot"));
    }

    #[test]
    fn test_year_tolerance() {
        let car = create_test_car("1", "Toyota", "Camry", 2023);
        assert!(year_within(&car, 2023, 0));
        assert!(year_within(&car, 2024, 1));
        assert!(!year_within(&car, 2025, 1));
    }

    #[test]
    fn test_color_checks_description_and_features() {
        let car = create_test_car("1", "Toyota", "Camry", 2023);
        assert!(mentions_color(&car, "Silver"));
        assert!(mentions_color(&car, "carplay"));
        assert!(!mentions_color(&car, "red"));
    }

    #[test]
    fn test_query_keywords_drop_short_words() {
        assert_eq!(query_keywords("A red SUV is on"), vec!["red", "suv"]);
        assert!(query_keywords("a an of").is_empty());
    }

    #[test]
    fn test_keyword_match_any() {
        let car = create_test_car("1", "Toyota", "Camry", 2023);
        assert!(mentions_any_keyword(&car, &query_keywords("fast camry")));
        assert!(!mentions_any_keyword(&car, &query_keywords("pickup truck")));
    }

    #[test]
    fn test_soft_filter_backs_off() {
        let a = create_test_car("1", "Toyota", "Camry", 2023);
        let b = create_test_car("2", "Honda", "Civic", 2023);
        let cars = vec![&a, &b];

        let kept = soft_filter(cars.clone(), |c| c.make == "Honda");
        assert_eq!(kept.len(), 1);

        let kept = soft_filter(cars.clone(), |c| c.make == "Ford");
        assert_eq!(kept.len(), 2);

        let kept = hard_filter(cars, |c| c.make == "Ford");
        assert!(kept.is_empty());
    }

    #[test]
    fn test_quick_search() {
        let inventory = vec![
            create_test_car("1", "Toyota", "Camry", 2023),
            create_test_car("2", "Tesla", "Model 3", 2024),
        ];

        assert_eq!(quick_search("", &inventory).len(), 2);
        assert_eq!(quick_search("toyota camry", &inventory).len(), 1);
        assert_eq!(quick_search("TESLA MODEL 3 2024", &inventory).len(), 1);
        assert_eq!(quick_search("202", &inventory).len(), 2);
        assert!(quick_search("camry toyota", &inventory).is_empty());
    }

    #[test]
    fn test_quick_search_keeps_surrounding_spaces() {
        let inventory = vec![
            create_test_car("1", "Toyota", "Camry", 2023),
            create_test_car("2", "Tesla", "Model 3", 2024),
        ];

        assert_eq!(quick_search("   ", &inventory).len(), 2);
        assert_eq!(quick_search("toyota ", &inventory).len(), 1);
        assert_eq!(quick_search("model 3 ", &inventory).len(), 1);
        assert!(quick_search(" toyota", &inventory).is_empty());
    }
}
