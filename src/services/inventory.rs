use crate::core::reviews::apply_review;
use crate::models::{Car, InventoryStats, Review};
use chrono::{Duration, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur with inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Car not found: {0}")]
    NotFound(String),
}

/// In-memory car inventory
///
/// Loaded once at startup and only mutated by review submissions.
pub struct Inventory {
    cars: RwLock<Vec<Car>>,
}

impl Inventory {
    pub fn new(cars: Vec<Car>) -> Self {
        Self {
            cars: RwLock::new(cars),
        }
    }

    /// Inventory seeded with the storefront catalogue
    pub fn seeded() -> Self {
        Self::new(seed_cars())
    }

    /// Snapshot of every car, in listing order
    pub async fn all(&self) -> Vec<Car> {
        self.cars.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Car> {
        self.cars.read().await.iter().find(|car| car.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.cars.read().await.len()
    }

    /// Attach a review and return the updated car
    pub async fn add_review(&self, car_id: &str, review: Review) -> Result<Car, InventoryError> {
        let mut cars = self.cars.write().await;
        let car = cars
            .iter_mut()
            .find(|car| car.id == car_id)
            .ok_or_else(|| InventoryError::NotFound(car_id.to_string()))?;

        apply_review(car, review);

        tracing::debug!(
            "Car {} now has {} reviews (avg {:.1})",
            car.id,
            car.reviews_count,
            car.average_rating
        );

        Ok(car.clone())
    }

    /// Figures for the admin overview
    pub async fn stats(&self) -> InventoryStats {
        let cars = self.cars.read().await;

        let total_reviews = cars.iter().map(|car| car.reviews_count).sum();
        let average_price = if cars.is_empty() {
            0.0
        } else {
            cars.iter().map(|car| car.price as f64).sum::<f64>() / cars.len() as f64
        };

        let mut makes: Vec<String> = Vec::new();
        for car in cars.iter() {
            if !makes.contains(&car.make) {
                makes.push(car.make.clone());
            }
        }

        InventoryStats {
            total_cars: cars.len(),
            total_reviews,
            average_price,
            makes,
        }
    }
}

fn seed_review(id: &str, car_id: &str, user_name: &str, rating: u8, comment: &str, days_ago: i64) -> Review {
    Review {
        id: id.to_string(),
        car_id: car_id.to_string(),
        user_name: user_name.to_string(),
        rating,
        comment: comment.to_string(),
        created_at: Utc::now() - Duration::days(days_ago),
    }
}

#[allow(clippy::too_many_arguments)]
fn seed_car(
    id: &str,
    make: &str,
    model: &str,
    year: i32,
    price: u64,
    description: &str,
    image_urls: &[&str],
    hint: &str,
    features: &[&str],
    average_rating: f64,
    reviews_count: u32,
    reviews: Vec<Review>,
) -> Car {
    Car {
        id: id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        price,
        description: description.to_string(),
        image_urls: image_urls.iter().map(|s| s.to_string()).collect(),
        features: features.iter().map(|s| s.to_string()).collect(),
        average_rating,
        reviews_count,
        reviews,
        data_ai_hint: Some(hint.to_string()),
    }
}

/// The storefront catalogue
pub fn seed_cars() -> Vec<Car> {
    let reviews = vec![
        seed_review("r1", "1", "Alice", 5, "Absolutely love this car! Smooth ride and great features.", 2),
        seed_review("r2", "1", "Bob", 4, "Very reliable and fuel-efficient. Good value for money.", 5),
        seed_review("r3", "2", "Charlie", 4, "Powerful engine and stylish design. A bit pricey though.", 1),
        seed_review("r4", "3", "Diana", 5, "Perfect family SUV. Lots of space and safety features.", 3),
    ];
    let reviews_for = |car_id: &str| -> Vec<Review> {
        reviews.iter().filter(|r| r.car_id == car_id).cloned().collect()
    };

    vec![
        seed_car(
            "1", "Toyota", "Camry", 2023, 104_595,
            "A reliable and comfortable mid-size sedan, perfect for families and daily commutes. Known for its fuel efficiency and smooth ride.",
            &["/camry.jpeg", "/camry2.jpeg", "/camry3.jpg"],
            "sedan silver",
            &["Fuel Efficient", "Spacious Interior", "Advanced Safety Features", "Smooth Ride", "Apple CarPlay"],
            4.7, 120, reviews_for("1"),
        ),
        seed_car(
            "2", "Honda", "Civic", 2023, 91_750,
            "A compact car that offers a sporty driving experience, excellent fuel economy, and a refined interior.",
            &["/civic.jpeg"],
            "sedan red",
            &["Sporty Handling", "Fuel Efficient", "Modern Infotainment", "Reliable"],
            4.6, 95, reviews_for("2"),
        ),
        seed_car(
            "3", "Ford", "Explorer", 2024, 154_140,
            "A versatile and spacious SUV with three rows of seating, powerful engine options, and a comfortable ride.",
            &["/explorer.jpeg"],
            "suv blue",
            &["Three-Row Seating", "Powerful Engine", "Ample Cargo Space", "Towing Capacity"],
            4.4, 75, reviews_for("3"),
        ),
        seed_car(
            "4", "Tesla", "Model 3", 2023, 146_800,
            "An all-electric sedan with impressive range, cutting-edge technology, and exhilarating performance.",
            &["/model3.jpeg"],
            "electric white",
            &["Electric Vehicle", "Long Range", "Autopilot Capable", "Minimalist Interior", "Large Touchscreen"],
            4.8, 150, vec![],
        ),
        seed_car(
            "5", "BMW", "X5", 2024, 238_550,
            "A luxury mid-size SUV that combines performance, comfort, and advanced technology in a stylish package.",
            &["/bmwx5.jpeg"],
            "suv black",
            &["Luxury Interior", "Performance Engine Options", "Advanced Driver Assists", "Panoramic Sunroof"],
            4.7, 60, vec![],
        ),
        seed_car(
            "6", "Audi", "A4", 2023, 157_810,
            "A compact luxury sedan offering a refined driving experience, high-quality interior, and advanced technology.",
            &["/audia4.jpg"],
            "sedan gray",
            &["Quattro All-Wheel Drive", "Virtual Cockpit", "Premium Sound System", "Leather Upholstery"],
            4.5, 88, vec![],
        ),
        seed_car(
            "7", "Jeep", "Wrangler", 2024, 139_460,
            "The iconic off-road SUV, built for adventure with rugged capabilities and open-air freedom.",
            &["/wrangler.jpeg"],
            "suv green",
            &["Off-Road Prowess", "Removable Top/Doors", "4x4 System", "Durable Build"],
            4.3, 110, vec![],
        ),
        seed_car(
            "8", "Subaru", "Outback", 2023, 117_440,
            "A versatile wagon/SUV crossover known for its standard all-wheel drive, safety features, and practicality.",
            &["/outback.webp"],
            "wagon brown",
            &["Symmetrical AWD", "EyeSight Driver Assist", "Spacious Cargo Area", "Roof Rails"],
            4.6, 92, vec![],
        ),
    ]
}
