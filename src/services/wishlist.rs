use crate::models::Car;

/// Wishlist store, no duplicates
#[derive(Debug, Clone, Default)]
pub struct WishlistStore {
    items: Vec<Car>,
}

impl WishlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the car was already wishlisted
    pub fn add(&mut self, car: Car) -> bool {
        if self.contains(&car.id) {
            return false;
        }
        self.items.push(car);
        true
    }

    pub fn remove(&mut self, car_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|car| car.id != car_id);
        self.items.len() != before
    }

    pub fn contains(&self, car_id: &str) -> bool {
        self.items.iter().any(|car| car.id == car_id)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[Car] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::inventory::seed_cars;

    #[test]
    fn test_no_duplicates() {
        let cars = seed_cars();
        let mut wishlist = WishlistStore::new();

        assert!(wishlist.add(cars[0].clone()));
        assert!(!wishlist.add(cars[0].clone()));
        assert!(wishlist.add(cars[1].clone()));

        assert_eq!(wishlist.count(), 2);
        assert!(wishlist.contains("1"));
    }

    #[test]
    fn test_remove() {
        let cars = seed_cars();
        let mut wishlist = WishlistStore::new();
        wishlist.add(cars[0].clone());

        assert!(wishlist.remove("1"));
        assert!(!wishlist.contains("1"));
        assert!(!wishlist.remove("1"));
    }
}
