use crate::models::{Car, CartItem};

/// Most units of one car a cart line can hold
pub const MAX_QUANTITY: u32 = 99;

/// Shopping cart store
///
/// Plain owned state with an explicit mutation interface. Callers decide
/// where it lives (see `SessionRegistry`).
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `car`, incrementing the quantity if already present
    ///
    /// A line already at `MAX_QUANTITY` stays there.
    pub fn add(&mut self, car: Car) {
        match self.items.iter_mut().find(|item| item.car.id == car.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1).min(MAX_QUANTITY),
            None => self.items.push(CartItem { car, quantity: 1 }),
        }
    }

    /// Returns false when the car was not in the cart
    pub fn remove(&mut self, car_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.car.id != car_id);
        self.items.len() != before
    }

    /// Set a line's quantity; anything at or below zero removes the line
    /// and anything above `MAX_QUANTITY` is capped
    ///
    /// Returns false when the car was not in the cart.
    pub fn update_quantity(&mut self, car_id: &str, quantity: i64) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.car.id == car_id) else {
            return false;
        };

        let quantity = quantity.clamp(0, MAX_QUANTITY as i64) as u32;
        item.quantity = quantity;
        if quantity == 0 {
            self.items.retain(|item| item.quantity > 0);
        }
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of price times quantity
    pub fn total(&self) -> u64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Number of units across all lines
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_car(id: &str, price: u64) -> Car {
        Car {
            id: id.to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2023,
            price,
            description: String::new(),
            image_urls: vec![],
            features: vec![],
            average_rating: 0.0,
            reviews_count: 0,
            reviews: vec![],
            data_ai_hint: None,
        }
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = CartStore::new();
        cart.add(create_car("1", 100));
        cart.add(create_car("1", 100));
        cart.add(create_car("2", 50));

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 250);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = CartStore::new();
        cart.add(create_car("1", 100));

        assert!(cart.update_quantity("1", 4));
        assert_eq!(cart.total(), 400);

        assert!(cart.update_quantity("1", -3));
        assert!(cart.is_empty());

        assert!(!cart.update_quantity("1", 2));
    }

    #[test]
    fn test_quantity_is_capped() {
        let mut cart = CartStore::new();
        cart.add(create_car("1", 100));

        assert!(cart.update_quantity("1", u32::MAX as i64));
        assert_eq!(cart.item_count(), MAX_QUANTITY);

        cart.add(create_car("1", 100));
        assert_eq!(cart.items()[0].quantity, MAX_QUANTITY);
        assert_eq!(cart.total(), 100 * MAX_QUANTITY as u64);

        assert!(cart.update_quantity("1", i64::MAX));
        assert_eq!(cart.item_count(), MAX_QUANTITY);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = CartStore::new();
        cart.add(create_car("1", 100));
        cart.add(create_car("2", 100));

        assert!(cart.remove("1"));
        assert!(!cart.remove("1"));
        assert_eq!(cart.items().len(), 1);

        cart.clear();
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.item_count(), 0);
    }
}
