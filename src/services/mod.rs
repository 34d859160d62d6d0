// Service exports
pub mod assistant;
pub mod auth;
pub mod cache;
pub mod cart;
pub mod contact;
pub mod inventory;
pub mod sessions;
pub mod wishlist;

pub use assistant::{CarAssistant, OpenAiCompatAssistant, DisabledAssistant, AssistantError, ScanError, decode_photo_data_uri};
pub use auth::{AuthGate, AuthError, Claims};
pub use cache::{AssistantCache, CacheKey, CacheStats};
pub use cart::CartStore;
pub use contact::{whatsapp_link, enquiry_message, accept_contact};
pub use inventory::{Inventory, InventoryError};
pub use sessions::{Session, SessionRegistry};
pub use wishlist::WishlistStore;
