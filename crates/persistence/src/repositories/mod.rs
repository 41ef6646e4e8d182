//! Repository implementations for database operations.

pub mod invitation;
pub mod list_item;
pub mod list_share;
pub mod shopping_list;
pub mod user;

pub use invitation::{generate_invitation_code, invitation_expiry, InvitationRepository};
pub use list_item::{ListItemRepository, ListItemUpdate};
pub use list_share::ListShareRepository;
pub use shopping_list::{ShoppingListRepository, ShoppingListUpdate};
pub use user::{NewUser, UserRepository, UserUpdate};
