pub mod auth;
pub mod items;
pub mod movies;
pub mod users;
pub mod watchlists;

pub use auth::{check_new_password, Auth, RegistrationForm, ValidationError, MIN_PASSWORD_LEN};
pub use items::Items;
pub use movies::{Movies, PageCounter, PageRequest};
pub use users::Users;
pub use watchlists::Watchlists;
