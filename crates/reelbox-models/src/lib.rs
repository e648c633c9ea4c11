pub mod movie;
pub mod status;
pub mod user;
pub mod watchlist;

pub use movie::{Movie, MoviePage, MovieRequest};
pub use status::ItemStatus;
pub use user::{AuthResponse, Credentials, LoginRequest, RegisterRequest, User, UserUpdate};
pub use watchlist::{AddItemRequest, UpdateItemRequest, Watchlist, WatchlistItem, WatchlistRequest};
