mod comments;
pub mod cookies;
pub mod dto;
mod likes;
mod playlists;
pub mod response;
mod router;
mod subscriptions;
mod users;
pub mod validation;
mod videos;

pub use router::{AppState, create_router};
