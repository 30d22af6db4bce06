//! # Vidhive
//!
//! A video sharing backend, usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vidhive::config::AuthConfig;
//! use vidhive::server::{AppState, create_router};
//! use vidhive::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/vidhive.db").unwrap();
//! store.initialize().unwrap();
//!
//! let auth = AuthConfig::new("access-secret".into(), "refresh-secret".into());
//! let state = Arc::new(AppState::new(Arc::new(store), auth));
//! let router = create_router(state);
//! // Serve with axum...
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod types;
