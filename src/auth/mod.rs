mod middleware;
mod password;
mod token;

pub use middleware::{AuthError, RequireUser};
pub use password::{hash_password, verify_password};
pub use token::{AccessClaims, RefreshClaims, TokenPair, TokenService};
