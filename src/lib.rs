pub mod client;
pub mod config;
pub mod error;
pub mod token;
pub mod types;

pub use client::PortalClient;
pub use config::{Credentials, LoginConfig};
pub use error::{ConfigError, LoginError, LoginResult, UnescapeError};
pub use token::extract_state_token;
pub use types::{AuthOptions, AuthRequest};
