pub mod http;
pub mod oauth;
pub mod traits;
pub mod types;

pub use http::{DEFAULT_API_BASE, MAX_PER_PAGE, TwitterClient};
pub use oauth::Credentials;
pub use traits::{StatusApi, StatusFeed, StatusStream};
pub use types::ApiStatus;

#[cfg(test)]
pub(crate) mod testing;
