//! Network collaborators of the storefront: the published menu feed and the
//! promo-check endpoint.

pub mod error;
pub mod feed;
mod http;
pub mod promo;

pub use error::ClientError;
pub use feed::{parse_csv, FeedClient};
pub use promo::PromoClient;
