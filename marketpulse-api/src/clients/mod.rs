//! Upstream data provider clients.
//!
//! Thin wrappers over the external collaborators (NewsAPI for headlines, a
//! Yahoo-style chart endpoint for price/history). The sentiment core only
//! consumes headline titles from here; everything else passes straight
//! through to the dashboard.

pub mod market;
pub mod news;

pub use market::MarketClient;
pub use news::NewsClient;
