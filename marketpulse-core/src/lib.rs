//! MarketPulse Core - shared data types
//!
//! Pure data types and error taxonomies shared by the sentiment pipeline and
//! the API layer. No I/O lives in this crate.

pub mod error;
pub mod headline;
pub mod market;
pub mod sentiment;

pub use error::{MarketError, NewsError, SentimentError};
pub use headline::{Headline, HeadlinesResponse};
pub use market::{HistoryPoint, HistoryResponse, PriceResponse};
pub use sentiment::{SentimentLabel, SentimentResult};
