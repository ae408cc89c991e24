//! External data collaborators.

pub mod market_data;
pub mod polygon;

pub use market_data::{AssetType, MarketDataProvider, Timespan};
pub use polygon::PolygonDataProvider;
