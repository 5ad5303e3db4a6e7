// Adapters layer: concrete implementations of the domain ports (GeoNames lookup, prediction HTTP client).

pub mod geonames;
pub mod http;

pub use geonames::GeoNamesResolver;
pub use http::HttpPriceEstimator;
