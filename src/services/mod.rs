pub mod data_persistance;
pub mod droid;
pub mod jitter;
pub mod listing_scraper;
pub mod maps_scraper;
pub mod surface;

pub use data_persistance::*;
pub use droid::*;
pub use jitter::*;
pub use listing_scraper::*;
pub use maps_scraper::*;
pub use surface::*;
