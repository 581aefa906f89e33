pub mod controller;
pub mod filter;
pub mod render;

pub use controller::ListingController;
pub use filter::{filter, filter_all, SearchCriteria};
pub use render::{ListingView, RenderTarget};
