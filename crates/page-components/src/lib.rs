//! Reusable page components composed from the locator chain and the
//! assertion adapter. Each component ranks its locators once at
//! construction and exposes plain async operations for page objects to
//! await in sequence.

pub mod header;
pub mod navbar;
pub mod page;

pub use header::Header;
pub use navbar::NavBar;
pub use page::Page;
