//! Shared UI crate for Fixline. All client logic and views live here; the
//! platform shells only wire up routing and assets.

pub mod core;
pub mod report_form;
pub mod reports;
pub mod views;

pub mod navbar;
pub use navbar::Navbar;

mod hero;
pub use hero::Hero;
