//! Type locator adapters.

pub mod fixed;
pub mod linked;

pub use fixed::FixedTypeLocator;
pub use linked::LinkedTypeLocator;
