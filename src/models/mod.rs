//! Core data models.

mod category;
mod entity;
mod ids;
mod region;
mod tier;

pub use category::*;
pub use entity::*;
pub use ids::*;
pub use region::*;
pub use tier::*;
