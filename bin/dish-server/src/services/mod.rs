//! Application services sitting between the HTTP routes and the store.

pub mod dish;

pub use dish::DishService;
