pub mod dish;

pub use dish::DishRecord;
