//! Conversions between store rows and the wire types in `dish-types`.

pub mod dish;
