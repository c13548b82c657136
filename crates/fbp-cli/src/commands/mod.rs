pub mod deps;
pub mod list;
pub mod stats;
pub mod validate;
