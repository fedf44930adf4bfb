//! SeaORM entities, one per table.

pub mod organization;
pub mod project;
pub mod user;
