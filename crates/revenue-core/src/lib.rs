pub mod aggregate;
pub mod config;
pub mod date_range;
pub mod db;
pub mod error;
pub mod extract;
pub mod load;
pub mod model;
pub mod pipeline;
pub mod revenue;
pub mod spine;
pub mod validation;
