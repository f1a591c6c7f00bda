pub mod calculate;
pub mod tables;
