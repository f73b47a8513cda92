pub mod browse;
pub mod catalog;
pub mod fan_out;
pub mod recommendations;
pub mod search;
