pub mod dataset;
pub mod error;
pub mod output;
pub mod quiz;
pub mod timer;
