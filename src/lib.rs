pub mod cli;
pub mod dataset;
pub mod pipeline;
