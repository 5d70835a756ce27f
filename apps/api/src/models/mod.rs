pub mod input;
pub mod report;
