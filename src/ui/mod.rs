pub mod charts;
pub mod dashboard;
pub mod panels;
pub mod prediction;
