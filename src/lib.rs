pub mod catalog;
pub mod classify;
pub mod output;
pub mod reports;
pub mod stats;
