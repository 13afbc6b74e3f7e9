pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod item_status;
pub mod storage;
pub mod valuation;

pub use item_status::{BodyArea, ItemStatus};
