pub mod ai;
pub mod dashboard;
pub mod item;
pub mod photo;
pub mod reference;
