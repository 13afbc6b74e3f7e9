pub mod item;
pub mod photo;
pub mod reference;
pub mod shared;
