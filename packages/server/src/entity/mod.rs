pub mod brand;
pub mod category;
pub mod closet_item;
pub mod condition;
pub mod subcategory;
