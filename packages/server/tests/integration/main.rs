mod ai;
mod dashboard;
mod item;
mod photo;
mod reference;
