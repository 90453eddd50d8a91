pub mod access;
pub mod bag_setups;
pub mod courses;
pub mod events;
pub mod profiles;
pub mod series;
