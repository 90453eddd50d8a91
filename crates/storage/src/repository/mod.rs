pub mod bag_setup;
pub mod base;
pub mod course;
pub mod event;
pub mod profile;
pub mod scorecard;
pub mod series;
pub mod tee_set;

pub use base::{Record, Repository, filters_from, from_row, to_row};
