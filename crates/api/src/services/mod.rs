pub mod catalog;
pub mod uploads;
