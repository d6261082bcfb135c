pub mod file;
pub mod restaurant;
