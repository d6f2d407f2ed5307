pub mod deletion;
pub mod file;
