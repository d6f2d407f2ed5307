pub mod secrets;
pub mod server;
