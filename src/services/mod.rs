pub mod server;
pub mod statistics;
