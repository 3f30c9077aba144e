pub mod embedded_connection;

pub use embedded_connection::*;
