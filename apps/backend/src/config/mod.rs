pub mod env;

pub use env::ServerConfig;
