pub mod config;
pub mod handlers;
pub mod models;
pub mod server;

pub use config::WebConfig;
pub use server::start_web_server;
