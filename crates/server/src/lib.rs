pub mod dashboard;
pub mod error;
pub mod http;
pub mod render;
pub mod server;
pub mod submit;
