pub mod credentials;
pub mod ports;
pub mod service;
