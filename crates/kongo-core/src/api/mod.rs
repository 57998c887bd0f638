pub mod route;
pub mod service;
pub mod target;
pub mod upstream;
