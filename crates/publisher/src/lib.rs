pub mod dispatch;
pub mod error;
pub mod registry;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
