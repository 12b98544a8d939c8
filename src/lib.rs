pub mod controller;
pub mod events;
pub mod models;
pub mod server;
pub mod store;
pub mod telemetry;
