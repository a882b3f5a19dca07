pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod logging;
pub mod presentation;
pub mod routes;
pub mod schedule;
pub mod services;
pub mod state;
pub mod test_helpers;
