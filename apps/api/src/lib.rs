pub mod alerts;
pub mod config;
pub mod db;
pub mod errors;
pub mod matching;
pub mod models;
pub mod notify;
pub mod routes;
pub mod state;
