pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod images;
pub mod models;
pub mod reorder;
pub mod repository;
pub mod resource;
pub mod routes;
pub mod services;
pub mod state;
