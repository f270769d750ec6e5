pub mod auth;
pub mod config;
pub mod db;
pub mod email;
pub mod handlers;
pub mod models;
pub mod storage;

pub use db::create_pool;
