pub mod admin;
pub mod auth;
pub mod blocks;
pub mod boot;
pub mod config;
pub mod db;
pub mod editor;
pub mod models;
pub mod notice;
pub mod publish;
pub mod render;
pub mod site;
pub mod store;

mod tests;
