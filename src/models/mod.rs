pub mod ad;
pub mod asset;
pub mod page;
pub mod settings;
pub mod site_config;
pub mod user;
