pub mod add;
pub mod backup;
pub mod common;
pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod show;
pub mod status;
