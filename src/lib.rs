//! Find your next tech conference using the crowd-sourced data behind <https://confs.tech/>

pub mod config;
pub mod confs_tech;
pub mod tracing;

pub use confs_tech::{get_conferences, APIError, Category, Conference, Conferences, ConfsTechAPI};
