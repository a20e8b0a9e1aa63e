pub mod api;
pub mod dto;
pub mod model;

pub use api::{get_conferences, parse_conferences, APIError, ConfsTechAPI};
pub use model::{Category, Conference, Conferences};
