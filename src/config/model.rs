use crate::confs_tech::Category;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    pub categories: Vec<Category>,
    pub year: i32,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}
