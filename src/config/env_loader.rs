use crate::config::model::Config;
use crate::confs_tech::Category;
use chrono::{Datelike, Local};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const CATEGORIES_VAR: &str = "CONFS_CATEGORIES";
pub const YEAR_VAR: &str = "CONFS_YEAR";
pub const BASE_URL_VAR: &str = "CONFS_BASE_URL";
pub const TIMEOUT_SECS_VAR: &str = "CONFS_TIMEOUT_SECS";

const DEFAULT_CATEGORY: Category = Category::DevOps;

pub fn load_config() -> Config {
    load_config_from(|name| env::var(name).ok())
}

/// Builds the config from any variable source, panicking on invalid values
pub fn load_config_from<F>(var: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    Config {
        categories: load_categories_config(CATEGORIES_VAR, var(CATEGORIES_VAR)),
        year: load_i32_config(YEAR_VAR, var(YEAR_VAR)).unwrap_or_else(|| Local::now().year()),
        base_url: var(BASE_URL_VAR).filter(|url| !url.trim().is_empty()),
        timeout: load_u64_config(TIMEOUT_SECS_VAR, var(TIMEOUT_SECS_VAR))
            .map(Duration::from_secs),
    }
}

fn load_categories_config(name: &str, value: Option<String>) -> Vec<Category> {
    let Some(value) = value else {
        return vec![DEFAULT_CATEGORY];
    };

    let categories: Vec<Category> = value
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            Category::from_str(&segment.to_lowercase()).unwrap_or_else(|_| {
                panic!("Invalid config '{}'. Unknown category '{}'", name, segment)
            })
        })
        .collect();

    if categories.is_empty() {
        panic!("Invalid config '{}'. Expected at least one category", name);
    }

    categories
}

fn load_i32_config(name: &str, value: Option<String>) -> Option<i32> {
    value.map(|value| {
        value
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("Invalid config '{}'. Expected an integer number.", name))
    })
}

fn load_u64_config(name: &str, value: Option<String>) -> Option<u64> {
    value.map(|value| {
        value.trim().parse().unwrap_or_else(|_| {
            panic!(
                "Invalid config '{}'. Expected a positive integer number.",
                name
            )
        })
    })
}
