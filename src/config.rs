use anyhow::Result;
use dotenvy::dotenv;
use std::env;

/// Public dataset of product transactions used to seed the store.
pub const DEFAULT_FIXTURE_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub fixture_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            fixture_url: env::var("FIXTURE_URL")
                .unwrap_or_else(|_| DEFAULT_FIXTURE_URL.to_string()),
        })
    }
}
