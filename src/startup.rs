use anyhow::{Context, Result};

use crate::config::Config;

pub struct ValidationReport {
    pub environment: bool,
    pub database: bool,
    pub fixture: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.environment && self.database && self.fixture
    }

    pub fn print(&self) {
        println!("\n=== Startup Validation Report ===");
        println!("Environment Variables: {}", status(self.environment));
        println!("Database Connectivity: {}", status(self.database));
        println!("Fixture URL:           {}", status(self.fixture));

        if !self.errors.is_empty() {
            println!("\nErrors:");
            for error in &self.errors {
                println!("  ❌ {}", error);
            }
        }

        println!("\nOverall Status: {}", if self.is_valid() { "✅ PASS" } else { "❌ FAIL" });
        println!("=================================\n");
    }
}

fn status(ok: bool) -> &'static str {
    if ok { "✅ OK" } else { "❌ FAIL" }
}

pub async fn validate_environment(config: &Config) -> ValidationReport {
    let mut report = ValidationReport {
        environment: true,
        database: true,
        fixture: true,
        errors: Vec::new(),
    };

    if let Err(e) = validate_env_vars(config) {
        report.environment = false;
        report.errors.push(format!("Environment: {}", e));
    }

    if let Err(e) = validate_database(config).await {
        report.database = false;
        report.errors.push(format!("Database: {}", e));
    }

    if let Err(e) = validate_fixture_url(config) {
        report.fixture = false;
        report.errors.push(format!("Fixture: {}", e));
    }

    report
}

fn validate_env_vars(config: &Config) -> Result<()> {
    if config.database_url.is_empty() {
        anyhow::bail!("DATABASE_URL is empty");
    }
    if config.fixture_url.is_empty() {
        anyhow::bail!("FIXTURE_URL is empty");
    }
    if config.server_port == 0 {
        anyhow::bail!("SERVER_PORT must be greater than 0");
    }

    Ok(())
}

async fn validate_database(config: &Config) -> Result<()> {
    let pool = crate::db::create_pool(config)
        .await
        .context("Failed to connect to database")?;

    sqlx::query("SELECT 1")
        .fetch_one(&pool)
        .await
        .context("Database probe query failed")?;

    Ok(())
}

fn validate_fixture_url(config: &Config) -> Result<()> {
    url::Url::parse(&config.fixture_url).context("FIXTURE_URL is not a valid URL")?;
    Ok(())
}
