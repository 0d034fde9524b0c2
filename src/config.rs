use std::{net::SocketAddr, str::FromStr};

use anyhow::Context;
use time::{macros::format_description, Date};

/// Short date format used for the CSV report's joining date column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportDateStyle {
    /// `M/D/YYYY`
    #[default]
    Us,
    /// `D/M/YYYY`
    Eu,
    /// `YYYY-MM-DD`
    Iso,
}

impl ReportDateStyle {
    pub fn format(self, d: Date) -> Result<String, time::error::Format> {
        let description = match self {
            ReportDateStyle::Us => {
                format_description!("[month padding:none]/[day padding:none]/[year]")
            }
            ReportDateStyle::Eu => {
                format_description!("[day padding:none]/[month padding:none]/[year]")
            }
            ReportDateStyle::Iso => format_description!("[year]-[month]-[day]"),
        };
        d.format(description)
    }
}

impl FromStr for ReportDateStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "us" => Ok(ReportDateStyle::Us),
            "eu" => Ok(ReportDateStyle::Eu),
            "iso" => Ok(ReportDateStyle::Iso),
            other => anyhow::bail!("unknown report date style '{}' (expected us, eu or iso)", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub report_date_style: ReportDateStyle,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("APP_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(5000);
        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let report_date_style = match std::env::var("REPORT_DATE_STYLE") {
            Ok(v) => v.parse()?,
            Err(_) => ReportDateStyle::default(),
        };
        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            report_date_style,
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
