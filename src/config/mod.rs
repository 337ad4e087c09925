pub mod cli;
pub mod form;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_ENDPOINT: &str = "/generate-box-layout";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_FILENAME: &str = crate::core::handler::DEFAULT_DOWNLOAD_NAME;

/// Resolved client settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub endpoint: String,
    pub output_dir: String,
    pub filename: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            filename: DEFAULT_FILENAME.to_string(),
            timeout_seconds: None,
        }
    }
}

impl ConfigProvider for Settings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn download_filename(&self) -> &str {
        &self.filename
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_endpoint("endpoint", &self.endpoint)?;
        validation::validate_path("output_dir", &self.output_dir)?;
        validation::validate_filename("filename", &self.filename)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
pub use self::cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::toml_config::TomlConfig;
    use super::Settings;
    use crate::utils::error::Result;
    use clap::Parser;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "box-layout")]
    #[command(about = "Request a box layout for given dimensions and download the SVG")]
    pub struct CliConfig {
        #[arg(long, help = "Box length, sent verbatim")]
        pub length: Option<String>,

        #[arg(long, help = "Box breadth, sent verbatim")]
        pub breadth: Option<String>,

        #[arg(long, help = "Box height, sent verbatim")]
        pub height: Option<String>,

        #[arg(long, help = "Read one submission per line from stdin")]
        pub stdin: bool,

        #[arg(long, help = "Layout server base URL [default: http://127.0.0.1:8000]")]
        pub base_url: Option<String>,

        #[arg(long, help = "Endpoint path [default: /generate-box-layout]")]
        pub endpoint: Option<String>,

        #[arg(long, help = "Download directory [default: .]")]
        pub output_dir: Option<String>,

        #[arg(long, help = "Download filename [default: box_layout.svg]")]
        pub filename: Option<String>,

        #[arg(long, help = "Request timeout; no timeout when omitted")]
        pub timeout_seconds: Option<u64>,

        #[arg(long, help = "TOML configuration file")]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl CliConfig {
        /// Layers defaults, the optional TOML file and the flags given here.
        pub fn resolve(&self) -> Result<Settings> {
            let mut settings = match &self.config {
                Some(path) => TomlConfig::from_file(path)?.to_settings(),
                None => Settings::default(),
            };

            if let Some(base_url) = &self.base_url {
                settings.base_url = base_url.clone();
            }
            if let Some(endpoint) = &self.endpoint {
                settings.endpoint = endpoint.clone();
            }
            if let Some(output_dir) = &self.output_dir {
                settings.output_dir = output_dir.clone();
            }
            if let Some(filename) = &self.filename {
                settings.filename = filename.clone();
            }
            if let Some(timeout) = self.timeout_seconds {
                settings.timeout_seconds = Some(timeout);
            }

            Ok(settings)
        }
    }

}
