use lazy_static::lazy_static;
use serde::Deserialize;
use std::fs;
use std::time::Duration;

#[derive(Deserialize, Default)]
pub struct Config {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    pub static_path: Option<String>,
    pub static_url_prefix: Option<String>,
    pub analysis: Option<AnalysisConfig>,
}

#[derive(Deserialize, Clone)]
pub struct AnalysisConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Config {
    fn from_file(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Your `{}` could not be parsed: {}", path, e);
                    std::process::exit(1);
                }
            },
            // No config file is fine; everything has a default.
            Err(_) => Config::default(),
        }
    }

    pub fn bind_host(&self) -> String {
        self.host.clone().unwrap_or_else(|| "127.0.0.1".to_string())
    }

    pub fn bind_port(&self) -> u16 {
        self.port.unwrap_or(8080)
    }

    pub fn analysis_base_url(&self) -> String {
        self.analysis
            .as_ref()
            .map(|a| a.base_url.clone())
            .unwrap_or_else(|| "http://127.0.0.1:8000".to_string())
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(
            self.analysis
                .as_ref()
                .and_then(|a| a.timeout_secs)
                .unwrap_or(30),
        )
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::from_file("config.yaml");
}
