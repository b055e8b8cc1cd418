use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Deployment {
    Standalone,
    Serverless,
}

/// Crop recommendation prediction service.
#[derive(Debug, Parser)]
#[command(name = "crop-advisor", version, about)]
pub struct Config {
    /// Address to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5001)]
    pub port: u16,

    /// Directory holding crop_model.onnx, scaler.json and label_encoder.json.
    /// Defaults to `models/` next to the executable, which under `cargo run`
    /// is `target/debug/models`.
    #[arg(long, env = "MODELS_DIR")]
    pub models_dir: Option<PathBuf>,

    #[arg(long, env = "DEPLOYMENT", value_enum, default_value_t = Deployment::Standalone)]
    pub deployment: Deployment,
}

impl Config {
    pub fn models_dir(&self) -> PathBuf {
        if let Some(dir) = &self.models_dir {
            return dir.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|parent| parent.join("models")))
            .unwrap_or_else(|| PathBuf::from("models"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "crop-advisor",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--models-dir",
            "/srv/models",
            "--deployment",
            "serverless",
        ])
        .unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.models_dir(), PathBuf::from("/srv/models"));
        assert_eq!(config.deployment, Deployment::Serverless);
    }

    #[test]
    fn default_models_dir_sits_next_to_the_executable() {
        let config = Config {
            host: "0.0.0.0".to_string(),
            port: 5001,
            models_dir: None,
            deployment: Deployment::Standalone,
        };
        let dir = config.models_dir();
        assert!(dir.ends_with("models"));
        assert!(dir.is_absolute());
    }

    #[test]
    fn models_dir_help_names_the_cargo_run_location() {
        let command = Config::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "models_dir")
            .and_then(|arg| arg.get_help())
            .map(|help| help.to_string())
            .unwrap();
        assert!(help.contains("next to the executable"));
        assert!(help.contains("target/debug/models"));
    }

    #[test]
    fn rejects_unknown_deployment() {
        assert!(Config::try_parse_from(["crop-advisor", "--deployment", "lambda"]).is_err());
    }
}
