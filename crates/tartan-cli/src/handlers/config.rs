//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use serde_json::json;
use std::path::Path;

/// Handle the config command
pub fn handle_config(
    args: ConfigArgs,
    config_file: Option<&Path>,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show(show) => {
            let rendered = render(config, show.format)?;
            output.writeln(rendered.trim_end())
        }
        ConfigAction::Path => {
            let path = Config::resolve_path(config_file);
            if output.format() != OutputFormat::Human {
                return output.data(&json!({ "path": path }));
            }
            match path {
                Some(path) => output.writeln(&path.display().to_string()),
                None => output.info("No configuration file found, using defaults"),
            }
        }
    }
}

fn render(config: &Config, format: ConfigFormat) -> Result<String> {
    let rendered = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_formats() {
        let config = Config {
            default_builtin: Some("adp-employee".to_string()),
            ..Config::default()
        };

        let toml = render(&config, ConfigFormat::Toml).unwrap();
        assert!(toml.contains("default_builtin = \"adp-employee\""));
        assert!(toml.contains("[output]"));

        let json = render(&config, ConfigFormat::Json).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);

        let yaml = render(&config, ConfigFormat::Yaml).unwrap();
        assert!(yaml.contains("default_builtin: adp-employee"));
    }
}
