//! Config subcommand handlers.

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

const OUTPUT_CHOICES: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];
const COLOR_CHOICES: &[&str] = &["auto", "always", "never"];

fn pick(prompt: &str, choices: &[&str], current: &str) -> Result<String, CliError> {
    let default = choices.iter().position(|c| *c == current).unwrap_or(0);
    let selection = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(default)
        .interact()?;
    Ok(choices.get(selection).copied().unwrap_or(current).to_owned())
}

/// Guided setup, seeded with the currently effective values.
fn prompt_config(current: &Config) -> Result<Config, CliError> {
    let mut cfg = current.clone();

    cfg.catalog.base_url = Input::new()
        .with_prompt("Catalog API root")
        .default(current.catalog.base_url.clone())
        .validate_with(|input: &String| -> Result<(), String> {
            url::Url::parse(input)
                .map(|_| ())
                .map_err(|e| format!("invalid URL: {e}"))
        })
        .interact_text()?;

    cfg.catalog.timeout = Input::new()
        .with_prompt("Request timeout (seconds)")
        .default(current.catalog.timeout)
        .validate_with(|input: &u64| -> Result<(), &str> {
            if *input == 0 { Err("must be at least 1") } else { Ok(()) }
        })
        .interact_text()?;

    cfg.catalog.preview_limit = Input::new()
        .with_prompt("Related entities shown per list item")
        .default(current.catalog.preview_limit)
        .interact_text()?;

    cfg.cache.ttl = Input::new()
        .with_prompt("Cache lifetime (seconds)")
        .default(current.cache.ttl)
        .interact_text()?;

    cfg.defaults.output = pick("Default output format", OUTPUT_CHOICES, &current.defaults.output)?;
    cfg.defaults.color = pick("Color output", COLOR_CHOICES, &current.defaults.color)?;

    Ok(cfg)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init { defaults, force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let cfg = if defaults {
                Config::default()
            } else {
                eprintln!("rickdex configuration");
                eprintln!("   Config path: {}\n", path.display());
                prompt_config(&config::load_config_or_default())?
            };

            let written = config::save_config(&cfg)?;
            output::notice(&format!("Config written to {}", written.display()), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let out = match global.output_format() {
                OutputFormat::Table | OutputFormat::Plain => toml::to_string_pretty(&cfg)?,
                format => output::render_single(format, &cfg, |_| String::new(), |_| String::new()),
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    use crate::cli::ColorMode;

    #[test]
    fn choices_match_cli_value_names() {
        let outputs: Vec<String> = OutputFormat::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_owned())
            .collect();
        assert_eq!(outputs, OUTPUT_CHOICES);

        let colors: Vec<String> = ColorMode::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_owned())
            .collect();
        assert_eq!(colors, COLOR_CHOICES);
    }
}
