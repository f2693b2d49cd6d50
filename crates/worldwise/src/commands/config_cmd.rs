//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::Input;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn render_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: e.to_string(),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_file(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::apply_overrides(config::load(global)?, global);
            output::print_output(&render_toml(&cfg)?, global.quiet);
            Ok(())
        }

        ConfigCommand::Init => {
            let path = config::config_file(global);
            if path.exists() && !global.yes {
                return Err(CliError::NonInteractiveRequiresYes {
                    action: format!("overwrite {}", path.display()),
                });
            }

            let mut cfg = config::apply_overrides(Config::default(), global);
            if !global.yes && std::io::stdin().is_terminal() {
                cfg.api.base_url = Input::new()
                    .with_prompt("Cities service URL")
                    .default(cfg.api.base_url.clone())
                    .interact_text()
                    .map_err(prompt_err)?;
            }
            config::resolve_service(&cfg)?;

            config::save_config_to(&cfg, &path)?;
            if !global.quiet {
                eprintln!("Config written to {}", path.display());
            }
            Ok(())
        }
    }
}
