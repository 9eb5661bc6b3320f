//! `config get|set|list|path` commands.

use clap::Subcommand;
use orbtrack::config::{config_file_path, ConfigFile, ConfigKey};

use super::common::parse_key;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Key as section.key (e.g. trail.capacity)
        key: String,
    },

    /// Change one setting and save the file
    Set {
        /// Key as section.key (e.g. view.zoom)
        key: String,

        /// New value
        value: String,
    },

    /// Print every setting
    List,

    /// Print the config file location
    Path,
}

pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => run_get(&key),
        ConfigCommands::Set { key, value } => run_set(&key, &value),
        ConfigCommands::List => run_list(),
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
    }
}

fn run_get(key: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let config = ConfigFile::load()?;
    println!("{}", key.get(&config));
    Ok(())
}

fn run_set(key: &str, value: &str) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let mut config = ConfigFile::load()?;
    key.set(&mut config, value)?;
    config.validate()?;
    config.save()?;

    println!("Set {} = {}", key.name(), key.get(&config));
    Ok(())
}

fn run_list() -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    print!("{}", render_listing(&config));
    Ok(())
}

/// Settings grouped by section, one `key = value` per line.
fn render_listing(config: &ConfigFile) -> String {
    let mut out = String::new();
    let mut current_section = "";

    for key in ConfigKey::all() {
        if key.section() != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", key.section()));
            current_section = key.section();
        }
        out.push_str(&format!("  {} = {}\n", key.key_name(), key.get(config)));
    }

    out
}
