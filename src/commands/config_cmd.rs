use clap::{Args, Subcommand};

use super::OutputFormat;
use roster::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective settings and where each one came from
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show {
                format: OutputFormat::Json,
            } => println!("{}", serde_json::to_string_pretty(config)?),
            ConfigSubcommand::Show {
                format: OutputFormat::Text,
            } => print!("{}", config),
        }
        Ok(())
    }
}
