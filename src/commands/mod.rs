mod config_cmd;
mod record;

pub use config_cmd::ConfigCommand;
pub use record::RecordCommand;

use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
