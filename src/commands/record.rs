use clap::{Args, Subcommand};
use std::io::{self, Write};

use super::OutputFormat;
use roster::{
    Level, Navigation, Outcome, Record, RecordCollection, RecordEditor, RecordId, RecordPatch,
    RecordStore, ViewLifetime,
};

#[derive(Args)]
pub struct RecordCommand {
    #[command(subcommand)]
    pub command: RecordSubcommand,
}

#[derive(Subcommand)]
pub enum RecordSubcommand {
    /// List all employee records
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Create a new employee record
    Create {
        /// Employee name
        #[arg(long)]
        name: String,

        /// Job position
        #[arg(long, default_value = "")]
        position: String,

        /// Level: Intern, Junior or Senior
        #[arg(long)]
        level: Option<Level>,
    },

    /// Edit an existing employee record
    Edit {
        /// Record ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New position
        #[arg(long)]
        position: Option<String>,

        /// New level: Intern, Junior or Senior
        #[arg(long)]
        level: Option<Level>,
    },

    /// Delete an employee record
    Delete {
        /// Record ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl RecordCommand {
    pub async fn run(&self, store: &RecordStore) -> Result<(), Box<dyn std::error::Error>> {
        // One view activation per command.
        let view = ViewLifetime::new();

        match &self.command {
            RecordSubcommand::List { format } => {
                let mut collection = RecordCollection::new(store.clone(), view.token());
                if let Outcome::Failed(e) = collection.load().await {
                    return Err(format!("Could not load records: {}", e).into());
                }

                if collection.is_empty() {
                    println!("No records found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(collection.records())?);
                    }
                    OutputFormat::Text => print_table(collection.records()),
                }
                Ok(())
            }

            RecordSubcommand::Create {
                name,
                position,
                level,
            } => {
                if name.trim().is_empty() {
                    return Err("Name cannot be empty".into());
                }

                let mut editor = RecordEditor::new(store.clone(), view.token());
                editor.initialize(None).await;

                let mut patch = RecordPatch::new().name(name.trim()).position(position.trim());
                patch.level = *level;
                editor.update_field(patch);

                editor.submit().await;
                if let Some(e) = editor.last_error() {
                    return Err(format!("Could not save record: {}", e).into());
                }
                println!("Created record: {}", name.trim());
                Ok(())
            }

            RecordSubcommand::Edit {
                id,
                name,
                position,
                level,
            } => {
                let patch = RecordPatch {
                    name: name.clone(),
                    position: position.clone(),
                    level: *level,
                };
                if patch.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let id = RecordId::from(id.as_str());
                let mut editor = RecordEditor::new(store.clone(), view.token());
                if editor.initialize(Some(id.clone())).await == Navigation::Collection {
                    return Err(format!("Record not found: {}", id).into());
                }
                if let Some(e) = editor.last_error() {
                    return Err(format!("Could not load record {}: {}", id, e).into());
                }

                editor.update_field(patch);
                let updated = editor.draft().clone();

                editor.submit().await;
                if let Some(e) = editor.last_error() {
                    return Err(format!("Could not save record: {}", e).into());
                }
                println!("Updated record:");
                println!("{}", updated);
                Ok(())
            }

            RecordSubcommand::Delete { id, force } => {
                let id = RecordId::from(id.as_str());
                let mut collection = RecordCollection::new(store.clone(), view.token());
                if let Outcome::Failed(e) = collection.load().await {
                    return Err(format!("Could not load records: {}", e).into());
                }

                let name = match collection.get(&id) {
                    Some(record) => record.name.clone(),
                    None => return Err(format!("Record not found: {}", id).into()),
                };

                if !force {
                    print!("Delete record '{}'? [y/N] ", name);
                    io::stdout().flush()?;

                    let mut input = String::new();
                    io::stdin().read_line(&mut input)?;

                    if !input.trim().eq_ignore_ascii_case("y") {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                if let Outcome::Failed(e) = collection.remove(&id).await {
                    return Err(format!("Could not delete record: {}", e).into());
                }
                println!("Deleted record: {}", name);
                Ok(())
            }
        }
    }
}

fn print_table(records: &[Record]) {
    println!("{:<32}  {:<24}  {:<24}  LEVEL", "ID", "NAME", "POSITION");
    println!("{}", "-".repeat(92));
    for record in records {
        let id = record.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        let level = record.level.map(|l| l.as_str()).unwrap_or("-");
        println!(
            "{:<32}  {:<24}  {:<24}  {}",
            id,
            truncate(&record.name, 24),
            truncate(&record.position, 24),
            level
        );
    }
    println!("\nTotal: {} record(s)", records.len());
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        let cut: String = value.chars().take(width - 3).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}
