use clap::{Parser, Subcommand};
use shift_templates::components::shift_templates::{load_template_file, resolve_template};
use shift_templates::components::ShiftTemplateHandle;
use shift_templates::error::Error;
use shift_templates::startup;
use shift_templates::utils::time::{format_duration, format_minutes};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "shift-templates")]
#[command(about = "Validate shift templates and submit them to the shift planning backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a template file (JSON or TOML)
    Validate {
        /// Path to the template file
        file: PathBuf,
    },
    /// Validate a template file and send it to the backend
    Submit {
        /// Path to the template file
        file: PathBuf,
        /// Update the template with this id instead of creating a new one
        #[arg(long)]
        id: Option<String>,
    },
    /// Run the HTTP validation gate
    #[cfg(feature = "web-interface")]
    Serve {
        /// Address to listen on (overrides SHIFT_BIND_ADDR)
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    startup::init_logging()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { file } => {
            let template = load_template_file(&file)?;
            let slots = resolve_template(&template).map_err(Error::from)?;

            println!("Template '{}' is valid", template.name.trim());
            for (index, blocks) in slots.iter().enumerate() {
                let spans: Vec<String> = blocks
                    .iter()
                    .map(|b| format!("{}-{}", format_minutes(b.start), format_minutes(b.end)))
                    .collect();
                let total: u32 = blocks.iter().map(|b| b.duration()).sum();
                println!(
                    "  Slot {}: {} ({})",
                    index + 1,
                    spans.join(", "),
                    format_duration(total)
                );
            }
        }
        Commands::Submit { file, id } => {
            let config = startup::load_config()?;
            let template = load_template_file(&file)?;
            let handle = ShiftTemplateHandle::new(config).await?;

            let result = match id {
                Some(id) => handle.update(id, template).await,
                None => handle.create(template).await,
            };
            handle.shutdown().await?;

            let saved = result?;
            info!("Shift template submitted");
            println!(
                "{}",
                serde_json::to_string_pretty(&saved).map_err(Error::from)?
            );
        }
        #[cfg(feature = "web-interface")]
        Commands::Serve { bind } => {
            let config = startup::load_config()?;
            shift_templates::server::serve(config, bind).await?;
        }
    }

    Ok(())
}
