use clap::{Parser, Subcommand};
use std::path::PathBuf;
use teelog::{
    init_logging, logger_from_config, parse_cli_fields, Config, DirFeedbackStore, FeedbackClass,
    Severity,
};

#[derive(Parser)]
#[command(name = "teelog", about = "Tee logger with local logs and remote feedback entries")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/teelog/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log one entry; error and fatal levels are also written to the feedback store.
    Emit {
        /// debug, info, warn, error or fatal.
        level: Severity,
        msg: String,
        /// Fields as key=value words.
        fields: Vec<String>,
    },
    /// List feedback entries stored for this instance, newest first.
    Show {
        /// Only entries of this class (error or fatal).
        #[arg(long)]
        class: Option<FeedbackClass>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    init_logging(&cfg.logging);
    tracing::debug!(store = %cfg.feedback.store_dir.display(), "configuration loaded");

    match cli.command {
        Command::Emit { level, msg, fields } => {
            let logger = logger_from_config(&cfg)?;
            logger.log(level, &msg, &parse_cli_fields(&fields));
        }
        Command::Show { class } => {
            let ctx = cfg.feedback_context()?;
            let prefix = match class {
                Some(class) => teelog::build_path(&ctx, class),
                None => ctx.prefix(),
            };
            let store = DirFeedbackStore::new(&cfg.feedback.store_dir);
            for entry in store.list(&prefix)? {
                println!(
                    "{}  {}  {}",
                    entry.modified.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                    entry.path,
                    entry.value
                );
            }
        }
    }

    Ok(())
}
