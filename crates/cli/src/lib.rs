pub mod bootstrap;
pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "orderdesk",
    about = "Orderdesk operator CLI",
    long_about = "Operate the orderdesk support assistant: migrations, demo data, config inspection, and chat.",
    after_help = "Examples:\n  orderdesk migrate\n  orderdesk seed\n  orderdesk chat --message \"Where is my last order?\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo order dataset (re-runnable)")]
    Seed,
    #[command(about = "Inspect effective configuration values with secret redaction")]
    Config,
    #[command(about = "Talk to the assistant as the given user (one-shot or interactive)")]
    Chat {
        #[arg(long, default_value_t = 6, help = "Authenticated user id for this session")]
        user_id: i64,
        #[arg(long, default_value = "Ella", help = "First name used in replies")]
        first_name: String,
        #[arg(long, help = "Send one message and print the reply instead of starting a session")]
        message: Option<String>,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Chat { user_id, first_name, message } => {
            commands::chat::run(user_id, &first_name, message)
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
