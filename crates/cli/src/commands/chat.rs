use std::io::{self, BufRead, Write};

use orderdesk_core::config::{AppConfig, LoadOptions};
use orderdesk_core::UserContext;
use tracing::info;

use crate::bootstrap::{bootstrap_with_config, init_logging};
use crate::commands::CommandResult;

pub fn run(user_id: i64, first_name: &str, message: Option<String>) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "chat",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };
    init_logging(&config);

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                "chat",
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let user = UserContext::new(user_id, first_name);

    let result = runtime.block_on(async {
        let app = bootstrap_with_config(config)
            .await
            .map_err(|error| ("bootstrap", error.to_string(), 4u8))?;

        if let Some(message) = message {
            let reply = app
                .runtime
                .handle_message(&user, &message)
                .await
                .map_err(|error| ("agent", error.to_string(), 5u8))?;
            return Ok::<_, (&'static str, String, u8)>(reply);
        }

        interactive_session(&app.runtime, &user)
            .await
            .map_err(|error| ("agent", error.to_string(), 5u8))?;
        Ok("conversation ended".to_string())
    });

    match result {
        Ok(message) => CommandResult::success("chat", message),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("chat", error_class, message, exit_code)
        }
    }
}

/// Line-oriented session. The transcript is append-only and owned here, at
/// the session boundary; the pipeline itself stays message-scoped.
async fn interactive_session(
    runtime: &orderdesk_agent::runtime::AgentRuntime,
    user: &UserContext,
) -> anyhow::Result<()> {
    let mut transcript: Vec<(&'static str, String)> = Vec::new();
    let stdin = io::stdin();

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message, "exit" | "quit") {
            break;
        }

        let reply = runtime.handle_message(user, message).await?;
        println!("assistant> {reply}");

        transcript.push(("user", message.to_string()));
        transcript.push(("assistant", reply));
    }

    info!(
        event_name = "chat.session.closed",
        turns = transcript.len() / 2,
        "interactive session closed"
    );
    Ok(())
}
