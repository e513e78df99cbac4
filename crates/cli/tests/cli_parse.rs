use clap::Parser;
use orderdesk_cli::Cli;

#[test]
fn chat_defaults_to_the_demo_identity() {
    let cli = Cli::try_parse_from(["orderdesk", "chat"]);
    assert!(cli.is_ok(), "chat should parse without flags");
}

#[test]
fn chat_accepts_an_injected_identity_and_one_shot_message() {
    let cli = Cli::try_parse_from([
        "orderdesk",
        "chat",
        "--user-id",
        "12",
        "--first-name",
        "Noah",
        "--message",
        "Where is my last order?",
    ]);
    assert!(cli.is_ok());
}

#[test]
fn unknown_subcommand_is_rejected() {
    let cli = Cli::try_parse_from(["orderdesk", "deploy"]);
    assert!(cli.is_err());
}
