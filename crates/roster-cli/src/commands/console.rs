use std::sync::Arc;

use anyhow::Context;
use roster_client::ApiClient;
use roster_config::RosterConfig;
use roster_console::{Command, Flow, Shell, ShellNavigator};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::bootstrap;
use crate::cli::root_commands::ConsoleArgs;
use crate::output::table_options;

/// Interactive console: one command per line on stdin, the mounted screen
/// re-rendered after each.
pub async fn handle(args: &ConsoleArgs, config: &RosterConfig) -> anyhow::Result<()> {
    let navigator = Arc::new(ShellNavigator::new());
    let api = ApiClient::new(&config.api, bootstrap::token_store(config), navigator.clone())
        .context("failed to build HTTP client")?;
    let mut shell = Shell::new(api, navigator, config.paging).with_table_options(table_options());

    if let Err(error) = shell.open(args.open).await {
        eprintln!("error: {error}");
    }
    println!("{}\n", shell.render());
    println!("type `help` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                eprintln!("{error}");
                continue;
            }
        };
        let show_help = command == Command::Help;

        match shell.execute(command).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(error) => eprintln!("error: {error}"),
        }

        if show_help {
            println!("{}", Shell::help());
        } else {
            println!("{}\n", shell.render());
        }
    }
    Ok(())
}
