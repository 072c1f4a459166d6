//! Filelocker CLI
//!
//! Files, groups and secure messages from the terminal.

use console::style;
use filelocker::cli::{Cli, Commands, FilesCommand};
use filelocker::commands::{self, files, groups, messages};
use filelocker::Error;
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    std::process::exit(exit_code);
}

/// Main application entry point
fn run() -> i32 {
    let cli = Cli::parse_args();
    init_logging(cli.global.verbose);

    match execute(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red());
            let known = err.downcast_ref::<Error>();
            if known.is_some_and(Error::is_auth) {
                eprintln!("Check the login and API key (--login/--key or FILELOCKER_LOGIN/FILELOCKER_KEY).");
            }
            known.map_or(1, Error::exit_code)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool) {
    let default = if verbose { "filelocker=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute the requested command
fn execute(cli: Cli) -> anyhow::Result<()> {
    if matches!(cli.command, Commands::Version) {
        return handle_version();
    }

    let settings = cli.global.resolve()?;
    let session = commands::connect(&settings)?;

    match cli.command {
        Commands::Read { all, mark } => messages::handle_read(&session, &settings, all, mark),
        Commands::Send {
            subject,
            body,
            recipients,
            expire_in,
        } => messages::handle_send(&session, &subject, &body, &recipients, &expire_in),
        Commands::Delete { ids } => messages::handle_delete(&session, &ids),
        Commands::Files(FilesCommand::List) => files::handle_list(&session, &settings),
        Commands::Files(FilesCommand::Upload {
            path,
            name,
            notes,
            scan,
        }) => files::handle_upload(
            &session,
            &settings,
            &path,
            name.as_deref(),
            notes.as_deref(),
            scan,
        ),
        Commands::Files(FilesCommand::Delete { ids }) => files::handle_delete(&session, &ids),
        Commands::Groups => groups::handle_groups(&session, &settings),
        Commands::Version => handle_version(),
    }
}

/// Handle version command
fn handle_version() -> anyhow::Result<()> {
    println!("Filelocker CLI v{}", filelocker::VERSION);
    Ok(())
}
