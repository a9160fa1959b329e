use clap::{Parser, Subcommand};
use clockhand::command::{ControlCommand, SOCKET_PATH};
use clockhand::{SelectionMode, TimeValue};
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "clockhand", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the picker window
    Show,
    /// Hide the picker window
    Hide,
    /// Switch between hour and minute selection
    ToggleMode,
    /// Select hours
    Hours,
    /// Select minutes
    Minutes,
    /// Show or hide keyboard entry
    Keyboard,
    /// Replace the current time and start over at hour selection
    Set {
        /// Time as HH:MM
        time: TimeValue,
    },
}

impl From<Commands> for ControlCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::Show => ControlCommand::Show,
            Commands::Hide => ControlCommand::Hide,
            Commands::ToggleMode => ControlCommand::ToggleMode,
            Commands::Hours => ControlCommand::Mode(SelectionMode::Hours),
            Commands::Minutes => ControlCommand::Mode(SelectionMode::Minutes),
            Commands::Keyboard => ControlCommand::ToggleKeyboard,
            Commands::Set { time } => ControlCommand::Set(time),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(&ControlCommand::from(cli.command))
}

fn send_command(cmd: &ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to timedial at {}: {}. Is timedial running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending '{}'", cmd);
    writeln!(stream, "{}", cmd)?;
    Ok(())
}
