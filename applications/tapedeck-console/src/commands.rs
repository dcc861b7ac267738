//! Console command parser
//!
//! One command per input line. Transport intents and simulated media
//! events map onto [`PlayerInput`]; the rest is handled by the console.

use std::path::PathBuf;
use tapedeck_playback::{MediaEvent, PlayerInput};
use thiserror::Error;

/// Command parse errors
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help')")]
    Unknown(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),
}

/// A parsed console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Forward to the player
    Input(PlayerInput),

    /// Move the simulated playhead, then report the time update
    Clock(f64),

    /// Read a playlist JSON file and replace the playlist
    Load(PathBuf),

    /// Reload the source (single-track mode)
    Reset,

    Help,
    Quit,
    Empty,
}

/// Parse one input line
pub fn parse_line(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(Command::Empty);
    };
    let rest: Vec<&str> = words.collect();
    let arg = rest.first().copied();

    let input = match name.to_ascii_lowercase().as_str() {
        "play" => PlayerInput::Play,
        "pause" => PlayerInput::Pause,
        "toggle" | "t" => PlayerInput::TogglePlay,
        "next" | "n" => PlayerInput::Next,
        "previous" | "prev" | "p" => PlayerInput::Previous,
        "select" | "s" => PlayerInput::Select(number(arg, "index")?),
        "retry" | "r" => PlayerInput::RetryOrPlay,
        "seek" => PlayerInput::Seek(number(arg, "seconds")?),
        "volume" | "vol" => PlayerInput::SetVolume(number(arg, "level")?),
        "mute" => PlayerInput::ToggleMute,
        "pagesize" | "ps" => PlayerInput::SetPageSize(number(arg, "size")?),
        "clear" => PlayerInput::ClearPlaylist,
        "remove" | "rm" => PlayerInput::Remove(
            arg.ok_or(CommandError::MissingArgument("id"))?
                .to_string(),
        ),

        // Simulated media-surface events
        "canplay" => PlayerInput::Media(MediaEvent::CanPlay),
        "loadstart" => PlayerInput::Media(MediaEvent::LoadStart),
        "waiting" => PlayerInput::Media(MediaEvent::Waiting),
        "playing" => PlayerInput::Media(MediaEvent::Playing),
        "paused" => PlayerInput::Media(MediaEvent::Pause),
        "ended" => PlayerInput::Media(MediaEvent::Ended),
        "duration" => PlayerInput::Media(MediaEvent::DurationChange(number(arg, "seconds")?)),
        "error" => PlayerInput::Media(MediaEvent::Error {
            message: (!rest.is_empty()).then(|| rest.join(" ")),
        }),

        "time" => return Ok(Command::Clock(number(arg, "seconds")?)),
        "load" => {
            let path = arg.ok_or(CommandError::MissingArgument("path"))?;
            return Ok(Command::Load(PathBuf::from(path)));
        }
        "reset" | "restart" => return Ok(Command::Reset),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Command::Input(input))
}

fn number<T: std::str::FromStr>(arg: Option<&str>, name: &'static str) -> Result<T, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(name))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

/// Help text
pub const HELP: &str = "\
Transport:  play | pause | toggle | next | prev | select <index> | retry
            seek <seconds> | volume <0-100> | mute | reset
Playlist:   load <file.json> | clear | remove <id> | pagesize <rows>
Media:      canplay | loadstart | waiting | playing | paused | ended
            time <seconds> | duration <seconds> | error [message]
Other:      help | quit";
