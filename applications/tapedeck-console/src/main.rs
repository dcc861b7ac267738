/// Tapedeck - console playlist player
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tapedeck_console::{
    commands::{parse_line, Command, HELP},
    describe, load_playlist,
    surface::{ConsoleSurface, SurfaceClock},
};
use tapedeck_playback::{
    driver, BasicPlayer, BasicPlayerConfig, MediaEvent, PlayerConfig, PlayerControls, PlayerHandle,
    PlayerInput, PlaylistPlayer,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tapedeck")]
#[command(about = "Paginated playlist player driven from the console", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the playlist player, reading commands from stdin
    Run {
        /// Configuration file path
        #[arg(short, long, env = "TAPEDECK_CONFIG")]
        config: Option<PathBuf>,

        /// Playlist JSON file (array of {id, link, title})
        #[arg(short, long)]
        playlist: Option<PathBuf>,
    },
    /// Play a single source
    Single {
        /// Audio url
        url: String,

        /// Title to display
        #[arg(short, long, default_value = "")]
        title: String,

        /// Start playing immediately
        #[arg(long)]
        auto_play: bool,
    },
    /// Print the effective configuration as TOML
    ShowConfig {
        /// Configuration file path
        #[arg(short, long, env = "TAPEDECK_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tapedeck_playback=info,tapedeck_console=info,tapedeck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, playlist } => {
            run(config.as_deref(), playlist.as_deref()).await?;
        }
        Commands::Single {
            url,
            title,
            auto_play,
        } => {
            single(url, title, auto_play)?;
        }
        Commands::ShowConfig { config } => {
            let config = PlayerConfig::load(config.as_deref())?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

async fn run(config: Option<&Path>, playlist: Option<&Path>) -> anyhow::Result<()> {
    let config = PlayerConfig::load(config)?;
    tracing::info!("Starting Tapedeck console");
    tracing::info!(
        "Page size: {} (options {:?})",
        config.initial_page_size(),
        config.page_size_options
    );
    tracing::info!("Retry policy: {:?}", config.retry_policy);

    let (surface, clock) = ConsoleSurface::new();
    let player = PlaylistPlayer::new(config, Box::new(surface));
    let (handle, mut events, task) = driver::spawn(player);

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            println!("{}", describe(&event));
        }
    });

    if let Some(path) = playlist {
        handle.send(PlayerInput::SetPlaylist(load_playlist(path)?)).await?;
    }
    handle.send(PlayerInput::Init).await?;

    println!("Type 'help' for commands");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(&handle, &clock, command).await?,
            Err(e) => eprintln!("{}", e),
        }
    }

    drop(handle);
    let player = task.await?;
    printer.await?;

    match player.current_track() {
        Some(track) => println!("Stopped at #{}: {}", track.position, track.title),
        None => println!("Stopped"),
    }
    if let Some(status) = player.status_text() {
        println!("{}", status);
    }

    Ok(())
}

async fn dispatch(handle: &PlayerHandle, clock: &SurfaceClock, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Input(input) => {
            if let PlayerInput::Media(MediaEvent::DurationChange(seconds)) = &input {
                clock.set_duration(*seconds);
            }
            handle.send(input).await?;
        }
        Command::Clock(seconds) => {
            clock.set_time(seconds);
            handle
                .send(PlayerInput::Media(MediaEvent::TimeUpdate(seconds)))
                .await?;
        }
        Command::Load(path) => match load_playlist(&path) {
            Ok(tracks) => handle.send(PlayerInput::SetPlaylist(tracks)).await?,
            Err(e) => eprintln!("{:#}", e),
        },
        Command::Reset => eprintln!("'reset' is only available in single-track mode"),
        Command::Help => println!("{}", HELP),
        Command::Quit | Command::Empty => {}
    }
    Ok(())
}

fn single(url: String, title: String, auto_play: bool) -> anyhow::Result<()> {
    let config = BasicPlayerConfig {
        display_title: !title.is_empty(),
        title,
        audio_url: url,
        auto_play,
        ..Default::default()
    };

    let (surface, clock) = ConsoleSurface::new();
    let mut player = BasicPlayer::new(config, Box::new(surface));
    player.init()?;
    if let Some(title) = player.display_title() {
        println!("Now playing: {}", title);
    }

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let result = match parse_line(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Reset) => player.reset(),
            Ok(Command::Clock(seconds)) => {
                clock.set_time(seconds);
                player.handle_media_event(MediaEvent::TimeUpdate(seconds))
            }
            Ok(Command::Input(PlayerInput::Play)) => player.play(),
            Ok(Command::Input(PlayerInput::Pause)) => player.pause(),
            Ok(Command::Input(PlayerInput::TogglePlay)) => player.toggle_play(),
            Ok(Command::Input(PlayerInput::Seek(seconds))) => player.seek(seconds),
            Ok(Command::Input(PlayerInput::SetVolume(level))) => player.set_volume(level),
            Ok(Command::Input(PlayerInput::ToggleMute)) => player.toggle_mute(),
            Ok(Command::Input(PlayerInput::Media(event))) => player.handle_media_event(event),
            Ok(Command::Help) => {
                println!("{}", HELP);
                Ok(())
            }
            Ok(Command::Empty) => Ok(()),
            Ok(_) => {
                eprintln!("Not available in single-track mode");
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", e);
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::warn!("Command failed: {}", e);
        }

        let playback = player.playback();
        println!(
            "{} {:.1}s / {:.1}s{}",
            if playback.is_playing { "playing" } else { "paused" },
            playback.current_time,
            playback.duration,
            if playback.is_loading_error { " (load failed)" } else { "" }
        );
    }

    Ok(())
}
