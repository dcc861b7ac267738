//! Player configuration
//!
//! Every field has a default so hosts only override what they need.
//! [`PlayerConfig::load`] layers an optional TOML file and `TAPEDECK_`
//! environment variables on top of the defaults.

use crate::{
    error::{PlayerError, Result},
    recovery::RetryPolicy,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of the paginated playlist player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Show the current track title
    pub display_title: bool,

    /// Show the playlist table (pagination sync only runs when true)
    pub display_playlist: bool,

    /// Page sizes offered by the playlist table; the first is the initial size
    pub page_size_options: Vec<usize>,

    /// Start with the playlist expanded
    pub expanded: bool,

    /// Start playing as soon as the player is initialised
    pub auto_play: bool,

    /// Show volume controls (still hidden on handheld devices)
    pub display_volume_controls: bool,

    /// Offer a per-row remove control
    pub remove_playlist_element_enabled: bool,

    /// Retry behaviour after a load failure
    pub retry_policy: RetryPolicy,

    /// Initial volume (0-100)
    pub volume: u8,

    /// Prefix of the load failure message
    pub audio_loading_error_text: String,

    /// Prefix of the loading message
    pub audio_loading_in_progress_text: String,

    /// Label of the clear-playlist control
    pub clear_playlist_text: String,

    /// Retry affordance label
    pub error_text: String,

    /// Label of the per-row remove control
    pub remove_playlist_element_text: String,

    /// Playlist heading
    pub playlist_title_text: String,

    /// Shown when the playlist is empty
    pub empty_playlist_text: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            display_title: true,
            display_playlist: true,
            page_size_options: vec![10, 20, 30],
            expanded: true,
            auto_play: false,
            display_volume_controls: true,
            remove_playlist_element_enabled: false,
            retry_policy: RetryPolicy::default(),
            volume: 100,
            audio_loading_error_text: "Failed to load: ".to_string(),
            audio_loading_in_progress_text: "Please wait while the audio is loading: ".to_string(),
            clear_playlist_text: "Clear playlist".to_string(),
            error_text: "Failed to load the song, click here to try again!".to_string(),
            remove_playlist_element_text: "Remove".to_string(),
            playlist_title_text: "Play List".to_string(),
            empty_playlist_text: "No tracks in the playlist".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables use the `TAPEDECK_` prefix, e.g.
    /// `TAPEDECK_AUTO_PLAY=true` or `TAPEDECK_PAGE_SIZE_OPTIONS=5,10`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            } else {
                tracing::warn!("Config file {} not found, using defaults", path.display());
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("TAPEDECK")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("page_size_options")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (defaults fill the gaps)
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size_options.is_empty() {
            return Err(PlayerError::config("page_size_options must not be empty"));
        }

        if self.page_size_options.contains(&0) {
            return Err(PlayerError::config("page sizes must be greater than zero"));
        }

        if self.volume > 100 {
            return Err(PlayerError::config(format!(
                "volume must be between 0 and 100, got {}",
                self.volume
            )));
        }

        Ok(())
    }

    /// Initial page size
    pub fn initial_page_size(&self) -> usize {
        self.page_size_options.first().copied().unwrap_or(10)
    }
}

/// Configuration of the single-track player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicPlayerConfig {
    /// Track title
    pub title: String,

    /// Source to play
    pub audio_url: String,

    /// Show the title
    pub display_title: bool,

    /// Start playing on init
    pub auto_play: bool,

    /// Show volume controls (still hidden on handheld devices)
    pub display_volume_controls: bool,

    /// Initial volume (0-100)
    pub volume: u8,
}

impl Default for BasicPlayerConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            audio_url: String::new(),
            display_title: false,
            auto_play: false,
            display_volume_controls: true,
            volume: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert!(config.display_playlist);
        assert_eq!(config.page_size_options, vec![10, 20, 30]);
        assert_eq!(config.initial_page_size(), 10);
        assert!(!config.auto_play);
        assert!(!config.remove_playlist_element_enabled);
        assert_eq!(config.retry_policy, RetryPolicy::AdvanceToNext);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let config = PlayerConfig::from_toml_str(
            r#"
            auto_play = true
            page_size_options = [5, 15]
            retry_policy = "retry_same_track"
            "#,
        )
        .unwrap();

        assert!(config.auto_play);
        assert_eq!(config.initial_page_size(), 5);
        assert_eq!(config.retry_policy, RetryPolicy::RetrySameTrack);
        assert_eq!(config.playlist_title_text, "Play List");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "display_playlist = false").unwrap();
        writeln!(file, "error_text = \"Try again\"").unwrap();

        let config = PlayerConfig::load(Some(file.path())).unwrap();

        assert!(!config.display_playlist);
        assert_eq!(config.error_text, "Try again");
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlayerConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let result = PlayerConfig::from_toml_str("page_size_options = [10, 0]");
        assert!(matches!(result, Err(PlayerError::Config(_))));
    }

    #[test]
    fn empty_page_sizes_are_rejected() {
        let config = PlayerConfig {
            page_size_options: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn volume_above_hundred_is_rejected() {
        let config = PlayerConfig {
            volume: 101,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
