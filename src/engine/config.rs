use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const DEFAULT_CARD_ROOT: &str = "cards";
pub const SOLO_TIME_LIMIT: u32 = 180;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Grid shape as `(rows, cols)`. Every product is even.
    pub fn grid(self) -> (usize, usize) {
        match self {
            Difficulty::Easy => (3, 4),
            Difficulty::Medium => (4, 4),
            Difficulty::Hard => (5, 6),
        }
    }

    pub fn card_count(self) -> usize {
        let (rows, cols) = self.grid();
        rows * cols
    }

    pub fn pair_count(self) -> usize {
        self.card_count() / 2
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Food,
    Nature,
    Flags,
    Animals,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Food, Theme::Nature, Theme::Flags, Theme::Animals];

    pub fn folder(self) -> &'static str {
        match self {
            Theme::Food => "food",
            Theme::Nature => "nature",
            Theme::Flags => "flags",
            Theme::Animals => "animals",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Food => "Food",
            Theme::Nature => "Nature",
            Theme::Flags => "Flags",
            Theme::Animals => "Animals",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Solo,
    Multiplayer,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Solo, Mode::Multiplayer];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Solo => "Solo",
            Mode::Multiplayer => "Two Players",
        }
    }
}

/// A complete choice of what to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSetup {
    pub difficulty: Difficulty,
    pub theme: Theme,
    pub mode: Mode,
}

/// Menu picks collected so far. Nothing can start until all three are set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub theme: Option<Theme>,
    pub difficulty: Option<Difficulty>,
    pub mode: Option<Mode>,
}

impl Selection {
    pub fn ready(&self) -> Option<GameSetup> {
        Some(GameSetup {
            difficulty: self.difficulty?,
            theme: self.theme?,
            mode: self.mode?,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.ready().is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub card_root: PathBuf,
    pub solo_time_limit: u32,
    pub tick_interval_ms: u64,
    pub resolve_delay_ms: u64,
    pub sound_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            card_root: PathBuf::from(DEFAULT_CARD_ROOT),
            solo_time_limit: SOLO_TIME_LIMIT,
            tick_interval_ms: 1000,
            resolve_delay_ms: 800,
            sound_dir: None,
        }
    }
}

impl Settings {
    pub fn settings_path() -> PathBuf {
        glib::user_config_dir()
            .join("match-madness")
            .join(SETTINGS_FILE_NAME)
    }

    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut settings: Settings = serde_json::from_str(&raw).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        settings.solo_time_limit = settings.solo_time_limit.max(1);
        settings.tick_interval_ms = settings.tick_interval_ms.max(1);
        Ok(settings)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::settings_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    #[test]
    fn grids_are_even_and_match_pair_counts() {
        for difficulty in Difficulty::ALL {
            let (rows, cols) = difficulty.grid();
            assert!(rows * cols >= 2);
            assert_eq!(rows * cols % 2, 0);
            assert_eq!(difficulty.pair_count() * 2, difficulty.card_count());
        }
        assert_eq!(Difficulty::Easy.grid(), (3, 4));
        assert_eq!(Difficulty::Medium.grid(), (4, 4));
        assert_eq!(Difficulty::Hard.grid(), (5, 6));
    }

    #[test]
    fn selection_needs_all_three_picks() {
        let mut selection = Selection::default();
        assert!(!selection.is_ready());
        selection.theme = Some(Theme::Flags);
        selection.mode = Some(Mode::Solo);
        assert_eq!(selection.ready(), None);
        selection.difficulty = Some(Difficulty::Hard);
        assert_eq!(
            selection.ready(),
            Some(GameSetup {
                difficulty: Difficulty::Hard,
                theme: Theme::Flags,
                mode: Mode::Solo,
            })
        );
    }

    #[test]
    fn missing_settings_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(&dir.child("absent.json")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_settings_fill_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.child(SETTINGS_FILE_NAME);
        fs::write(&path, r#"{ "card_root": "/opt/cards", "resolve_delay_ms": 0 }"#).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.card_root, PathBuf::from("/opt/cards"));
        assert_eq!(settings.resolve_delay_ms, 0);
        assert_eq!(settings.solo_time_limit, SOLO_TIME_LIMIT);
        assert_eq!(settings.sound_dir, None);
    }

    #[test]
    fn malformed_settings_are_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.child(SETTINGS_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn unreadable_settings_path_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.child(SETTINGS_FILE_NAME);
        fs::create_dir(&path).unwrap();
        match Settings::load_from(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected an io error, got {other:?}"),
        }
    }
}
