pub mod assets;
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod session;

pub use assets::{AssetId, AssetProvider, FolderAssets};
pub use board::{Board, Card, FaceState, PairId, setup};
pub use config::{Difficulty, GameSetup, Mode, Selection, Settings, Theme};
pub use error::{AssetError, ConfigError, SetupError};
pub use game::{Countdown, Cue, EndReason, GameEvent, GameState, Phase, Player, Scores, Winner};
pub use session::{Epoch, LOG_DOMAIN, Schedule, Session, SessionEvent, Update};
