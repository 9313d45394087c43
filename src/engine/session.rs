use std::time::Duration;

use rand::Rng;
use rand::rngs::ThreadRng;

use super::assets::AssetProvider;
use super::board::{Board, setup};
use super::config::{GameSetup, Mode, Settings};
use super::error::SetupError;
use super::game::{GameEvent, GameState, Phase};

pub const LOG_DOMAIN: &str = "match-madness";

/// Generation counter. Deferred callbacks carry the epoch they were armed in
/// and are dropped if the session has moved on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Epoch(u64);

impl Epoch {
    fn next(self) -> Epoch {
        Epoch(self.0.wrapping_add(1))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    CardClicked { index: usize },
    TimerTick { epoch: Epoch },
    ResolveDue { epoch: Epoch },
}

/// Work the host event loop must arm or cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schedule {
    Resolve { epoch: Epoch, delay: Duration },
    StartTimer { epoch: Epoch, interval: Duration },
    StopTimer,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Update {
    pub events: Vec<GameEvent>,
    pub schedule: Vec<Schedule>,
}

impl Update {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.schedule.is_empty()
    }
}

pub struct Session<P: AssetProvider, R: Rng = ThreadRng> {
    provider: P,
    settings: Settings,
    rng: R,
    epoch: Epoch,
    last_setup: Option<GameSetup>,
    game: Option<GameState>,
}

impl<P: AssetProvider> Session<P> {
    pub fn new(provider: P, settings: Settings) -> Self {
        Session::with_rng(provider, settings, rand::rng())
    }
}

impl<P: AssetProvider, R: Rng> Session<P, R> {
    pub fn with_rng(provider: P, settings: Settings, rng: R) -> Self {
        Session {
            provider,
            settings,
            rng,
            epoch: Epoch::default(),
            last_setup: None,
            game: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn last_setup(&self) -> Option<GameSetup> {
        self.last_setup
    }

    pub fn phase(&self) -> Phase {
        self.game.as_ref().map_or(Phase::Idle, GameState::phase)
    }

    /// Deals a new board and replaces any running game. On failure the
    /// session is left idle with every pending callback invalidated.
    pub fn start(&mut self, game_setup: GameSetup) -> Result<Update, SetupError> {
        self.epoch = self.epoch.next();
        self.game = None;

        let board = match self.deal_and_load(game_setup) {
            Ok(board) => board,
            Err(err) => {
                glib::g_warning!(LOG_DOMAIN, "cannot start game: {}", err);
                return Err(err);
            }
        };
        glib::g_info!(
            LOG_DOMAIN,
            "starting {} {} game with the {} theme",
            game_setup.mode.name(),
            game_setup.difficulty.name(),
            game_setup.theme.name()
        );

        self.last_setup = Some(game_setup);
        self.game = Some(GameState::new(
            board,
            game_setup.mode,
            self.settings.solo_time_limit,
        ));

        let mut update = Update {
            events: Vec::new(),
            schedule: vec![Schedule::StopTimer],
        };
        if game_setup.mode == Mode::Solo {
            update.schedule.push(Schedule::StartTimer {
                epoch: self.epoch,
                interval: Duration::from_millis(self.settings.tick_interval_ms),
            });
        }
        Ok(update)
    }

    /// Deals a board and loads every image it shows, so a broken file aborts
    /// the start instead of surfacing mid-game.
    fn deal_and_load(&mut self, game_setup: GameSetup) -> Result<Board, SetupError> {
        let board = setup(
            &self.provider,
            game_setup.difficulty,
            game_setup.theme,
            &mut self.rng,
        )?;
        for image in board.images() {
            self.provider.load_image(image)?;
        }
        Ok(board)
    }

    /// Starts over with the previous difficulty, theme and mode. Without a
    /// previous game this behaves like [`Session::return_to_menu`].
    pub fn play_again(&mut self) -> Result<Update, SetupError> {
        match self.last_setup {
            Some(game_setup) => self.start(game_setup),
            None => Ok(self.return_to_menu()),
        }
    }

    /// Drops the current game. Pending resolves and ticks become stale.
    pub fn return_to_menu(&mut self) -> Update {
        self.epoch = self.epoch.next();
        self.game = None;
        Update {
            events: Vec::new(),
            schedule: vec![Schedule::StopTimer],
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> Update {
        let current = self.epoch;
        let resolve_delay = Duration::from_millis(self.settings.resolve_delay_ms);
        let Some(game) = self.game.as_mut() else {
            return Update::default();
        };

        let events = match event {
            SessionEvent::CardClicked { index } => game.flip(index),
            SessionEvent::TimerTick { epoch } | SessionEvent::ResolveDue { epoch }
                if epoch != current =>
            {
                glib::g_debug!(LOG_DOMAIN, "dropping stale {:?}", event);
                return Update::default();
            }
            SessionEvent::TimerTick { .. } => game.tick(),
            SessionEvent::ResolveDue { .. } => game.resolve(),
        };

        let mut update = Update {
            events,
            schedule: Vec::new(),
        };
        if matches!(event, SessionEvent::CardClicked { .. })
            && !update.events.is_empty()
            && game.phase() == Phase::Resolving
        {
            update.schedule.push(Schedule::Resolve {
                epoch: current,
                delay: resolve_delay,
            });
        }
        if let Phase::GameOver(reason) = game.phase()
            && update
                .events
                .iter()
                .any(|event| matches!(event, GameEvent::GameOver { .. }))
        {
            glib::g_info!(LOG_DOMAIN, "game over: {:?}", reason);
            update.schedule.push(Schedule::StopTimer);
        }
        update
    }
}
