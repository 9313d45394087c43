//! The flip / resolve / tick state machine.
//!
//! Every operation mutates the game and returns the [`GameEvent`]s the
//! presentation layer needs to redraw. Ignored input returns no events.

use super::board::{Board, FaceState, PairId};
use super::config::Mode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scores {
    one: u32,
    two: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.one,
            Player::Two => self.two,
        }
    }

    fn bump(&mut self, player: Player) -> u32 {
        let slot = match player {
            Player::One => &mut self.one,
            Player::Two => &mut self.two,
        };
        *slot += 1;
        *slot
    }

    pub fn total(&self) -> u32 {
        self.one + self.two
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    Completed,
    TimedOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    AwaitingFirstFlip,
    AwaitingSecondFlip,
    Resolving,
    GameOver(EndReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Player(Player),
    Tie,
}

/// Semantic sound hints. Nothing in the game depends on them being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    MatchFound,
    NoMatch,
    GameWon,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    CardShown { index: usize, pair: PairId },
    CardHidden { index: usize },
    CardMatched { index: usize },
    ScoreChanged { player: Player, score: u32 },
    TurnChanged { player: Player },
    TimeChanged { remaining: u32 },
    GameOver {
        reason: EndReason,
        scores: Scores,
        elapsed: Option<u32>,
    },
    Cue(Cue),
}

/// Solo countdown, owned by its game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    limit: u32,
    remaining: u32,
    running: bool,
}

impl Countdown {
    fn new(limit: u32) -> Self {
        Countdown {
            limit,
            remaining: limit,
            running: true,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn elapsed(&self) -> u32 {
        self.limit - self.remaining
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    mode: Mode,
    phase: Phase,
    current: Player,
    scores: Scores,
    face_up: Vec<usize>,
    countdown: Option<Countdown>,
}

impl GameState {
    /// Starts a game on a freshly dealt board. Solo games get a running
    /// countdown of `time_limit` units.
    pub fn new(board: Board, mode: Mode, time_limit: u32) -> Self {
        assert!(time_limit > 0, "solo time limit must be positive");
        let countdown = match mode {
            Mode::Solo => Some(Countdown::new(time_limit)),
            Mode::Multiplayer => None,
        };
        GameState {
            board,
            mode,
            phase: Phase::AwaitingFirstFlip,
            current: Player::One,
            scores: Scores::default(),
            face_up: Vec::with_capacity(2),
            countdown,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn face_up(&self) -> &[usize] {
        &self.face_up
    }

    pub fn countdown(&self) -> Option<Countdown> {
        self.countdown
    }

    pub fn matched_count(&self) -> usize {
        self.board
            .cards()
            .iter()
            .filter(|card| card.face == FaceState::Matched)
            .count()
    }

    pub fn is_game_over(&self) -> (bool, Option<EndReason>) {
        match self.phase {
            Phase::GameOver(reason) => (true, Some(reason)),
            _ => (false, None),
        }
    }

    /// Higher score wins. Solo games have no winner.
    pub fn winner(&self) -> Option<Winner> {
        if self.mode != Mode::Multiplayer {
            return None;
        }
        let one = self.scores.get(Player::One);
        let two = self.scores.get(Player::Two);
        Some(match one.cmp(&two) {
            std::cmp::Ordering::Greater => Winner::Player(Player::One),
            std::cmp::Ordering::Less => Winner::Player(Player::Two),
            std::cmp::Ordering::Equal => Winner::Tie,
        })
    }

    /// Turns a card face up. Clicks on matched or already revealed cards, and
    /// clicks while a pair is pending or after the game ended, are ignored.
    ///
    /// Panics if `index` is outside the board.
    pub fn flip(&mut self, index: usize) -> Vec<GameEvent> {
        let card = self.board.card(index);
        if !matches!(
            self.phase,
            Phase::AwaitingFirstFlip | Phase::AwaitingSecondFlip
        ) {
            return Vec::new();
        }
        if card.face != FaceState::FaceDown || self.face_up.len() >= 2 {
            return Vec::new();
        }

        let pair = card.pair;
        self.board.set_face(index, FaceState::FaceUp);
        self.face_up.push(index);
        self.phase = if self.face_up.len() == 1 {
            Phase::AwaitingSecondFlip
        } else {
            Phase::Resolving
        };
        vec![GameEvent::CardShown { index, pair }]
    }

    /// Commits the pending pair. A no-op once the game is over, so a pair
    /// revealed just before a timeout is never scored.
    ///
    /// Panics if fewer than two cards are face up on a live game.
    pub fn resolve(&mut self) -> Vec<GameEvent> {
        if matches!(self.phase, Phase::GameOver(_)) {
            return Vec::new();
        }
        assert!(
            self.phase == Phase::Resolving && self.face_up.len() == 2,
            "resolve needs two face-up cards"
        );

        let (first, second) = (self.face_up[0], self.face_up[1]);
        self.face_up.clear();
        let mut events = Vec::new();

        if self.board.card(first).pair == self.board.card(second).pair {
            for index in [first, second] {
                self.board.set_face(index, FaceState::Matched);
                events.push(GameEvent::CardMatched { index });
            }
            let score = self.scores.bump(self.current);
            events.push(GameEvent::ScoreChanged {
                player: self.current,
                score,
            });
            events.push(GameEvent::Cue(Cue::MatchFound));

            if self.board.all_matched() {
                self.finish(EndReason::Completed, &mut events);
            } else {
                self.phase = Phase::AwaitingFirstFlip;
            }
        } else {
            for index in [first, second] {
                self.board.set_face(index, FaceState::FaceDown);
                events.push(GameEvent::CardHidden { index });
            }
            events.push(GameEvent::Cue(Cue::NoMatch));
            if self.mode == Mode::Multiplayer {
                self.current = self.current.other();
                events.push(GameEvent::TurnChanged {
                    player: self.current,
                });
            }
            self.phase = Phase::AwaitingFirstFlip;
        }
        events
    }

    /// One unit of Solo time. Ignored when no countdown is running.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        let Some(countdown) = self.countdown.as_mut() else {
            return Vec::new();
        };
        if !countdown.running {
            return Vec::new();
        }

        countdown.remaining = countdown.remaining.saturating_sub(1);
        let remaining = countdown.remaining;
        let mut events = vec![GameEvent::TimeChanged { remaining }];
        if remaining == 0 {
            self.finish(EndReason::TimedOut, &mut events);
        }
        events
    }

    fn finish(&mut self, reason: EndReason, events: &mut Vec<GameEvent>) {
        self.phase = Phase::GameOver(reason);
        if let Some(countdown) = self.countdown.as_mut() {
            countdown.running = false;
        }
        if reason == EndReason::Completed {
            events.push(GameEvent::Cue(Cue::GameWon));
        }
        events.push(GameEvent::GameOver {
            reason,
            scores: self.scores,
            elapsed: self.countdown.map(|countdown| countdown.elapsed()),
        });
    }
}
