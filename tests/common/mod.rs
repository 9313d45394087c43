#![allow(dead_code)]

use match_madness::engine::{
    AssetError, AssetId, AssetProvider, Board, Difficulty, GameState, Mode, PairId, Theme,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Sorted fake image ids `card00.png`, `card01.png`, ...
pub fn images(count: usize) -> Vec<AssetId> {
    (0..count)
        .map(|i| AssetId::new(format!("card{i:02}.png")))
        .collect()
}

/// In-memory provider that serves the same sorted list for every theme.
#[derive(Clone, Debug)]
pub struct MemoryAssets {
    pub images: Vec<AssetId>,
}

impl MemoryAssets {
    pub fn with_count(count: usize) -> Self {
        MemoryAssets {
            images: images(count),
        }
    }
}

impl AssetProvider for MemoryAssets {
    type Image = ();

    fn list_assets(&self, _theme: Theme) -> Result<Vec<AssetId>, AssetError> {
        Ok(self.images.clone())
    }

    fn load_image(&self, _id: &AssetId) -> Result<(), AssetError> {
        Ok(())
    }
}

/// Lists like [`MemoryAssets`] but refuses to load `broken`.
#[derive(Clone, Debug)]
pub struct FailingAssets {
    pub images: Vec<AssetId>,
    pub broken: AssetId,
}

impl FailingAssets {
    pub fn new(count: usize, broken: usize) -> Self {
        let images = images(count);
        let broken = images[broken].clone();
        FailingAssets { images, broken }
    }
}

impl AssetProvider for FailingAssets {
    type Image = ();

    fn list_assets(&self, _theme: Theme) -> Result<Vec<AssetId>, AssetError> {
        Ok(self.images.clone())
    }

    fn load_image(&self, id: &AssetId) -> Result<(), AssetError> {
        if *id == self.broken {
            return Err(AssetError::Unsupported {
                path: id.path().to_path_buf(),
                reason: "corrupt image data".to_string(),
            });
        }
        Ok(())
    }
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn deal(difficulty: Difficulty, seed: u64) -> Board {
    Board::deal(
        difficulty,
        Theme::Animals,
        &images(difficulty.pair_count()),
        &mut seeded(seed),
    )
    .unwrap()
}

pub fn new_game(difficulty: Difficulty, mode: Mode, seed: u64) -> GameState {
    GameState::new(deal(difficulty, seed), mode, 180)
}

/// Flips both cards of `pair` and resolves.
pub fn match_pair(game: &mut GameState, pair: usize) {
    let [a, b] = game.board().positions_of(PairId(pair));
    game.flip(a);
    game.flip(b);
    game.resolve();
}

/// Flips one card of each of two different pairs and resolves.
pub fn miss(game: &mut GameState, pair_a: usize, pair_b: usize) {
    assert_ne!(pair_a, pair_b);
    let [a, _] = game.board().positions_of(PairId(pair_a));
    let [b, _] = game.board().positions_of(PairId(pair_b));
    game.flip(a);
    game.flip(b);
    game.resolve();
}
