use rand::Rng;
use rand::seq::SliceRandom;

use super::assets::{AssetId, AssetProvider};
use super::config::{Difficulty, Theme};
use super::error::SetupError;

/// Index into a board's image list. Two cards share each value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaceState {
    FaceDown,
    FaceUp,
    Matched,
}

#[derive(Clone, Debug)]
pub struct Card {
    pub index: usize,
    pub pair: PairId,
    pub face: FaceState,
}

/// A dealt grid. Pair assignment is fixed at deal time; only `face` changes later.
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    images: Vec<AssetId>,
    cards: Vec<Card>,
}

impl Board {
    /// Takes the first `pairs` images of the sorted list, doubles them and shuffles.
    pub fn deal<R: Rng + ?Sized>(
        difficulty: Difficulty,
        theme: Theme,
        sorted_images: &[AssetId],
        rng: &mut R,
    ) -> Result<Board, SetupError> {
        let (rows, cols) = difficulty.grid();
        let needed = difficulty.pair_count();
        if sorted_images.len() < needed {
            return Err(SetupError::InsufficientAssets {
                theme,
                needed,
                found: sorted_images.len(),
            });
        }

        let images = sorted_images[..needed].to_vec();
        let mut pairs: Vec<PairId> = (0..needed).flat_map(|id| [PairId(id), PairId(id)]).collect();
        pairs.shuffle(rng);

        Ok(Board::from_layout(rows, cols, images, pairs))
    }

    /// Builds a board from an explicit pair layout.
    pub fn from_layout(
        rows: usize,
        cols: usize,
        images: Vec<AssetId>,
        layout: Vec<PairId>,
    ) -> Board {
        assert_eq!(layout.len(), rows * cols, "layout does not fill the grid");
        assert!(layout.len() >= 2 && layout.len() % 2 == 0, "grid needs an even card count");
        let mut counts = vec![0usize; images.len()];
        for pair in &layout {
            assert!(pair.0 < images.len(), "pair {} has no image", pair.0);
            counts[pair.0] += 1;
        }
        assert!(
            counts.iter().all(|&count| count == 2),
            "every image must appear exactly twice"
        );

        let cards = layout
            .into_iter()
            .enumerate()
            .map(|(index, pair)| Card {
                index,
                pair,
                face: FaceState::FaceDown,
            })
            .collect();
        Board {
            rows,
            cols,
            images,
            cards,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> &Card {
        assert!(index < self.cards.len(), "card index {index} out of range");
        &self.cards[index]
    }

    pub fn image(&self, pair: PairId) -> &AssetId {
        &self.images[pair.0]
    }

    pub fn image_at(&self, index: usize) -> &AssetId {
        self.image(self.card(index).pair)
    }

    pub fn images(&self) -> &[AssetId] {
        &self.images
    }

    pub fn pair_count(&self) -> usize {
        self.images.len()
    }

    /// Both positions holding `pair`, in board order.
    pub fn positions_of(&self, pair: PairId) -> [usize; 2] {
        let mut found = self.cards.iter().filter(|card| card.pair == pair).map(|card| card.index);
        match (found.next(), found.next()) {
            (Some(a), Some(b)) => [a, b],
            _ => panic!("pair {} is not on the board", pair.0),
        }
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.face == FaceState::Matched)
    }

    pub(crate) fn set_face(&mut self, index: usize, face: FaceState) {
        assert!(index < self.cards.len(), "card index {index} out of range");
        self.cards[index].face = face;
    }
}

/// Lists the theme's images and deals a board for `difficulty`.
pub fn setup<P, R>(
    provider: &P,
    difficulty: Difficulty,
    theme: Theme,
    rng: &mut R,
) -> Result<Board, SetupError>
where
    P: AssetProvider + ?Sized,
    R: Rng + ?Sized,
{
    let images = provider.list_assets(theme)?;
    Board::deal(difficulty, theme, &images, rng)
}
