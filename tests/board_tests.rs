//! Board dealing: shape, pair counts, image selection and failure modes.

mod common;

use std::collections::HashMap;

use match_madness::engine::{
    AssetId, Board, Difficulty, FaceState, PairId, SetupError, Theme, setup,
};
use proptest::prelude::*;

use common::{MemoryAssets, images, seeded};

fn pair_histogram(board: &Board) -> HashMap<PairId, usize> {
    let mut counts = HashMap::new();
    for card in board.cards() {
        *counts.entry(card.pair).or_insert(0) += 1;
    }
    counts
}

#[test]
fn every_difficulty_deals_full_grid_of_pairs() {
    for difficulty in Difficulty::ALL {
        let provider = MemoryAssets::with_count(40);
        let board = setup(&provider, difficulty, Theme::Food, &mut seeded(1)).unwrap();
        let (rows, cols) = difficulty.grid();

        assert_eq!(board.rows(), rows);
        assert_eq!(board.cols(), cols);
        assert_eq!(board.len(), rows * cols);
        assert_eq!(board.pair_count(), rows * cols / 2);

        let counts = pair_histogram(&board);
        assert_eq!(counts.len(), rows * cols / 2);
        assert!(counts.values().all(|&count| count == 2));
        assert!(board.cards().iter().all(|card| card.face == FaceState::FaceDown));
        for (position, card) in board.cards().iter().enumerate() {
            assert_eq!(card.index, position);
        }
    }
}

#[test]
fn selection_takes_first_sorted_images() {
    let provider = MemoryAssets::with_count(20);
    let board = setup(&provider, Difficulty::Easy, Theme::Nature, &mut seeded(9)).unwrap();
    assert_eq!(board.images(), &images(20)[..6]);

    let other = setup(&provider, Difficulty::Easy, Theme::Nature, &mut seeded(10)).unwrap();
    assert_eq!(board.images(), other.images());
}

#[test]
fn same_seed_gives_same_layout() {
    let a = common::deal(Difficulty::Hard, 42);
    let b = common::deal(Difficulty::Hard, 42);
    let layout = |board: &Board| board.cards().iter().map(|c| c.pair).collect::<Vec<_>>();
    assert_eq!(layout(&a), layout(&b));
}

#[test]
fn too_few_images_is_insufficient_assets() {
    let provider = MemoryAssets::with_count(7);
    let err = setup(&provider, Difficulty::Medium, Theme::Flags, &mut seeded(3)).unwrap_err();
    match err {
        SetupError::InsufficientAssets {
            theme,
            needed,
            found,
        } => {
            assert_eq!(theme, Theme::Flags);
            assert_eq!(needed, 8);
            assert_eq!(found, 7);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn exact_image_count_is_enough() {
    let provider = MemoryAssets::with_count(15);
    assert!(setup(&provider, Difficulty::Hard, Theme::Animals, &mut seeded(0)).is_ok());
}

#[test]
fn positions_of_finds_both_cards() {
    let board = common::deal(Difficulty::Medium, 5);
    for pair in 0..board.pair_count() {
        let [a, b] = board.positions_of(PairId(pair));
        assert!(a < b);
        assert_eq!(board.card(a).pair, PairId(pair));
        assert_eq!(board.card(b).pair, PairId(pair));
        assert_eq!(board.image_at(a), board.image_at(b));
    }
}

#[test]
fn from_layout_keeps_given_order() {
    let board = Board::from_layout(
        1,
        4,
        vec![AssetId::new("a.png"), AssetId::new("b.png")],
        vec![PairId(1), PairId(0), PairId(0), PairId(1)],
    );
    assert_eq!(board.positions_of(PairId(0)), [1, 2]);
    assert_eq!(board.image_at(0), &AssetId::new("b.png"));
}

#[test]
#[should_panic(expected = "exactly twice")]
fn from_layout_rejects_unpaired_cards() {
    Board::from_layout(
        1,
        4,
        vec![AssetId::new("a.png"), AssetId::new("b.png")],
        vec![PairId(0), PairId(0), PairId(0), PairId(1)],
    );
}

#[test]
#[should_panic(expected = "out of range")]
fn card_lookup_out_of_range_panics() {
    let board = common::deal(Difficulty::Easy, 1);
    board.card(12);
}

proptest! {
    #[test]
    fn any_seed_deals_valid_board(seed in any::<u64>(), pick in 0usize..3, extra in 0usize..10) {
        let difficulty = Difficulty::ALL[pick];
        let provider = MemoryAssets::with_count(difficulty.pair_count() + extra);
        let board = setup(&provider, difficulty, Theme::Food, &mut seeded(seed)).unwrap();
        prop_assert_eq!(board.len(), difficulty.card_count());
        let counts = pair_histogram(&board);
        prop_assert_eq!(counts.len(), difficulty.pair_count());
        prop_assert!(counts.values().all(|&count| count == 2));
    }
}
