use gtk4 as gtk;
use gtk4::pango;
use gtk4::prelude::*;

use match_madness::engine::{Board, FaceState};

use super::app::handle_card_click;
use super::state::{AppState, CardWidget, SharedState};

pub const CONTENT_MARGIN: i32 = 12;
pub const CARD_GAP: i32 = 6;

fn build_card_back() -> gtk::DrawingArea {
    let drawing_area = gtk::DrawingArea::builder()
        .hexpand(true)
        .vexpand(true)
        .build();
    drawing_area.add_css_class("card-back");
    drawing_area.set_draw_func(|area, cr, width, height| {
        let min_dim = width.min(height) as f64;
        cr.set_antialias(cairo::Antialias::Best);

        let layout = pangocairo::functions::create_layout(cr);
        let mut font_desc = pango::FontDescription::new();
        font_desc.set_family("Cantarell, Noto Sans, sans");
        font_desc.set_weight(pango::Weight::Bold);
        font_desc.set_size((min_dim * 0.34 * pango::SCALE as f64) as i32);
        layout.set_font_description(Some(&font_desc));
        layout.set_text("?");

        let fg = area.style_context().color();
        cr.set_source_rgba(
            fg.red() as f64,
            fg.green() as f64,
            fg.blue() as f64,
            fg.alpha() as f64,
        );

        let (text_width, text_height) = layout.pixel_size();
        cr.move_to(
            (width as f64 - text_width as f64) / 2.0,
            (height as f64 - text_height as f64) / 2.0,
        );
        pangocairo::functions::show_layout(cr, &layout);
    });
    drawing_area
}

pub fn build_board_grid(state: &SharedState) -> gtk::Grid {
    let grid = gtk::Grid::new();
    grid.add_css_class("match-board");
    grid.set_row_spacing(CARD_GAP as u32);
    grid.set_column_spacing(CARD_GAP as u32);
    grid.set_halign(gtk::Align::Fill);
    grid.set_valign(gtk::Align::Fill);
    grid.set_hexpand(true);
    grid.set_vexpand(true);

    let (rows, cols) = {
        let st = state.borrow();
        match st.session.game() {
            Some(game) => (game.board().rows(), game.board().cols()),
            None => (0, 0),
        }
    };

    let mut cards = Vec::with_capacity(rows * cols);
    for index in 0..rows * cols {
        let aspect_frame = gtk::AspectFrame::builder()
            .ratio(1.0)
            .obey_child(false)
            .halign(gtk::Align::Fill)
            .valign(gtk::Align::Fill)
            .hexpand(true)
            .vexpand(true)
            .build();

        let button = gtk::Button::builder().css_classes(vec!["match-card"]).build();
        button.set_hexpand(true);
        button.set_vexpand(true);

        let picture = gtk::Picture::new();
        picture.set_can_shrink(true);

        let faces = gtk::Stack::new();
        faces.set_transition_type(gtk::StackTransitionType::Crossfade);
        faces.set_transition_duration(220);
        faces.add_named(&build_card_back(), Some("back"));
        faces.add_named(&picture, Some("face"));
        faces.set_visible_child_name("back");
        button.set_child(Some(&faces));

        let state_click = state.clone();
        button.connect_clicked(move |_| {
            handle_card_click(&state_click, index);
        });

        aspect_frame.set_child(Some(&button));
        grid.attach(&aspect_frame, (index % cols) as i32, (index / cols) as i32, 1, 1);
        cards.push(CardWidget {
            button,
            faces,
            picture,
        });
    }

    state.borrow_mut().cards = cards;
    grid
}

pub(super) fn show_card_face(st: &AppState, board: &Board, index: usize) {
    let Some(card) = st.cards.get(index) else {
        return;
    };
    let image = board.image_at(index);
    card.picture.set_paintable(st.session.provider().cached(image).as_ref());
    card.faces.set_visible_child_name("face");
    card.button.add_css_class("active");
}

pub(super) fn show_card_back(st: &AppState, index: usize) {
    let Some(card) = st.cards.get(index) else {
        return;
    };
    card.faces.set_visible_child_name("back");
    card.button.remove_css_class("active");
}

pub(super) fn mark_card_matched(st: &AppState, index: usize) {
    let Some(card) = st.cards.get(index) else {
        return;
    };
    card.button.remove_css_class("active");
    card.button.add_css_class("matched");
}

/// Re-applies every card's face after the grid was rebuilt.
pub(super) fn sync_faces(st: &AppState) {
    let Some(game) = st.session.game() else {
        return;
    };
    let board = game.board();
    for card in board.cards() {
        match card.face {
            FaceState::FaceDown => show_card_back(st, card.index),
            FaceState::FaceUp => show_card_face(st, board, card.index),
            FaceState::Matched => {
                show_card_face(st, board, card.index);
                mark_card_matched(st, card.index);
            }
        }
    }
}
