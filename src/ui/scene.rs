use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;

use match_madness::engine::{EndReason, GameState, Mode, Player, Winner};

use super::app::{apply_update, play_again};
use super::board::{build_board_grid, sync_faces};
use super::hud::{format_mm_ss, set_header_game, set_header_menu, set_header_result};
use super::state::SharedState;

pub(super) struct ResultText {
    pub title: String,
    pub message: String,
    pub stats: String,
}

pub(super) fn result_text(game: &GameState) -> ResultText {
    let (_, reason) = game.is_game_over();
    let scores = game.scores();
    match (game.mode(), reason) {
        (Mode::Solo, Some(EndReason::TimedOut)) => ResultText {
            title: "Time's Up!".to_string(),
            message: "The clock beat you this time.".to_string(),
            stats: format!(
                "Pairs found: {} of {}",
                scores.get(Player::One),
                game.board().pair_count()
            ),
        },
        (Mode::Solo, _) => {
            let elapsed = game.countdown().map_or(0, |countdown| countdown.elapsed());
            ResultText {
                title: "All Pairs Found!".to_string(),
                message: "You cleared the board before time ran out.".to_string(),
                stats: format!("Time: {}", format_mm_ss(elapsed)),
            }
        }
        (Mode::Multiplayer, _) => {
            let message = match game.winner() {
                Some(Winner::Player(player)) => format!("Player {} wins!", player.number()),
                _ => "It's a tie!".to_string(),
            };
            ResultText {
                title: "Game Over".to_string(),
                message,
                stats: format!(
                    "Player 1: {}\nPlayer 2: {}",
                    scores.get(Player::One),
                    scores.get(Player::Two)
                ),
            }
        }
    }
}

pub(super) fn rebuild_board(state: &SharedState) {
    let (board_container, rows, cols) = {
        let st = state.borrow();
        let shape = st
            .session
            .game()
            .map_or((0, 0), |game| (game.board().rows(), game.board().cols()));
        (st.board_container.clone(), shape.0, shape.1)
    };
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    let grid_ratio = if rows > 0 { cols as f32 / rows as f32 } else { 1.0 };
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, grid_ratio, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&grid));
    board_container.append(&grid_frame);

    sync_faces(&state.borrow());
}

pub(super) fn show_game(state: &SharedState) {
    rebuild_board(state);
    set_header_game(state);
    let st = state.borrow();
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        stack.set_visible_child_name("game");
    }
}

pub(super) fn show_result(state: &SharedState) {
    {
        let st = state.borrow();
        let Some(game) = st.session.game() else {
            return;
        };
        let text = result_text(game);
        if let Some(label) = &st.result_title_label {
            label.set_text(&text.title);
        }
        if let Some(label) = &st.result_message_label {
            label.set_text(&text.message);
        }
        if let Some(label) = &st.result_stats_label {
            label.set_text(&text.stats);
        }
    }
    set_header_result(state);
    let st = state.borrow();
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        stack.set_visible_child_name("result");
    }
}

pub(super) fn show_menu(state: &SharedState) {
    let update = state.borrow_mut().session.return_to_menu();
    apply_update(state, update);
    set_header_menu(state);
    let st = state.borrow();
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideRight);
        stack.set_visible_child_name("menu");
    }
}

pub(super) fn build_result_view(state: &SharedState, app: &adw::Application) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("result-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let card_shell = gtk::Box::new(gtk::Orientation::Vertical, 0);
    card_shell.set_halign(gtk::Align::Center);
    card_shell.set_valign(gtk::Align::Center);
    card_shell.add_css_class("result-card");
    card_shell.set_size_request(280, -1);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 14);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_margin_top(28);
    content.set_margin_bottom(28);
    content.set_margin_start(28);
    content.set_margin_end(28);

    let title = gtk::Label::new(Some("Game Over"));
    title.add_css_class("result-title");
    title.add_css_class("title-1");

    let message = gtk::Label::new(Some(""));
    message.add_css_class("result-message");
    message.add_css_class("body");
    message.set_wrap(true);
    message.set_justify(gtk::Justification::Center);
    message.set_max_width_chars(36);

    let stats = gtk::Label::new(None);
    stats.add_css_class("result-message");
    stats.add_css_class("body");
    stats.set_wrap(true);
    stats.set_justify(gtk::Justification::Center);
    stats.set_max_width_chars(36);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 12);
    buttons.set_halign(gtk::Align::Center);
    buttons.set_margin_top(6);

    let again_btn = gtk::Button::with_label("Play Again");
    again_btn.add_css_class("suggested-action");
    let menu_btn = gtk::Button::with_label("Main Menu");

    again_btn.connect_clicked({
        let state = state.clone();
        let app = app.clone();
        move |_| {
            play_again(&state, &app);
        }
    });
    menu_btn.connect_clicked({
        let state = state.clone();
        move |_| {
            show_menu(&state);
        }
    });

    buttons.append(&again_btn);
    buttons.append(&menu_btn);

    content.append(&title);
    content.append(&message);
    content.append(&stats);
    content.append(&buttons);
    card_shell.append(&content);
    center.set_center_widget(Some(&card_shell));
    root.append(&center);

    {
        let mut st = state.borrow_mut();
        st.result_title_label = Some(title);
        st.result_message_label = Some(message);
        st.result_stats_label = Some(stats);
    }

    root
}
