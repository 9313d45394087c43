use std::time::Duration;

use gtk4::prelude::*;

use match_madness::engine::{Epoch, GameState, Mode, Player, SessionEvent};

use super::app::dispatch;
use super::state::{AppState, SharedState};

pub(super) fn set_header_menu(state: &SharedState) {
    let st = state.borrow();
    if let (Some(header), Some(title)) = (&st.header, &st.title_menu) {
        header.set_title_widget(Some(title));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(false);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(false);
    }
}

pub(super) fn set_header_game(state: &SharedState) {
    let st = state.borrow();
    if let (Some(header), Some(title_box)) = (&st.header, &st.title_game) {
        update_hud(&st);
        header.set_title_widget(Some(title_box));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(true);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(true);
    }
}

pub(super) fn set_header_result(state: &SharedState) {
    let st = state.borrow();
    if let (Some(header), Some(title)) = (&st.header, &st.title_result) {
        header.set_title_widget(Some(title));
    }
    if let Some(back) = &st.back_button {
        back.set_visible(true);
    }
    if let Some(restart) = &st.restart_button {
        restart.set_visible(false);
    }
}

pub(super) fn format_mm_ss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

fn status_line(game: &GameState) -> String {
    match game.mode() {
        Mode::Solo => {
            let remaining = game.countdown().map_or(0, |countdown| countdown.remaining());
            format!(
                "Solo | {} | Pairs {}",
                format_mm_ss(remaining),
                game.scores().get(Player::One)
            )
        }
        Mode::Multiplayer => {
            let scores = game.scores();
            format!(
                "P1 {} | P2 {}",
                scores.get(Player::One),
                scores.get(Player::Two)
            )
        }
    }
}

pub(super) fn update_hud(st: &AppState) {
    let Some(game) = st.session.game() else {
        return;
    };
    if let Some(subtitle) = &st.title_game_subtitle {
        subtitle.set_text(&status_line(game));
    }
    if let Some(turn) = &st.turn_label {
        match game.mode() {
            Mode::Solo => turn.set_visible(false),
            Mode::Multiplayer => {
                turn.set_visible(true);
                turn.set_text(&format!("Player {}'s turn", game.current_player().number()));
                for player in [Player::One, Player::Two] {
                    turn.remove_css_class(&format!("player-{}", player.number()));
                }
                turn.add_css_class(&format!("player-{}", game.current_player().number()));
            }
        }
    }
}

pub(super) fn stop_timer(st: &mut AppState) {
    if let Some(handle) = st.timer_handle.take() {
        handle.remove();
    }
}

pub(super) fn start_timer(state: &SharedState, epoch: Epoch, interval: Duration) {
    let mut st = state.borrow_mut();
    stop_timer(&mut st);

    let state_tick = state.clone();
    let handle = glib::timeout_add_local(interval, move || {
        dispatch(&state_tick, SessionEvent::TimerTick { epoch });
        glib::ControlFlow::Continue
    });
    st.timer_handle = Some(handle);
}
