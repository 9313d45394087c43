use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gtk4 as gtk;
use gtk4::gdk;
use gtk4::prelude::*;
use libadwaita as adw;
use adw::prelude::*;
use gio::SimpleAction;

use match_madness::engine::{
    GameEvent, LOG_DOMAIN, Schedule, SessionEvent, Settings, SetupError, Update,
};

use super::board::{CONTENT_MARGIN, mark_card_matched, show_card_back, show_card_face};
use super::dialogs::{show_about_dialog, show_instructions_dialog, show_setup_warning};
use super::hud::{set_header_menu, start_timer, stop_timer, update_hud};
use super::menu::build_menu_view;
use super::scene::{build_result_view, show_game, show_menu, show_result};
use super::sound::play_cue;
use super::state::{AppState, SharedState};

const APP_ID: &str = "io.github.matchmadness.MatchMadness";
const RESULT_DELAY_MS: u64 = 700;

const STYLE_CSS: &str = "
.app-window { background-color: #ffaeb9; }
.main-menu-title { margin-bottom: 12px; }
.menu-section-title { font-weight: bold; margin-top: 6px; }
.match-card { padding: 0; border-radius: 12px; background-color: #ffffff; }
.match-card.active { box-shadow: 0 0 0 3px #ff6f91; }
.match-card.matched { opacity: 0.55; }
.card-back { color: #ff6f91; }
.turn-label { font-weight: bold; }
.turn-label.player-1 { color: #1c71d8; }
.turn-label.player-2 { color: #c01c28; }
.result-card { border-radius: 18px; background-color: alpha(#ffffff, 0.85); }
";

fn load_css() {
    let Some(display) = gdk::Display::default() else {
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(STYLE_CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

fn load_settings() -> Settings {
    match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            glib::g_warning!(LOG_DOMAIN, "{}; using default settings", err);
            Settings::default()
        }
    }
}

/// Feeds one event into the session and renders the result.
pub(super) fn dispatch(state: &SharedState, event: SessionEvent) {
    let update = state.borrow_mut().session.handle(event);
    apply_update(state, update);
}

pub(super) fn apply_update(state: &SharedState, update: Update) {
    if update.is_empty() {
        return;
    }
    let mut game_over = false;
    {
        let mut st = state.borrow_mut();
        for event in &update.events {
            match event {
                GameEvent::CardShown { index, .. } => {
                    if let Some(game) = st.session.game() {
                        show_card_face(&st, game.board(), *index);
                    }
                }
                GameEvent::CardHidden { index } => show_card_back(&st, *index),
                GameEvent::CardMatched { index } => mark_card_matched(&st, *index),
                GameEvent::ScoreChanged { .. }
                | GameEvent::TurnChanged { .. }
                | GameEvent::TimeChanged { .. } => update_hud(&st),
                GameEvent::GameOver { .. } => {
                    update_hud(&st);
                    game_over = true;
                }
                GameEvent::Cue(cue) => play_cue(&mut st, *cue),
            }
        }
    }

    for schedule in update.schedule {
        match schedule {
            Schedule::Resolve { epoch, delay } => {
                let state_resolve = state.clone();
                glib::timeout_add_local_once(delay, move || {
                    dispatch(&state_resolve, SessionEvent::ResolveDue { epoch });
                });
            }
            Schedule::StartTimer { epoch, interval } => start_timer(state, epoch, interval),
            Schedule::StopTimer => stop_timer(&mut state.borrow_mut()),
        }
    }

    if game_over {
        let epoch = state.borrow().session.epoch();
        let state_result = state.clone();
        glib::timeout_add_local_once(Duration::from_millis(RESULT_DELAY_MS), move || {
            let current = {
                let st = state_result.borrow();
                st.session.epoch() == epoch && st.in_view("game")
            };
            if current {
                show_result(&state_result);
            }
        });
    }
}

pub fn handle_card_click(state: &SharedState, index: usize) {
    dispatch(state, SessionEvent::CardClicked { index });
}

fn begin_game(
    state: &SharedState,
    app: &adw::Application,
    start: impl FnOnce(&mut AppState) -> Result<Update, SetupError>,
) {
    let result = start(&mut state.borrow_mut());

    match result {
        Ok(update) => {
            show_game(state);
            apply_update(state, update);
        }
        Err(err) => {
            show_menu(state);
            show_setup_warning(app, &err.to_string());
        }
    }
}

pub(super) fn start_selected_game(state: &SharedState, app: &adw::Application) {
    let Some(setup) = state.borrow().selection.ready() else {
        return;
    };
    begin_game(state, app, |st| st.session.start(setup));
}

pub(super) fn play_again(state: &SharedState, app: &adw::Application) {
    if state.borrow().session.last_setup().is_none() {
        show_menu(state);
        return;
    }
    begin_game(state, app, |st| st.session.play_again());
}

pub fn run() -> glib::ExitCode {
    glib::set_prgname(Some(APP_ID));
    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        load_css();

        let state: SharedState = Rc::new(RefCell::new(AppState::new(load_settings())));

        let instructions_action = SimpleAction::new("instructions", None);
        instructions_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_instructions_dialog(&app);
            }
        });
        app.add_action(&instructions_action);

        let about_action = SimpleAction::new("about", None);
        about_action.connect_activate({
            let app = app.clone();
            move |_, _| {
                show_about_dialog(&app);
            }
        });
        app.add_action(&about_action);

        let quit_action = SimpleAction::new("quit", None);
        quit_action.connect_activate({
            let app = app.clone();
            move |_, _| app.quit()
        });
        app.add_action(&quit_action);

        let title_menu = gtk::Label::new(None);
        title_menu.set_markup("<b>Match Madness</b>");
        title_menu.set_halign(gtk::Align::Center);

        let title_game_box = gtk::Box::new(gtk::Orientation::Vertical, 0);
        title_game_box.set_valign(gtk::Align::Center);
        title_game_box.set_halign(gtk::Align::Center);
        title_game_box.set_hexpand(true);

        let title_game_main = gtk::Label::builder()
            .label("Match Madness")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-main"])
            .build();

        let title_game_subtitle = gtk::Label::builder()
            .label("")
            .halign(gtk::Align::Center)
            .css_classes(vec!["game-title-subtitle", "caption"])
            .build();

        title_game_box.append(&title_game_main);
        title_game_box.append(&title_game_subtitle);

        let title_result = gtk::Label::new(None);
        title_result.set_markup("<b>Results</b>");
        title_result.set_halign(gtk::Align::Center);

        let header = adw::HeaderBar::builder()
            .title_widget(&title_menu)
            .build();
        header.add_css_class("app-header");
        header.add_css_class("flat");

        let back_button = gtk::Button::builder()
            .icon_name("go-previous-symbolic")
            .build();
        back_button.set_tooltip_text(Some("Main Menu"));
        back_button.connect_clicked({
            let state = state.clone();
            move |_| {
                show_menu(&state);
            }
        });
        header.pack_start(&back_button);

        let menu_model = gio::Menu::new();
        menu_model.append(Some("How to Play"), Some("app.instructions"));
        menu_model.append(Some("About Match Madness"), Some("app.about"));
        menu_model.append(Some("Quit"), Some("app.quit"));
        let menu_button = gtk::MenuButton::builder()
            .icon_name("open-menu-symbolic")
            .menu_model(&menu_model)
            .build();

        let restart_button = gtk::Button::builder()
            .icon_name("view-refresh-symbolic")
            .build();
        restart_button.set_tooltip_text(Some("New Game"));
        restart_button.connect_clicked({
            let state = state.clone();
            let app = app.clone();
            move |_| {
                play_again(&state, &app);
            }
        });
        let end_box = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        end_box.append(&restart_button);
        end_box.append(&menu_button);
        header.pack_end(&end_box);

        let view_stack = gtk::Stack::new();
        view_stack.set_hexpand(true);
        view_stack.set_vexpand(true);
        view_stack.set_hhomogeneous(false);
        view_stack.set_vhomogeneous(false);
        view_stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        view_stack.set_transition_duration(300);

        let game_view = build_game_view(&state);
        view_stack.add_named(&game_view, Some("game"));

        let result_view = build_result_view(&state, app);
        view_stack.add_named(&result_view, Some("result"));

        let menu_view = build_menu_view(&state, app);
        view_stack.add_named(&menu_view, Some("menu"));

        view_stack.set_visible_child_name("menu");
        let toolbar = adw::ToolbarView::new();
        toolbar.set_hexpand(true);
        toolbar.set_vexpand(true);
        toolbar.add_top_bar(&header);
        toolbar.set_content(Some(&view_stack));

        let win = adw::ApplicationWindow::builder()
            .application(app)
            .title("Match Madness")
            .default_width(800)
            .default_height(600)
            .content(&toolbar)
            .build();
        win.set_size_request(360, 520);
        win.add_css_class("app-window");

        {
            let mut st = state.borrow_mut();
            st.view_stack = Some(view_stack.clone());
            st.header = Some(header.clone());
            st.back_button = Some(back_button);
            st.restart_button = Some(restart_button);
            st.title_menu = Some(title_menu);
            st.title_game = Some(title_game_box.upcast::<gtk::Widget>());
            st.title_game_subtitle = Some(title_game_subtitle);
            st.title_result = Some(title_result.upcast::<gtk::Widget>());
        }

        let global_key = gtk::EventControllerKey::new();
        global_key.set_propagation_phase(gtk::PropagationPhase::Capture);
        global_key.connect_key_pressed({
            let state = state.clone();
            move |_, key, _, _| {
                if key == gdk::Key::Escape {
                    let leave = {
                        let st = state.borrow();
                        st.in_view("game") || st.in_view("result")
                    };
                    if leave {
                        show_menu(&state);
                        return glib::Propagation::Stop;
                    }
                }
                glib::Propagation::Proceed
            }
        });
        win.add_controller(global_key);

        set_header_menu(&state);
        win.present();
    });

    app.run()
}

fn build_game_view(state: &SharedState) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("game-root");

    let content = gtk::Box::new(gtk::Orientation::Vertical, 12);
    content.set_hexpand(true);
    content.set_vexpand(true);
    content.set_halign(gtk::Align::Fill);
    content.set_valign(gtk::Align::Fill);
    content.set_margin_top(CONTENT_MARGIN);
    content.set_margin_bottom(CONTENT_MARGIN);
    content.set_margin_start(CONTENT_MARGIN);
    content.set_margin_end(CONTENT_MARGIN);

    let turn_label = gtk::Label::new(None);
    turn_label.add_css_class("turn-label");
    turn_label.add_css_class("title-4");
    turn_label.set_halign(gtk::Align::Center);
    turn_label.set_visible(false);
    content.append(&turn_label);

    let board_frame = gtk::AspectFrame::new(0.5, 0.5, 1.0, false);
    board_frame.set_halign(gtk::Align::Fill);
    board_frame.set_valign(gtk::Align::Fill);
    board_frame.set_hexpand(true);
    board_frame.set_vexpand(true);

    let board_card = gtk::Box::new(gtk::Orientation::Vertical, 0);
    board_card.set_halign(gtk::Align::Fill);
    board_card.set_valign(gtk::Align::Fill);
    board_card.set_hexpand(true);
    board_card.set_vexpand(true);
    board_card.add_css_class("match-board-container");

    board_frame.set_child(Some(&board_card));
    content.append(&board_frame);
    root.append(&content);

    {
        let mut st = state.borrow_mut();
        st.board_container = Some(board_card);
        st.turn_label = Some(turn_label);
    }

    root
}
