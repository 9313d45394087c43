use gtk4 as gtk;
use gtk4::prelude::*;
use libadwaita as adw;

use match_madness::engine::{Difficulty, Mode, Selection, Theme};

use super::app::start_selected_game;
use super::state::SharedState;

fn add_picker_row<T: Copy + 'static>(
    content: &gtk::Box,
    state: &SharedState,
    title: &str,
    options: &[(T, &str)],
    apply: fn(&mut Selection, T),
) {
    let label = gtk::Label::new(Some(title));
    label.add_css_class("menu-section-title");
    label.set_halign(gtk::Align::Start);
    content.append(&label);

    let row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
    row.add_css_class("linked");
    row.set_halign(gtk::Align::Fill);

    let mut group: Option<gtk::ToggleButton> = None;
    for &(value, name) in options {
        let button = gtk::ToggleButton::with_label(name);
        button.set_hexpand(true);
        button.set_size_request(-1, 40);
        button.add_css_class("menu-choice");
        if let Some(first) = &group {
            button.set_group(Some(first));
        } else {
            group = Some(button.clone());
        }
        button.connect_toggled({
            let state = state.clone();
            move |button| {
                if !button.is_active() {
                    return;
                }
                let mut st = state.borrow_mut();
                apply(&mut st.selection, value);
                let ready = st.selection.is_ready();
                if let Some(start) = &st.start_button {
                    start.set_sensitive(ready);
                }
            }
        });
        row.append(&button);
    }
    content.append(&row);
}

pub(super) fn build_menu_view(state: &SharedState, app: &adw::Application) -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 0);
    root.set_hexpand(true);
    root.set_vexpand(true);
    root.add_css_class("main-menu-root");

    let center = gtk::CenterBox::new();
    center.set_hexpand(true);
    center.set_vexpand(true);

    let content = gtk::Box::new(gtk::Orientation::Vertical, 10);
    content.set_halign(gtk::Align::Center);
    content.set_valign(gtk::Align::Center);
    content.set_size_request(360, -1);
    content.add_css_class("main-menu-content");

    let title = gtk::Label::new(Some("Match Madness"));
    title.add_css_class("main-menu-title");
    title.add_css_class("title-1");
    content.append(&title);

    let themes: Vec<(Theme, &str)> = Theme::ALL.iter().map(|&t| (t, t.name())).collect();
    add_picker_row(&content, state, "Theme", &themes, |sel, theme| {
        sel.theme = Some(theme)
    });

    let difficulties: Vec<(Difficulty, &str)> =
        Difficulty::ALL.iter().map(|&d| (d, d.name())).collect();
    add_picker_row(&content, state, "Difficulty", &difficulties, |sel, difficulty| {
        sel.difficulty = Some(difficulty)
    });

    let modes: Vec<(Mode, &str)> = Mode::ALL.iter().map(|&m| (m, m.name())).collect();
    add_picker_row(&content, state, "Mode", &modes, |sel, mode| sel.mode = Some(mode));

    let start_button = gtk::Button::with_label("Start");
    start_button.add_css_class("main-menu-button");
    start_button.add_css_class("suggested-action");
    start_button.set_size_request(164, 40);
    start_button.set_halign(gtk::Align::Center);
    start_button.set_margin_top(12);
    start_button.set_sensitive(false);
    start_button.connect_clicked({
        let state = state.clone();
        let app = app.clone();
        move |_| {
            start_selected_game(&state, &app);
        }
    });
    content.append(&start_button);

    center.set_center_widget(Some(&content));
    root.append(&center);

    state.borrow_mut().start_button = Some(start_button);

    root
}
