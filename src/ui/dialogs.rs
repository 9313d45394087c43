use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;

pub fn show_instructions_dialog(app: &adw::Application) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(
        Some("How to Play"),
        Some(
            "Flip two cards per turn and try to find matching pictures.\n\
Solo: match every pair before the clock runs out.\n\
Two Players: find a pair and you go again, miss and your turn passes. \
Most pairs wins.",
        ),
    );
    dialog.add_response("ok", "Got it");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}

pub fn show_about_dialog(app: &adw::Application) -> adw::AboutDialog {
    let dialog = adw::AboutDialog::builder()
        .application_name("Match Madness")
        .application_icon("io.github.matchmadness.MatchMadness")
        .developer_name("Match Madness Developers")
        .version(env!("CARGO_PKG_VERSION"))
        .comments("A card matching memory game for one or two players.")
        .build();
    dialog.add_legal_section("Match Madness", None, gtk::License::MitX11, None);
    dialog.present(app.active_window().as_ref());
    dialog
}

/// Blocks until acknowledged. Used when a game cannot be dealt.
pub fn show_setup_warning(app: &adw::Application, message: &str) -> adw::AlertDialog {
    let dialog = adw::AlertDialog::new(Some("Cannot Start Game"), Some(message));
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present(app.active_window().as_ref());
    dialog
}
