use std::path::{Path, PathBuf};

use gtk4 as gtk;
use gtk4::prelude::*;

use match_madness::engine::{Cue, LOG_DOMAIN};

use super::state::AppState;

const SOUND_EXTENSIONS: [&str; 3] = ["ogg", "wav", "mp3"];

fn cue_stem(cue: Cue) -> &'static str {
    match cue {
        Cue::MatchFound => "match",
        Cue::NoMatch => "nomatch",
        Cue::GameWon => "win",
    }
}

fn cue_file(dir: &Path, cue: Cue) -> Option<PathBuf> {
    SOUND_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", cue_stem(cue), ext)))
        .find(|path| path.is_file())
}

/// Plays the file for `cue` if a sound folder is configured and has one.
pub(super) fn play_cue(st: &mut AppState, cue: Cue) {
    let Some(dir) = st.session.settings().sound_dir.clone() else {
        return;
    };
    let Some(path) = cue_file(&dir, cue) else {
        glib::g_debug!(LOG_DOMAIN, "no sound for {:?} in {}", cue, dir.display());
        return;
    };

    let media = gtk::MediaFile::for_filename(&path);
    media.play();
    // Keep the stream alive until the next cue replaces it.
    st.sound = Some(media);
}
