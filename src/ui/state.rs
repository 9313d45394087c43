use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::gdk;
use libadwaita as adw;

use match_madness::engine::{
    AssetError, AssetId, AssetProvider, FolderAssets, Selection, Session, Settings, Theme,
};

/// Folder-backed provider that decodes images into GTK textures, cached per path.
pub struct TextureAssets {
    folder: FolderAssets,
    cache: RefCell<HashMap<AssetId, gdk::Texture>>,
}

impl TextureAssets {
    pub fn new(folder: FolderAssets) -> Self {
        TextureAssets {
            folder,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn cached(&self, id: &AssetId) -> Option<gdk::Texture> {
        self.cache.borrow().get(id).cloned()
    }
}

impl AssetProvider for TextureAssets {
    type Image = gdk::Texture;

    fn list_assets(&self, theme: Theme) -> Result<Vec<AssetId>, AssetError> {
        self.folder.list_assets(theme)
    }

    fn load_image(&self, id: &AssetId) -> Result<gdk::Texture, AssetError> {
        if let Some(texture) = self.cached(id) {
            return Ok(texture);
        }
        let path = self.folder.load_image(id)?;
        let texture = gdk::Texture::from_file(&gio::File::for_path(&path)).map_err(|err| {
            AssetError::Unsupported {
                path: path.clone(),
                reason: err.to_string(),
            }
        })?;
        self.cache.borrow_mut().insert(id.clone(), texture.clone());
        Ok(texture)
    }
}

pub struct CardWidget {
    pub button: gtk::Button,
    pub faces: gtk::Stack,
    pub picture: gtk::Picture,
}

pub struct AppState {
    pub view_stack: Option<gtk::Stack>,
    pub header: Option<adw::HeaderBar>,
    pub back_button: Option<gtk::Button>,
    pub restart_button: Option<gtk::Button>,
    pub start_button: Option<gtk::Button>,
    pub title_menu: Option<gtk::Label>,
    pub title_game: Option<gtk::Widget>,
    pub title_game_subtitle: Option<gtk::Label>,
    pub title_result: Option<gtk::Widget>,
    pub result_title_label: Option<gtk::Label>,
    pub result_message_label: Option<gtk::Label>,
    pub result_stats_label: Option<gtk::Label>,
    pub board_container: Option<gtk::Box>,
    pub turn_label: Option<gtk::Label>,

    pub session: Session<TextureAssets>,
    pub selection: Selection,
    pub cards: Vec<CardWidget>,
    pub timer_handle: Option<glib::SourceId>,
    pub sound: Option<gtk::MediaFile>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let provider = TextureAssets::new(FolderAssets::new(settings.card_root.clone()));
        AppState {
            view_stack: None,
            header: None,
            back_button: None,
            restart_button: None,
            start_button: None,
            title_menu: None,
            title_game: None,
            title_game_subtitle: None,
            title_result: None,
            result_title_label: None,
            result_message_label: None,
            result_stats_label: None,
            board_container: None,
            turn_label: None,
            session: Session::new(provider, settings),
            selection: Selection::default(),
            cards: Vec::new(),
            timer_handle: None,
            sound: None,
        }
    }

    pub fn in_view(&self, name: &str) -> bool {
        self.view_stack
            .as_ref()
            .and_then(|stack| stack.visible_child_name())
            .as_deref()
            == Some(name)
    }
}

pub type SharedState = Rc<RefCell<AppState>>;
