use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::config::Theme;
use super::error::AssetError;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Identifies one card image. Ordering follows the path so a sorted listing is stable.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(PathBuf);

impl AssetId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        AssetId(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Source of card images for a theme.
pub trait AssetProvider {
    type Image;

    /// Every usable image for `theme`, sorted.
    fn list_assets(&self, theme: Theme) -> Result<Vec<AssetId>, AssetError>;

    fn load_image(&self, id: &AssetId) -> Result<Self::Image, AssetError>;
}

pub fn is_card_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Reads themes from `<root>/<theme folder>` on disk.
#[derive(Clone, Debug)]
pub struct FolderAssets {
    root: PathBuf,
}

impl FolderAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FolderAssets { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn theme_dir(&self, theme: Theme) -> PathBuf {
        self.root.join(theme.folder())
    }
}

impl AssetProvider for FolderAssets {
    type Image = PathBuf;

    fn list_assets(&self, theme: Theme) -> Result<Vec<AssetId>, AssetError> {
        let dir = self.theme_dir(theme);
        let entries = fs::read_dir(&dir).map_err(|source| AssetError::MissingTheme {
            path: dir.clone(),
            source,
        })?;

        let mut assets = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| AssetError::MissingTheme {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && is_card_image(&path) {
                assets.push(AssetId::new(path));
            }
        }
        assets.sort();
        Ok(assets)
    }

    fn load_image(&self, id: &AssetId) -> Result<PathBuf, AssetError> {
        let path = id.path();
        if !is_card_image(path) {
            return Err(AssetError::Unsupported {
                path: path.to_path_buf(),
                reason: "expected a .png, .jpg or .jpeg file".to_string(),
            });
        }
        fs::metadata(path).map_err(|source| AssetError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"img").unwrap();
    }

    #[test]
    fn lists_only_images_in_sorted_order() {
        let root = TempDir::new().unwrap();
        let food = root.child("food");
        fs::create_dir(&food).unwrap();
        touch(&food, "pear.PNG");
        touch(&food, "apple.jpg");
        touch(&food, "notes.txt");
        touch(&food, "cake.jpeg");
        fs::create_dir(food.join("nested.png")).unwrap();

        let provider = FolderAssets::new(root.path());
        let names: Vec<_> = provider
            .list_assets(Theme::Food)
            .unwrap()
            .iter()
            .map(|id| id.path().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["apple.jpg", "cake.jpeg", "pear.PNG"]);
    }

    #[test]
    fn missing_theme_folder_is_an_error() {
        let root = TempDir::new().unwrap();
        let provider = FolderAssets::new(root.path());
        assert!(matches!(
            provider.list_assets(Theme::Flags),
            Err(AssetError::MissingTheme { .. })
        ));
    }

    #[test]
    fn load_image_rejects_unreadable_and_unsupported_files() {
        let root = TempDir::new().unwrap();
        touch(root.path(), "ok.png");
        touch(root.path(), "readme.md");
        let provider = FolderAssets::new(root.path());

        assert!(provider.load_image(&AssetId::new(root.child("ok.png"))).is_ok());
        assert!(matches!(
            provider.load_image(&AssetId::new(root.child("readme.md"))),
            Err(AssetError::Unsupported { .. })
        ));
        assert!(matches!(
            provider.load_image(&AssetId::new(root.child("gone.png"))),
            Err(AssetError::Unreadable { .. })
        ));
    }
}
