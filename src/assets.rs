//! Asset probing and visual selection
//!
//! The platform decodes textures and fonts; this module only decides which
//! files to try and what to draw when they are missing. Every miss degrades
//! to a procedural visual and logs a warning.

use std::fs;
use std::path::{Path, PathBuf};

/// Handle for an asset the platform has loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub u16);

/// RGBA8 color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b, 255)
    }
}

/// How an entity is drawn, chosen once at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visual {
    Sprite(AssetId),
    Shape { fill: Rgba, outline: Rgba },
}

impl Visual {
    pub const ENEMY_SHAPE: Visual = Visual::Shape {
        fill: Rgba::rgb(200, 60, 60),
        outline: Rgba::rgb(255, 180, 180),
    };
    pub const PROJECTILE_SHAPE: Visual = Visual::Shape {
        fill: Rgba::rgb(255, 220, 80),
        outline: Rgba::rgb(255, 255, 160),
    };
    pub const PLAYER_SHAPE: Visual = Visual::Shape {
        fill: Rgba::rgb(90, 200, 255),
        outline: Rgba::rgb(90, 200, 255),
    };
}

/// Screen background
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Image(AssetId),
    Gradient { top: Rgba, bottom: Rgba },
}

impl Backdrop {
    pub const FALLBACK: Backdrop = Backdrop::Gradient {
        top: Rgba::rgb(10, 10, 40),
        bottom: Rgba::rgb(30, 30, 100),
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Background,
    Font,
    EnemyTexture,
}

/// A probed asset file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub id: AssetId,
    pub kind: AssetKind,
    pub path: PathBuf,
}

const BACKGROUND_NAMES: [&str; 4] = ["space_bg.png", "space_bg.jpg", "space_bg.jpeg", "space_bg.bmp"];
const FONT_NAMES: [&str; 5] = [
    "Orbitron.ttf",
    "RobotoMono.ttf",
    "Roboto-Regular.ttf",
    "DejaVuSans.ttf",
    "font.ttf",
];

/// Which optional assets are available
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetCatalog {
    pub background: Option<Asset>,
    pub font: Option<Asset>,
    pub enemy_texture: Option<Asset>,
}

impl AssetCatalog {
    /// No assets at all: everything renders procedurally
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look for assets under `root` (working directory) and `asset_dir`
    pub fn probe(root: &Path, asset_dir: &Path) -> Self {
        let asset_dir = root.join(asset_dir);

        let background_candidates: Vec<PathBuf> = BACKGROUND_NAMES
            .iter()
            .map(|n| root.join(n))
            .chain(BACKGROUND_NAMES.iter().map(|n| asset_dir.join(n)))
            .collect();
        let font_candidates: Vec<PathBuf> = FONT_NAMES.iter().map(|n| asset_dir.join(n)).collect();
        let enemy_candidates = [
            root.join("enemy.png"),
            asset_dir.join("enemy.png"),
            asset_dir.join("textures").join("enemy.png"),
        ];

        let background = first_existing(&background_candidates).map(|path| Asset {
            id: AssetId(0),
            kind: AssetKind::Background,
            path,
        });
        let font = first_existing(&font_candidates).map(|path| Asset {
            id: AssetId(1),
            kind: AssetKind::Font,
            path,
        });
        let enemy_texture = first_existing(&enemy_candidates).map(|path| Asset {
            id: AssetId(2),
            kind: AssetKind::EnemyTexture,
            path,
        });

        let catalog = Self {
            background,
            font,
            enemy_texture,
        };
        catalog.log_summary();
        catalog
    }

    fn log_summary(&self) {
        match &self.background {
            Some(a) => log::info!("Background: {}", a.path.display()),
            None => log::warn!("No space_bg.(png|jpg|jpeg|bmp) found, using gradient backdrop"),
        }
        match &self.font {
            Some(a) => log::info!("HUD font: {}", a.path.display()),
            None => log::warn!("No HUD font found, HUD will be minimal"),
        }
        match &self.enemy_texture {
            Some(a) => log::info!("Enemy texture: {}", a.path.display()),
            None => log::warn!("No enemy texture found, enemies drawn as shapes"),
        }
    }

    /// Forget an asset the platform failed to decode
    pub fn mark_failed(&mut self, kind: AssetKind) {
        let slot = match kind {
            AssetKind::Background => &mut self.background,
            AssetKind::Font => &mut self.font,
            AssetKind::EnemyTexture => &mut self.enemy_texture,
        };
        if let Some(asset) = slot.take() {
            log::warn!("Failed to decode {}, falling back", asset.path.display());
        }
    }

    /// Every asset that was found
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        [&self.background, &self.font, &self.enemy_texture]
            .into_iter()
            .flatten()
    }

    pub fn backdrop(&self) -> Backdrop {
        match &self.background {
            Some(a) => Backdrop::Image(a.id),
            None => Backdrop::FALLBACK,
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn enemy_texture_id(&self) -> Option<AssetId> {
        self.enemy_texture.as_ref().map(|a| a.id)
    }
}

/// First candidate that exists and is non-empty
fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates
        .iter()
        .find(|p| fs::metadata(p).map(|m| m.is_file() && m.len() > 0).unwrap_or(false))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_empty_dir_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = AssetCatalog::probe(dir.path(), Path::new("Assets"));
        assert_eq!(catalog, AssetCatalog::empty());
        assert_eq!(catalog.backdrop(), Backdrop::FALLBACK);
        assert!(!catalog.has_font());
        assert_eq!(catalog.enemy_texture_id(), None);
    }

    #[test]
    fn test_probe_finds_assets_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("Assets");
        fs::create_dir_all(assets.join("textures")).unwrap();
        fs::write(assets.join("space_bg.jpg"), b"jpg").unwrap();
        fs::write(assets.join("DejaVuSans.ttf"), b"ttf").unwrap();
        fs::write(assets.join("font.ttf"), b"ttf").unwrap();
        fs::write(assets.join("textures").join("enemy.png"), b"png").unwrap();

        let catalog = AssetCatalog::probe(dir.path(), Path::new("Assets"));
        assert_eq!(catalog.background.as_ref().unwrap().path, assets.join("space_bg.jpg"));
        assert_eq!(catalog.font.as_ref().unwrap().path, assets.join("DejaVuSans.ttf"));
        assert!(catalog.enemy_texture.is_some());
        assert_eq!(catalog.assets().count(), 3);
        assert!(matches!(catalog.backdrop(), Backdrop::Image(_)));
    }

    #[test]
    fn test_empty_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("space_bg.png"), b"").unwrap();
        let catalog = AssetCatalog::probe(dir.path(), Path::new("Assets"));
        assert!(catalog.background.is_none());
    }

    #[test]
    fn test_mark_failed_drops_asset() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("enemy.png"), b"png").unwrap();
        let mut catalog = AssetCatalog::probe(dir.path(), Path::new("Assets"));
        assert!(catalog.enemy_texture_id().is_some());
        catalog.mark_failed(AssetKind::EnemyTexture);
        assert_eq!(catalog.enemy_texture_id(), None);
    }
}
