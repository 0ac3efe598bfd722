//! Image load gate
//!
//! The loop must not start until both sprite images have either loaded or
//! failed. A failed image is fine; presentation draws a labeled fallback.

/// Sprite images the game asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageAsset {
    Player,
    Professor,
}

impl ImageAsset {
    pub const ALL: [ImageAsset; 2] = [ImageAsset::Player, ImageAsset::Professor];

    pub fn name(self) -> &'static str {
        match self {
            ImageAsset::Player => "player",
            ImageAsset::Professor => "professor",
        }
    }

    pub fn src(self) -> &'static str {
        match self {
            ImageAsset::Player => "catgif.gif",
            ImageAsset::Professor => "catgif2.gif",
        }
    }

    /// Text shown in place of a missing image
    pub fn fallback_label(self) -> &'static str {
        match self {
            ImageAsset::Player => "Player",
            ImageAsset::Professor => "Professor",
        }
    }

    /// Solid color used in place of a missing image
    pub fn fallback_color_hex(self) -> &'static str {
        match self {
            ImageAsset::Player => "#3498db",
            ImageAsset::Professor => "#e74c3c",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetStatus {
    Pending,
    Loaded,
    Failed,
}

/// Tracks both images and reports "ready" exactly once
#[derive(Debug, Clone)]
pub struct AssetGate {
    player: AssetStatus,
    professor: AssetStatus,
    fired: bool,
}

impl Default for AssetGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetGate {
    pub fn new() -> Self {
        Self {
            player: AssetStatus::Pending,
            professor: AssetStatus::Pending,
            fired: false,
        }
    }

    pub fn status(&self, asset: ImageAsset) -> AssetStatus {
        match asset {
            ImageAsset::Player => self.player,
            ImageAsset::Professor => self.professor,
        }
    }

    /// Record a load result. Returns `true` exactly once: on the report that
    /// settles the last pending image.
    pub fn settle(&mut self, asset: ImageAsset, loaded: bool) -> bool {
        let slot = match asset {
            ImageAsset::Player => &mut self.player,
            ImageAsset::Professor => &mut self.professor,
        };
        if *slot != AssetStatus::Pending {
            return false;
        }
        *slot = if loaded {
            AssetStatus::Loaded
        } else {
            log::warn!("Image '{}' failed to load, using fallback", asset.name());
            AssetStatus::Failed
        };

        if self.fired || !self.all_settled() {
            return false;
        }
        self.fired = true;
        true
    }

    pub fn all_settled(&self) -> bool {
        ImageAsset::ALL
            .iter()
            .all(|&a| self.status(a) != AssetStatus::Pending)
    }

    pub fn failed(&self, asset: ImageAsset) -> bool {
        self.status(asset) == AssetStatus::Failed
    }
}
