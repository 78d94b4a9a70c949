use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

/// How a battler sheet is packed: `frames` sub-frames per pose, `poses` total
/// poses, arranged in `columns` pose column groups. The RPG Maker battler
/// layout is 3 frames x 18 poses x 3 columns.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct FrameLayout {
    pub frames: u32,
    pub poses: u32,
    pub columns: u32,
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self {
            frames: 3,
            poses: 18,
            columns: 3,
        }
    }
}

impl FrameLayout {
    /// Poses stacked vertically within one column group. Precondition:
    /// `poses` is evenly divisible by `columns` (see `OverlayConfig::validate`).
    pub fn poses_per_column(&self) -> u32 {
        self.poses / self.columns
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// On-disk asset directory probed before requesting an overlay sheet.
    pub asset_root: String,
    /// Subdirectory (relative to the asset root) holding `behind/` and
    /// `above/` overlay folders.
    pub weapon_dir: String,
    pub layout: FrameLayout,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            asset_root: "assets".into(),
            weapon_dir: "img/weapons".into(),
            layout: FrameLayout::default(),
        }
    }
}

impl OverlayConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Non-fatal configuration warnings. A pose count that does not divide
    /// evenly into columns yields garbage frame rectangles at runtime, so it
    /// is surfaced here rather than guarded per tick.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        let l = &self.layout;
        if l.frames == 0 || l.poses == 0 || l.columns == 0 {
            w.push("frame layout fields must all be > 0".into());
        } else if l.poses % l.columns != 0 {
            w.push(format!(
                "poses ({}) not divisible by columns ({}); frame rectangles will be wrong",
                l.poses, l.columns
            ));
        }
        if self.weapon_dir.trim().is_empty() {
            w.push("weapon_dir is empty; overlays will be probed at the asset root".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_battler_sheet_layout() {
        let cfg = OverlayConfig::default();
        assert_eq!(cfg.layout, FrameLayout { frames: 3, poses: 18, columns: 3 });
        assert_eq!(cfg.layout.poses_per_column(), 6);
        assert_eq!(cfg.weapon_dir, "img/weapons");
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn loads_partial_ron_with_defaults() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"(weapon_dir: "img/gear", layout: (frames: 4))"#).unwrap();
        let cfg = OverlayConfig::load_from_file(f.path()).unwrap();
        assert_eq!(cfg.weapon_dir, "img/gear");
        assert_eq!(cfg.layout.frames, 4);
        // Unspecified fields fall back
        assert_eq!(cfg.layout.poses, 18);
        assert_eq!(cfg.asset_root, "assets");
    }

    #[test]
    fn missing_file_falls_back_to_default() {
        let (cfg, err) = OverlayConfig::load_or_default("no/such/overlay.ron");
        assert_eq!(cfg, OverlayConfig::default());
        assert!(err.is_some());
    }

    #[test]
    fn validate_flags_uneven_pose_columns() {
        let cfg = OverlayConfig {
            layout: FrameLayout { frames: 3, poses: 16, columns: 3 },
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not divisible"));
    }
}
