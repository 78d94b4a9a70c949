use bevy::prelude::*;

use crate::config::FrameLayout;

/// Battler root entity: the actor's container node. Behind-overlays are
/// parented here so they draw beneath the body sprite.
#[derive(Component, Debug)]
pub struct BattlerRig;

/// The animated sheet sprite itself, a child of the rig. Above-overlays are
/// parented here so they draw on top of it.
#[derive(Component, Debug)]
pub struct BattlerBody;

/// Current motion descriptor of a battler (host-owned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motion {
    pub name: String,
    pub index: u32,
}

impl Motion {
    pub fn new(name: impl Into<String>, index: u32) -> Self {
        Self { name: name.into(), index }
    }
}

/// Host-owned animation state of a battler rig: which motion is playing and
/// which sub-frame (pattern) of it is displayed this tick.
#[derive(Component, Debug, Clone, Default)]
pub struct BattlerAnimation {
    pub motion: Option<Motion>,
    pub pattern: u32,
}

/// A weapon-like item with its free-text notes blob (may carry a
/// `<WeaponOverlay: name>` tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponItem {
    pub note: String,
}

impl WeaponItem {
    pub fn new(note: impl Into<String>) -> Self {
        Self { note: note.into() }
    }
}

/// Single equipment slot on the rig; read-only from this crate's perspective.
#[derive(Component, Debug, Clone, Default)]
pub struct WeaponSlot(pub Option<WeaponItem>);

/// Which of the two overlay planes a spawned overlay sprite belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayLayer {
    Behind,
    Above,
}

impl OverlayLayer {
    /// Asset subfolder holding this layer's sheets.
    pub fn folder(self) -> &'static str {
        match self {
            OverlayLayer::Behind => "behind",
            OverlayLayer::Above => "above",
        }
    }
}

/// Per-rig overlay renderer state: the last resolved overlay name, the two
/// slot entities, and the motion-history memory feeding the damage-freeze
/// quirk. Motion memory is only ever overwritten, never cleared; stale
/// memory deliberately survives weapon changes.
#[derive(Component, Debug, Clone, Default)]
pub struct OverlayState {
    pub cached: Option<String>,
    pub behind: Option<Entity>,
    pub above: Option<Entity>,
    pub last_motion: Option<(Motion, u32)>,
}

/// Per-battler sheet layout override; rigs without it use the global
/// `OverlayConfig` layout.
#[derive(Component, Debug, Clone, Copy)]
pub struct FrameLayoutOverride(pub FrameLayout);
