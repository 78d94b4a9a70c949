pub mod components;
pub mod config;
pub mod frame;
pub mod overlay;
pub mod resolver;

// Curated re-exports
pub use components::{
    BattlerAnimation, BattlerBody, BattlerRig, FrameLayoutOverride, Motion, OverlayLayer,
    OverlayState, WeaponItem, WeaponSlot,
};
pub use config::{FrameLayout, OverlayConfig};
pub use overlay::{BattlerBitmapLoaded, BattlerMotionRefreshed, WeaponOverlayPlugin};
