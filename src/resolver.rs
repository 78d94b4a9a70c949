use regex::Regex;
use std::sync::LazyLock;

use crate::components::WeaponSlot;

// Keyword is case-insensitive; the name itself is plain word characters, so
// the flag does not change what it accepts.
static OVERLAY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<WeaponOverlay:\s*([A-Za-z0-9_]+)>").unwrap());

/// Overlay sheet name for the equipped weapon, read from the first
/// `<WeaponOverlay: name>` tag in its notes. Pure function of the slot
/// contents; cheap enough to call every refresh.
pub fn weapon_overlay_name(slot: &WeaponSlot) -> Option<String> {
    let item = slot.0.as_ref()?;
    OVERLAY_TAG
        .captures(&item.note)
        .map(|caps| caps[1].to_string())
}
