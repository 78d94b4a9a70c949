//! Overlay renderer: owns up to two weapon overlay sprites per battler rig
//! (one drawn behind the body, one above) and keeps their source rectangles
//! locked to the body's current animation frame.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use std::path::Path;

use crate::components::{
    BattlerAnimation, BattlerBody, BattlerRig, FrameLayoutOverride, OverlayLayer, OverlayState,
    WeaponSlot,
};
use crate::config::OverlayConfig;
use crate::frame::{overlay_frame_rect, resolve_display_motion};
use crate::resolver::weapon_overlay_name;

/// Fired by the host after it (re)assigns a battler body's sheet image.
#[derive(Event, Debug, Clone, Copy)]
pub struct BattlerBitmapLoaded(pub Entity);

/// Fired by the host whenever a battler's motion is refreshed.
#[derive(Event, Debug, Clone, Copy)]
pub struct BattlerMotionRefreshed(pub Entity);

/// Local z distance separating overlays from the sprite they bracket.
pub const OVERLAY_Z_OFFSET: f32 = 0.1;

pub struct WeaponOverlayPlugin;

impl Plugin for WeaponOverlayPlugin {
    fn build(&self, app: &mut App) {
        // Hosts may insert a loaded OverlayConfig before adding the plugin.
        if app.world().get_resource::<OverlayConfig>().is_none() {
            app.init_resource::<OverlayConfig>();
        }
        for warning in app.world().resource::<OverlayConfig>().validate() {
            warn!(target: "overlay", "OverlayConfig: {warning}");
        }
        app.add_event::<BattlerBitmapLoaded>()
            .add_event::<BattlerMotionRefreshed>()
            .add_systems(
                Update,
                (refresh_weapon_overlays, update_overlay_frames).chain(),
            );
    }
}

/// Re-resolves the overlay name for every rig named by a host event and
/// rebuilds its overlay slots when the name changed. Unchanged names are a
/// no-op, which is the dominant case.
pub fn refresh_weapon_overlays(
    mut commands: Commands,
    mut ev_bitmap: EventReader<BattlerBitmapLoaded>,
    mut ev_motion: EventReader<BattlerMotionRefreshed>,
    cfg: Res<OverlayConfig>,
    asset_server: Res<AssetServer>,
    mut q_rigs: Query<(&WeaponSlot, &mut OverlayState, &Children), With<BattlerRig>>,
    q_bodies: Query<(), With<BattlerBody>>,
) {
    let mut targets: Vec<Entity> = Vec::new();
    for rig in ev_bitmap
        .read()
        .map(|ev| ev.0)
        .chain(ev_motion.read().map(|ev| ev.0))
    {
        if !targets.contains(&rig) {
            targets.push(rig);
        }
    }

    for rig in targets {
        let Ok((slot, mut state, children)) = q_rigs.get_mut(rig) else {
            continue;
        };
        // Without a body sprite there is nothing to bracket yet.
        let kids: &[Entity] = children;
        let Some(body) = kids.iter().copied().find(|c| q_bodies.contains(*c)) else {
            continue;
        };

        let name = weapon_overlay_name(slot);
        if name == state.cached {
            continue;
        }

        // Teardown always precedes any new load for this refresh.
        for slot_entity in [state.behind.take(), state.above.take()]
            .into_iter()
            .flatten()
        {
            commands.entity(slot_entity).despawn();
        }
        info!(
            target: "overlay",
            "weapon overlay changed {:?} -> {:?}", state.cached, name
        );
        state.cached = name.clone();

        let Some(name) = name else { continue };
        state.behind = spawn_overlay(
            &mut commands,
            &cfg,
            &asset_server,
            OverlayLayer::Behind,
            &name,
            rig,
        );
        state.above = spawn_overlay(
            &mut commands,
            &cfg,
            &asset_server,
            OverlayLayer::Above,
            &name,
            body,
        );
    }
}

/// Probes the asset folder for the layer's sheet and, if present, spawns the
/// overlay sprite under `parent`. A missing file is an empty slot, not an
/// error; it is only reconsidered on the next name change.
fn spawn_overlay(
    commands: &mut Commands,
    cfg: &OverlayConfig,
    asset_server: &AssetServer,
    layer: OverlayLayer,
    name: &str,
    parent: Entity,
) -> Option<Entity> {
    let rel = Path::new(&cfg.weapon_dir)
        .join(layer.folder())
        .join(format!("{name}.png"));
    if !Path::new(&cfg.asset_root).join(&rel).is_file() {
        debug!(
            target: "overlay",
            "no {} sheet for '{name}'",
            layer.folder()
        );
        return None;
    }
    let z = match layer {
        OverlayLayer::Behind => -OVERLAY_Z_OFFSET,
        OverlayLayer::Above => OVERLAY_Z_OFFSET,
    };
    let id = commands
        .spawn((
            Sprite {
                image: asset_server.load(rel),
                anchor: Anchor::BottomCenter,
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, z),
            GlobalTransform::default(),
            Visibility::Inherited,
            layer,
            Name::new(format!("WeaponOverlay:{}:{name}", layer.folder())),
            ChildOf(parent),
        ))
        .id();
    Some(id)
}

/// Per-tick frame sync: applies the damage-freeze substitution, records
/// motion history, and pushes the computed cell rectangle, origin position
/// and rig visibility into every slot whose image has finished decoding.
/// Slots still decoding are left untouched until a later tick.
pub fn update_overlay_frames(
    cfg: Res<OverlayConfig>,
    images: Res<Assets<Image>>,
    mut q_rigs: Query<
        (
            &BattlerAnimation,
            &mut OverlayState,
            Option<&FrameLayoutOverride>,
            &Visibility,
            &Children,
        ),
        With<BattlerRig>,
    >,
    q_bodies: Query<&Sprite, (With<BattlerBody>, Without<OverlayLayer>)>,
    mut q_overlays: Query<
        (&mut Sprite, &mut Transform, &mut Visibility),
        (With<OverlayLayer>, Without<BattlerRig>, Without<BattlerBody>),
    >,
) {
    for (anim, mut state, layout_override, vis, children) in q_rigs.iter_mut() {
        // Motion memory advances every tick, overlays or not, so the freeze
        // works for a weapon equipped mid-fight.
        let (motion, pattern) = resolve_display_motion(&mut state, anim.motion.as_ref(), anim.pattern);
        if state.behind.is_none() && state.above.is_none() {
            continue;
        }
        let kids: &[Entity] = children;
        let Some(body_sprite) = kids.iter().find_map(|c| q_bodies.get(*c).ok()) else {
            continue;
        };
        let Some(sheet) = images.get(&body_sprite.image) else {
            continue;
        };

        let layout = layout_override.map(|o| o.0).unwrap_or(cfg.layout);
        let pose = motion.as_ref().map(|m| m.index).unwrap_or(0);
        let rect = overlay_frame_rect(layout, sheet.size_f32(), pose, pattern);

        for slot_entity in [state.behind, state.above].into_iter().flatten() {
            let Ok((mut sprite, mut transform, mut overlay_vis)) = q_overlays.get_mut(slot_entity)
            else {
                continue;
            };
            if !images.contains(&sprite.image) {
                continue; // still decoding
            }
            sprite.rect = Some(rect);
            transform.translation.x = 0.0;
            transform.translation.y = 0.0;
            *overlay_vis = *vis;
        }
    }
}
