//! Selection, hover and the camera animation between overview and close-up.

use std::collections::HashMap;

use exo_engine::{raycast, EngineContext, EntityId, UiCommand};
use glam::{Vec2, Vec3};

use crate::settings::Settings;
use crate::system::{PickMap, PlanetId, PLANET_STANDOFF};

/// Per-frame lerp toward a selected planet.
const APPROACH_LERP: f32 = 0.03;
/// Per-frame lerp back to the overview position.
const ZOOM_OUT_LERP: f32 = 0.05;
/// An animation ends once the camera is this close to its goal.
const ARRIVAL_DISTANCE: f32 = 1.0;

/// At most one camera animation runs at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraPhase {
    Idle,
    Approaching { target: Vec3 },
    ZoomingOut,
}

#[derive(Debug, Clone)]
struct PlanetEntry {
    /// Mesh whose world position is the planet's position; also the outline target.
    body: EntityId,
    title: String,
    details: String,
}

pub struct InteractionController {
    phase: CameraPhase,
    selected: Option<PlanetId>,
    info_open: bool,
    hovered: Option<PlanetId>,
    /// Latest pointer position; `None` until the first move.
    pointer: Option<Vec2>,
    home: Vec3,
    planets: HashMap<PlanetId, PlanetEntry>,
    pick: PickMap,
    targets: Vec<EntityId>,
}

impl InteractionController {
    pub fn new(home: Vec3, pick: PickMap) -> Self {
        let mut targets: Vec<EntityId> = pick.keys().copied().collect();
        targets.sort();
        Self {
            phase: CameraPhase::Idle,
            selected: None,
            info_open: false,
            hovered: None,
            pointer: None,
            home,
            planets: HashMap::new(),
            pick,
            targets,
        }
    }

    /// Register the info-panel text and body mesh of a planet in the pick map.
    pub fn add_planet(&mut self, id: PlanetId, body: EntityId, title: String, details: String) {
        self.planets.insert(id, PlanetEntry { body, title, details });
    }

    pub fn phase(&self) -> CameraPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<PlanetId> {
        self.selected
    }

    pub fn info_open(&self) -> bool {
        self.info_open
    }

    pub fn hovered(&self) -> Option<PlanetId> {
        self.hovered
    }

    fn pick(&self, ctx: &EngineContext, pos: Vec2) -> Option<PlanetId> {
        let ray = ctx.camera.ray_from_screen(pos.x, pos.y);
        let hit = raycast(&ctx.scene, &ray, &self.targets)?;
        self.pick.get(&hit.entity).copied()
    }

    pub fn on_pointer_move(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    /// Select the planet under `pos` and start approaching it.
    /// Returns whether a new approach started.
    pub fn on_pointer_down(&mut self, ctx: &mut EngineContext, settings: &mut Settings, pos: Vec2) -> bool {
        self.pointer = Some(pos);
        let Some(planet) = self.pick(ctx, pos) else {
            return false;
        };
        if self.phase != CameraPhase::Idle && self.selected == Some(planet) {
            return false;
        }
        let Some(center) = self.planets.get(&planet).and_then(|p| ctx.scene.world_position(p.body)) else {
            log::warn!("picked planet {planet:?} has no body");
            return false;
        };

        if self.info_open {
            self.info_open = false;
            ctx.emit_ui(UiCommand::HideInfo);
        }
        settings.lock_orbit();

        ctx.controls.target = center;
        ctx.camera.look_at(center);
        let away = (ctx.camera.position - center).normalize_or(Vec3::Z);
        self.phase = CameraPhase::Approaching { target: center + away * PLANET_STANDOFF };
        self.selected = Some(planet);
        log::debug!("approaching {planet:?} at {center}");
        true
    }

    /// Dismiss the info panel and fly back to the overview.
    /// Ignored unless the panel is open.
    pub fn close(&mut self, ctx: &mut EngineContext, settings: &mut Settings) -> bool {
        if !self.info_open {
            log::debug!("close ignored: info panel not open");
            return false;
        }
        self.info_open = false;
        ctx.emit_ui(UiCommand::HideInfo);
        settings.unlock_orbit();
        self.phase = CameraPhase::ZoomingOut;
        ctx.controls.target = Vec3::ZERO;
        self.selected = None;
        true
    }

    /// Hover outline and one step of the active camera animation.
    pub fn update(&mut self, ctx: &mut EngineContext) {
        self.hovered = self.pointer.and_then(|pos| self.pick(ctx, pos));
        for (id, planet) in &self.planets {
            if let Some(body) = ctx.scene.get_mut(planet.body) {
                body.outlined = self.hovered == Some(*id);
            }
        }

        match self.phase {
            CameraPhase::Idle => {}
            CameraPhase::Approaching { target } => {
                ctx.camera.lerp_toward(target, APPROACH_LERP);
                if ctx.camera.position.distance(target) < ARRIVAL_DISTANCE {
                    self.phase = CameraPhase::Idle;
                    self.info_open = true;
                    if let Some(planet) = self.selected.and_then(|id| self.planets.get(&id)) {
                        ctx.emit_ui(UiCommand::ShowInfo {
                            title: planet.title.clone(),
                            details: planet.details.clone(),
                        });
                    }
                }
            }
            CameraPhase::ZoomingOut => {
                ctx.camera.lerp_toward(self.home, ZOOM_OUT_LERP);
                if ctx.camera.position.distance(self.home) < ARRIVAL_DISTANCE {
                    self.phase = CameraPhase::Idle;
                }
            }
        }
    }
}
