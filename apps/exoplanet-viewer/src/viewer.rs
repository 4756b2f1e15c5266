/// Exoplanet viewer: star, planet, orbit path and habitable zone around a
/// perspective camera that flies to the planet on click.
use exo_engine::*;
use glam::{Vec2, Vec3};

use crate::derive::DerivedVisualParams;
use crate::interaction::InteractionController;
use crate::settings::{
    Settings, CUSTOM_CLOSE_INFO, CUSTOM_SET_ORBIT_SPEED, CUSTOM_SET_ROTATION_SPEED,
    CUSTOM_SET_STAR_BRIGHTNESS,
};
use crate::system::{build_system, SystemHandles, SystemOptions};

// ── Camera ───────────────────────────────────────────────────────────

/// Overview position the camera starts at and returns to.
pub const HOME: Vec3 = Vec3::new(-175.0, 115.0, 5.0);
const FOV_Y: f32 = 45.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 1000.0;
const DAMPING: f32 = 0.75;

// ── Per-frame rotation, radians, before speed multipliers ───────────

const STAR_SPIN: f32 = 0.001;
const PLANET_SPIN: f32 = 0.005;
const ATMOSPHERE_SPIN: f32 = 0.001;
const ORBIT_STEP: f32 = 0.001;

fn spin(ctx: &mut EngineContext, id: EntityId, angle: f32) {
    if let Some(entity) = ctx.scene.get_mut(id) {
        entity.transform.rotate_local_y(angle);
    }
}

struct Built {
    handles: SystemHandles,
    controller: InteractionController,
}

pub struct ExoplanetViewer {
    params: DerivedVisualParams,
    options: SystemOptions,
    viewport: Viewport,
    settings: Settings,
    built: Option<Built>,
}

impl ExoplanetViewer {
    pub fn new(params: DerivedVisualParams, options: SystemOptions, viewport: Viewport) -> Self {
        Self {
            params,
            options,
            viewport,
            settings: Settings::default(),
            built: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn handles(&self) -> Option<&SystemHandles> {
        self.built.as_ref().map(|b| &b.handles)
    }

    pub fn controller(&self) -> Option<&InteractionController> {
        self.built.as_ref().map(|b| &b.controller)
    }
}

impl Viewer for ExoplanetViewer {
    fn config(&self) -> ViewerConfig {
        ViewerConfig {
            viewport: self.viewport,
            fov_y: FOV_Y,
            near: NEAR,
            far: FAR,
            camera_position: HOME,
            damping_factor: DAMPING,
            ..Default::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        let lum = self.params.luminosity;
        log::info!(
            "{}: luminosity {:.4} L_sun ({:.3e} W)",
            self.params.name,
            lum.relative,
            lum.absolute
        );

        let (handles, pick) = build_system(ctx, &self.params, &self.options, self.settings.star_brightness());
        let mut controller = InteractionController::new(HOME, pick);
        controller.add_planet(
            handles.planet.id,
            handles.planet.body,
            self.params.name.clone(),
            self.params.details_text(),
        );
        ctx.camera.look_at(ctx.controls.target);
        self.built = Some(Built { handles, controller });
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let Some(built) = self.built.as_mut() else {
            return;
        };

        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { x, y } => {
                    let pos = Vec2::new(x, y);
                    ctx.controls.begin_drag(pos);
                    built.controller.on_pointer_down(ctx, &mut self.settings, pos);
                }
                InputEvent::PointerMove { x, y } => {
                    let pos = Vec2::new(x, y);
                    let height = ctx.camera.viewport().height;
                    ctx.controls.drag_to(pos, height);
                    built.controller.on_pointer_move(pos);
                }
                InputEvent::PointerUp { .. } => ctx.controls.end_drag(),
                InputEvent::Wheel { delta_y } => ctx.controls.dolly(delta_y),
                // Applied to the camera by the runner.
                InputEvent::Resize { .. } => {}
                InputEvent::Custom { kind, a, .. } => match kind {
                    CUSTOM_SET_ORBIT_SPEED => self.settings.set_orbit_speed(a),
                    CUSTOM_SET_ROTATION_SPEED => self.settings.set_rotation_speed(a),
                    CUSTOM_SET_STAR_BRIGHTNESS => self.settings.set_star_brightness(a),
                    CUSTOM_CLOSE_INFO => {
                        built.controller.close(ctx, &mut self.settings);
                    }
                    _ => log::debug!("unknown custom event kind {kind}"),
                },
            }
        }

        let handles = &built.handles;
        let rotation = self.settings.rotation_speed();
        spin(ctx, handles.star, STAR_SPIN * rotation);
        spin(ctx, handles.planet.body, PLANET_SPIN * rotation);
        if let Some(atmosphere) = handles.planet.atmosphere {
            spin(ctx, atmosphere, ATMOSPHERE_SPIN * rotation);
        }
        spin(ctx, handles.planet.pivot, ORBIT_STEP * self.settings.orbit_speed());

        built.controller.update(ctx);

        if let Some(mesh) = ctx.scene.get_mut(handles.star).and_then(|e| e.mesh.as_mut()) {
            mesh.material.emissive_intensity = self.settings.star_brightness();
        }
    }
}
