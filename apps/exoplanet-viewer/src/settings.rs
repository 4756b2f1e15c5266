//! Runtime tunables driven by the control panel.

// ── Custom event kinds from the page ────────────────────────────────

pub const CUSTOM_SET_ORBIT_SPEED: u32 = 1;
pub const CUSTOM_SET_ROTATION_SPEED: u32 = 2;
pub const CUSTOM_SET_STAR_BRIGHTNESS: u32 = 3;
pub const CUSTOM_CLOSE_INFO: u32 = 4;

// ── Ranges and defaults ─────────────────────────────────────────────

pub const ORBIT_SPEED_RANGE: (f32, f32) = (0.0, 10.0);
pub const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 10.0);
pub const STAR_BRIGHTNESS_RANGE: (f32, f32) = (1.0, 10.0);

pub const DEFAULT_ORBIT_SPEED: f32 = 1.0;
pub const DEFAULT_ROTATION_SPEED: f32 = 1.0;
pub const DEFAULT_STAR_BRIGHTNESS: f32 = 1.9;

fn clamp_to(value: f32, (lo, hi): (f32, f32)) -> Option<f32> {
    value.is_finite().then(|| value.clamp(lo, hi))
}

/// Speed multipliers and star brightness.
///
/// While a planet is selected the orbit is locked at 0 and slider changes
/// to orbit speed are ignored; unlocking restores the default speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    orbit_speed: f32,
    rotation_speed: f32,
    star_brightness: f32,
    orbit_locked: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            orbit_speed: DEFAULT_ORBIT_SPEED,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            star_brightness: DEFAULT_STAR_BRIGHTNESS,
            orbit_locked: false,
        }
    }
}

impl Settings {
    pub fn orbit_speed(&self) -> f32 {
        self.orbit_speed
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn star_brightness(&self) -> f32 {
        self.star_brightness
    }

    pub fn orbit_locked(&self) -> bool {
        self.orbit_locked
    }

    pub fn set_orbit_speed(&mut self, value: f32) {
        if self.orbit_locked {
            log::debug!("orbit speed change ignored while a planet is selected");
            return;
        }
        match clamp_to(value, ORBIT_SPEED_RANGE) {
            Some(v) => self.orbit_speed = v,
            None => log::warn!("ignoring orbit speed {value}"),
        }
    }

    pub fn set_rotation_speed(&mut self, value: f32) {
        match clamp_to(value, ROTATION_SPEED_RANGE) {
            Some(v) => self.rotation_speed = v,
            None => log::warn!("ignoring rotation speed {value}"),
        }
    }

    pub fn set_star_brightness(&mut self, value: f32) {
        match clamp_to(value, STAR_BRIGHTNESS_RANGE) {
            Some(v) => self.star_brightness = v,
            None => log::warn!("ignoring star brightness {value}"),
        }
    }

    /// Stop the orbit for a selection.
    pub fn lock_orbit(&mut self) {
        self.orbit_speed = 0.0;
        self.orbit_locked = true;
    }

    /// Resume the orbit at the default speed.
    pub fn unlock_orbit(&mut self) {
        self.orbit_locked = false;
        self.orbit_speed = DEFAULT_ORBIT_SPEED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.orbit_speed(), 1.0);
        assert_eq!(s.rotation_speed(), 1.0);
        assert_eq!(s.star_brightness(), 1.9);
    }

    #[test]
    fn values_clamp_to_ranges() {
        let mut s = Settings::default();
        s.set_orbit_speed(25.0);
        s.set_rotation_speed(-3.0);
        s.set_star_brightness(0.2);
        assert_eq!(s.orbit_speed(), 10.0);
        assert_eq!(s.rotation_speed(), 0.0);
        assert_eq!(s.star_brightness(), 1.0);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let mut s = Settings::default();
        s.set_star_brightness(f32::NAN);
        s.set_rotation_speed(f32::INFINITY);
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn lock_forces_zero_and_unlock_restores_one() {
        let mut s = Settings::default();
        s.set_orbit_speed(4.0);
        s.lock_orbit();
        assert_eq!(s.orbit_speed(), 0.0);
        s.set_orbit_speed(7.0);
        assert_eq!(s.orbit_speed(), 0.0);
        s.unlock_orbit();
        assert_eq!(s.orbit_speed(), 1.0);
        s.set_orbit_speed(7.0);
        assert_eq!(s.orbit_speed(), 7.0);
    }
}
