//! Render-ready quantities derived from a planet record.
//!
//! All math is f64; the scene builder converts to f32 at the end.

use exo_engine::Color;
use crate::dataset::PlanetRecord;

/// Render units per AU, shared by the orbit and the habitable zone.
pub const AU_SCALE: f64 = 90.0;
/// Orbit clamp range, AU.
pub const ORBIT_MIN_AU: f64 = 0.9;
pub const ORBIT_MAX_AU: f64 = 6.0;
/// Star render radius per solar radius.
pub const SOLAR_BASE_SIZE: f64 = 697.0 / 40.0;
/// Planet render radius per Earth radius.
pub const EARTH_RENDER_RADIUS: f64 = 6.4;
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Display distance per AU, "million km".
pub const DISPLAY_MKM_PER_AU: f64 = 150.0;
/// Nominal solar luminosity, W.
pub const SOLAR_LUMINOSITY_W: f64 = 3.828e26;
/// Emissive intensity of the planet tint.
pub const PLANET_TINT_INTENSITY: f32 = 0.5;

/// Star color class by effective temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarColor {
    BlueWhite,
    White,
    PaleYellow,
    Red,
}

impl StarColor {
    /// Bands are closed-open, highest first.
    pub fn from_temperature(t: f64) -> Self {
        if t >= 30000.0 {
            Self::BlueWhite
        } else if t >= 6000.0 {
            Self::White
        } else if t >= 5000.0 {
            Self::PaleYellow
        } else {
            Self::Red
        }
    }

    pub fn hex(self) -> u32 {
        match self {
            Self::BlueWhite => 0x9BB0FF,
            Self::White => 0xFFFFFF,
            Self::PaleYellow => 0xFFCC6F,
            Self::Red => 0xFF6666,
        }
    }

    pub fn color(self) -> Color {
        Color::from_hex(self.hex())
    }
}

/// Planet surface tint by host temperature. Thresholds differ from [`StarColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetTint {
    Reddish,
    Amber,
    White,
}

impl PlanetTint {
    pub fn from_temperature(t: f64) -> Self {
        if t < 4000.0 {
            Self::Reddish
        } else if t < 6000.0 {
            Self::Amber
        } else {
            Self::White
        }
    }

    pub fn hex(self) -> u32 {
        match self {
            Self::Reddish => 0xFF4500,
            Self::Amber => 0xFFD700,
            Self::White => 0xFFFFFF,
        }
    }

    pub fn color(self) -> Color {
        Color::from_hex(self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Luminosity {
    /// Solar units.
    pub relative: f64,
    /// Watts.
    pub absolute: f64,
}

pub fn luminosity(log10_solar: f64) -> Luminosity {
    let relative = 10f64.powf(log10_solar);
    Luminosity { relative, absolute: relative * SOLAR_LUMINOSITY_W }
}

pub fn star_render_radius(solar_radii: f64) -> f64 {
    SOLAR_BASE_SIZE * solar_radii
}

pub fn planet_render_radius(earth_radii: f64) -> f64 {
    earth_radii * EARTH_RENDER_RADIUS
}

pub fn planet_real_radius_km(earth_radii: f64) -> f64 {
    earth_radii * EARTH_RADIUS_KM
}

pub fn orbit_render_radius(axis_au: f64) -> f64 {
    axis_au.clamp(ORBIT_MIN_AU, ORBIT_MAX_AU) * AU_SCALE
}

/// Unclamped display distance, million km.
pub fn real_distance(axis_au: f64) -> f64 {
    axis_au * DISPLAY_MKM_PER_AU
}

pub fn habitable_zone_radius(factor: f64) -> f64 {
    factor * AU_SCALE
}

/// Everything the scene builder and info panel need, computed once per record.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedVisualParams {
    pub name: String,
    pub star_color: StarColor,
    pub star_radius: f64,
    pub planet_radius: f64,
    pub planet_radius_km: f64,
    pub orbit_radius: f64,
    pub distance_mkm: f64,
    pub hz_inner_radius: f64,
    pub hz_outer_radius: f64,
    pub planet_tint: PlanetTint,
    /// Diagnostic only; not wired to brightness.
    pub luminosity: Luminosity,
}

impl DerivedVisualParams {
    pub fn from_record(record: &PlanetRecord) -> Self {
        Self {
            name: record.pl_name.clone(),
            star_color: StarColor::from_temperature(record.st_teff),
            star_radius: star_render_radius(record.st_rad),
            planet_radius: planet_render_radius(record.pl_rade),
            planet_radius_km: planet_real_radius_km(record.pl_rade),
            orbit_radius: orbit_render_radius(record.pl_orbsmax),
            distance_mkm: real_distance(record.pl_orbsmax),
            hz_inner_radius: habitable_zone_radius(record.hz_inner),
            hz_outer_radius: habitable_zone_radius(record.hz_outer),
            planet_tint: PlanetTint::from_temperature(record.st_teff),
            luminosity: luminosity(record.st_lum),
        }
    }

    pub fn radius_text(&self) -> String {
        format!("{} km", self.planet_radius_km)
    }

    pub fn distance_text(&self) -> String {
        format!("{} million km", self.distance_mkm)
    }

    /// Info panel body.
    pub fn details_text(&self) -> String {
        format!("Radius: {}\nDistance: {}", self.radius_text(), self.distance_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlanetRecord {
        PlanetRecord {
            sy_id: 1.0,
            pl_name: "Kepler-22 b".into(),
            st_teff: 5518.0,
            st_lum: -0.1,
            st_rad: 0.98,
            pl_rade: 2.0,
            pl_orbsmax: 0.85,
            sy_dist: 180.0,
            hz_inner: 0.8,
            hz_outer: 1.5,
        }
    }

    #[test]
    fn star_color_bands_at_boundaries() {
        assert_eq!(StarColor::from_temperature(30000.0), StarColor::BlueWhite);
        assert_eq!(StarColor::from_temperature(29999.999), StarColor::White);
        assert_eq!(StarColor::from_temperature(6000.0), StarColor::White);
        assert_eq!(StarColor::from_temperature(5999.999), StarColor::PaleYellow);
        assert_eq!(StarColor::from_temperature(5000.0), StarColor::PaleYellow);
        assert_eq!(StarColor::from_temperature(4999.999), StarColor::Red);
        assert_eq!(StarColor::Red.hex(), 0xFF6666);
    }

    #[test]
    fn planet_tint_uses_its_own_thresholds() {
        assert_eq!(PlanetTint::from_temperature(3999.0), PlanetTint::Reddish);
        assert_eq!(PlanetTint::from_temperature(4000.0), PlanetTint::Amber);
        assert_eq!(PlanetTint::from_temperature(5500.0), PlanetTint::Amber);
        assert_eq!(PlanetTint::from_temperature(6000.0), PlanetTint::White);
        // 4500 K is a red star but an amber planet.
        assert_eq!(StarColor::from_temperature(4500.0), StarColor::Red);
    }

    #[test]
    fn orbit_radius_is_clamped() {
        assert_eq!(orbit_render_radius(0.5), 81.0);
        assert_eq!(orbit_render_radius(6.0), 540.0);
        assert_eq!(orbit_render_radius(10.0), 540.0);
        assert_eq!(orbit_render_radius(3.0), 270.0);
    }

    #[test]
    fn planet_radii_are_linear() {
        assert_eq!(planet_render_radius(1.0), 6.4);
        assert_eq!(planet_real_radius_km(1.0), 6371.0);
        assert_eq!(planet_render_radius(2.0), 12.8);
        assert_eq!(planet_real_radius_km(3.0), 3.0 * 6371.0);
    }

    #[test]
    fn star_radius_and_luminosity() {
        assert!((star_render_radius(1.0) - 17.425).abs() < 1e-12);
        let lum = luminosity(0.0);
        assert_eq!(lum.relative, 1.0);
        assert_eq!(lum.absolute, SOLAR_LUMINOSITY_W);
        assert!((luminosity(2.0).relative - 100.0).abs() < 1e-9);
    }

    #[test]
    fn params_from_record() {
        let p = DerivedVisualParams::from_record(&record());
        assert_eq!(p.star_color, StarColor::PaleYellow);
        assert_eq!(p.planet_tint, PlanetTint::Amber);
        assert_eq!(p.orbit_radius, 81.0);
        assert_eq!(p.distance_mkm, 0.85 * 150.0);
        assert_eq!(p.hz_inner_radius, 72.0);
        assert_eq!(p.hz_outer_radius, 135.0);
    }

    #[test]
    fn info_text_format() {
        let mut r = record();
        r.pl_rade = 1.0;
        r.pl_orbsmax = 1.0;
        let p = DerivedVisualParams::from_record(&r);
        assert_eq!(p.details_text(), "Radius: 6371 km\nDistance: 150 million km");
    }
}
