//! Simulation configuration: field mode, particle count, surface size, and
//! the fixed tuning constants that shape the motion.

use crate::particle::ParticleGroup;
use liquid_lab_core::error::LabError;
use liquid_lab_core::params::{param_count, param_f64, param_string};
use liquid_lab_core::Srgb;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Default number of particles allocated per session.
pub const DEFAULT_PARTICLE_COUNT: usize = 400;

const DEFAULT_INFLUENCE_RADIUS: f64 = 200.0;
const DEFAULT_FRICTION: f64 = 0.9;
const DEFAULT_K_SPRING: f64 = 0.05;
const DEFAULT_K_ATTRACT: f64 = 0.2;
const DEFAULT_K_REPEL: f64 = 0.5;
const DEFAULT_OSCILLATION_AMPLITUDE: f64 = 2.0;
/// Radians of oscillation phase per millisecond of host time.
const DEFAULT_OSCILLATION_RATE: f64 = 0.002;
const RESPONSIVENESS_MIN: f64 = 1.0;
const RESPONSIVENESS_MAX: f64 = 31.0;
const RADIUS_MIN: f64 = 1.0;
const RADIUS_MAX: f64 = 3.0;
/// Friction is kept strictly below 1 so unforced motion always decays.
const MAX_FRICTION: f64 = 0.999;
/// Below 2(1 + f)/f for every allowed friction, so the spring step stays stable.
const MAX_K_SPRING: f64 = 1.0;
const MAX_GAIN: f64 = 5.0;
const MIN_INFLUENCE_RADIUS: f64 = 1.0;
const MAX_INFLUENCE_RADIUS: f64 = 2000.0;
const MAX_OSCILLATION_AMPLITUDE: f64 = 50.0;
const MAX_OSCILLATION_RATE: f64 = 0.1;

/// Direction of the pointer's force field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
    /// Particles are pulled toward the pointer ("magnet").
    Attract,
    /// Particles are pushed away from the pointer ("fluid").
    #[default]
    Repel,
}

impl FieldMode {
    /// All modes, in display order.
    pub const ALL: [FieldMode; 2] = [FieldMode::Attract, FieldMode::Repel];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            FieldMode::Attract => "attract",
            FieldMode::Repel => "repel",
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldMode {
    type Err = LabError;

    /// Accepts the canonical names and the lab's UI labels
    /// (`magnet` for attract, `fluid` for repel), case insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attract" | "magnet" => Ok(FieldMode::Attract),
            "repel" | "fluid" => Ok(FieldMode::Repel),
            _ => Err(LabError::UnknownMode(s.to_string())),
        }
    }
}

/// What a session is asked to simulate. Any change forces a full
/// reinitialization of the particle store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Zero yields an empty simulation, never an error.
    pub particle_count: usize,
    pub mode: FieldMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            mode: FieldMode::default(),
        }
    }
}

impl SimulationConfig {
    pub fn new(particle_count: usize, mode: FieldMode) -> Self {
        Self {
            particle_count,
            mode,
        }
    }

    /// Reads `particle_count` and `mode` from JSON.
    ///
    /// Negative counts become 0. An unrecognized mode string is an error;
    /// a missing one falls back to the default.
    pub fn from_json(params: &Value) -> Result<Self, LabError> {
        let default = Self::default();
        let mode = param_string(params, "mode", default.mode.name()).parse()?;
        Ok(Self {
            particle_count: param_count(params, "particle_count", default.particle_count),
            mode,
        })
    }
}

/// Size of the simulation surface in simulation-space units
/// (display pixels multiplied by the display density).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    width: f64,
    height: f64,
}

impl SurfaceSize {
    /// Returns `LabError::InvalidDimensions` unless both sides are finite and positive.
    pub fn new(width: f64, height: f64) -> Result<Self, LabError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(LabError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// The simulation's numeric knobs. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldTuning {
    /// Distance beyond which the pointer has no effect.
    pub influence_radius: f64,
    /// Per-tick velocity multiplier in (0, 1).
    pub friction: f64,
    /// Restoring spring constant toward the anchor.
    pub k_spring: f64,
    /// Field gain in attract mode.
    pub k_attract: f64,
    /// Field gain in repel mode.
    pub k_repel: f64,
    /// Peak vertical offset of the cosmetic oscillation.
    pub oscillation_amplitude: f64,
    /// Oscillation phase advance per millisecond of host time.
    pub oscillation_rate: f64,
    /// Half-open range `[min, max)` of per-particle responsiveness.
    pub responsiveness_range: (f64, f64),
    /// Half-open range `[min, max)` of particle radius.
    pub radius_range: (f64, f64),
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            influence_radius: DEFAULT_INFLUENCE_RADIUS,
            friction: DEFAULT_FRICTION,
            k_spring: DEFAULT_K_SPRING,
            k_attract: DEFAULT_K_ATTRACT,
            k_repel: DEFAULT_K_REPEL,
            oscillation_amplitude: DEFAULT_OSCILLATION_AMPLITUDE,
            oscillation_rate: DEFAULT_OSCILLATION_RATE,
            responsiveness_range: (RESPONSIVENESS_MIN, RESPONSIVENESS_MAX),
            radius_range: (RADIUS_MIN, RADIUS_MAX),
        }
    }
}

impl FieldTuning {
    /// Default tuning scaled for a display density (device pixel ratio).
    pub fn for_density(density: f64) -> Self {
        Self::default().scaled(density)
    }

    /// Scales the display-space quantities (influence radius, oscillation
    /// amplitude, particle radius) by `density`. Non-finite or non-positive
    /// densities count as 1.
    pub fn scaled(self, density: f64) -> Self {
        let s = if density.is_finite() && density > 0.0 {
            density
        } else {
            1.0
        };
        Self {
            influence_radius: self.influence_radius * s,
            oscillation_amplitude: self.oscillation_amplitude * s,
            radius_range: (self.radius_range.0 * s, self.radius_range.1 * s),
            ..self
        }
    }

    /// Reads overrides from JSON, falling back to defaults per key.
    ///
    /// Every knob is clamped to its [`param_schema`](Self::param_schema)
    /// range and a non-finite value falls back to the default. A
    /// non-positive `influence_radius` also falls back.
    pub fn from_json(params: &Value) -> Self {
        let knob = |name: &str, default: f64, min: f64, max: f64| {
            let v = param_f64(params, name, default);
            if v.is_finite() {
                v.clamp(min, max)
            } else {
                default
            }
        };
        let influence_radius = param_f64(params, "influence_radius", DEFAULT_INFLUENCE_RADIUS);
        Self {
            influence_radius: if influence_radius.is_finite() && influence_radius > 0.0 {
                influence_radius.clamp(MIN_INFLUENCE_RADIUS, MAX_INFLUENCE_RADIUS)
            } else {
                DEFAULT_INFLUENCE_RADIUS
            },
            friction: knob("friction", DEFAULT_FRICTION, 0.0, MAX_FRICTION),
            k_spring: knob("k_spring", DEFAULT_K_SPRING, 0.0, MAX_K_SPRING),
            k_attract: knob("k_attract", DEFAULT_K_ATTRACT, 0.0, MAX_GAIN),
            k_repel: knob("k_repel", DEFAULT_K_REPEL, 0.0, MAX_GAIN),
            oscillation_amplitude: knob(
                "oscillation_amplitude",
                DEFAULT_OSCILLATION_AMPLITUDE,
                0.0,
                MAX_OSCILLATION_AMPLITUDE,
            ),
            oscillation_rate: knob(
                "oscillation_rate",
                DEFAULT_OSCILLATION_RATE,
                0.0,
                MAX_OSCILLATION_RATE,
            ),
            ..Self::default()
        }
    }

    /// Field gain for `mode`.
    pub fn gain(&self, mode: FieldMode) -> f64 {
        match mode {
            FieldMode::Attract => self.k_attract,
            FieldMode::Repel => self.k_repel,
        }
    }

    /// Current knob values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "influence_radius": self.influence_radius,
            "friction": self.friction,
            "k_spring": self.k_spring,
            "k_attract": self.k_attract,
            "k_repel": self.k_repel,
            "oscillation_amplitude": self.oscillation_amplitude,
            "oscillation_rate": self.oscillation_rate,
        })
    }

    /// Describes every knob: type, default, range, and meaning.
    pub fn param_schema() -> Value {
        json!({
            "influence_radius": {
                "type": "number",
                "default": DEFAULT_INFLUENCE_RADIUS,
                "min": MIN_INFLUENCE_RADIUS,
                "max": MAX_INFLUENCE_RADIUS,
                "description": "Pointer interaction radius; the field is zero at and beyond it"
            },
            "friction": {
                "type": "number",
                "default": DEFAULT_FRICTION,
                "min": 0.0,
                "max": MAX_FRICTION,
                "description": "Velocity multiplier applied every tick (damping)"
            },
            "k_spring": {
                "type": "number",
                "default": DEFAULT_K_SPRING,
                "min": 0.0,
                "max": MAX_K_SPRING,
                "description": "Restoring spring constant pulling particles to their anchors"
            },
            "k_attract": {
                "type": "number",
                "default": DEFAULT_K_ATTRACT,
                "min": 0.0,
                "max": MAX_GAIN,
                "description": "Field gain in attract mode"
            },
            "k_repel": {
                "type": "number",
                "default": DEFAULT_K_REPEL,
                "min": 0.0,
                "max": MAX_GAIN,
                "description": "Field gain in repel mode"
            },
            "oscillation_amplitude": {
                "type": "number",
                "default": DEFAULT_OSCILLATION_AMPLITUDE,
                "min": 0.0,
                "max": MAX_OSCILLATION_AMPLITUDE,
                "description": "Peak vertical offset of the cosmetic float"
            },
            "oscillation_rate": {
                "type": "number",
                "default": DEFAULT_OSCILLATION_RATE,
                "min": 0.0,
                "max": MAX_OSCILLATION_RATE,
                "description": "Oscillation phase advance per millisecond"
            }
        })
    }
}

/// Render colours for the two particle groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleStyle {
    pub primary: Srgb,
    pub secondary: Srgb,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        // #3b82f6 and #6366f1
        Self {
            primary: Srgb {
                r: 59.0 / 255.0,
                g: 130.0 / 255.0,
                b: 246.0 / 255.0,
            },
            secondary: Srgb {
                r: 99.0 / 255.0,
                g: 102.0 / 255.0,
                b: 241.0 / 255.0,
            },
        }
    }
}

impl ParticleStyle {
    /// Colour drawn for particles of `group`.
    pub fn color_for(&self, group: ParticleGroup) -> Srgb {
        match group {
            ParticleGroup::Primary => self.primary,
            ParticleGroup::Secondary => self.secondary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_canonical_names_and_ui_labels() {
        assert_eq!("attract".parse::<FieldMode>().unwrap(), FieldMode::Attract);
        assert_eq!("Magnet".parse::<FieldMode>().unwrap(), FieldMode::Attract);
        assert_eq!(" REPEL ".parse::<FieldMode>().unwrap(), FieldMode::Repel);
        assert_eq!("fluid".parse::<FieldMode>().unwrap(), FieldMode::Repel);
    }

    #[test]
    fn mode_rejects_unknown_name() {
        assert!(matches!(
            "vortex".parse::<FieldMode>(),
            Err(LabError::UnknownMode(name)) if name == "vortex"
        ));
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FieldMode::Attract).unwrap(), "\"attract\"");
        let m: FieldMode = serde_json::from_str("\"repel\"").unwrap();
        assert_eq!(m, FieldMode::Repel);
    }

    #[test]
    fn config_from_json_reads_count_and_mode() {
        let c = SimulationConfig::from_json(&json!({"particle_count": 250, "mode": "attract"}))
            .unwrap();
        assert_eq!(c, SimulationConfig::new(250, FieldMode::Attract));
    }

    #[test]
    fn config_from_json_negative_count_is_empty() {
        let c = SimulationConfig::from_json(&json!({"particle_count": -10})).unwrap();
        assert_eq!(c.particle_count, 0);
        assert_eq!(c.mode, FieldMode::Repel);
    }

    #[test]
    fn config_from_json_unknown_mode_is_error() {
        assert!(SimulationConfig::from_json(&json!({"mode": "spin"})).is_err());
    }

    #[test]
    fn surface_size_rejects_degenerate_sides() {
        assert!(SurfaceSize::new(800.0, 600.0).is_ok());
        assert!(SurfaceSize::new(0.0, 600.0).is_err());
        assert!(SurfaceSize::new(800.0, -1.0).is_err());
        assert!(SurfaceSize::new(f64::NAN, 600.0).is_err());
        assert!(SurfaceSize::new(800.0, f64::INFINITY).is_err());
    }

    #[test]
    fn attract_gain_is_weaker_than_repel() {
        let t = FieldTuning::default();
        assert!(t.gain(FieldMode::Attract) < t.gain(FieldMode::Repel));
        assert!(t.friction > 0.0 && t.friction < 1.0);
    }

    #[test]
    fn for_density_scales_display_quantities_only() {
        let t = FieldTuning::for_density(2.0);
        let base = FieldTuning::default();
        assert!((t.influence_radius - 400.0).abs() < 1e-12);
        assert!((t.oscillation_amplitude - 4.0).abs() < 1e-12);
        assert_eq!(t.radius_range, (2.0, 6.0));
        assert_eq!(t.friction, base.friction);
        assert_eq!(t.k_spring, base.k_spring);
        assert_eq!(t.responsiveness_range, base.responsiveness_range);
    }

    #[test]
    fn for_density_treats_bad_scale_as_one() {
        assert_eq!(FieldTuning::for_density(0.0), FieldTuning::default());
        assert_eq!(FieldTuning::for_density(f64::NAN), FieldTuning::default());
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        assert_eq!(FieldTuning::from_json(&json!({})), FieldTuning::default());
    }

    #[test]
    fn from_json_extracts_overrides_and_clamps_friction() {
        let t = FieldTuning::from_json(&json!({
            "k_attract": 0.3,
            "friction": 1.5,
            "influence_radius": -4.0,
        }));
        assert!((t.k_attract - 0.3).abs() < f64::EPSILON);
        assert!(t.friction < 1.0);
        assert!((t.influence_radius - DEFAULT_INFLUENCE_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn from_json_clamps_every_knob_to_its_schema_range() {
        let t = FieldTuning::from_json(&json!({
            "k_spring": 10.0,
            "k_attract": -3.0,
            "k_repel": 1e9,
            "oscillation_amplitude": 1e6,
            "oscillation_rate": -1.0,
            "influence_radius": 1e12,
        }));
        let schema = FieldTuning::param_schema();
        for (key, value) in t.params().as_object().unwrap() {
            let v = value.as_f64().unwrap();
            let min = schema[key.as_str()]["min"].as_f64().unwrap();
            let max = schema[key.as_str()]["max"].as_f64().unwrap();
            assert!(v >= min && v <= max, "{key} = {v} outside [{min}, {max}]");
        }
        assert_eq!(t.k_spring, MAX_K_SPRING);
        assert_eq!(t.k_attract, 0.0);
        assert_eq!(t.oscillation_rate, 0.0);
    }

    #[test]
    fn from_json_out_of_range_spring_still_converges() {
        use crate::integrator::integrate;
        use crate::particle::{Particle, ParticleGroup};
        use liquid_lab_core::DVec2;

        let t = FieldTuning::from_json(&json!({"k_spring": 10.0}));
        let anchor = DVec2::new(100.0, 100.0);
        let mut p = Particle::new(anchor, 2.0, 10.0, 0.0, ParticleGroup::Primary)
            .with_position(anchor + DVec2::new(5.0, 0.0));
        for _ in 0..500 {
            integrate(&mut p, DVec2::ZERO, &t);
        }
        assert!(p.position().is_finite(), "diverged to {:?}", p.position());
        assert!(p.position().distance(anchor) < 1e-3);
    }

    #[test]
    fn params_round_trip_through_from_json() {
        let t = FieldTuning {
            k_spring: 0.08,
            k_repel: 0.7,
            ..FieldTuning::default()
        };
        assert_eq!(FieldTuning::from_json(&t.params()), t);
    }

    #[test]
    fn param_schema_describes_every_knob() {
        let schema = FieldTuning::param_schema();
        for key in [
            "influence_radius",
            "friction",
            "k_spring",
            "k_attract",
            "k_repel",
            "oscillation_amplitude",
            "oscillation_rate",
        ] {
            assert!(schema.get(key).is_some(), "schema missing knob: {key}");
            assert!(schema[key].get("default").is_some(), "{key} missing 'default'");
            assert!(schema[key].get("description").is_some(), "{key} missing 'description'");
        }
    }

    #[test]
    fn default_style_uses_the_two_blues() {
        let style = ParticleStyle::default();
        assert_eq!(style.primary.to_hex(), "#3b82f6");
        assert_eq!(style.secondary.to_hex(), "#6366f1");
        assert_eq!(style.color_for(ParticleGroup::Primary), style.primary);
        assert_eq!(style.color_for(ParticleGroup::Secondary), style.secondary);
    }

    mod proptests {
        use super::*;
        use crate::integrator::integrate;
        use crate::particle::{Particle, ParticleGroup};
        use liquid_lab_core::DVec2;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_spring_and_friction_override_stays_finite(
                k_spring in -100.0_f64..100.0,
                friction in -2.0_f64..2.0,
                dx in -500.0_f64..500.0,
            ) {
                let t = FieldTuning::from_json(&json!({"k_spring": k_spring, "friction": friction}));
                let anchor = DVec2::new(50.0, 50.0);
                let mut p = Particle::new(anchor, 1.0, 1.0, 0.0, ParticleGroup::Primary)
                    .with_position(anchor + DVec2::new(dx, 0.0));
                for _ in 0..500 {
                    integrate(&mut p, DVec2::ZERO, &t);
                }
                prop_assert!(p.position().is_finite());
                prop_assert!(p.position().distance(anchor) <= dx.abs() * 4.0 + 1e-9);
            }
        }
    }
}
