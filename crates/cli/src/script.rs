//! Scripted pointer for headless runs.

use liquid_lab_core::DVec2;

/// Radians the orbiting pointer advances per tick.
const ORBIT_STEP: f64 = 0.05;

/// Where the pointer is on each tick: parked at `center`, or circling it at
/// `orbit` radius, until `leave_at` releases it for good.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerScript {
    pub center: DVec2,
    pub orbit: f64,
    pub leave_at: Option<usize>,
}

impl PointerScript {
    /// Pointer position before tick `tick`, or `None` once it has left.
    pub fn position(&self, tick: usize) -> Option<DVec2> {
        if self.leave_at.is_some_and(|n| tick >= n) {
            return None;
        }
        if self.orbit == 0.0 {
            return Some(self.center);
        }
        let angle = tick as f64 * ORBIT_STEP;
        Some(self.center + DVec2::new(angle.cos(), angle.sin()) * self.orbit)
    }
}

/// Parses `"X,Y"` into a point.
pub fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let coord = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .ok_or_else(|| format!("'{}' is not a finite number", v.trim()))
    };
    Ok(DVec2::new(coord(x)?, coord(y)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_spaces_and_decimals() {
        assert_eq!(parse_point("400, 300.5").unwrap(), DVec2::new(400.0, 300.5));
        assert_eq!(parse_point("-1,0").unwrap(), DVec2::new(-1.0, 0.0));
    }

    #[test]
    fn parse_point_rejects_malformed_input() {
        assert!(parse_point("400").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("1,inf").is_err());
    }

    #[test]
    fn parked_pointer_stays_put_until_it_leaves() {
        let script = PointerScript {
            center: DVec2::new(10.0, 20.0),
            orbit: 0.0,
            leave_at: Some(5),
        };
        assert_eq!(script.position(0), Some(DVec2::new(10.0, 20.0)));
        assert_eq!(script.position(4), Some(DVec2::new(10.0, 20.0)));
        assert_eq!(script.position(5), None);
        assert_eq!(script.position(500), None);
    }

    #[test]
    fn orbit_keeps_constant_radius() {
        let center = DVec2::new(100.0, 100.0);
        let script = PointerScript {
            center,
            orbit: 40.0,
            leave_at: None,
        };
        let first = script.position(0).unwrap();
        assert!((first - DVec2::new(140.0, 100.0)).length() < 1e-12);
        for tick in 0..200 {
            let p = script.position(tick).unwrap();
            assert!((p.distance(center) - 40.0).abs() < 1e-9);
        }
        assert_ne!(script.position(1), script.position(2));
    }
}
