//! Mapping between pyramid-level coordinates and source-image coordinates.

/// Factor that maps level-`level` coordinates back to level 0 (`2^level`).
///
/// Every level halves the previous one, so the factor is an exact power of
/// two and the mapping is lossless in `f32` for the sizes used here. Levels
/// past the `f32` exponent range saturate to infinity.
#[inline]
pub fn level_scale(level: usize) -> f32 {
    i32::try_from(level).map_or(f32::INFINITY, |exp| 2f32.powi(exp))
}

/// Per-level scaling between a pyramid level and the full-resolution image.
///
/// `nominal` is the dyadic factor used to lift detections; `actual_x` and
/// `actual_y` reflect the real size ratio, which drifts above `nominal` for
/// odd dimensions because every halving floors.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelScaling {
    pub nominal: f32,
    pub actual_x: f32,
    pub actual_y: f32,
}

impl LevelScaling {
    pub fn from_dimensions(
        level: usize,
        level_width: usize,
        level_height: usize,
        full_width: usize,
        full_height: usize,
    ) -> Self {
        let ratio = |full: usize, lvl: usize| {
            if lvl > 0 {
                full as f32 / lvl as f32
            } else {
                0.0
            }
        };
        Self {
            nominal: level_scale(level),
            actual_x: ratio(full_width, level_width),
            actual_y: ratio(full_height, level_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_scale_is_power_of_two() {
        assert_eq!(level_scale(0), 1.0);
        assert_eq!(level_scale(1), 2.0);
        assert_eq!(level_scale(4), 16.0);
    }

    #[test]
    fn deep_levels_do_not_overflow() {
        assert_eq!(level_scale(32), 4_294_967_296.0);
        assert_eq!(level_scale(40), (1u64 << 40) as f32);
        assert_eq!(level_scale(200), f32::INFINITY);
        assert_eq!(level_scale(usize::MAX), f32::INFINITY);
    }

    #[test]
    fn odd_dimensions_drift_from_nominal() {
        let s = LevelScaling::from_dimensions(1, 50, 2, 101, 4);
        assert_eq!(s.nominal, 2.0);
        assert!(s.actual_x > 2.0);
        assert_eq!(s.actual_y, 2.0);
        assert_eq!(LevelScaling::from_dimensions(3, 0, 0, 7, 7).actual_x, 0.0);
    }
}
