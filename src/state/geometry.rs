//! Window geometry
//!
//! Geometry is persisted as a `WxH+X+Y` string. Negative offsets are written
//! as `+-X`, and a bare `-X` is read as a negative offset as well.

use crate::config::{MAX_HEIGHT, MAX_WIDTH, MIN_HEIGHT, MIN_WIDTH};
use crate::error::GeometryError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Window size and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

fn geometry_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)x(\d+)(?:([+-])(-?\d+)([+-])(-?\d+))?\s*$")
            .expect("geometry pattern is valid")
    })
}

fn signed_offset(sign: &str, value: &str) -> Option<i32> {
    let n: i32 = value.parse().ok()?;
    Some(if sign == "-" { -n } else { n })
}

impl Geometry {
    pub fn new(width: u32, height: u32, x: i32, y: i32) -> Self {
        Self {
            width,
            height,
            x,
            y,
        }
    }

    /// Same geometry at a new position
    pub fn moved_to(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }

    /// Same geometry with a new size, clamped to the resize limits
    pub fn resized_to(self, width: f64, height: f64) -> Self {
        Self {
            width: clamp_dimension(width, MIN_WIDTH, MAX_WIDTH),
            height: clamp_dimension(height, MIN_HEIGHT, MAX_HEIGHT),
            ..self
        }
    }
}

impl FromStr for Geometry {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GeometryError::Malformed(s.to_string());
        let caps = geometry_regex().captures(s).ok_or_else(malformed)?;

        let width = caps[1].parse().map_err(|_| malformed())?;
        let height = caps[2].parse().map_err(|_| malformed())?;

        let (x, y) = match (caps.get(3), caps.get(4), caps.get(5), caps.get(6)) {
            (Some(sx), Some(x), Some(sy), Some(y)) => (
                signed_offset(sx.as_str(), x.as_str()).ok_or_else(malformed)?,
                signed_offset(sy.as_str(), y.as_str()).ok_or_else(malformed)?,
            ),
            _ => (0, 0),
        };

        Ok(Self {
            width,
            height,
            x,
            y,
        })
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

fn clamp_dimension(value: f64, lo: u32, hi: u32) -> u32 {
    if value.is_nan() {
        return lo;
    }
    value.round().clamp(lo as f64, hi as f64) as u32
}

/// In-progress corner-grip resize
///
/// Captures the window size and pointer position at press time; every
/// subsequent pointer position yields a clamped size from the total delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeDrag {
    start_width: u32,
    start_height: u32,
    start_x: f32,
    start_y: f32,
}

impl ResizeDrag {
    pub fn begin(geometry: Geometry, pointer_x: f32, pointer_y: f32) -> Self {
        Self {
            start_width: geometry.width,
            start_height: geometry.height,
            start_x: pointer_x,
            start_y: pointer_y,
        }
    }

    /// Geometry for the current pointer position
    pub fn update(&self, geometry: Geometry, pointer_x: f32, pointer_y: f32) -> Geometry {
        let dx = (pointer_x - self.start_x) as f64;
        let dy = (pointer_y - self.start_y) as f64;
        geometry.resized_to(
            self.start_width as f64 + dx,
            self.start_height as f64 + dy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_geometry() {
        let g: Geometry = "600x320+100+100".parse().unwrap();
        assert_eq!(g, Geometry::new(600, 320, 100, 100));
        assert_eq!(g.to_string(), "600x320+100+100");
    }

    #[test]
    fn test_parse_negative_offsets() {
        let g: Geometry = "400x200+-15-30".parse().unwrap();
        assert_eq!((g.x, g.y), (-15, -30));
        assert_eq!(g.to_string(), "400x200+-15+-30");
        assert_eq!(g.to_string().parse::<Geometry>().unwrap(), g);
    }

    #[test]
    fn test_parse_size_only() {
        let g: Geometry = "800x600".parse().unwrap();
        assert_eq!(g, Geometry::new(800, 600, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Geometry>().is_err());
        assert!("600x".parse::<Geometry>().is_err());
        assert!("+10+10".parse::<Geometry>().is_err());
        assert!("wide x tall".parse::<Geometry>().is_err());
    }

    #[test]
    fn test_resize_clamps_any_delta() {
        let start = Geometry::new(600, 320, 0, 0);
        let drag = ResizeDrag::begin(start, 100.0, 100.0);

        for (px, py) in [
            (100.0, 100.0),
            (-50_000.0, -50_000.0),
            (50_000.0, 50_000.0),
            (-50_000.0, 50_000.0),
            (350.0, 90.0),
            (f32::MAX, f32::MIN),
        ] {
            let g = drag.update(start, px, py);
            assert!((MIN_WIDTH..=MAX_WIDTH).contains(&g.width), "{:?}", g);
            assert!((MIN_HEIGHT..=MAX_HEIGHT).contains(&g.height), "{:?}", g);
        }
    }

    #[test]
    fn test_resize_follows_delta_within_limits() {
        let start = Geometry::new(600, 320, 10, 20);
        let drag = ResizeDrag::begin(start, 590.0, 310.0);
        let g = drag.update(start, 690.0, 290.0);
        assert_eq!(g, Geometry::new(700, 300, 10, 20));
    }

    #[test]
    fn test_resize_keeps_position() {
        let start = Geometry::new(600, 320, -40, 75);
        let g = start.resized_to(10.0, 10_000.0);
        assert_eq!((g.x, g.y), (-40, 75));
        assert_eq!((g.width, g.height), (MIN_WIDTH, MAX_HEIGHT));
    }
}
