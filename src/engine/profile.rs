// Profile text parsing.
//
// A profile describes the 2D cross-section of the lathe object, one command
// per line. The first line is the absolute start point "x y"; every later
// line is either a line segment "x y" or a cubic Bezier segment
// "c1x c1y c2x c2y x y". Screen-Y grows downward in the input, so every y
// is negated on ingestion.

use glam::Vec2;
use thiserror::Error;

/// Points generated per Bezier segment when flattening. Fixed so the same
/// text always yields the same outline.
pub const CURVE_POINTS: usize = 12;

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("first line must be two numbers, got {0:?}")]
    BadStart(String),
    #[error("profile needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// Flattened, axis-capped outline ready for revolution.
/// The first and last points always lie on the rotation axis (x = 0), and
/// the first point's y is the outline maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub points: Vec<Vec2>,
}

impl Outline {
    pub fn len(&self) -> usize { self.points.len() }
}

/// Parse profile text into a capped outline.
///
/// The first line must hold exactly two finite numbers. Later lines with a
/// token count other than 2 or 6, or with a non-finite token, are skipped.
pub fn parse_profile(text: &str) -> Result<Outline, ProfileError> {
    let mut lines = text.trim().lines();

    let first = lines.next().unwrap_or("");
    let start = match parse_numbers(first).as_deref() {
        Some(&[x, y]) => Vec2::new(x, -y),
        _ => return Err(ProfileError::BadStart(first.trim().to_string())),
    };

    let mut points = vec![start];
    let mut cursor = start;
    for line in lines {
        match parse_numbers(line).as_deref() {
            Some(&[x, y]) => {
                cursor = Vec2::new(x, -y);
                points.push(cursor);
            }
            Some(&[c1x, c1y, c2x, c2y, x, y]) => {
                let c1 = Vec2::new(c1x, -c1y);
                let c2 = Vec2::new(c2x, -c2y);
                let to = Vec2::new(x, -y);
                flatten_cubic(cursor, c1, c2, to, &mut points);
                cursor = to;
            }
            // Wrong token count or a bad number: the line is a no-op.
            _ => {}
        }
    }

    if points.len() < 2 {
        return Err(ProfileError::TooFewPoints(points.len()));
    }

    // Re-base so the start x sits on the rotation axis.
    for p in &mut points {
        p.x -= start.x;
    }

    // Cap both ends on the axis so the revolved surface closes.
    let top_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    let bottom_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    points.insert(0, Vec2::new(0.0, top_y));
    points.push(Vec2::new(0.0, bottom_y));

    Ok(Outline { points })
}

/// Whitespace-split a line into finite f32 tokens. None if any token fails.
fn parse_numbers(line: &str) -> Option<Vec<f32>> {
    line.split_whitespace()
        .map(|tok| tok.parse::<f32>().ok().filter(|v| v.is_finite()))
        .collect()
}

/// Flatten a cubic Bezier into CURVE_POINTS points appended to `out`.
/// The segment start is assumed already present; the endpoint lands exactly.
fn flatten_cubic(from: Vec2, c1: Vec2, c2: Vec2, to: Vec2, out: &mut Vec<Vec2>) {
    for i in 1..=CURVE_POINTS {
        let t = i as f32 / CURVE_POINTS as f32;
        out.push(cubic_point(from, c1, c2, to, t));
    }
}

/// Cubic Bernstein evaluation.
fn cubic_point(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    p0 * (u * u * u)
        + p1 * (3.0 * u * u * t)
        + p2 * (3.0 * u * t * t)
        + p3 * (t * t * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lines_flip_y_and_get_capped() {
        let outline = parse_profile("0 0\n5 0\n5 10\n0 10").unwrap();
        assert_eq!(outline.len(), 6);
        assert_eq!(outline.points[0], Vec2::new(0.0, 0.0));
        assert_eq!(outline.points[2], Vec2::new(5.0, 0.0));
        assert_eq!(outline.points[3], Vec2::new(5.0, -10.0));
        assert_eq!(outline.points[5], Vec2::new(0.0, -10.0));
    }

    #[test]
    fn caps_lie_on_axis_and_top_is_above_bottom() {
        for text in ["0 0\n5 0\n5 10\n0 10", "3 1\n8 2\n6 9", "2 0\n1 1 2 1 3 0"] {
            let outline = parse_profile(text).unwrap();
            let first = outline.points[0];
            let last = outline.points[outline.len() - 1];
            assert_eq!(first.x, 0.0);
            assert_eq!(last.x, 0.0);
            assert!(first.y >= last.y);
        }
    }

    #[test]
    fn start_x_becomes_the_axis_reference() {
        let outline = parse_profile("2 0\n4 6").unwrap();
        assert_eq!(outline.points[1], Vec2::new(0.0, 0.0));
        assert_eq!(outline.points[2], Vec2::new(2.0, -6.0));
    }

    #[test]
    fn bezier_flattens_deterministically() {
        let a = parse_profile("0 0\n1 1 2 1 3 0").unwrap();
        let b = parse_profile("0 0\n1 1 2 1 3 0").unwrap();
        assert_eq!(a, b);
        // start + CURVE_POINTS curve samples + 2 caps
        assert_eq!(a.len(), 1 + CURVE_POINTS + 2);
        // curve endpoint lands exactly
        assert_eq!(a.points[a.len() - 2], Vec2::new(3.0, 0.0));
    }

    #[test]
    fn bezier_midpoint_matches_bernstein() {
        let outline = parse_profile("0 0\n0 4 4 4 4 0").unwrap();
        let mid = outline.points[1 + CURVE_POINTS / 2];
        assert_relative_eq!(mid.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(mid.y, -3.0, epsilon = 1e-5);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let outline = parse_profile("0 0\n5 5\nnot numbers\n1 2 3\n\n7 nope\n2 8").unwrap();
        // start + "5 5" + "2 8" + caps
        assert_eq!(outline.len(), 5);
    }

    #[test]
    fn non_finite_tokens_invalidate_the_line() {
        let outline = parse_profile("0 0\nNaN 4\ninf 2\n3 4").unwrap();
        assert_eq!(outline.len(), 4);
    }

    #[test]
    fn bad_first_line_is_an_error() {
        assert!(matches!(parse_profile(""), Err(ProfileError::BadStart(_))));
        assert!(matches!(parse_profile("abc def\n1 2"), Err(ProfileError::BadStart(_))));
        assert!(matches!(parse_profile("1"), Err(ProfileError::BadStart(_))));
        assert!(matches!(parse_profile("1 2 3\n4 5"), Err(ProfileError::BadStart(_))));
        assert!(matches!(parse_profile("NaN 5\n1 2"), Err(ProfileError::BadStart(_))));
    }

    #[test]
    fn start_only_profile_is_degenerate() {
        assert_eq!(parse_profile("3 4"), Err(ProfileError::TooFewPoints(1)));
        assert_eq!(parse_profile("3 4\njunk"), Err(ProfileError::TooFewPoints(1)));
    }
}
