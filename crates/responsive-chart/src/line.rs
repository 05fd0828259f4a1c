// File: crates/responsive-chart/src/line.rs
// Summary: Line path generator; polyline through points with gaps for undefined values, SVG path data I/O.

use std::fmt::Write as _;

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinePath {
    cmds: Vec<PathCmd>,
}

impl LinePath {
    /// Connect consecutive defined points; a `None` ends the current segment.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Option<Point>>,
    {
        let mut cmds = Vec::new();
        let mut pen_down = false;
        for p in points {
            match p {
                Some(p) if p.x.is_finite() && p.y.is_finite() => {
                    cmds.push(if pen_down { PathCmd::LineTo(p) } else { PathCmd::MoveTo(p) });
                    pen_down = true;
                }
                _ => pen_down = false,
            }
        }
        Self { cmds }
    }

    pub fn commands(&self) -> &[PathCmd] { &self.cmds }
    pub fn is_empty(&self) -> bool { self.cmds.is_empty() }

    /// Number of disconnected runs.
    pub fn segment_count(&self) -> usize {
        self.cmds.iter().filter(|c| matches!(c, PathCmd::MoveTo(_))).count()
    }

    /// SVG `d` attribute, e.g. `M0,10L5,3`.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for c in &self.cmds {
            let (tag, p) = match c {
                PathCmd::MoveTo(p) => ('M', p),
                PathCmd::LineTo(p) => ('L', p),
            };
            let _ = write!(d, "{tag}{},{}", trim(p.x), trim(p.y));
        }
        d
    }

    /// Parse the `M`/`L` subset produced by [`LinePath::to_svg`].
    pub fn parse_svg(d: &str) -> Option<Self> {
        let mut cmds = Vec::new();
        let mut rest = d.trim();
        while let Some(tag) = rest.chars().next() {
            if !tag.is_ascii() {
                return None;
            }
            let body_end = rest[1..].find(|c: char| c == 'M' || c == 'L').map(|i| i + 1).unwrap_or(rest.len());
            let (x, y) = rest[1..body_end].split_once(',')?;
            let p = Point::new(x.trim().parse().ok()?, y.trim().parse().ok()?);
            cmds.push(match tag {
                'M' => PathCmd::MoveTo(p),
                'L' => PathCmd::LineTo(p),
                _ => return None,
            });
            rest = &rest[body_end..];
        }
        Some(Self { cmds })
    }
}

fn trim(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
