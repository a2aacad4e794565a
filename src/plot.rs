use crate::{Planet, TradeRoute, statics};
use indexmap::IndexSet;

/// Axis-aligned world rectangle the galaxy is framed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Bounds {
    fn around(planets: &[Planet]) -> Self {
        let mut iter = planets.iter().map(Planet::position);
        let Some(first) = iter.next() else {
            return Self {
                min: [-1.0, -1.0],
                max: [1.0, 1.0],
            };
        };

        let (mut min, mut max) = (first, first);
        for [x, y] in iter {
            min = [min[0].min(x), min[1].min(y)];
            max = [max[0].max(x), max[1].max(y)];
        }

        let mut bounds = Self { min, max };
        for axis in 0..2 {
            let mut span = bounds.max[axis] - bounds.min[axis];
            if span <= f64::EPSILON {
                // A single planet (or a line of them) still gets a visible frame.
                bounds.min[axis] -= 1.0;
                bounds.max[axis] += 1.0;
                span = 2.0;
            }
            let pad = span * statics::PLOT_PADDING_FRACTION;
            bounds.min[axis] -= pad;
            bounds.max[axis] += pad;
        }
        bounds
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetMarker {
    pub name: String,
    pub position: [f64; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub name: String,
    pub start: [f64; 2],
    pub end: [f64; 2],
}

/// Everything the display draws for one selection snapshot.
///
/// Bounds always come from every loaded planet so the frame does not jump as the
/// selection changes.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyFrame {
    pub bounds: Bounds,
    pub planets: Vec<PlanetMarker>,
    pub routes: Vec<RouteSegment>,
}

impl Default for GalaxyFrame {
    fn default() -> Self {
        Self::new(&IndexSet::new(), &IndexSet::new(), &[])
    }
}

impl GalaxyFrame {
    pub fn new(
        checked_planets: &IndexSet<Planet>,
        checked_trade_routes: &IndexSet<TradeRoute>,
        all_planets: &[Planet],
    ) -> Self {
        Self {
            bounds: Bounds::around(all_planets),
            planets: checked_planets
                .iter()
                .map(|p| PlanetMarker {
                    name: p.name().to_string(),
                    position: p.position(),
                })
                .collect(),
            routes: checked_trade_routes
                .iter()
                .map(|t| RouteSegment {
                    name: t.name().to_string(),
                    start: t.start(),
                    end: t.end(),
                })
                .collect(),
        }
    }

    /// Maps a world point into a screen rectangle given as `(left, top, width, height)`.
    /// Screen y grows downward, world y grows upward.
    pub fn to_screen(&self, point: [f64; 2], rect: [f32; 4]) -> [f32; 2] {
        let [left, top, width, height] = rect;
        let u = (point[0] - self.bounds.min[0]) / self.bounds.width();
        let v = (point[1] - self.bounds.min[1]) / self.bounds.height();
        [
            left + (u as f32) * width,
            top + (1.0 - v as f32) * height,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::GalaxyFrame;
    use crate::{Planet, TradeRoute};
    use indexmap::IndexSet;

    #[test]
    fn bounds_cover_all_planets_with_padding() {
        let all = vec![
            Planet::with_position("A", 0.0, 0.0),
            Planet::with_position("B", 100.0, 50.0),
        ];
        let frame = GalaxyFrame::new(&IndexSet::new(), &IndexSet::new(), &all);
        assert_eq!(frame.bounds.min, [-5.0, -2.5]);
        assert_eq!(frame.bounds.max, [105.0, 52.5]);
        assert!(frame.planets.is_empty());
    }

    #[test]
    fn degenerate_and_empty_frames_stay_drawable() {
        let empty = GalaxyFrame::default();
        assert!(empty.bounds.width() > 0.0 && empty.bounds.height() > 0.0);

        let single = vec![Planet::with_position("A", 3.0, 3.0)];
        let frame = GalaxyFrame::new(&IndexSet::new(), &IndexSet::new(), &single);
        assert!(frame.bounds.min[0] < 3.0 && frame.bounds.max[0] > 3.0);
        assert!(frame.bounds.min[1] < 3.0 && frame.bounds.max[1] > 3.0);
    }

    #[test]
    fn checked_entities_become_markers_and_segments() {
        let all = vec![
            Planet::with_position("A", 0.0, 0.0),
            Planet::with_position("B", 10.0, 10.0),
        ];
        let planets: IndexSet<Planet> = all[..1].iter().cloned().collect();
        let routes: IndexSet<TradeRoute> =
            [TradeRoute::new("A_B", "A", "B", [0.0, 0.0], [10.0, 10.0])]
                .into_iter()
                .collect();

        let frame = GalaxyFrame::new(&planets, &routes, &all);
        assert_eq!(frame.planets.len(), 1);
        assert_eq!(frame.planets[0].name, "A");
        assert_eq!(frame.routes[0].end, [10.0, 10.0]);
    }

    #[test]
    fn to_screen_flips_y() {
        let all = vec![
            Planet::with_position("A", 0.0, 0.0),
            Planet::with_position("B", 10.0, 10.0),
        ];
        let frame = GalaxyFrame::new(&IndexSet::new(), &IndexSet::new(), &all);
        let rect = [0.0, 0.0, 110.0, 110.0];

        let low = frame.to_screen([0.0, 0.0], rect);
        let high = frame.to_screen([10.0, 10.0], rect);
        assert!(low[0] < high[0]);
        assert!(low[1] > high[1]);
        assert!((low[0] - 5.0).abs() < 1e-3);
        assert!((low[1] - 105.0).abs() < 1e-3);
    }
}
