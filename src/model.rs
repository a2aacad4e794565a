use std::hash::{Hash, Hasher};

/// A planet: a name plus its position on the galactic plane.
///
/// Identity is the name only; two planets with the same name compare equal even if their
/// coordinates differ.
#[derive(Debug, Clone)]
pub struct Planet {
    name: String,
    x: f64,
    y: f64,
}

impl Planet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            x: 0.0,
            y: 0.0,
        }
    }

    pub fn with_position(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the planet. An empty name is rejected and the previous name is kept.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !name.is_empty() {
            self.name = name;
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn position(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// A trade route between two planets, with both endpoints already resolved to coordinates.
#[derive(Debug, Clone)]
pub struct TradeRoute {
    name: String,
    start_planet: String,
    end_planet: String,
    start: [f64; 2],
    end: [f64; 2],
}

impl TradeRoute {
    pub fn new(
        name: impl Into<String>,
        start_planet: impl Into<String>,
        end_planet: impl Into<String>,
        start: [f64; 2],
        end: [f64; 2],
    ) -> Self {
        Self {
            name: name.into(),
            start_planet: start_planet.into(),
            end_planet: end_planet.into(),
            start,
            end,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_planet(&self) -> &str {
        &self.start_planet
    }

    pub fn end_planet(&self) -> &str {
        &self.end_planet
    }

    pub fn start(&self) -> [f64; 2] {
        self.start
    }

    pub fn end(&self) -> [f64; 2] {
        self.end
    }
}

/// A Galactic Conquest. `None` member lists mean "nothing assigned", which is not the
/// same as an assigned-but-empty list.
#[derive(Debug, Clone)]
pub struct Campaign {
    name: String,
    planets: Option<Vec<Planet>>,
    trade_routes: Option<Vec<TradeRoute>>,
}

impl Campaign {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            planets: None,
            trade_routes: None,
        }
    }

    pub fn with_members(
        name: impl Into<String>,
        planets: Option<Vec<Planet>>,
        trade_routes: Option<Vec<TradeRoute>>,
    ) -> Self {
        Self {
            name: name.into(),
            planets,
            trade_routes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn planets(&self) -> Option<&[Planet]> {
        self.planets.as_deref()
    }

    pub fn set_planets(&mut self, planets: Option<Vec<Planet>>) {
        self.planets = planets;
    }

    pub fn trade_routes(&self) -> Option<&[TradeRoute]> {
        self.trade_routes.as_deref()
    }

    pub fn set_trade_routes(&mut self, trade_routes: Option<Vec<TradeRoute>>) {
        self.trade_routes = trade_routes;
    }
}

// Identity is the name for every entity kind.
macro_rules! name_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.name == other.name
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.name.hash(state);
            }
        }
    };
}

name_identity!(Planet);
name_identity!(TradeRoute);
name_identity!(Campaign);

/// Anything listed by name in the editor.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Planet {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for TradeRoute {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Campaign {
    fn name(&self) -> &str {
        &self.name
    }
}
