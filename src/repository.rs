use crate::xml::{self, XmlDocument};
use crate::{Campaign, Planet, TradeRoute, campaign_io, statics};
use anyhow::{Context, anyhow};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Everything loaded for the current data folder. Collections are unordered and names are
/// not required to be unique.
#[derive(Debug, Clone, Default)]
pub struct Repository {
    campaigns: Vec<Campaign>,
    planets: Vec<Planet>,
    trade_routes: Vec<TradeRoute>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn trade_routes(&self) -> &[TradeRoute] {
        &self.trade_routes
    }

    pub fn add_campaign(&mut self, campaign: Campaign) {
        self.campaigns.push(campaign);
    }

    pub fn add_planet(&mut self, planet: Planet) {
        self.planets.push(planet);
    }

    pub fn add_trade_route(&mut self, trade_route: TradeRoute) {
        self.trade_routes.push(trade_route);
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> {
        self.planets.iter().find(|p| p.name() == name)
    }

    pub fn trade_route(&self, name: &str) -> Option<&TradeRoute> {
        self.trade_routes.iter().find(|t| t.name() == name)
    }

    pub fn empty_repository(&mut self) {
        self.campaigns.clear();
        self.planets.clear();
        self.trade_routes.clear();
    }
}

/// Builds a [`Repository`] from a mod/game data folder.
///
/// Layout: `<folder>/Data/XML/PLANETS.XML`, `TRADEROUTES.XML` and an optional `CAMPAIGNS.XML`.
/// File names are matched case-insensitively since mods ship them in mixed case.
#[derive(Debug, Clone)]
pub struct RepositoryCreator {
    default_folder: PathBuf,
}

impl RepositoryCreator {
    pub fn with_default_folder(folder: impl Into<PathBuf>) -> Self {
        Self {
            default_folder: folder.into(),
        }
    }

    pub fn default_folder(&self) -> &Path {
        &self.default_folder
    }

    /// Loads the repository from `folder`, or from the default folder when `None`.
    pub fn construct_repository(&self, folder: Option<&Path>) -> anyhow::Result<Repository> {
        let folder = folder.unwrap_or(&self.default_folder);
        let xml_dir = folder.join(statics::DATA_DIR).join(statics::XML_DIR);

        let planet_path = locate_document(&xml_dir, statics::PLANETS_FILE);
        let trade_route_path = locate_document(&xml_dir, statics::TRADE_ROUTES_FILE);
        let [planet_doc, trade_route_doc]: [XmlDocument; 2] =
            xml::parse_documents(&[&planet_path, &trade_route_path])
                .with_context(|| format!("loading galaxy data from {folder:?}"))?
                .try_into()
                .map_err(|_| anyhow!("expected exactly two galaxy documents"))?;

        let mut repository = Repository::new();
        load_planets(&planet_doc, &mut repository);
        load_trade_routes(&trade_route_doc, &planet_doc, &mut repository);

        let campaign_path = locate_document(&xml_dir, statics::CAMPAIGNS_FILE);
        if campaign_path.is_file() {
            for campaign in campaign_io::load_campaigns(&campaign_path, &repository)? {
                repository.add_campaign(campaign);
            }
        }

        tracing::info!(
            folder = %folder.display(),
            planets = repository.planets.len(),
            trade_routes = repository.trade_routes.len(),
            campaigns = repository.campaigns.len(),
            "repository constructed"
        );
        Ok(repository)
    }
}

fn load_planets(planet_doc: &XmlDocument, repository: &mut Repository) {
    for (_, element) in planet_doc.elements_with_tag(statics::XML_TAG_PLANET) {
        let Some(name) = element.name().filter(|n| !n.is_empty()) else {
            tracing::warn!("skipping planet with an empty name");
            continue;
        };

        let mut planet = Planet::new(name);
        match xml::find_planet_location(name, planet_doc) {
            Some([x, y, _]) => {
                planet.set_x(x);
                planet.set_y(y);
            }
            None => tracing::warn!(planet = name, "no usable galactic position, using origin"),
        }
        repository.add_planet(planet);
    }
}

fn load_trade_routes(
    trade_route_doc: &XmlDocument,
    planet_doc: &XmlDocument,
    repository: &mut Repository,
) {
    for (_, element) in trade_route_doc.elements_with_tag(statics::XML_TAG_TRADE_ROUTE) {
        let Some(name) = element.name().filter(|n| !n.is_empty()) else {
            tracing::warn!("skipping trade route with an empty name");
            continue;
        };

        match xml::find_trade_route(name, trade_route_doc, planet_doc).into_trade_route(name) {
            Some(trade_route) => repository.add_trade_route(trade_route),
            None => tracing::warn!(trade_route = name, "endpoints do not resolve, skipping"),
        }
    }
}

/// `dir/file_name`, or a case-insensitive match inside `dir` when the exact name is absent.
fn locate_document(dir: &Path, file_name: &str) -> PathBuf {
    let exact = dir.join(file_name);
    if exact.is_file() {
        return exact;
    }

    fs::read_dir(dir)
        .ok()
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.eq_ignore_ascii_case(file_name))
        })
        .unwrap_or(exact)
}
