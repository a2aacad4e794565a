use crate::model::Named;
use crate::repository::{Repository, RepositoryCreator};
use crate::{Campaign, Planet, TradeRoute, campaign_io};
use indexmap::IndexSet;
use std::{
    hash::Hash,
    path::{Path, PathBuf},
};

/// Which checkable list an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Planets,
    TradeRoutes,
}

/// The display surface. Receives a full snapshot on every refresh.
pub trait GalacticPlot {
    fn plot_galaxy(
        &mut self,
        checked_planets: &IndexSet<Planet>,
        checked_trade_routes: &IndexSet<TradeRoute>,
        all_planets: &[Planet],
    );
}

/// What the coordinator needs from a window, independent of the UI toolkit.
/// Lists are passed as display names; selections as 0-based rows into those lists.
pub trait MainWindow {
    type Plot: GalacticPlot;

    fn add_planets(&mut self, planets: &[String]);
    fn add_trade_routes(&mut self, trade_routes: &[String]);
    fn add_campaigns(&mut self, campaigns: &[String]);
    fn make_galactic_plot(&mut self) -> Self::Plot;
    fn empty_widgets(&mut self);
    fn update_campaign_selector(&mut self, campaigns: &[String], selected: &str);
    fn update_planet_selection(&mut self, rows: &[usize]);
    fn update_trade_route_selection(&mut self, rows: &[usize]);
}

/// Entities sorted by name, with their names alongside for row lookups.
#[derive(Debug, Clone)]
struct SortedList<T> {
    items: Vec<T>,
    names: Vec<String>,
}

impl<T> Default for SortedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            names: Vec::new(),
        }
    }
}

impl<T: Named + Clone> SortedList<T> {
    fn from_unsorted(unsorted: &[T]) -> Self {
        let mut items = unsorted.to_vec();
        // Stable: equal names keep repository order.
        items.sort_by(|a, b| a.name().cmp(b.name()));
        let names = items.iter().map(|item| item.name().to_string()).collect();
        Self { items, names }
    }

    /// Row of the first entry called `name`.
    fn row_of(&self, name: &str) -> Option<usize> {
        let row = self.names.partition_point(|n| n.as_str() < name);
        (self.names.get(row).map(String::as_str) == Some(name)).then_some(row)
    }
}

fn apply_check<T: Hash + Eq>(set: &mut IndexSet<T>, item: T, checked: bool) {
    if checked {
        set.insert(item);
    } else {
        set.shift_remove(&item);
    }
}

/// Checks every member and returns their rows in `list`, ascending. Members missing from the
/// list are still checked but have no row to report.
fn check_members<T: Named + Clone + Hash + Eq>(
    set: &mut IndexSet<T>,
    list: &SortedList<T>,
    members: &[T],
) -> Vec<usize> {
    let mut rows = Vec::with_capacity(members.len());
    for member in members {
        match list.row_of(member.name()) {
            Some(row) => {
                set.insert(list.items[row].clone());
                rows.push(row);
            }
            None => {
                tracing::warn!(member = member.name(), "campaign member is not in the loaded data");
                set.insert(member.clone());
            }
        }
    }
    rows.sort_unstable();
    rows.dedup();
    rows
}

/// Owns the sorted entity lists and the checked sets, and keeps the window and the plot in
/// step with them. Every handler runs to completion, ending with a plot refresh.
pub struct SelectionCoordinator<W: MainWindow> {
    window: W,
    plot: W::Plot,
    creator: RepositoryCreator,
    data_folder: PathBuf,
    repository: Repository,
    campaigns: SortedList<Campaign>,
    planets: SortedList<Planet>,
    trade_routes: SortedList<TradeRoute>,
    checked_planets: IndexSet<Planet>,
    checked_trade_routes: IndexSet<TradeRoute>,
}

impl<W: MainWindow> SelectionCoordinator<W> {
    /// Loads the creator's default folder and populates the window.
    pub fn new(window: W, creator: RepositoryCreator) -> anyhow::Result<Self> {
        let repository = creator.construct_repository(None)?;
        Ok(Self::with_repository(window, creator, repository))
    }

    /// Starts from an already-built repository.
    pub fn with_repository(mut window: W, creator: RepositoryCreator, repository: Repository) -> Self {
        let plot = window.make_galactic_plot();
        let data_folder = creator.default_folder().to_path_buf();
        let mut coordinator = Self {
            window,
            plot,
            creator,
            data_folder,
            repository,
            campaigns: SortedList::default(),
            planets: SortedList::default(),
            trade_routes: SortedList::default(),
            checked_planets: IndexSet::new(),
            checked_trade_routes: IndexSet::new(),
        };
        coordinator.rebuild_lists();
        coordinator.refresh_plot();
        coordinator
    }

    /// Replaces the repository with the contents of `folder`.
    ///
    /// The new repository is built before anything is torn down: on error the previous data,
    /// lists and selections are left as they were.
    pub fn on_data_folder_changed(&mut self, folder: &Path) -> anyhow::Result<()> {
        let repository = self.creator.construct_repository(Some(folder))?;

        self.repository.empty_repository();
        self.repository = repository;
        self.data_folder = folder.to_path_buf();

        self.window.empty_widgets();
        self.rebuild_lists();
        self.refresh_plot();
        Ok(())
    }

    pub fn on_entity_checked(&mut self, kind: ListKind, row: usize, checked: bool) {
        match kind {
            ListKind::Planets => {
                let Some(planet) = self.planets.items.get(row) else {
                    tracing::warn!(row, "planet row out of range");
                    return;
                };
                tracing::debug!(planet = planet.name(), checked, "planet toggled");
                apply_check(&mut self.checked_planets, planet.clone(), checked);
            }
            ListKind::TradeRoutes => {
                let Some(trade_route) = self.trade_routes.items.get(row) else {
                    tracing::warn!(row, "trade route row out of range");
                    return;
                };
                tracing::debug!(trade_route = trade_route.name(), checked, "trade route toggled");
                apply_check(&mut self.checked_trade_routes, trade_route.clone(), checked);
            }
        }
        self.refresh_plot();
    }

    /// Replaces both selections with the members of the campaign at `row`.
    pub fn on_campaign_selected(&mut self, row: usize) {
        let Some(campaign) = self.campaigns.items.get(row).cloned() else {
            tracing::warn!(row, "campaign row out of range");
            return;
        };
        tracing::debug!(campaign = campaign.name(), "campaign selected");

        self.checked_planets.clear();
        self.checked_trade_routes.clear();

        if let Some(planets) = campaign.planets() {
            let rows = check_members(&mut self.checked_planets, &self.planets, planets);
            self.window.update_planet_selection(&rows);
        }
        if let Some(trade_routes) = campaign.trade_routes() {
            let rows = check_members(
                &mut self.checked_trade_routes,
                &self.trade_routes,
                trade_routes,
            );
            self.window.update_trade_route_selection(&rows);
        }

        self.refresh_plot();
    }

    pub fn on_new_campaign(&mut self, campaign: Campaign) {
        let name = campaign.name().to_string();
        tracing::info!(campaign = %name, "campaign added");
        self.repository.add_campaign(campaign);
        self.show_campaigns(&name);
    }

    /// Adds every campaign from a Galactic Conquest file and selects the last one in the
    /// combo box. Returns how many were loaded.
    pub fn on_campaign_file_opened(&mut self, path: &Path) -> anyhow::Result<usize> {
        let campaigns = campaign_io::load_campaigns(path, &self.repository)?;
        let Some(last) = campaigns.last().map(|c| c.name().to_string()) else {
            tracing::info!(path = %path.display(), "no campaigns in file");
            return Ok(0);
        };

        let count = campaigns.len();
        for campaign in campaigns {
            self.repository.add_campaign(campaign);
        }
        self.show_campaigns(&last);
        Ok(count)
    }

    /// Writes every campaign, in display order.
    pub fn save_campaigns(&self, path: &Path) -> anyhow::Result<()> {
        campaign_io::save_campaigns(path, &self.campaigns.items)
    }

    pub fn select_all(&mut self, kind: ListKind, checked: bool) {
        match (kind, checked) {
            (ListKind::Planets, true) => {
                self.checked_planets.extend(self.planets.items.iter().cloned());
            }
            (ListKind::Planets, false) => self.checked_planets.clear(),
            (ListKind::TradeRoutes, true) => {
                self.checked_trade_routes
                    .extend(self.trade_routes.items.iter().cloned());
            }
            (ListKind::TradeRoutes, false) => self.checked_trade_routes.clear(),
        }
        self.refresh_plot();
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn plot(&self) -> &W::Plot {
        &self.plot
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn data_folder(&self) -> &Path {
        &self.data_folder
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns.items
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets.items
    }

    pub fn trade_routes(&self) -> &[TradeRoute] {
        &self.trade_routes.items
    }

    pub fn campaign_names(&self) -> &[String] {
        &self.campaigns.names
    }

    pub fn planet_names(&self) -> &[String] {
        &self.planets.names
    }

    pub fn trade_route_names(&self) -> &[String] {
        &self.trade_routes.names
    }

    pub fn checked_planets(&self) -> &IndexSet<Planet> {
        &self.checked_planets
    }

    pub fn checked_trade_routes(&self) -> &IndexSet<TradeRoute> {
        &self.checked_trade_routes
    }

    fn show_campaigns(&mut self, selected: &str) {
        self.window.empty_widgets();
        self.rebuild_lists();
        self.window
            .update_campaign_selector(&self.campaigns.names, selected);
        self.refresh_plot();
    }

    /// Re-sorts everything from the repository and repopulates the (already empty) widgets.
    /// Checked sets refer to the old lists, so they are dropped.
    fn rebuild_lists(&mut self) {
        self.campaigns = SortedList::from_unsorted(self.repository.campaigns());
        self.planets = SortedList::from_unsorted(self.repository.planets());
        self.trade_routes = SortedList::from_unsorted(self.repository.trade_routes());

        self.checked_planets.clear();
        self.checked_trade_routes.clear();

        self.window.add_campaigns(&self.campaigns.names);
        self.window.add_planets(&self.planets.names);
        self.window.add_trade_routes(&self.trade_routes.names);
    }

    fn refresh_plot(&mut self) {
        self.plot.plot_galaxy(
            &self.checked_planets,
            &self.checked_trade_routes,
            &self.planets.items,
        );
    }
}
