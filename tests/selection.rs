mod common;

use common::{CAMPAIGNS, PLANETS, Result, TRADE_ROUTES, write_data_folder};
use gcedit::{
    Campaign, GalacticPlot, ListKind, MainWindow, Planet, RepositoryCreator,
    SelectionCoordinator, TradeRoute,
};
use indexmap::IndexSet;
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Window {
    planets: Vec<String>,
    campaigns: Vec<String>,
    selected_campaign: Option<String>,
    planet_rows: Option<Vec<usize>>,
    empties: usize,
}

#[derive(Default)]
struct Plot {
    refreshes: usize,
    last_checked_planets: Vec<String>,
    last_all_planets: usize,
}

impl GalacticPlot for Plot {
    fn plot_galaxy(
        &mut self,
        checked_planets: &IndexSet<Planet>,
        _checked_trade_routes: &IndexSet<TradeRoute>,
        all_planets: &[Planet],
    ) {
        self.refreshes += 1;
        self.last_checked_planets = checked_planets.iter().map(|p| p.name().to_string()).collect();
        self.last_checked_planets.sort();
        self.last_all_planets = all_planets.len();
    }
}

impl MainWindow for Window {
    type Plot = Plot;

    fn add_planets(&mut self, planets: &[String]) {
        self.planets.extend_from_slice(planets);
    }
    fn add_trade_routes(&mut self, _trade_routes: &[String]) {}
    fn add_campaigns(&mut self, campaigns: &[String]) {
        self.campaigns.extend_from_slice(campaigns);
    }
    fn make_galactic_plot(&mut self) -> Plot {
        Plot::default()
    }
    fn empty_widgets(&mut self) {
        self.empties += 1;
        self.planets.clear();
        self.campaigns.clear();
    }
    fn update_campaign_selector(&mut self, campaigns: &[String], selected: &str) {
        self.campaigns = campaigns.to_vec();
        self.selected_campaign = Some(selected.to_string());
    }
    fn update_planet_selection(&mut self, rows: &[usize]) {
        self.planet_rows = Some(rows.to_vec());
    }
    fn update_trade_route_selection(&mut self, _rows: &[usize]) {}
}

fn galaxy_folder(with_campaigns: bool) -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    let mut files = vec![("PLANETS.XML", PLANETS), ("TRADEROUTES.XML", TRADE_ROUTES)];
    if with_campaigns {
        files.push(("CAMPAIGNS.XML", CAMPAIGNS));
    }
    write_data_folder(dir.path(), &files)?;
    Ok(dir)
}

#[test]
fn loads_default_folder_and_selects_campaign() -> Result<()> {
    let dir = galaxy_folder(true)?;
    let mut coordinator = SelectionCoordinator::new(
        Window::default(),
        RepositoryCreator::with_default_folder(dir.path()),
    )?;

    assert_eq!(
        coordinator.window().planets,
        vec!["Alderaan", "Bespin", "Drifting", "Hoth", "Hoth"]
    );

    coordinator.on_campaign_selected(0);
    // Hoth is reported at its first row only.
    assert_eq!(coordinator.window().planet_rows, Some(vec![1, 3]));
    assert_eq!(coordinator.plot().last_checked_planets, vec!["Bespin", "Hoth"]);
    assert_eq!(coordinator.checked_trade_routes().len(), 1);
    Ok(())
}

#[test]
fn folder_change_rebuilds_lists_and_clears_selection() -> Result<()> {
    let first = galaxy_folder(false)?;
    let mut coordinator = SelectionCoordinator::new(
        Window::default(),
        RepositoryCreator::with_default_folder(first.path()),
    )?;
    coordinator.select_all(ListKind::Planets, true);
    assert_eq!(coordinator.checked_planets().len(), 4);

    let second = tempfile::tempdir()?;
    write_data_folder(
        second.path(),
        &[
            (
                "PLANETS.XML",
                r#"<Planets><Planet Name="Kessel"><Galactic_Position>7,7,0</Galactic_Position></Planet></Planets>"#,
            ),
            ("TRADEROUTES.XML", "<TradeRoutes/>"),
        ],
    )?;

    let refreshes = coordinator.plot().refreshes;
    coordinator.on_data_folder_changed(second.path())?;

    assert_eq!(coordinator.window().empties, 1);
    assert_eq!(coordinator.window().planets, vec!["Kessel"]);
    assert!(coordinator.checked_planets().is_empty());
    assert!(coordinator.trade_routes().is_empty());
    assert_eq!(coordinator.data_folder(), second.path());
    assert_eq!(coordinator.plot().refreshes, refreshes + 1);
    assert!(coordinator.plot().last_checked_planets.is_empty());
    assert_eq!(coordinator.plot().last_all_planets, 1);
    Ok(())
}

#[test]
fn saved_campaigns_reopen_with_members() -> Result<()> {
    let dir = galaxy_folder(false)?;
    let mut coordinator = SelectionCoordinator::new(
        Window::default(),
        RepositoryCreator::with_default_folder(dir.path()),
    )?;

    let members = vec![Planet::new("Alderaan"), Planet::new("Bespin")];
    coordinator.on_new_campaign(Campaign::with_members("Core", Some(members), None));
    assert_eq!(coordinator.window().selected_campaign.as_deref(), Some("Core"));

    let path = dir.path().join("conquest.xml");
    coordinator.save_campaigns(&path)?;

    let mut reopened = SelectionCoordinator::new(
        Window::default(),
        RepositoryCreator::with_default_folder(dir.path()),
    )?;
    assert_eq!(reopened.on_campaign_file_opened(&path)?, 1);
    assert_eq!(reopened.campaign_names(), ["Core".to_string()].as_slice());
    assert_eq!(reopened.window().selected_campaign.as_deref(), Some("Core"));

    let core = &reopened.campaigns()[0];
    let planets: Vec<&str> = core.planets().unwrap().iter().map(Planet::name).collect();
    assert_eq!(planets, vec!["Alderaan", "Bespin"]);
    assert!(core.trade_routes().is_none());

    reopened.on_campaign_selected(0);
    assert_eq!(reopened.window().planet_rows, Some(vec![0, 1]));
    Ok(())
}
