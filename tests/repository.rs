mod common;

use common::{CAMPAIGNS, PLANETS, Result, TRADE_ROUTES, write_data_folder};
use gcedit::xml::{self, XmlError};
use gcedit::{Planet, RepositoryCreator, TradeRoute};
use pretty_assertions::assert_eq;

#[test]
fn constructs_planets_and_resolvable_trade_routes() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_data_folder(
        dir.path(),
        &[("PLANETS.XML", PLANETS), ("TRADEROUTES.XML", TRADE_ROUTES)],
    )?;

    let repository = RepositoryCreator::with_default_folder(dir.path()).construct_repository(None)?;

    let planets: Vec<&str> = repository.planets().iter().map(Planet::name).collect();
    assert_eq!(planets, vec!["Hoth", "Bespin", "Alderaan", "Hoth", "Drifting"]);

    // Both "Hoth" entries take the first position in document order.
    assert_eq!(repository.planets()[0].position(), [1.0, 2.0]);
    assert_eq!(repository.planets()[3].position(), [1.0, 2.0]);
    // No position degrades to the origin.
    assert_eq!(repository.planet("Drifting").map(Planet::position), Some([0.0, 0.0]));

    // "HothRoute" points at a planet that does not exist and is dropped.
    let routes: Vec<&str> = repository.trade_routes().iter().map(TradeRoute::name).collect();
    assert_eq!(routes, vec!["Hoth_Bespin", "Alderaan_Hoth"]);
    let route = repository.trade_route("Alderaan_Hoth").unwrap();
    assert_eq!(route.start(), [-5.0, 0.0]);
    assert_eq!(route.end(), [1.0, 2.0]);

    assert!(repository.campaigns().is_empty());
    Ok(())
}

#[test]
fn campaigns_file_is_optional_and_case_insensitive() -> Result<()> {
    let dir = tempfile::tempdir()?;
    write_data_folder(
        dir.path(),
        &[
            ("Planets.xml", PLANETS),
            ("TradeRoutes.xml", TRADE_ROUTES),
            ("Campaigns.xml", CAMPAIGNS),
        ],
    )?;

    let creator = RepositoryCreator::with_default_folder("/nonexistent");
    let repository = creator.construct_repository(Some(dir.path()))?;

    assert_eq!(repository.planets().len(), 5);
    assert_eq!(repository.campaigns().len(), 1);
    let rim = &repository.campaigns()[0];
    assert_eq!(rim.name(), "Rim");
    assert_eq!(rim.planets().map(<[Planet]>::len), Some(2));
    assert_eq!(rim.trade_routes().map(<[TradeRoute]>::len), Some(1));
    Ok(())
}

#[test]
fn missing_or_malformed_documents_fail_construction() -> Result<()> {
    let missing = tempfile::tempdir()?;
    write_data_folder(missing.path(), &[("PLANETS.XML", PLANETS)])?;
    let err = RepositoryCreator::with_default_folder(missing.path())
        .construct_repository(None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<XmlError>(),
        Some(XmlError::DocumentNotFound { .. })
    ));

    let malformed = tempfile::tempdir()?;
    write_data_folder(
        malformed.path(),
        &[
            ("PLANETS.XML", PLANETS),
            ("TRADEROUTES.XML", "<TradeRoutes><TradeRoute Name=\"x\">"),
        ],
    )?;
    let err = RepositoryCreator::with_default_folder(malformed.path())
        .construct_repository(None)
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<XmlError>(),
        Some(XmlError::MalformedXml { .. })
    ));
    Ok(())
}

#[test]
fn parse_documents_reads_each_file_as_a_unit() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let planets = dir.path().join("planets.xml");
    let routes = dir.path().join("routes.xml");
    std::fs::write(&planets, PLANETS)?;
    std::fs::write(&routes, TRADE_ROUTES)?;

    let docs = xml::parse_documents(&[&planets, &routes])?;
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].root().tag(), "Planets");
    assert_eq!(docs[1].root().tag(), "TradeRoutes");

    let lookup = xml::find_trade_route("Hoth_Bespin", &docs[1], &docs[0]);
    assert_eq!(lookup.start, Some([1.0, 2.0]));
    assert_eq!(lookup.end, Some([10.0, 20.0]));

    let missing = dir.path().join("missing.xml");
    assert!(matches!(
        xml::parse_documents(&[&planets, &missing]),
        Err(XmlError::DocumentNotFound { .. })
    ));
    Ok(())
}
