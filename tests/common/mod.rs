use std::path::Path;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub const PLANETS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Planets>
    <Planet Name="Hoth">
        <Galactic_Position>1,2,3</Galactic_Position>
    </Planet>
    <Planet Name="Bespin">
        <Galactic_Position>10, 20 ,5</Galactic_Position>
    </Planet>
    <Planet Name="Alderaan">
        <Galactic_Position>-5 0 0</Galactic_Position>
    </Planet>
    <Planet Name="Hoth">
        <Galactic_Position>9,9,9</Galactic_Position>
    </Planet>
    <Planet Name="Drifting">
        <Description>Lost in hyperspace</Description>
    </Planet>
</Planets>
"#;

pub const TRADE_ROUTES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<TradeRoutes>
    <TradeRoute Name="Hoth_Bespin">
        <Point_A>Hoth</Point_A>
        <Point_B>Bespin</Point_B>
    </TradeRoute>
    <TradeRoute Name="Alderaan_Hoth">
        <Point_A>Alderaan</Point_A>
        <Point_B>Hoth</Point_B>
    </TradeRoute>
    <TradeRoute Name="HothRoute">
        <Point_A>Hoth</Point_A>
        <Point_B>Dagobah</Point_B>
    </TradeRoute>
</TradeRoutes>
"#;

pub const CAMPAIGNS: &str = r#"<Campaigns>
    <Campaign Name="Rim">
        <Locations>Hoth, Bespin</Locations>
        <Trade_Routes>Hoth_Bespin</Trade_Routes>
    </Campaign>
</Campaigns>
"#;

/// Writes `<root>/Data/XML/<name>` for every `(name, contents)` pair.
pub fn write_data_folder(root: &Path, files: &[(&str, &str)]) -> Result<()> {
    let xml_dir = root.join("Data").join("XML");
    std::fs::create_dir_all(&xml_dir)?;
    for (name, contents) in files {
        std::fs::write(xml_dir.join(name), contents)?;
    }
    Ok(())
}
