// UI text, galaxy XML tag names, data folder layout and plot sizes.
// gui.rs, the loaders and campaign_io all read their literals from here.

// English UI strings (EN_ prefix to make future localization easier)
pub const EN_APP_TITLE: &str = "Galactic Conquest Editor";

pub const EN_MENU_FILE: &str = "File";
pub const EN_MENU_NEW: &str = "New Galactic Conquest...";
pub const EN_MENU_OPEN: &str = "Open Galactic Conquest";
pub const EN_MENU_SAVE: &str = "Save";
pub const EN_MENU_SET_DATA_FOLDER: &str = "Set Data Folder";
pub const EN_MENU_QUIT: &str = "Quit";

pub const EN_COL_PLANETS: &str = "Planets";
pub const EN_COL_TRADE_ROUTES: &str = "Trade Routes";

pub const EN_BTN_SELECT_ALL_PLANETS: &str = "Select All Planets";
pub const EN_BTN_DESELECT_ALL_PLANETS: &str = "Deselect All Planets";
pub const EN_BTN_SELECT_ALL_TRADE_ROUTES: &str = "Select All Trade Routes";
pub const EN_BTN_DESELECT_ALL_TRADE_ROUTES: &str = "Deselect All Trade Routes";
pub const EN_BTN_CREATE: &str = "Create";
pub const EN_BTN_CANCEL: &str = "Cancel";

pub const EN_WINDOW_NEW_CAMPAIGN: &str = "New Galactic Conquest";
pub const EN_LABEL_CAMPAIGN_NAME: &str = "Name:";
pub const EN_HINT_CAMPAIGN_NAME: &str = "e.g. Outer Rim Sieges";
pub const EN_NEW_CAMPAIGN_MEMBERS: &str = "Members are taken from the checked planets and trade routes.";
pub const EN_PLACEHOLDER_NO_CAMPAIGN: &str = "<no campaign>";

pub const EN_FILTER_XML: &str = "XML Files";
pub const EN_DIALOG_DATA_FOLDER: &str = "Select Data folder:";

pub const EN_ERR_EMPTY_CAMPAIGN_NAME: &str = "Campaign name must not be empty";

// Data folder layout (relative to the selected mod/game folder).
pub const DATA_DIR: &str = "Data";
pub const XML_DIR: &str = "XML";
pub const PLANETS_FILE: &str = "PLANETS.XML";
pub const TRADE_ROUTES_FILE: &str = "TRADEROUTES.XML";
pub const CAMPAIGNS_FILE: &str = "CAMPAIGNS.XML";

// Environment override for the default data folder.
pub const ENV_DATA_DIR: &str = "GCEDIT_DATA_DIR";

// XML schema names (XML_ prefix).
pub const XML_ATTR_NAME: &str = "Name";
pub const XML_TAG_PLANET: &str = "Planet";
pub const XML_TAG_TRADE_ROUTE: &str = "TradeRoute";
pub const XML_TAG_GALACTIC_POSITION: &str = "Galactic_Position";
pub const XML_TAG_POINT_A: &str = "Point_A";
pub const XML_TAG_POINT_B: &str = "Point_B";
pub const XML_TAG_CAMPAIGNS: &str = "Campaigns";
pub const XML_TAG_CAMPAIGN: &str = "Campaign";
pub const XML_TAG_LOCATIONS: &str = "Locations";
pub const XML_TAG_TRADE_ROUTES: &str = "Trade_Routes";

// Plot framing.
pub const PLOT_PADDING_FRACTION: f64 = 0.05;
pub const PLOT_MARKER_RADIUS: f32 = 4.0;
pub const PLOT_ROUTE_WIDTH: f32 = 1.5;
pub const PLOT_LABEL_SIZE: f32 = 12.0;
