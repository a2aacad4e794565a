//! Core library for the Galactic Conquest Editor.
//! Resolves planets and trade routes from a mod's galaxy XML, keeps name-sorted entity lists
//! and the user's checked selections in sync with the window, and hands snapshots to the
//! galaxy plot.

pub mod campaign_io;
mod gui;
pub mod logging;
mod model;
pub mod plot;
pub mod presenter;
pub mod repository;
pub mod statics;
pub mod xml;

pub use gui::run_gui;
pub use model::{Campaign, Named, Planet, TradeRoute};
pub use presenter::{GalacticPlot, ListKind, MainWindow, SelectionCoordinator};
pub use repository::{Repository, RepositoryCreator};
