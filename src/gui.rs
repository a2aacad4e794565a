use crate::plot::GalaxyFrame;
use crate::presenter::{GalacticPlot, ListKind, MainWindow, SelectionCoordinator};
use crate::repository::{Repository, RepositoryCreator};
use crate::{Campaign, Planet, TradeRoute, statics};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use indexmap::IndexSet;
use std::path::PathBuf;

pub fn run_gui(data_folder: PathBuf) -> eframe::Result {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 900.0]),
        ..Default::default()
    };
    let title = format!("{} {}", statics::EN_APP_TITLE, env!("CARGO_PKG_VERSION"));
    let creator = RepositoryCreator::with_default_folder(data_folder);
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(GcEditApp::new(creator)))),
    )
}

/// Widget contents as the coordinator last pushed them, plus the user's check marks.
#[derive(Debug, Default)]
struct WidgetState {
    campaigns: Vec<String>,
    selected_campaign: Option<usize>,
    planets: Vec<(String, bool)>,
    trade_routes: Vec<(String, bool)>,
}

impl WidgetState {
    fn rows_mut(&mut self, kind: ListKind) -> &mut Vec<(String, bool)> {
        match kind {
            ListKind::Planets => &mut self.planets,
            ListKind::TradeRoutes => &mut self.trade_routes,
        }
    }

    fn set_checked(&mut self, kind: ListKind, row: usize, checked: bool) {
        if let Some(entry) = self.rows_mut(kind).get_mut(row) {
            entry.1 = checked;
        }
    }

    fn set_all(&mut self, kind: ListKind, checked: bool) {
        for entry in self.rows_mut(kind).iter_mut() {
            entry.1 = checked;
        }
    }

    fn check_only(&mut self, kind: ListKind, rows: &[usize]) {
        self.set_all(kind, false);
        for &row in rows {
            self.set_checked(kind, row, true);
        }
    }
}

/// Latest frame handed over by the coordinator; painted every egui frame.
#[derive(Debug, Default)]
struct GalaxyPlot {
    frame: GalaxyFrame,
}

impl GalacticPlot for GalaxyPlot {
    fn plot_galaxy(
        &mut self,
        checked_planets: &IndexSet<Planet>,
        checked_trade_routes: &IndexSet<TradeRoute>,
        all_planets: &[Planet],
    ) {
        self.frame = GalaxyFrame::new(checked_planets, checked_trade_routes, all_planets);
    }
}

impl MainWindow for WidgetState {
    type Plot = GalaxyPlot;

    fn add_planets(&mut self, planets: &[String]) {
        self.planets
            .extend(planets.iter().map(|name| (name.clone(), false)));
    }

    fn add_trade_routes(&mut self, trade_routes: &[String]) {
        self.trade_routes
            .extend(trade_routes.iter().map(|name| (name.clone(), false)));
    }

    fn add_campaigns(&mut self, campaigns: &[String]) {
        self.campaigns.extend(campaigns.iter().cloned());
    }

    fn make_galactic_plot(&mut self) -> GalaxyPlot {
        GalaxyPlot::default()
    }

    fn empty_widgets(&mut self) {
        self.campaigns.clear();
        self.selected_campaign = None;
        self.planets.clear();
        self.trade_routes.clear();
    }

    fn update_campaign_selector(&mut self, campaigns: &[String], selected: &str) {
        self.campaigns = campaigns.to_vec();
        self.selected_campaign = self.campaigns.iter().position(|c| c == selected);
    }

    fn update_planet_selection(&mut self, rows: &[usize]) {
        self.check_only(ListKind::Planets, rows);
    }

    fn update_trade_route_selection(&mut self, rows: &[usize]) {
        self.check_only(ListKind::TradeRoutes, rows);
    }
}

/// Everything the user can do in one frame; applied after rendering so the coordinator is
/// never borrowed by a widget while it changes.
#[derive(Debug, Clone, PartialEq)]
enum UiEvent {
    Checked(ListKind, usize, bool),
    SelectAll(ListKind, bool),
    CampaignSelected(usize),
    OpenNewCampaign,
    CreateCampaign,
    OpenCampaignFile,
    SaveCampaigns,
    SetDataFolder,
    Quit,
}

struct GcEditApp {
    coordinator: SelectionCoordinator<WidgetState>,
    dialog_dir: Option<PathBuf>,
    status: String,
    last_error: Option<String>,
    new_campaign_open: bool,
    new_campaign_name: String,
}

impl GcEditApp {
    fn new(creator: RepositoryCreator) -> Self {
        let (coordinator, last_error) =
            match SelectionCoordinator::new(WidgetState::default(), creator.clone()) {
                Ok(coordinator) => (coordinator, None),
                Err(e) => {
                    tracing::error!("initial load failed: {e:#}");
                    let coordinator = SelectionCoordinator::with_repository(
                        WidgetState::default(),
                        creator,
                        Repository::new(),
                    );
                    (coordinator, Some(format!("Failed to load: {e:#}")))
                }
            };

        Self {
            coordinator,
            dialog_dir: None,
            status: String::new(),
            last_error,
            new_campaign_open: false,
            new_campaign_name: String::new(),
        }
    }

    fn file_dialog(&self) -> rfd::FileDialog {
        let dir = self
            .dialog_dir
            .clone()
            .unwrap_or_else(|| self.coordinator.data_folder().to_path_buf());
        rfd::FileDialog::new().set_directory(dir)
    }

    fn handle(&mut self, ctx: &egui::Context, event: UiEvent) {
        match event {
            UiEvent::Checked(kind, row, checked) => {
                self.coordinator.window_mut().set_checked(kind, row, checked);
                self.coordinator.on_entity_checked(kind, row, checked);
            }
            UiEvent::SelectAll(kind, checked) => {
                self.coordinator.window_mut().set_all(kind, checked);
                self.coordinator.select_all(kind, checked);
            }
            UiEvent::CampaignSelected(row) => {
                let window = self.coordinator.window_mut();
                window.selected_campaign = Some(row);
                window.set_all(ListKind::Planets, false);
                window.set_all(ListKind::TradeRoutes, false);
                self.coordinator.on_campaign_selected(row);
            }
            UiEvent::OpenNewCampaign => {
                self.new_campaign_open = true;
                self.new_campaign_name.clear();
            }
            UiEvent::CreateCampaign => self.create_campaign(),
            UiEvent::OpenCampaignFile => self.open_campaign_file(),
            UiEvent::SaveCampaigns => self.save_campaigns(),
            UiEvent::SetDataFolder => self.set_data_folder(),
            UiEvent::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn create_campaign(&mut self) {
        let name = self.new_campaign_name.trim();
        if name.is_empty() {
            self.last_error = Some(statics::EN_ERR_EMPTY_CAMPAIGN_NAME.to_string());
            return;
        }

        let planets: Vec<Planet> = self.coordinator.checked_planets().iter().cloned().collect();
        let trade_routes: Vec<TradeRoute> = self
            .coordinator
            .checked_trade_routes()
            .iter()
            .cloned()
            .collect();
        let campaign = Campaign::with_members(
            name,
            (!planets.is_empty()).then_some(planets),
            (!trade_routes.is_empty()).then_some(trade_routes),
        );

        self.status = format!("Created {name}");
        self.coordinator.on_new_campaign(campaign);
        self.new_campaign_open = false;
        self.last_error = None;
    }

    fn open_campaign_file(&mut self) {
        let Some(path) = self
            .file_dialog()
            .add_filter(statics::EN_FILTER_XML, &["xml", "XML"])
            .pick_file()
        else {
            return;
        };

        match self.coordinator.on_campaign_file_opened(&path) {
            Ok(count) => {
                self.dialog_dir = path.parent().map(PathBuf::from);
                self.status = format!("Loaded {count} campaign(s) from {}", path.display());
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(format!("Failed to open: {e:#}")),
        }
    }

    fn save_campaigns(&mut self) {
        let Some(path) = self
            .file_dialog()
            .add_filter(statics::EN_FILTER_XML, &["xml", "XML"])
            .set_file_name(statics::CAMPAIGNS_FILE)
            .save_file()
        else {
            return;
        };

        if let Err(e) = self.coordinator.save_campaigns(&path) {
            self.last_error = Some(format!("Failed to save: {e:#}"));
        } else {
            self.dialog_dir = path.parent().map(PathBuf::from);
            self.status = format!("Saved {}", path.display());
            self.last_error = None;
        }
    }

    fn set_data_folder(&mut self) {
        let Some(folder) = self
            .file_dialog()
            .set_title(statics::EN_DIALOG_DATA_FOLDER)
            .pick_folder()
        else {
            return;
        };

        match self.coordinator.on_data_folder_changed(&folder) {
            Ok(()) => {
                self.status = format!("Loaded {}", folder.display());
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(format!("Failed to load: {e:#}")),
        }
    }
}

fn render_check_table(
    ui: &mut egui::Ui,
    heading: &str,
    rows: &[(String, bool)],
    kind: ListKind,
    max_height: f32,
    events: &mut Vec<UiEvent>,
) {
    let row_h = ui.text_style_height(&egui::TextStyle::Body) + 6.0;
    ui.push_id(heading, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(max_height)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::remainder())
            .header(row_h, |mut header| {
                header.col(|ui| {
                    ui.strong(heading);
                });
            })
            .body(|body| {
                body.rows(row_h, rows.len(), |mut row| {
                    let idx = row.index();
                    let (name, checked) = &rows[idx];
                    row.col(|ui| {
                        let mut checked = *checked;
                        if ui.checkbox(&mut checked, name.as_str()).changed() {
                            events.push(UiEvent::Checked(kind, idx, checked));
                        }
                    });
                });
            });
    });
}

fn render_select_buttons(
    ui: &mut egui::Ui,
    kind: ListKind,
    select_label: &str,
    deselect_label: &str,
    events: &mut Vec<UiEvent>,
) {
    ui.horizontal(|ui| {
        if ui.button(select_label).clicked() {
            events.push(UiEvent::SelectAll(kind, true));
        }
        if ui.button(deselect_label).clicked() {
            events.push(UiEvent::SelectAll(kind, false));
        }
    });
}

fn paint_galaxy(ui: &mut egui::Ui, frame: &GalaxyFrame) {
    let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
    let rect = response.rect;
    painter.rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);

    let screen = [rect.left(), rect.top(), rect.width(), rect.height()];
    let to_pos = |point: [f64; 2]| {
        let [x, y] = frame.to_screen(point, screen);
        egui::pos2(x, y)
    };

    let route_stroke = egui::Stroke::new(
        statics::PLOT_ROUTE_WIDTH,
        egui::Color32::from_rgb(90, 160, 255),
    );
    for route in &frame.routes {
        painter.line_segment([to_pos(route.start), to_pos(route.end)], route_stroke);
    }

    let marker = egui::Color32::from_rgb(255, 200, 60);
    let font = egui::FontId::proportional(statics::PLOT_LABEL_SIZE);
    for planet in &frame.planets {
        let pos = to_pos(planet.position);
        painter.circle_filled(pos, statics::PLOT_MARKER_RADIUS, marker);
        painter.text(
            pos + egui::vec2(6.0, -6.0),
            egui::Align2::LEFT_BOTTOM,
            &planet.name,
            font.clone(),
            ui.visuals().text_color(),
        );
    }
}

impl eframe::App for GcEditApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button(statics::EN_MENU_FILE, |ui| {
                    if ui.button(statics::EN_MENU_NEW).clicked() {
                        events.push(UiEvent::OpenNewCampaign);
                    }
                    if ui.button(statics::EN_MENU_OPEN).clicked() {
                        events.push(UiEvent::OpenCampaignFile);
                    }
                    if ui.button(statics::EN_MENU_SAVE).clicked() {
                        events.push(UiEvent::SaveCampaigns);
                    }
                    if ui.button(statics::EN_MENU_SET_DATA_FOLDER).clicked() {
                        events.push(UiEvent::SetDataFolder);
                    }
                    if ui.button(statics::EN_MENU_QUIT).clicked() {
                        events.push(UiEvent::Quit);
                    }
                });

                if !self.status.is_empty() {
                    ui.separator();
                    ui.label(&self.status);
                }
                if let Some(err) = &self.last_error {
                    ui.separator();
                    ui.colored_label(ui.visuals().error_fg_color, err);
                }
            });
        });

        let widgets = self.coordinator.window();
        egui::SidePanel::left("selection_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                let selected_text = widgets
                    .selected_campaign
                    .and_then(|idx| widgets.campaigns.get(idx))
                    .map(String::as_str)
                    .unwrap_or(statics::EN_PLACEHOLDER_NO_CAMPAIGN);
                egui::ComboBox::from_id_salt("campaign_selector")
                    .selected_text(selected_text)
                    .width(ui.available_width())
                    .show_ui(ui, |ui| {
                        for (idx, name) in widgets.campaigns.iter().enumerate() {
                            let selected = widgets.selected_campaign == Some(idx);
                            if ui.selectable_label(selected, name.as_str()).clicked() {
                                events.push(UiEvent::CampaignSelected(idx));
                            }
                        }
                    });
                ui.separator();

                // Two tables plus their button rows share the remaining height.
                let table_h = (ui.available_height() / 2.0 - 60.0).max(80.0);
                render_check_table(
                    ui,
                    statics::EN_COL_PLANETS,
                    &widgets.planets,
                    ListKind::Planets,
                    table_h,
                    &mut events,
                );
                render_select_buttons(
                    ui,
                    ListKind::Planets,
                    statics::EN_BTN_SELECT_ALL_PLANETS,
                    statics::EN_BTN_DESELECT_ALL_PLANETS,
                    &mut events,
                );
                ui.separator();
                render_check_table(
                    ui,
                    statics::EN_COL_TRADE_ROUTES,
                    &widgets.trade_routes,
                    ListKind::TradeRoutes,
                    table_h,
                    &mut events,
                );
                render_select_buttons(
                    ui,
                    ListKind::TradeRoutes,
                    statics::EN_BTN_SELECT_ALL_TRADE_ROUTES,
                    statics::EN_BTN_DESELECT_ALL_TRADE_ROUTES,
                    &mut events,
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            paint_galaxy(ui, &self.coordinator.plot().frame);
        });

        if self.new_campaign_open {
            let mut open = self.new_campaign_open;
            egui::Window::new(statics::EN_WINDOW_NEW_CAMPAIGN)
                .collapsible(false)
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(statics::EN_LABEL_CAMPAIGN_NAME);
                        ui.add(
                            egui::TextEdit::singleline(&mut self.new_campaign_name)
                                .hint_text(statics::EN_HINT_CAMPAIGN_NAME),
                        );
                    });
                    ui.label(statics::EN_NEW_CAMPAIGN_MEMBERS);
                    ui.horizontal(|ui| {
                        if ui.button(statics::EN_BTN_CREATE).clicked() {
                            events.push(UiEvent::CreateCampaign);
                        }
                        if ui.button(statics::EN_BTN_CANCEL).clicked() {
                            self.new_campaign_open = false;
                        }
                    });
                });
            self.new_campaign_open &= open;
        }

        for event in events {
            self.handle(ctx, event);
        }
    }
}
