use eframe::egui;
use std::time::Instant;

use globegrid::config::GridConfig;
use globegrid::grid::SphereGrid;
use globegrid::item::GridItem;
use globegrid::project::RenderAttr;

/// Disc colors for demo profiles, picked per item id.
const PALETTE: &[egui::Color32] = &[
    egui::Color32::from_rgb(0xC2, 0x3B, 0x4A), // red
    egui::Color32::from_rgb(0x2C, 0x6E, 0xBB), // blue
    egui::Color32::from_rgb(0xB8, 0x8A, 0x1A), // gold
    egui::Color32::from_rgb(0x2F, 0x8F, 0x4E), // green
    egui::Color32::from_rgb(0x8A, 0x3F, 0xA8), // purple
    egui::Color32::from_rgb(0xC8, 0x5C, 0x23), // orange
    egui::Color32::from_rgb(0x1E, 0x8C, 0x96), // teal
    egui::Color32::from_rgb(0xB0, 0x3E, 0x6E), // pink
];

const DEMO_NAMES: &[&str] = &[
    "Aiko Tanaka",
    "Marcus Webb",
    "Priya Sharma",
    "Jonas Lindqvist",
    "Fatima al-Rashid",
    "Diego Morales",
    "Hana Kim",
    "Oliver Grant",
    "Zanele Nkosi",
    "Lucas Ferreira",
    "Mei-Ling Chen",
    "Tomasz Kowalski",
    "Amara Diallo",
    "Noah Fischer",
    "Ines Castillo",
    "Ravi Patel",
    "Sofia Rossi",
    "Elias Haugen",
];

fn main() {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "globegrid — sphere grid demo",
        options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new()))),
    )
    .expect("failed to start globegrid demo");
}

struct DemoApp {
    grid: SphereGrid,
    last_frame_time: Instant,
    last_pointer: (f32, f32),
    selected: Option<GridItem>,
    auto_rotate: bool,
}

impl DemoApp {
    fn new() -> Self {
        let cfg = GridConfig {
            auto_rotate: true,
            ..GridConfig::default()
        };
        let mut grid = SphereGrid::new(cfg).expect("default demo config is valid");
        grid.set_items(demo_items());

        Self {
            grid,
            last_frame_time: Instant::now(),
            last_pointer: (0.0, 0.0),
            selected: None,
            auto_rotate: true,
        }
    }
}

fn demo_items() -> Vec<GridItem> {
    DEMO_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let slug = name.to_lowercase().replace(' ', "-");
            GridItem::new(i as u64, format!("avatars/{}.png", slug))
                .with_title(*name)
                .with_description(format!("{} is on the network.", name))
                .with_payload(format!("profile/{}", slug))
        })
        .collect()
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect()
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = (now - self.last_frame_time).as_secs_f32().min(0.1);
        self.last_frame_time = now;

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("globegrid");
                ui.separator();
                ui.label(format!("{} profiles", self.grid.items().len()));
                ui.separator();
                if ui.checkbox(&mut self.auto_rotate, "ambient spin").changed() {
                    self.grid.set_auto_rotate(self.auto_rotate);
                }
                if let Some(id) = self.grid.hovered() {
                    if let Some(item) = self.grid.items().iter().find(|it| it.id == id) {
                        ui.separator();
                        ui.label(item.title.as_deref().unwrap_or("(untitled)"));
                    }
                }
            });
        });

        if let Some(item) = self.selected.clone() {
            egui::SidePanel::right("profile")
                .default_width(220.0)
                .show(ctx, |ui| {
                    ui.heading(item.title.as_deref().unwrap_or("(untitled)"));
                    if let Some(desc) = &item.description {
                        ui.label(desc);
                    }
                    ui.monospace(&item.image);
                    if let Some(payload) = &item.payload {
                        ui.monospace(payload);
                    }
                    ui.separator();
                    if ui.button("Close").clicked() {
                        self.selected = None;
                    }
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(
                ui.available_size(),
                egui::Sense::click_and_drag().union(egui::Sense::hover()),
            );
            let rect = response.rect;
            self.grid.resize(rect.width(), rect.height());
            let to_local =
                |pos: egui::Pos2| -> (f32, f32) { (pos.x - rect.min.x, pos.y - rect.min.y) };

            // Drag → rotation; click → tap path through the engine.
            if response.drag_started() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let (x, y) = to_local(pos);
                    self.last_pointer = (x, y);
                    self.grid.pointer_down(x, y);
                }
            }
            if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let (x, y) = to_local(pos);
                    self.last_pointer = (x, y);
                    self.grid.pointer_move(x, y);
                }
            }
            if response.drag_stopped() {
                let (x, y) = response
                    .interact_pointer_pos()
                    .map(to_local)
                    .unwrap_or(self.last_pointer);
                self.grid.pointer_up(x, y);
            }
            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let (x, y) = to_local(pos);
                    self.grid.pointer_down(x, y);
                    self.grid.pointer_up(x, y);
                }
            }
            if let Some(pos) = response.hover_pos() {
                let (x, y) = to_local(pos);
                self.grid.hover(x, y);
            }

            let attrs: Vec<RenderAttr> = self.grid.tick(dt).to_vec();
            if let Some(item) = self.grid.take_selected() {
                self.selected = Some(item);
            }

            // Paint back-to-front.
            let mut order: Vec<usize> = (0..attrs.len()).collect();
            order.sort_by_key(|&i| attrs[i].z_index);

            let painter = ui.painter_at(rect);
            painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0x10, 0x12, 0x18));

            let base = self.grid.config().base_image_scale;
            for i in order {
                let a = &attrs[i];
                if !a.visible {
                    continue;
                }
                let item = &self.grid.items()[i];
                let (sx, sy) = self.grid.to_screen(a);
                let center = egui::pos2(rect.min.x + sx, rect.min.y + sy);
                let radius = a.scale * base * 0.5;
                let alpha = (a.opacity * 255.0).round() as u8;

                let fill = PALETTE[item.id as usize % PALETTE.len()];
                let fill =
                    egui::Color32::from_rgba_unmultiplied(fill.r(), fill.g(), fill.b(), alpha);
                painter.circle_filled(center, radius, fill);

                if self.grid.hovered() == Some(item.id) {
                    painter.circle_stroke(
                        center,
                        radius + 2.0,
                        egui::Stroke::new(2.0, egui::Color32::WHITE),
                    );
                }

                let label = item
                    .title
                    .as_deref()
                    .map(initials)
                    .unwrap_or_else(|| "?".to_string());
                painter.text(
                    center,
                    egui::Align2::CENTER_CENTER,
                    label,
                    egui::FontId::proportional((radius * 0.7).max(8.0)),
                    egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha),
                );
            }
        });

        // The sphere animates continuously; keep frames coming.
        ctx.request_repaint();
    }
}
