// ui.rs - egui front end for the torus
//
// Steps the grid on the configured cadence and paints the live-cell snapshot
// between steps.

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use crate::app::GameOfLife;
use conway::patterns;

const BOARD_PIXELS: f32 = 780.0;
const SPACING: f32 = 0.5;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Auto-update if running
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life (one task per cell)");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.is_running = !self.is_running;
                    if self.is_running {
                        self.cycle_detected = false;
                        self.last_update = Instant::now();
                    }
                }

                if ui.button("⏭ Step").clicked() {
                    self.is_running = false;
                    self.update_generation();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.is_running = false;
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.is_running = false;
                    self.apply_random_pattern();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.is_running = false;
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.grid.generation()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            if self.cycle_detected {
                ui.colored_label(Color32::YELLOW, "Board repeats a recent state, paused.");
            } else {
                ui.label("Click cells to toggle them alive/dead. Edges wrap around.");
            }

            ui.separator();

            let (rows, cols) = (self.grid.height(), self.grid.width());
            let longest = rows.max(cols) as f32;
            let box_size = (BOARD_PIXELS / longest - SPACING).clamp(1.0, 15.0);
            let pitch = box_size + SPACING;

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(pitch * cols as f32 - SPACING, pitch * rows as f32 - SPACING);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

            let (live_color, dead_color) = (self.live_color, self.dead_color);
            let border = box_size >= 4.0;
            self.grid.with_live_cells(|cells| {
                for row in 0..rows {
                    for col in 0..cols {
                        let x = start_pos.x + col as f32 * pitch;
                        let y = start_pos.y + row as f32 * pitch;
                        let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(box_size));

                        let cell_color = if cells.contains(conway::Coord::new(row, col)) {
                            live_color
                        } else {
                            dead_color
                        };
                        painter.rect_filled(rect, 1.0, cell_color);
                        if border {
                            painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                        }
                    }
                }
            });

            // Editing only while paused
            if !self.is_running && response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - start_pos;
                    let row = (offset.y / pitch).floor() as i32;
                    let col = (offset.x / pitch).floor() as i32;
                    self.toggle_cell(row, col);
                }
            }

            ui.separator();

            let live_cells = self.grid.population();
            let total = (rows as usize) * (cols as usize);
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
                if let Some(stats) = self.grid.last_step() {
                    ui.separator();
                    ui.label(format!(
                        "Last step: {} births, {} cells evaluated",
                        stats.births,
                        stats.evaluated_live + stats.evaluated_dead
                    ));
                }
            });
        });

        // Keep the animation going while running
        if self.is_running {
            ctx.request_repaint();
        }
    }
}
