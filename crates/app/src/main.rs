//! Lithview - grayscale threshold viewer
//!
//! eframe-based UI shell: open an image, scrub a brightness threshold with a
//! vertical slider, and view the black/white result. Binarization runs on a
//! background worker; the debounce scheduler keeps at most one job in flight
//! and makes sure the last value the user settles on is the one rendered.

mod recent_files;

use eframe::egui;
use lithview_core::{slider_to_threshold, SampleBuffer, CANVAS_HEIGHT, CANVAS_WIDTH};
use lithview_scheduler::{spawn_threshold_job, DebounceScheduler, JobOutcome};
use recent_files::RecentFiles;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Slider range in percent, mapped linearly onto the [0, 255] sample scale.
const SLIDER_RANGE: std::ops::RangeInclusive<u8> = 0..=100;
const SLIDER_DEFAULT: u8 = 50;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([840.0, 770.0])
            .with_title("Lithview"),
        ..Default::default()
    };

    eframe::run_native(
        "Lithview",
        options,
        Box::new(|cc| Ok(Box::new(ThresholdViewerApp::new(cc)))),
    )
}

/// Error dialog state
struct ErrorDialogState {
    title: String,
    message: String,
}

struct ThresholdViewerApp {
    // Image store: replaced wholesale on load, handed to workers as an
    // Arc snapshot so in-flight jobs keep reading the frame they started on.
    samples: Arc<SampleBuffer>,
    file_path: Option<PathBuf>,

    // Threshold state
    slider_value: u8,
    scheduler: DebounceScheduler,

    // Worker completion channel, drained once per frame
    outcome_tx: Sender<JobOutcome>,
    outcome_rx: Receiver<JobOutcome>,

    // Latest binarized frame as a GPU texture
    rendered: Option<egui::TextureHandle>,

    recent_files: RecentFiles,
    error_dialog: Option<ErrorDialogState>,
}

impl ThresholdViewerApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let mut recent_files = RecentFiles::new();
        if let Err(error) = recent_files.load() {
            log::warn!("could not load recent files: {error}");
        }

        let mut app = Self {
            samples: Arc::new(SampleBuffer::placeholder()),
            file_path: None,
            slider_value: SLIDER_DEFAULT,
            scheduler: DebounceScheduler::new(),
            outcome_tx,
            outcome_rx,
            rendered: None,
            recent_files,
            error_dialog: None,
        };

        // Render the empty canvas at the default threshold right away.
        app.apply_threshold(&cc.egui_ctx, slider_to_threshold(SLIDER_DEFAULT));
        app
    }

    fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.error_dialog = Some(ErrorDialogState {
            title: title.into(),
            message: message.into(),
        });
    }

    /// Open an image using the file picker
    fn open_file(&mut self, ctx: &egui::Context) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image Files", &["png", "jpg", "bmp"])
            .pick_file()
        {
            self.load_image(ctx, path);
        }
    }

    /// Load an image from path, replacing the sample buffer wholesale
    fn load_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        match SampleBuffer::load(&path) {
            Ok(buffer) => {
                self.samples = Arc::new(buffer);

                self.recent_files.add(&path);
                if let Err(error) = self.recent_files.save() {
                    log::warn!("could not save recent files: {error}");
                }
                self.file_path = Some(path);

                self.apply_threshold(ctx, slider_to_threshold(self.slider_value));
            }
            Err(error) => {
                log::error!("failed to open {}: {error}", path.display());
                self.show_error("Error", format!("Failed to open image: {error}"));
            }
        }
    }

    /// Route a threshold through the debounce scheduler
    fn apply_threshold(&mut self, ctx: &egui::Context, threshold: u8) {
        if let Some(threshold) = self.scheduler.request(threshold) {
            self.dispatch(ctx, threshold);
        }
    }

    /// Fire-and-forget a worker for `threshold` on a snapshot of the buffer
    fn dispatch(&mut self, ctx: &egui::Context, threshold: u8) {
        let mut next = Some(threshold);

        while let Some(threshold) = next.take() {
            let repaint_ctx = ctx.clone();
            let spawned = spawn_threshold_job(
                self.samples.clone(),
                threshold,
                self.outcome_tx.clone(),
                move || repaint_ctx.request_repaint(),
            );

            if let Err(error) = spawned {
                log::error!("failed to spawn threshold worker: {error}");
                self.show_error(
                    "Worker Error",
                    format!("Failed to start threshold computation: {error}"),
                );
                // The job never ran, so clear the in-flight marker ourselves
                // and pick up any pending value.
                next = self.scheduler.complete();
            }
        }
    }

    /// Apply worker results delivered since the last frame
    fn drain_outcomes(&mut self, ctx: &egui::Context) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            match outcome.result {
                Ok(frame) => {
                    let image = egui::ColorImage::from_gray(
                        [frame.width() as usize, frame.height() as usize],
                        frame.samples(),
                    );
                    self.rendered = Some(ctx.load_texture(
                        "binarized-frame",
                        image,
                        egui::TextureOptions::NEAREST,
                    ));
                }
                Err(error) => {
                    log::error!(
                        "threshold computation at {} failed: {error}",
                        outcome.threshold
                    );
                    self.show_error("Error", format!("Threshold computation failed: {error}"));
                }
            }

            // Success or failure, the job is over; chain any pending value.
            if let Some(threshold) = self.scheduler.complete() {
                self.dispatch(ctx, threshold);
            }
        }
    }
}

impl eframe::App for ThresholdViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_outcomes(ctx);
        self.draw_menu_bar(ctx);
        self.draw_viewer(ctx);
        self.draw_error_dialog(ctx);
    }
}

impl ThresholdViewerApp {
    fn draw_menu_bar(&mut self, ctx: &egui::Context) {
        let mut open_requested = false;
        let mut recent_clicked: Option<PathBuf> = None;

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open...").clicked() {
                        open_requested = true;
                        ui.close_menu();
                    }

                    ui.menu_button("Open Recent", |ui| {
                        if self.recent_files.files().is_empty() {
                            ui.weak("No recent files");
                        }

                        for path in self.recent_files.files() {
                            let label = path
                                .file_name()
                                .map(|name| name.to_string_lossy().into_owned())
                                .unwrap_or_else(|| path.display().to_string());

                            if ui.button(label).clicked() {
                                recent_clicked = Some(path.clone());
                                ui.close_menu();
                            }
                        }
                    });

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        if open_requested {
            self.open_file(ctx);
        }
        if let Some(path) = recent_clicked {
            self.load_image(ctx, path);
        }
    }

    fn draw_viewer(&mut self, ctx: &egui::Context) {
        let mut slider_changed = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                let canvas = egui::vec2(CANVAS_WIDTH as f32, CANVAS_HEIGHT as f32);
                let (rect, _) = ui.allocate_exact_size(canvas, egui::Sense::hover());

                match &self.rendered {
                    Some(texture) => {
                        ui.painter().image(
                            texture.id(),
                            rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    None => {
                        // First frame is still being computed.
                        ui.painter()
                            .rect_filled(rect, 0.0, ui.visuals().widgets.inactive.bg_fill);
                    }
                }

                ui.separator();

                ui.vertical(|ui| {
                    let slider = ui.add(
                        egui::Slider::new(&mut self.slider_value, SLIDER_RANGE)
                            .vertical()
                            .text("Threshold"),
                    );
                    slider_changed = slider.changed();

                    if let Some(path) = &self.file_path {
                        if let Some(name) = path.file_name() {
                            ui.add_space(8.0);
                            ui.weak(name.to_string_lossy().into_owned());
                        }
                    }
                });
            });
        });

        if slider_changed {
            self.apply_threshold(ctx, slider_to_threshold(self.slider_value));
        }
    }

    fn draw_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(error) = &self.error_dialog else {
            return;
        };

        let title = error.title.clone();
        let message = error.message.clone();

        let mut should_close = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&message);
                ui.add_space(12.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("OK").clicked() {
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.error_dialog = None;
        }
    }
}
