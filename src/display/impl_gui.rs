use crate::config::Config;
use crate::display::interface::DisplaySurface;
use crate::error::Error;
use crate::interactive::InteractiveSession;
use eframe::egui;
use image::RgbImage;
use std::cell::RefCell;
use std::rc::Rc;

struct EguiSurface<'a> {
    ctx: &'a egui::Context,
    texture: &'a mut Option<egui::TextureHandle>,
    running: bool,
}

impl DisplaySurface for EguiSurface<'_> {
    fn running(&self) -> bool {
        self.running
    }

    fn present(&mut self, canvas: &RgbImage) -> Result<(), Error> {
        let size = [canvas.width() as usize, canvas.height() as usize];
        let image = egui::ColorImage::from_rgb(size, canvas.as_raw());

        match self.texture.as_mut() {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                *self.texture =
                    Some(self.ctx.load_texture("frame", image, egui::TextureOptions::LINEAR))
            }
        }
        Ok(())
    }
}

struct DisplayWindow {
    session: Option<InteractiveSession>,
    texture: Option<egui::TextureHandle>,
    outcome: Rc<RefCell<Result<(), Error>>>,
}

impl DisplayWindow {
    fn finish(&mut self, result: Result<(), Error>) {
        if let Some(mut session) = self.session.take() {
            let stopped = session.stop();
            *self.outcome.borrow_mut() = result.and(stopped);
        }
    }
}

impl eframe::App for DisplayWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let close_requested = ctx.input(|i| i.viewport().close_requested());

        if let Some(session) = self.session.as_mut() {
            let mut surface = EguiSurface {
                ctx,
                texture: &mut self.texture,
                running: !close_requested,
            };

            match session.step(&mut surface) {
                Ok(true) => ctx.request_repaint(),
                Ok(false) => self.finish(Ok(())),
                Err(err) => {
                    self.finish(Err(err));
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                if let Some(texture) = &self.texture {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    ui.painter()
                        .image(texture.id(), ui.max_rect(), uv, egui::Color32::WHITE);
                }
            });
    }
}

/// Native window driving an [`InteractiveSession`] one step per repaint.
pub struct DisplayGui {
    size: (u32, u32),
    title: String,
}

impl DisplayGui {
    pub fn new(config: &Config) -> Self {
        Self {
            size: config.window_size,
            title: config.window_title.clone(),
        }
    }

    /// Blocks until the window is closed or the session fails.
    pub fn run(self, mut session: InteractiveSession) -> Result<(), Error> {
        session.start()?;

        let outcome = Rc::new(RefCell::new(Ok(())));
        let window = DisplayWindow {
            session: Some(session),
            texture: None,
            outcome: outcome.clone(),
        };

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([self.size.0 as f32, self.size.1 as f32])
                .with_resizable(false)
                .with_title(&self.title),
            ..Default::default()
        };

        eframe::run_native(&self.title, options, Box::new(|_cc| Box::new(window)))
            .map_err(|e| Error::Display(e.to_string()))?;

        outcome.replace(Ok(()))
    }
}
