use eframe::egui;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::render::{self, RenderMode, SlideView};
use crate::theme::Theme;

const SCROLL_STEP: f32 = 120.0;
const TOAST_DURATION: f32 = 1.5;

/// Position within a deck. Every move is clamped to `[0, count - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    count: usize,
}

impl Navigator {
    pub fn new(count: usize, start: usize) -> Self {
        Self {
            current: start.min(count.saturating_sub(1)),
            count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns true if the position changed.
    pub fn forward(&mut self) -> bool {
        self.jump(self.current + 1)
    }

    pub fn backward(&mut self) -> bool {
        self.jump(self.current.saturating_sub(1))
    }

    pub fn first(&mut self) -> bool {
        self.jump(0)
    }

    pub fn last(&mut self) -> bool {
        self.jump(self.count.saturating_sub(1))
    }

    pub fn jump(&mut self, index: usize) -> bool {
        let target = index.min(self.count.saturating_sub(1));
        let moved = target != self.current;
        self.current = target;
        moved
    }

    /// `n / N` as shown in the corner of the slide.
    pub fn counter(&self) -> String {
        format!("{} / {}", self.current + 1, self.count)
    }
}

/// Overlay drawn on top of the slide. Only one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    Notes,
    Raw,
}

impl Overlay {
    /// Show `other`, or hide it if it is already showing.
    pub fn toggle(self, other: Overlay) -> Overlay {
        if self == other { Overlay::None } else { other }
    }
}

/// Settings for one presentation window.
#[derive(Debug, Clone)]
pub struct PresentOptions {
    pub title: String,
    pub windowed: bool,
    pub start: usize,
    pub theme: String,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < TOAST_DURATION {
            1.0 - (elapsed - fade_start) / (TOAST_DURATION - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= TOAST_DURATION
    }
}

struct PresentationApp {
    raw: Vec<String>,
    views: Vec<SlideView>,
    notes: Vec<Vec<String>>,
    nav: Navigator,
    theme: Theme,
    overlay: Overlay,
    toast: Option<Toast>,
    scroll_offsets: Vec<f32>,
    scroll_targets: Vec<f32>,
    /// Shared with the caller so the final position survives the window.
    position: Rc<Cell<usize>>,
}

impl PresentationApp {
    fn new(slides: Vec<String>, theme: Theme, start: usize, position: Rc<Cell<usize>>) -> Self {
        let views = slides
            .iter()
            .map(|s| render::render_slide(s, RenderMode::Presentation))
            .collect();
        let notes = slides.iter().map(|s| render::speaker_notes(s)).collect();
        let count = slides.len();
        let nav = Navigator::new(count, start);
        position.set(nav.current());
        Self {
            raw: slides,
            views,
            notes,
            nav,
            theme,
            overlay: Overlay::None,
            toast: None,
            scroll_offsets: vec![0.0; count],
            scroll_targets: vec![0.0; count],
            position,
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }

    fn handle_keys(&mut self, i: &egui::InputState, viewport_cmds: &mut Vec<egui::ViewportCommand>) {
        if i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::Q) {
            viewport_cmds.push(egui::ViewportCommand::Close);
            return;
        }
        if i.key_pressed(egui::Key::F) {
            viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                !i.viewport().fullscreen.unwrap_or(false),
            ));
            return;
        }
        if i.key_pressed(egui::Key::D) {
            self.toggle_theme();
            return;
        }

        if i.key_pressed(egui::Key::H) {
            self.overlay = self.overlay.toggle(Overlay::Help);
        }
        if i.key_pressed(egui::Key::S) {
            self.overlay = self.overlay.toggle(Overlay::Notes);
        }
        if i.key_pressed(egui::Key::R) {
            self.overlay = self.overlay.toggle(Overlay::Raw);
        }

        if i.key_pressed(egui::Key::ArrowRight)
            || i.key_pressed(egui::Key::N)
            || i.key_pressed(egui::Key::Space)
        {
            self.nav.forward();
        }
        if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::P) {
            self.nav.backward();
        }
        if i.key_pressed(egui::Key::Home) {
            self.nav.first();
        }
        if i.key_pressed(egui::Key::End) {
            self.nav.last();
        }

        let idx = self.nav.current();
        if i.key_pressed(egui::Key::ArrowUp) {
            self.scroll_targets[idx] = (self.scroll_targets[idx] - SCROLL_STEP).max(0.0);
        }
        if i.key_pressed(egui::Key::ArrowDown) {
            // Max is clamped at render time when the content height is known
            self.scroll_targets[idx] += SCROLL_STEP;
        }
        let scroll = i.smooth_scroll_delta;
        if scroll.y != 0.0 {
            self.scroll_targets[idx] -= scroll.y;
        }
    }

    fn draw_slide(
        &mut self,
        ui: &mut egui::Ui,
        ctx: &egui::Context,
        rect: egui::Rect,
        scale: f32,
    ) {
        let idx = self.nav.current();
        let margin_x = 140.0 * scale;
        let margin_y = 110.0 * scale;
        let content_width = rect.width() - margin_x * 2.0;
        let available = rect.height() - margin_y * 2.0;

        let view = &self.views[idx];
        let content_height =
            render::text::measure_slide_view(ui, view, &self.theme, content_width, scale);
        let overflow = content_height - available;

        let offset = if overflow <= 0.0 {
            self.scroll_offsets[idx] = 0.0;
            self.scroll_targets[idx] = 0.0;
            0.0
        } else {
            self.scroll_targets[idx] = self.scroll_targets[idx].clamp(0.0, overflow);
            let target = self.scroll_targets[idx];
            let current = self.scroll_offsets[idx];
            let diff = target - current;
            if diff.abs() < 0.5 {
                self.scroll_offsets[idx] = target;
            } else {
                self.scroll_offsets[idx] = current + diff * 0.15;
                ctx.request_repaint();
            }
            self.scroll_offsets[idx]
        };

        // Short slides sit in the vertical middle, long ones start at the top
        let top = if overflow <= 0.0 {
            rect.top() + margin_y + (available - content_height) / 2.0
        } else {
            rect.top() + margin_y - offset
        };

        let clip = ui.new_child(egui::UiBuilder::new().max_rect(rect).id_salt("slide_clip"));
        render::text::draw_slide_view(
            &clip,
            view,
            &self.theme,
            egui::pos2(rect.left() + margin_x, top),
            content_width,
            1.0,
            scale,
        );

        if overflow > 0.0 {
            let indicator_color = Theme::with_opacity(self.theme.foreground, 0.35);
            let font = egui::FontId::proportional(self.theme.body_size * 0.4 * scale);
            if offset < overflow - 0.5 {
                let galley =
                    ui.painter()
                        .layout_no_wrap("\u{25BC}".to_string(), font.clone(), indicator_color);
                let pos = egui::pos2(
                    rect.center().x - galley.rect.width() / 2.0,
                    rect.bottom() - 40.0 * scale,
                );
                ui.painter().galley(pos, galley, indicator_color);
            }
            if offset > 0.5 {
                let galley =
                    ui.painter()
                        .layout_no_wrap("\u{25B2}".to_string(), font, indicator_color);
                let pos = egui::pos2(
                    rect.center().x - galley.rect.width() / 2.0,
                    rect.top() + 10.0 * scale,
                );
                ui.painter().galley(pos, galley, indicator_color);
            }
        }
    }

    fn draw_chrome(&self, ui: &egui::Ui, rect: egui::Rect, scale: f32) {
        let counter_color = Theme::with_opacity(self.theme.foreground, 0.3);
        let galley = ui.painter().layout_no_wrap(
            self.nav.counter(),
            egui::FontId::monospace(14.0 * scale.max(0.6)),
            counter_color,
        );
        let pos = egui::pos2(
            rect.right() - galley.rect.width() - 16.0 * scale,
            rect.bottom() - 30.0 * scale,
        );
        ui.painter().galley(pos, galley, counter_color);
    }

    fn draw_toast(&self, ui: &egui::Ui, ctx: &egui::Context, rect: egui::Rect, scale: f32) {
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let color = Theme::with_opacity(self.theme.panel_foreground, opacity * 0.9);
        let bg = Theme::with_opacity(self.theme.panel_background, opacity * 0.9);
        let galley = ui.painter().layout_no_wrap(
            toast.message.clone(),
            egui::FontId::proportional(20.0 * scale),
            color,
        );
        let padding = 16.0 * scale;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - 80.0 * scale,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        ui.painter().rect_filled(toast_rect, 8.0 * scale, bg);
        ui.painter().galley(
            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
            galley,
            color,
        );
        ctx.request_repaint();
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Viewport commands must be sent outside the input closure
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        ctx.input(|i| self.handle_keys(i, &mut viewport_cmds));
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        self.position.set(self.nav.current());

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = Self::compute_scale(rect);

                self.draw_slide(ui, ctx, rect, scale);
                self.draw_chrome(ui, rect, scale);
                self.draw_toast(ui, ctx, rect, scale);

                let idx = self.nav.current();
                match self.overlay {
                    Overlay::None => {}
                    Overlay::Help => draw_help(ui, &self.theme, rect, scale),
                    Overlay::Notes => {
                        let body = if self.notes[idx].is_empty() {
                            "No speaker notes on this slide.".to_string()
                        } else {
                            self.notes[idx].join("\n\n")
                        };
                        draw_text_overlay(
                            ui,
                            "Speaker Notes",
                            "Press S to close",
                            &body,
                            false,
                            &self.theme,
                            rect,
                            scale,
                        );
                    }
                    Overlay::Raw => {
                        draw_text_overlay(
                            ui,
                            "Raw Markdown",
                            "Press R to close",
                            &self.raw[idx],
                            true,
                            &self.theme,
                            rect,
                            scale,
                        );
                    }
                }
            });
    }
}

fn draw_help(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    let shortcuts = [
        ("Space / N / \u{2192}", "Next slide"),
        ("P / \u{2190}", "Previous slide"),
        ("Home / End", "First / last slide"),
        ("\u{2191} / \u{2193} / Wheel", "Scroll slide content"),
        ("S", "Speaker notes"),
        ("R", "Raw markdown"),
        ("D", "Toggle theme"),
        ("F", "Toggle fullscreen"),
        ("H", "Toggle this help"),
        ("Esc / Q", "Back to review"),
    ];

    let bg = Theme::with_opacity(theme.panel_background, 0.9);
    let text_color = Theme::with_opacity(theme.panel_foreground, 0.9);
    let key_color = Theme::with_opacity(theme.accent, 0.9);

    let padding = 24.0 * scale;
    let line_height = 32.0 * scale;
    let height = shortcuts.len() as f32 * line_height + padding * 2.0 + 40.0 * scale;
    let width = 380.0 * scale;
    let help_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(width, height));
    ui.painter().rect_filled(help_rect, 12.0 * scale, bg);

    let title = ui.painter().layout_no_wrap(
        "Keyboard Shortcuts".to_string(),
        egui::FontId::proportional(20.0 * scale),
        Theme::with_opacity(theme.heading_color, 0.9),
    );
    ui.painter().galley(
        egui::pos2(help_rect.left() + padding, help_rect.top() + padding),
        title,
        text_color,
    );

    let mut y = help_rect.top() + padding + 40.0 * scale;
    for (key, desc) in &shortcuts {
        let key_galley = ui.painter().layout_no_wrap(
            key.to_string(),
            egui::FontId::monospace(15.0 * scale),
            key_color,
        );
        ui.painter()
            .galley(egui::pos2(help_rect.left() + padding, y), key_galley, key_color);

        let desc_galley = ui.painter().layout_no_wrap(
            desc.to_string(),
            egui::FontId::proportional(15.0 * scale),
            text_color,
        );
        ui.painter().galley(
            egui::pos2(help_rect.left() + padding + 170.0 * scale, y),
            desc_galley,
            text_color,
        );
        y += line_height;
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text_overlay(
    ui: &egui::Ui,
    title: &str,
    hint: &str,
    body: &str,
    monospace: bool,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let bg = Theme::with_opacity(theme.panel_background, 0.92);
    let text_color = Theme::with_opacity(theme.panel_foreground, 0.95);
    let title_color = Theme::with_opacity(theme.heading_color, 0.9);

    let padding = 32.0 * scale;
    let overlay_rect = rect.shrink(48.0 * scale);
    ui.painter().rect_filled(overlay_rect, 12.0 * scale, bg);

    let title_galley = ui.painter().layout_no_wrap(
        title.to_string(),
        egui::FontId::proportional(20.0 * scale),
        title_color,
    );
    ui.painter().galley(
        egui::pos2(overlay_rect.left() + padding, overlay_rect.top() + padding),
        title_galley,
        title_color,
    );

    let hint_color = Theme::with_opacity(theme.foreground, 0.5);
    let hint_galley = ui.painter().layout_no_wrap(
        hint.to_string(),
        egui::FontId::proportional(14.0 * scale),
        hint_color,
    );
    let hint_pos = egui::pos2(
        overlay_rect.right() - padding - hint_galley.rect.width(),
        overlay_rect.top() + padding + 3.0 * scale,
    );
    ui.painter().galley(hint_pos, hint_galley, hint_color);

    let font = if monospace {
        egui::FontId::monospace(14.0 * scale)
    } else {
        egui::FontId::proportional(22.0 * scale)
    };
    let galley = ui.painter().layout(
        body.to_string(),
        font,
        text_color,
        overlay_rect.width() - padding * 2.0,
    );
    ui.painter().galley(
        egui::pos2(overlay_rect.left() + padding, overlay_rect.top() + padding + 36.0 * scale),
        galley,
        text_color,
    );
}

/// Open the presentation window and block until it is closed.
///
/// Returns the index of the slide that was showing when the window closed.
pub fn run(slides: &[String], options: PresentOptions) -> anyhow::Result<usize> {
    if slides.is_empty() {
        anyhow::bail!("There are no slides to present");
    }

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&options.title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&options.title)
    };
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    tracing::info!(slides = slides.len(), windowed = options.windowed, "opening presentation");
    let position = Rc::new(Cell::new(options.start));
    let shared = Rc::clone(&position);
    let slides = slides.to_vec();
    let theme = Theme::from_name(&options.theme);
    let start = options.start;

    eframe::run_native(
        &options.title,
        native,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(slides, theme, start, shared)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(position.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigator_clamps() {
        let mut nav = Navigator::new(3, 0);
        assert!(!nav.backward());
        assert_eq!(nav.current(), 0);
        assert!(nav.forward());
        assert!(nav.forward());
        assert!(!nav.forward());
        assert_eq!(nav.current(), 2);
        assert_eq!(nav.counter(), "3 / 3");
        assert!(nav.first());
        assert_eq!(nav.counter(), "1 / 3");
        assert!(nav.last());
        assert!(!nav.jump(10));
        assert_eq!(nav.current(), 2);
    }

    #[test]
    fn test_navigator_start_is_clamped() {
        assert_eq!(Navigator::new(4, 9).current(), 3);
        assert_eq!(Navigator::new(1, 0).counter(), "1 / 1");
    }

    #[test]
    fn test_overlay_toggle() {
        let overlay = Overlay::None.toggle(Overlay::Notes);
        assert_eq!(overlay, Overlay::Notes);
        assert_eq!(overlay.toggle(Overlay::Raw), Overlay::Raw);
        assert_eq!(Overlay::Help.toggle(Overlay::Help), Overlay::None);
    }

    #[test]
    fn test_app_keeps_notes_off_the_slide() {
        let slides = vec!["# A\n- point\n> psst\n".to_string(), "# B\n".to_string()];
        let position = Rc::new(Cell::new(0));
        let app = PresentationApp::new(slides, Theme::light(), 5, Rc::clone(&position));
        assert_eq!(position.get(), 1);
        assert!(app.views[0].notes().is_empty());
        assert_eq!(app.notes[0], vec!["psst"]);
        assert!(app.notes[1].is_empty());
    }

    #[test]
    fn test_run_rejects_empty_deck() {
        let options = PresentOptions {
            title: "t".into(),
            windowed: true,
            start: 0,
            theme: "light".into(),
        };
        assert!(run(&[], options).is_err());
    }
}
