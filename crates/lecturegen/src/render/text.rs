use crate::parser::inline::Inline;
use crate::render::{SlideBlock, SlideView};
use crate::theme::Theme;
use eframe::egui::{self, Color32, FontFamily, FontId, Pos2, Stroke};

/// Create a LayoutJob from inline elements. Bold spans use `emphasis`.
pub fn inlines_to_job(
    inlines: &[Inline],
    font_size: f32,
    color: Color32,
    emphasis: Color32,
    max_width: f32,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    for inline in inlines {
        let (text, format) = match inline {
            Inline::Text(s) => (s, text_format(font_size, color, false)),
            Inline::Bold(s) => (s, text_format(font_size + 1.0, emphasis, false)),
            Inline::Italic(s) => (s, text_format(font_size, color, true)),
        };
        job.append(text, 0.0, format);
    }
    job
}

fn text_format(size: f32, color: Color32, italics: bool) -> egui::text::TextFormat {
    egui::text::TextFormat {
        font_id: FontId::new(size, FontFamily::Proportional),
        color,
        italics,
        ..Default::default()
    }
}

/// Lays out a slide top to bottom. With `paint` unset nothing is drawn and
/// only the height is computed.
struct SlidePainter<'a> {
    ui: &'a egui::Ui,
    theme: &'a Theme,
    opacity: f32,
    scale: f32,
    max_width: f32,
    paint: bool,
}

impl SlidePainter<'_> {
    fn inlines(&self, inlines: &[Inline], pos: Pos2, size: f32, color: Color32, width: f32) -> f32 {
        let emphasis = Theme::with_opacity(self.theme.heading_color, self.opacity);
        let job = inlines_to_job(inlines, size, color, emphasis, width);
        let galley = self.ui.painter().layout_job(job);
        let height = galley.rect.height();
        if self.paint {
            self.ui.painter().galley(pos, galley, color);
        }
        height
    }

    /// Section labels are drawn as a pill badge.
    fn label(&self, inlines: &[Inline], pos: Pos2) -> f32 {
        let size = self.theme.label_size * self.scale;
        let padding = egui::vec2(18.0, 8.0) * self.scale;
        let text_color = Theme::with_opacity(self.theme.background, self.opacity);
        let job = inlines_to_job(inlines, size, text_color, text_color, self.max_width);
        let galley = self.ui.painter().layout_job(job);
        let pill = egui::Rect::from_min_size(pos, galley.rect.size() + padding * 2.0);
        if self.paint {
            let fill = Theme::with_opacity(self.theme.accent, self.opacity);
            self.ui
                .painter()
                .rect_filled(pill, pill.height() / 2.0, fill);
            self.ui.painter().galley(pos + padding, galley, text_color);
        }
        pill.height()
    }

    fn bullets(&self, items: &[Vec<Inline>], pos: Pos2) -> f32 {
        let font_size = self.theme.body_size * self.scale;
        let color = Theme::with_opacity(self.theme.foreground, self.opacity);
        let accent = Theme::with_opacity(self.theme.accent, self.opacity);
        let divider = Theme::with_opacity(self.theme.foreground, self.opacity * 0.15);
        let marker_width = 40.0 * self.scale;
        let item_spacing = 14.0 * self.scale;
        let mut y = 0.0;

        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                let line_y = pos.y + y - item_spacing / 2.0;
                if self.paint {
                    self.ui.painter().line_segment(
                        [
                            Pos2::new(pos.x + marker_width, line_y),
                            Pos2::new(pos.x + self.max_width, line_y),
                        ],
                        Stroke::new(1.0 * self.scale, divider),
                    );
                }
            }
            if self.paint {
                let dot = Pos2::new(pos.x + 10.0 * self.scale, pos.y + y + font_size * 0.6);
                self.ui.painter().circle_filled(dot, 6.0 * self.scale, accent);
            }
            let text_pos = Pos2::new(pos.x + marker_width, pos.y + y);
            let height = self.inlines(
                item,
                text_pos,
                font_size,
                color,
                self.max_width - marker_width,
            );
            y += height + item_spacing;
        }
        y - item_spacing
    }

    fn note(&self, inlines: &[Inline], pos: Pos2) -> f32 {
        let bar_width = 4.0 * self.scale;
        let bar_padding = 16.0 * self.scale;
        let color = Theme::with_opacity(self.theme.foreground, self.opacity * 0.8);
        let text_pos = Pos2::new(pos.x + bar_width + bar_padding, pos.y);
        let height = self.inlines(
            inlines,
            text_pos,
            self.theme.body_size * 0.8 * self.scale,
            color,
            self.max_width - bar_width - bar_padding,
        );
        if self.paint {
            let bar = egui::Rect::from_min_size(pos, egui::vec2(bar_width, height));
            let accent = Theme::with_opacity(self.theme.accent, self.opacity);
            self.ui.painter().rect_filled(bar, 2.0, accent);
        }
        height
    }

    fn block(&self, block: &SlideBlock, pos: Pos2) -> f32 {
        let heading = Theme::with_opacity(self.theme.heading_color, self.opacity);
        let body = Theme::with_opacity(self.theme.foreground, self.opacity);
        match block {
            SlideBlock::Title(inlines) => self.inlines(
                inlines,
                pos,
                self.theme.h1_size * self.scale,
                heading,
                self.max_width,
            ),
            SlideBlock::SectionLabel(inlines) => self.label(inlines, pos),
            SlideBlock::Subtitle(inlines) => self.inlines(
                inlines,
                pos,
                self.theme.h3_size * self.scale,
                heading,
                self.max_width,
            ),
            SlideBlock::SpeakerNote(inlines) => self.note(inlines, pos),
            SlideBlock::Bullets(items) => self.bullets(items, pos),
            SlideBlock::Paragraph(inlines) => self.inlines(
                inlines,
                pos,
                self.theme.body_size * self.scale,
                body,
                self.max_width,
            ),
            SlideBlock::Gap => self.theme.body_size * 0.5 * self.scale,
        }
    }

    fn layout(&self, view: &SlideView, pos: Pos2) -> f32 {
        let block_spacing = 20.0 * self.scale;
        let mut y = 0.0;
        for (i, block) in view.blocks.iter().enumerate() {
            y += self.block(block, Pos2::new(pos.x, pos.y + y));
            if i + 1 < view.blocks.len() {
                y += block_spacing;
            }
        }
        y
    }
}

/// Draw a rendered slide starting at `pos`. Returns the height used.
pub fn draw_slide_view(
    ui: &egui::Ui,
    view: &SlideView,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    opacity: f32,
    scale: f32,
) -> f32 {
    SlidePainter {
        ui,
        theme,
        opacity,
        scale,
        max_width,
        paint: true,
    }
    .layout(view, pos)
}

/// Height a slide would take, without drawing it.
pub fn measure_slide_view(
    ui: &egui::Ui,
    view: &SlideView,
    theme: &Theme,
    max_width: f32,
    scale: f32,
) -> f32 {
    SlidePainter {
        ui,
        theme,
        opacity: 1.0,
        scale,
        max_width,
        paint: false,
    }
    .layout(view, Pos2::ZERO)
}
