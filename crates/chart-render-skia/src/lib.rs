// File: crates/chart-render-skia/src/lib.rs
// Summary: Headless PNG rendering of a chart scene using Skia CPU raster surfaces.
// Notes:
// - The scene is painted at its current clock; call `Scene::settle` first for final frames.
// - Output is scaled from the scene's outer size to the requested pixel size.

use anyhow::{anyhow, Result};
use responsive_chart::line::{LinePath, PathCmd};
use responsive_chart::scene::{Attr, NodeId, NodeKind, Scene};
use responsive_chart::{Rgba, Theme};
use skia_safe as skia;

pub mod text;

pub use text::{TextAnchor, TextShaper};

/// Raster options.
#[derive(Clone, Copy, Debug)]
pub struct PngOptions {
    pub width: i32,
    pub height: i32,
    /// Skip text; glyph rasterisation differs across platforms.
    pub draw_labels: bool,
}

impl PngOptions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, draw_labels: true }
    }
}

/// Render `scene` to PNG bytes of `width` x `height` pixels.
pub fn render_png(scene: &Scene, theme: &Theme, width: i32, height: i32) -> Result<Vec<u8>> {
    render_png_with(scene, theme, &PngOptions::new(width, height))
}

pub fn render_png_with(scene: &Scene, theme: &Theme, opts: &PngOptions) -> Result<Vec<u8>> {
    if opts.width <= 0 || opts.height <= 0 {
        return Err(anyhow!("invalid raster size {}x{}", opts.width, opts.height));
    }
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(color(theme.background, 1.0));

    let (sw, sh) = scene.size();
    if sw > 0.0 && sh > 0.0 {
        canvas.scale((opts.width as f32 / sw as f32, opts.height as f32 / sh as f32));
    }

    let painter = Painter {
        scene,
        theme,
        text: opts.draw_labels.then(TextShaper::new),
    };
    for child in scene.children(scene.root()) {
        painter.node(canvas, *child);
    }

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow!("encode PNG failed"))?;
    tracing::debug!(width = opts.width, height = opts.height, bytes = data.as_bytes().len(), "scene rasterised");
    Ok(data.as_bytes().to_vec())
}

fn color(c: Rgba, opacity: f64) -> skia::Color {
    let a = (c.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(a, c.r, c.g, c.b)
}

struct Painter<'a> {
    scene: &'a Scene,
    theme: &'a Theme,
    text: Option<TextShaper>,
}

impl Painter<'_> {
    fn n(&self, id: NodeId, attr: Attr) -> f32 {
        self.scene.number(id, attr).unwrap_or(0.0) as f32
    }

    fn rgba(&self, id: NodeId, attr: Attr) -> Option<Rgba> {
        self.scene.attr(id, attr).and_then(|v| v.as_color())
    }

    fn text_attr(&self, id: NodeId, attr: Attr) -> Option<String> {
        self.scene.attr(id, attr).and_then(|v| v.as_text().map(str::to_string))
    }

    fn opacity(&self, id: NodeId) -> f64 {
        self.scene.number(id, Attr::Opacity).unwrap_or(1.0).clamp(0.0, 1.0)
    }

    fn fill(c: skia::Color) -> skia::Paint {
        let mut p = skia::Paint::default();
        p.set_anti_alias(true);
        p.set_style(skia::paint::Style::Fill);
        p.set_color(c);
        p
    }

    fn stroke(c: skia::Color, width: f32) -> skia::Paint {
        let mut p = skia::Paint::default();
        p.set_anti_alias(true);
        p.set_style(skia::paint::Style::Stroke);
        p.set_stroke_width(width);
        p.set_color(c);
        p
    }

    fn node(&self, canvas: &skia::Canvas, id: NodeId) {
        let Some(kind) = self.scene.kind(id) else { return };
        match kind {
            NodeKind::Group => {
                match self.scene.number(id, Attr::Opacity) {
                    Some(o) if o < 1.0 => {
                        let mut layer = skia::Paint::default();
                        layer.set_alpha_f(o.clamp(0.0, 1.0) as f32);
                        canvas.save_layer(&skia::canvas::SaveLayerRec::default().paint(&layer));
                    }
                    _ => {
                        canvas.save();
                    }
                }
                canvas.translate((self.n(id, Attr::TranslateX), self.n(id, Attr::TranslateY)));
                for child in self.scene.children(id) {
                    self.node(canvas, *child);
                }
                canvas.restore();
            }
            NodeKind::Circle => {
                let r = self.n(id, Attr::R);
                if r <= 0.0 {
                    return;
                }
                let c = self.rgba(id, Attr::Fill).unwrap_or(self.theme.tick);
                canvas.draw_circle(
                    (self.n(id, Attr::Cx), self.n(id, Attr::Cy)),
                    r,
                    &Self::fill(color(c, self.opacity(id))),
                );
            }
            NodeKind::Rect => {
                let c = self.rgba(id, Attr::Fill).unwrap_or(self.theme.threshold_fill);
                let rect = skia::Rect::from_xywh(
                    self.n(id, Attr::X),
                    self.n(id, Attr::Y),
                    self.n(id, Attr::Width).max(0.0),
                    self.n(id, Attr::Height).max(0.0),
                );
                canvas.draw_rect(rect, &Self::fill(color(c, self.opacity(id))));
            }
            NodeKind::Line => {
                let default = if self.scene.class(id) == Some("domain") { self.theme.axis_line } else { self.theme.tick };
                let c = self.rgba(id, Attr::Stroke).unwrap_or(default);
                canvas.draw_line(
                    (self.n(id, Attr::X1), self.n(id, Attr::Y1)),
                    (self.n(id, Attr::X2), self.n(id, Attr::Y2)),
                    &Self::stroke(color(c, self.opacity(id)), 1.0),
                );
            }
            NodeKind::Path => self.path(canvas, id),
            NodeKind::Text => self.label(canvas, id),
            NodeKind::Tooltip => self.tooltip(canvas, id),
        }
    }

    fn path(&self, canvas: &skia::Canvas, id: NodeId) {
        let Some(d) = self.text_attr(id, Attr::D) else { return };
        let Some(line) = LinePath::parse_svg(&d) else {
            tracing::warn!(d = %d, "unsupported path data; skipped");
            return;
        };
        let mut path = skia::Path::new();
        for cmd in line.commands() {
            match *cmd {
                PathCmd::MoveTo(p) => { path.move_to((p.x as f32, p.y as f32)); }
                PathCmd::LineTo(p) => { path.line_to((p.x as f32, p.y as f32)); }
            }
        }
        let c = self.rgba(id, Attr::Stroke).unwrap_or(self.theme.line_stroke);
        let width = self.scene.number(id, Attr::StrokeWidth).unwrap_or(1.0) as f32;
        canvas.draw_path(&path, &Self::stroke(color(c, self.opacity(id)), width));
    }

    fn label(&self, canvas: &skia::Canvas, id: NodeId) {
        let Some(shaper) = &self.text else { return };
        let Some(text) = self.text_attr(id, Attr::Text) else { return };
        let anchor = self.text_attr(id, Attr::TextAnchor).map(|a| TextAnchor::parse(&a)).unwrap_or(TextAnchor::Start);
        let size = self.scene.number(id, Attr::FontSize).unwrap_or(10.0) as f32;
        let c = color(self.rgba(id, Attr::Fill).unwrap_or(self.theme.axis_label), self.opacity(id));
        let rotate = self.n(id, Attr::Rotate);

        canvas.save();
        if rotate != 0.0 {
            canvas.rotate(rotate, None);
        }
        shaper.draw(canvas, &text, self.n(id, Attr::X), self.n(id, Attr::Y), size, c, anchor);
        canvas.restore();
    }

    fn tooltip(&self, canvas: &skia::Canvas, id: NodeId) {
        if self.opacity(id) <= 0.0 {
            return;
        }
        let text = self.text_attr(id, Attr::Text).unwrap_or_default();
        let lines: Vec<&str> = text.lines().collect();
        const SIZE: f32 = 11.0;
        const LINE: f32 = 14.0;
        const PAD: f32 = 6.0;
        let longest = match &self.text {
            Some(shaper) => lines.iter().map(|l| shaper.measure_width(l, SIZE)).fold(0.0, f32::max),
            None => lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f32 * 6.5,
        };
        let (w, h) = (longest + 2.0 * PAD, lines.len() as f32 * LINE + 2.0 * PAD);
        let x = self.n(id, Attr::X) + self.n(id, Attr::AnchorX) * w;
        let y = self.n(id, Attr::Y) + self.n(id, Attr::AnchorY) * h;

        let rect = skia::Rect::from_xywh(x, y, w, h);
        canvas.draw_round_rect(rect, 3.0, 3.0, &Self::fill(color(self.theme.tooltip_background, 1.0)));
        if let Some(shaper) = &self.text {
            for (i, l) in lines.iter().enumerate() {
                let baseline = y + PAD + (i as f32 + 1.0) * LINE - 3.0;
                shaper.draw(canvas, l, x + PAD, baseline, SIZE, color(self.theme.tooltip_text, 1.0), TextAnchor::Start);
            }
        }
    }
}
