// File: crates/responsive-chart/src/svg.rs
// Summary: Serialises the scene at its current clock into a standalone SVG document.
// Notes:
// - Opacity is clamped to [0, 1] here; the scene keeps the unclamped scale output.
// - The tooltip overlay becomes a translated <g> with a rect and one <text> line per row.

use std::fmt::Write as _;

use crate::color::Rgba;
use crate::scene::{Attr, AttrValue, NodeId, NodeKind, Scene};
use crate::theme::Theme;

const FONT_FAMILY: &str = "sans-serif";
const TOOLTIP_LINE_HEIGHT: f64 = 14.0;
const TOOLTIP_PADDING: f64 = 6.0;
// Rough glyph advance for sizing the tooltip box without font metrics.
const TOOLTIP_CHAR_WIDTH: f64 = 6.5;

/// Render `scene` as an SVG string sized to the scene's outer dimensions.
pub fn render_svg(scene: &Scene, theme: &Theme) -> String {
    let (w, h) = scene.size();
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="{FONT_FAMILY}">"#,
        num(w),
        num(h),
        num(w),
        num(h)
    );
    let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{}"/>"#, theme.background);
    let mut writer = SvgWriter { scene, theme, out, depth: 0 };
    for child in scene.children(scene.root()) {
        writer.node(*child);
    }
    let mut out = writer.out;
    out.push_str("</svg>\n");
    out
}

struct SvgWriter<'a> {
    scene: &'a Scene,
    theme: &'a Theme,
    out: String,
    depth: usize,
}

impl SvgWriter<'_> {
    fn node(&mut self, id: NodeId) {
        let Some(kind) = self.scene.kind(id) else { return };
        match kind {
            NodeKind::Group => self.group(id),
            NodeKind::Circle => self.circle(id),
            NodeKind::Rect => self.rect(id),
            NodeKind::Line => self.line(id),
            NodeKind::Path => self.path(id),
            NodeKind::Text => self.text(id),
            NodeKind::Tooltip => self.tooltip(id),
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
    }

    fn n(&self, id: NodeId, attr: Attr) -> f64 {
        self.scene.number(id, attr).unwrap_or(0.0)
    }

    fn color(&self, id: NodeId, attr: Attr) -> Option<Rgba> {
        self.scene.attr(id, attr).and_then(|v| v.as_color())
    }

    fn text_of(&self, id: NodeId) -> String {
        self.scene.attr(id, Attr::Text).and_then(|v| v.as_text().map(str::to_string)).unwrap_or_default()
    }

    /// ` class=".." opacity=".."` shared by every element.
    fn common(&self, id: NodeId) -> String {
        let mut s = String::new();
        if let Some(class) = self.scene.class(id) {
            let _ = write!(s, r#" class="{}""#, escape(class));
        }
        if let Some(AttrValue::Number(o)) = self.scene.attr(id, Attr::Opacity) {
            let _ = write!(s, r#" opacity="{}""#, num(o.clamp(0.0, 1.0)));
        }
        s
    }

    fn group(&mut self, id: NodeId) {
        let (tx, ty) = (self.n(id, Attr::TranslateX), self.n(id, Attr::TranslateY));
        let common = self.common(id);
        self.indent();
        if tx != 0.0 || ty != 0.0 {
            let _ = writeln!(self.out, r#"<g{common} transform="translate({},{})">"#, num(tx), num(ty));
        } else {
            let _ = writeln!(self.out, "<g{common}>");
        }
        self.depth += 1;
        for child in self.scene.children(id).to_vec() {
            self.node(child);
        }
        self.depth -= 1;
        self.indent();
        self.out.push_str("</g>\n");
    }

    fn circle(&mut self, id: NodeId) {
        let fill = self.color(id, Attr::Fill).unwrap_or(self.theme.tick);
        let line = format!(
            r#"<circle{} cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            self.common(id),
            num(self.n(id, Attr::Cx)),
            num(self.n(id, Attr::Cy)),
            num(self.n(id, Attr::R).max(0.0)),
            fill
        );
        self.indent();
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn rect(&mut self, id: NodeId) {
        let fill = self.color(id, Attr::Fill).unwrap_or(self.theme.threshold_fill);
        let line = format!(
            r#"<rect{} x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.common(id),
            num(self.n(id, Attr::X)),
            num(self.n(id, Attr::Y)),
            num(self.n(id, Attr::Width).max(0.0)),
            num(self.n(id, Attr::Height).max(0.0)),
            fill
        );
        self.indent();
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn line(&mut self, id: NodeId) {
        let default = if self.scene.class(id) == Some("domain") { self.theme.axis_line } else { self.theme.tick };
        let stroke = self.color(id, Attr::Stroke).unwrap_or(default);
        let line = format!(
            r#"<line{} x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
            self.common(id),
            num(self.n(id, Attr::X1)),
            num(self.n(id, Attr::Y1)),
            num(self.n(id, Attr::X2)),
            num(self.n(id, Attr::Y2)),
            stroke
        );
        self.indent();
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn path(&mut self, id: NodeId) {
        let d = self.scene.attr(id, Attr::D).and_then(|v| v.as_text().map(str::to_string)).unwrap_or_default();
        let stroke = self.color(id, Attr::Stroke).unwrap_or(self.theme.line_stroke);
        let width = self.scene.number(id, Attr::StrokeWidth).unwrap_or(1.0);
        let line = format!(
            r#"<path{} d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            self.common(id),
            escape(&d),
            stroke,
            num(width)
        );
        self.indent();
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn text(&mut self, id: NodeId) {
        let fill = self.color(id, Attr::Fill).unwrap_or(self.theme.axis_label);
        let anchor = self
            .scene
            .attr(id, Attr::TextAnchor)
            .and_then(|v| v.as_text().map(str::to_string))
            .unwrap_or_else(|| "start".to_string());
        let size = self.scene.number(id, Attr::FontSize).unwrap_or(10.0);
        let rotate = self.n(id, Attr::Rotate);
        let transform = if rotate != 0.0 { format!(r#" transform="rotate({})""#, num(rotate)) } else { String::new() };
        let line = format!(
            r#"<text{} x="{}" y="{}" font-size="{}" text-anchor="{}" fill="{}"{transform}>{}</text>"#,
            self.common(id),
            num(self.n(id, Attr::X)),
            num(self.n(id, Attr::Y)),
            num(size),
            escape(&anchor),
            fill,
            escape(&self.text_of(id))
        );
        self.indent();
        self.out.push_str(&line);
        self.out.push('\n');
    }

    fn tooltip(&mut self, id: NodeId) {
        let opacity = self.scene.number(id, Attr::Opacity).unwrap_or(0.0).clamp(0.0, 1.0);
        if opacity <= 0.0 {
            return;
        }
        let text = self.text_of(id);
        let lines: Vec<&str> = text.lines().collect();
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
        let w = longest * TOOLTIP_CHAR_WIDTH + 2.0 * TOOLTIP_PADDING;
        let h = lines.len() as f64 * TOOLTIP_LINE_HEIGHT + 2.0 * TOOLTIP_PADDING;
        let ax = self.scene.number(id, Attr::AnchorX).unwrap_or(0.0);
        let ay = self.scene.number(id, Attr::AnchorY).unwrap_or(0.0);
        // Anchor shifts by a fraction of the box itself.
        let x = self.n(id, Attr::X) + ax * w;
        let y = self.n(id, Attr::Y) + ay * h;

        self.indent();
        let _ = writeln!(
            self.out,
            r#"<g{} transform="translate({},{})">"#,
            self.common(id),
            num(x),
            num(y)
        );
        self.depth += 1;
        self.indent();
        let _ = writeln!(
            self.out,
            r#"<rect width="{}" height="{}" rx="3" fill="{}"/>"#,
            num(w),
            num(h),
            self.theme.tooltip_background
        );
        for (i, l) in lines.iter().enumerate() {
            self.indent();
            let _ = writeln!(
                self.out,
                r#"<text x="{}" y="{}" font-size="11" fill="{}">{}</text>"#,
                num(TOOLTIP_PADDING),
                num(TOOLTIP_PADDING + (i as f64 + 1.0) * TOOLTIP_LINE_HEIGHT - 3.0),
                self.theme.tooltip_text,
                escape(l)
            );
        }
        self.depth -= 1;
        self.indent();
        self.out.push_str("</g>\n");
    }
}

fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

