// File: crates/responsive-chart/src/scene.rs
// Summary: Retained scene graph used as the render surface; nodes, typed attributes and timed transitions.
// Notes:
// - Time is explicit: the host advances the scene clock with `advance`, nothing runs on a timer.
// - Re-targeting an attribute mid-flight restarts from its current interpolated value.
// - Operations on unknown (removed) nodes are no-ops.

use std::collections::{BTreeMap, HashMap};

use crate::color::Rgba;
use crate::geometry::{clamp, lerp, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Group,
    Circle,
    Rect,
    Line,
    Path,
    Text,
    /// HTML-like overlay box positioned in outer chart coordinates.
    Tooltip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attr {
    Cx,
    Cy,
    R,
    X,
    Y,
    Width,
    Height,
    X1,
    Y1,
    X2,
    Y2,
    Fill,
    Stroke,
    StrokeWidth,
    Opacity,
    FontSize,
    /// Degrees, applied around the node origin.
    Rotate,
    TranslateX,
    TranslateY,
    /// Fraction of the node's own size to shift by (tooltip anchoring).
    AnchorX,
    AnchorY,
    Text,
    /// `start`, `middle` or `end`.
    TextAnchor,
    /// Path data in SVG syntax.
    D,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Color(Rgba),
    Text(String),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self { AttrValue::Number(v) => Some(*v), _ => None }
    }
    pub fn as_color(&self) -> Option<Rgba> {
        match self { AttrValue::Color(c) => Some(*c), _ => None }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self { AttrValue::Text(s) => Some(s), _ => None }
    }

    /// Numbers and colours interpolate; text and mismatched kinds snap to `to`.
    fn interpolate(from: &AttrValue, to: &AttrValue, t: f64) -> AttrValue {
        match (from, to) {
            (AttrValue::Number(a), AttrValue::Number(b)) => AttrValue::Number(lerp(*a, *b, t)),
            (AttrValue::Color(a), AttrValue::Color(b)) => AttrValue::Color(a.mix(*b, t)),
            _ => to.clone(),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self { AttrValue::Number(v) }
}
impl From<Rgba> for AttrValue {
    fn from(c: Rgba) -> Self { AttrValue::Color(c) }
}
impl From<String> for AttrValue {
    fn from(s: String) -> Self { AttrValue::Text(s) }
}
impl From<&str> for AttrValue {
    fn from(s: &str) -> Self { AttrValue::Text(s.to_string()) }
}

/// Declarative timing for one attribute change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub delay_ms: f64,
    pub duration_ms: f64,
}

impl Transition {
    pub const fn new(delay_ms: f64, duration_ms: f64) -> Self {
        Self { delay_ms, duration_ms }
    }
    pub const fn immediate() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Cubic in-out easing.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = clamp(t, 0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let u = t - 2.0;
        (u * u * u + 2.0) / 2.0
    }
}

#[derive(Clone, Debug)]
struct Tween {
    from: AttrValue,
    to: AttrValue,
    start_ms: f64,
    duration_ms: f64,
}

impl Tween {
    fn value_at(&self, now: f64) -> AttrValue {
        if now <= self.start_ms {
            return self.from.clone();
        }
        if self.duration_ms <= 0.0 || now >= self.start_ms + self.duration_ms {
            return self.to.clone();
        }
        let t = ease_cubic_in_out((now - self.start_ms) / self.duration_ms);
        AttrValue::interpolate(&self.from, &self.to, t)
    }

    fn end_ms(&self) -> f64 {
        self.start_ms + self.duration_ms.max(0.0)
    }
}

#[derive(Clone, Debug)]
struct AttrState {
    value: AttrValue,
    tween: Option<Tween>,
}

impl AttrState {
    fn current(&self, now: f64) -> AttrValue {
        match &self.tween {
            Some(tw) => tw.value_at(now),
            None => self.value.clone(),
        }
    }
    fn target(&self) -> &AttrValue {
        match &self.tween {
            Some(tw) => &tw.to,
            None => &self.value,
        }
    }
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    class: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attrs: BTreeMap<Attr, AttrState>,
    remove_at: Option<f64>,
}

/// Retained node tree with a single root group.
#[derive(Clone, Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
    now_ms: f64,
    width: f64,
    height: f64,
}

impl Scene {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node {
            kind: NodeKind::Group,
            class: None,
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            remove_at: None,
        });
        Self { nodes, root, next_id: 1, now_ms: 0.0, width: 0.0, height: 0.0 }
    }

    pub fn root(&self) -> NodeId { self.root }
    pub fn now_ms(&self) -> f64 { self.now_ms }
    pub fn len(&self) -> usize { self.nodes.len() }
    pub fn is_empty(&self) -> bool { self.nodes.len() <= 1 }
    pub fn contains(&self, id: NodeId) -> bool { self.nodes.contains_key(&id) }

    /// Outer surface size (the `<svg>` width/height).
    pub fn size(&self) -> (f64, f64) { (self.width, self.height) }
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Create a detached node.
    pub fn create(&mut self, kind: NodeKind, class: Option<&str>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node {
            kind,
            class: class.map(str::to_string),
            parent: None,
            children: Vec::new(),
            attrs: BTreeMap::new(),
            remove_at: None,
        });
        id
    }

    /// Attach `child` as the last child of `parent`, moving it if already attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.detach(child);
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.nodes.get(&child).and_then(|n| n.parent);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = None;
        }
    }

    /// Create `kind` under `parent` in one step.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind, class: Option<&str>) -> NodeId {
        let id = self.create(kind, class);
        self.append_child(parent, id);
        id
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) {
        if id == self.root {
            return;
        }
        self.detach(id);
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if let Some(node) = self.nodes.remove(&n) {
                stack.extend(node.children);
            }
        }
    }

    /// Remove `id` once the scene clock passes `delay_ms` from now.
    pub fn remove_after(&mut self, id: NodeId, delay_ms: f64) {
        let at = self.now_ms + delay_ms.max(0.0);
        if let Some(n) = self.nodes.get_mut(&id) {
            n.remove_at = Some(at);
        }
        self.collect_removals();
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(&id).map(|n| n.kind)
    }
    pub fn class(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).and_then(|n| n.class.as_deref())
    }

    /// First child of `parent` carrying `class`.
    pub fn select(&self, parent: NodeId, class: &str) -> Option<NodeId> {
        self.children(parent).iter().copied().find(|c| self.class(*c) == Some(class))
    }

    /// Existing child with `class`, or a freshly appended one.
    pub fn select_or_create(&mut self, parent: NodeId, kind: NodeKind, class: &str) -> NodeId {
        match self.select(parent, class) {
            Some(id) => id,
            None => self.append(parent, kind, Some(class)),
        }
    }

    /// Set immediately, cancelling any transition on that attribute.
    pub fn set_attr(&mut self, id: NodeId, attr: Attr, value: impl Into<AttrValue>) {
        if let Some(n) = self.nodes.get_mut(&id) {
            n.attrs.insert(attr, AttrState { value: value.into(), tween: None });
        }
    }

    /// Animate towards `value`. The newest call wins; re-targeting the same value is a no-op.
    pub fn animate(&mut self, id: NodeId, attr: Attr, value: impl Into<AttrValue>, tr: Transition) {
        let now = self.now_ms;
        let to = value.into();
        let Some(n) = self.nodes.get_mut(&id) else { return };
        let from = match n.attrs.get(&attr) {
            Some(state) if *state.target() == to => return,
            Some(state) => state.current(now),
            None => to.clone(),
        };
        let tween = Tween { from: from.clone(), to, start_ms: now + tr.delay_ms.max(0.0), duration_ms: tr.duration_ms };
        n.attrs.insert(attr, AttrState { value: from, tween: Some(tween) });
    }

    /// Value at the current clock.
    pub fn attr(&self, id: NodeId, attr: Attr) -> Option<AttrValue> {
        self.nodes.get(&id)?.attrs.get(&attr).map(|s| s.current(self.now_ms))
    }

    /// Value the attribute settles to once its transition (if any) ends.
    pub fn target(&self, id: NodeId, attr: Attr) -> Option<AttrValue> {
        self.nodes.get(&id)?.attrs.get(&attr).map(|s| s.target().clone())
    }

    pub fn number(&self, id: NodeId, attr: Attr) -> Option<f64> {
        self.attr(id, attr).and_then(|v| v.as_number())
    }

    pub fn attrs(&self, id: NodeId) -> Vec<(Attr, AttrValue)> {
        self.nodes
            .get(&id)
            .map(|n| n.attrs.iter().map(|(a, s)| (*a, s.current(self.now_ms))).collect())
            .unwrap_or_default()
    }

    pub fn is_animating(&self) -> bool {
        self.nodes.values().any(|n| n.remove_at.is_some() || n.attrs.values().any(|s| s.tween.is_some()))
    }

    /// Move the clock forward, finishing tweens and pending removals that are due.
    pub fn advance(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;
        for n in self.nodes.values_mut() {
            for s in n.attrs.values_mut() {
                if s.tween.as_ref().is_some_and(|tw| now >= tw.end_ms()) {
                    if let Some(tw) = s.tween.take() {
                        s.value = tw.to;
                    }
                }
            }
        }
        self.collect_removals();
    }

    /// Run every pending transition to completion.
    pub fn settle(&mut self) {
        let end = self
            .nodes
            .values()
            .flat_map(|n| {
                n.attrs.values().filter_map(|s| s.tween.as_ref().map(Tween::end_ms)).chain(n.remove_at)
            })
            .fold(self.now_ms, f64::max);
        self.advance(end - self.now_ms);
    }

    fn collect_removals(&mut self) {
        let now = self.now_ms;
        let due: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.remove_at.is_some_and(|t| t <= now))
            .map(|(id, _)| *id)
            .collect();
        for id in due {
            self.remove(id);
        }
    }

    /// Accumulated group translation of `id`'s ancestors (and itself, for groups).
    pub fn origin(&self, id: NodeId) -> Point {
        let mut p = Point::default();
        let mut cur = Some(id);
        while let Some(n) = cur {
            if self.kind(n) == Some(NodeKind::Group) {
                p = p.offset(
                    self.number(n, Attr::TranslateX).unwrap_or(0.0),
                    self.number(n, Attr::TranslateY).unwrap_or(0.0),
                );
            }
            cur = self.parent(n);
        }
        p
    }

    /// Topmost circle under `point` (outer coordinates), in paint order.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        let mut hit = None;
        self.walk(self.root, &mut |scene, id| {
            if scene.kind(id) != Some(NodeKind::Circle) {
                return;
            }
            let o = scene.origin(id);
            let (Some(cx), Some(cy), Some(r)) =
                (scene.number(id, Attr::Cx), scene.number(id, Attr::Cy), scene.number(id, Attr::R))
            else {
                return;
            };
            let (dx, dy) = (point.x - (o.x + cx), point.y - (o.y + cy));
            if dx * dx + dy * dy <= r * r {
                hit = Some(id);
            }
        });
        hit
    }

    /// Depth-first pre-order traversal in paint order.
    pub fn walk(&self, id: NodeId, f: &mut dyn FnMut(&Scene, NodeId)) {
        if !self.contains(id) {
            return;
        }
        f(self, id);
        for c in self.children(id) {
            self.walk(*c, f);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
