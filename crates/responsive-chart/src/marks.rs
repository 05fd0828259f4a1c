// File: crates/responsive-chart/src/marks.rs
// Summary: Mark binder; keyed enter/update/exit reconciliation of dataset records against scene circles,
// with staggered transitions and priority-based z-ordering.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::accessor::Encodings;
use crate::color::Rgba;
use crate::error::ChartError;
use crate::record::{Dataset, Record, RecordKey};
use crate::scale::ScaleSet;
use crate::scene::{Attr, NodeId, NodeKind, Scene, Transition};

/// Class carried by every mark node.
pub const MARK_CLASS: &str = "dot";

/// Classification of one key by [`reconcile`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Join {
    /// New key; index into the incoming sequence.
    Entering(usize),
    /// Key already bound; index into the incoming sequence.
    Updating(usize),
    /// Bound key absent from the incoming sequence.
    Exiting(RecordKey),
}

/// Keyed three-way diff. Incoming keys come first in their order, exits follow in bound order.
pub fn reconcile_keys<'a, I>(existing: I, incoming: &[&RecordKey]) -> Vec<Join>
where
    I: IntoIterator<Item = &'a RecordKey>,
{
    let existing: Vec<&RecordKey> = existing.into_iter().collect();
    let bound: HashSet<&RecordKey> = existing.iter().copied().collect();
    let wanted: HashSet<&RecordKey> = incoming.iter().copied().collect();

    let mut out: Vec<Join> = incoming
        .iter()
        .enumerate()
        .map(|(i, k)| if bound.contains(k) { Join::Updating(i) } else { Join::Entering(i) })
        .collect();
    out.extend(
        existing
            .into_iter()
            .filter(|k| !wanted.contains(k))
            .map(|k| Join::Exiting(k.clone())),
    );
    out
}

/// [`reconcile_keys`] against every record of `data`; indices are record positions.
pub fn reconcile<'a, I>(existing: I, data: &Dataset) -> Vec<Join>
where
    I: IntoIterator<Item = &'a RecordKey>,
{
    let keys: Vec<&RecordKey> = data.iter().map(Record::key).collect();
    reconcile_keys(existing, &keys)
}

/// Final attribute values for one mark.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkTarget {
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: Rgba,
    pub opacity: f64,
}

impl MarkTarget {
    /// Apply every channel's scale to its accessor. Fails on the first unusable channel.
    pub fn compute(record: &Record, enc: &Encodings, scales: &ScaleSet) -> Result<Self, ChartError> {
        let missing = |channel: &'static str| ChartError::Accessor { key: record.key().clone(), channel };
        let cx = enc.x.value(record).and_then(|v| scales.x.map(v)).ok_or_else(|| missing("x"))?;
        let cy = enc.y.value(record).and_then(|v| scales.y.map(v)).ok_or_else(|| missing("y"))?;
        let r = enc.radius.value(record).and_then(|v| scales.radius.map(v)).ok_or_else(|| missing("radius"))?;
        let fill = enc.color.value(record).and_then(|v| scales.color.map(v)).ok_or_else(|| missing("color"))?;
        let opacity = enc
            .opacity
            .value(record)
            .and_then(|v| scales.opacity.map(v))
            .ok_or_else(|| missing("opacity"))?;
        Ok(Self { cx, cy, r: r.max(0.0), fill, opacity })
    }
}

/// Data-space point where entering marks start.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct EnterOrigin {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Per-mark delay step, multiplied by the mark's z-index.
    pub stagger_ms: f64,
    pub duration_ms: f64,
    pub enter_origin: EnterOrigin,
    /// Shrink exiting marks before removing them.
    pub animate_exit: bool,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            stagger_ms: 2.0,
            duration_ms: 250.0,
            enter_origin: EnterOrigin { x: -15.0, y: 0.35 },
            animate_exit: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundMark {
    pub node: NodeId,
    pub target: MarkTarget,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindReport {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
    pub skipped: usize,
}

/// Owns the mark pool. The only place mark nodes are created or destroyed.
#[derive(Clone, Debug, Default)]
pub struct MarkBinder {
    config: TransitionConfig,
    /// Bound marks in z-order (first is painted first, i.e. underneath).
    marks: IndexMap<RecordKey, BoundMark>,
}

impl MarkBinder {
    pub fn new(config: TransitionConfig) -> Self {
        Self { config, marks: IndexMap::new() }
    }

    pub fn len(&self) -> usize { self.marks.len() }
    pub fn is_empty(&self) -> bool { self.marks.is_empty() }
    pub fn keys(&self) -> impl Iterator<Item = &RecordKey> { self.marks.keys() }
    pub fn get(&self, key: &RecordKey) -> Option<&BoundMark> { self.marks.get(key) }
    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &BoundMark)> { self.marks.iter() }

    pub fn key_for_node(&self, node: NodeId) -> Option<&RecordKey> {
        self.marks.iter().find(|(_, m)| m.node == node).map(|(k, _)| k)
    }

    /// Reconcile the pool under `parent` with `data` and start transitions to the new targets.
    pub fn bind(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        data: &Dataset,
        enc: &Encodings,
        scales: &ScaleSet,
    ) -> BindReport {
        let mut report = BindReport::default();

        let mut valid: Vec<(&Record, MarkTarget)> = Vec::with_capacity(data.len());
        for rec in data {
            match MarkTarget::compute(rec, enc, scales) {
                Ok(t) => valid.push((rec, t)),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping mark");
                    report.skipped += 1;
                }
            }
        }

        let keys: Vec<&RecordKey> = valid.iter().map(|(r, _)| r.key()).collect();
        let joins = reconcile_keys(self.marks.keys(), &keys);

        let origin = self.config.enter_origin;
        let enter_cx = scales.x.map(origin.x).unwrap_or(0.0);
        let enter_cy = scales.y.map(origin.y).unwrap_or(0.0);

        for join in joins {
            match join {
                Join::Exiting(key) => {
                    if let Some(mark) = self.marks.shift_remove(&key) {
                        self.exit(scene, mark.node);
                    }
                    report.exited += 1;
                }
                Join::Entering(i) => {
                    let (rec, target) = valid[i];
                    let node = scene.append(parent, NodeKind::Circle, Some(MARK_CLASS));
                    scene.set_attr(node, Attr::R, 0.0);
                    scene.set_attr(node, Attr::Cx, enter_cx);
                    scene.set_attr(node, Attr::Cy, enter_cy);
                    self.marks.insert(rec.key().clone(), BoundMark { node, target });
                    report.entered += 1;
                }
                Join::Updating(i) => {
                    let (rec, target) = valid[i];
                    if let Some(mark) = self.marks.get_mut(rec.key()) {
                        mark.target = target;
                    }
                    report.updated += 1;
                }
            }
        }

        // Larger priority underneath: paint order is priority descending.
        let priorities: HashMap<&RecordKey, f64> = valid
            .iter()
            .map(|(r, _)| (r.key(), enc.priority.value(r).unwrap_or(f64::NEG_INFINITY)))
            .collect();
        let priority = |k: &RecordKey| priorities.get(k).copied().unwrap_or(f64::NEG_INFINITY);
        self.marks.sort_by(|ka, _, kb, _| priority(kb).total_cmp(&priority(ka)).then_with(|| ka.cmp(kb)));

        for (z, mark) in self.marks.values().enumerate() {
            scene.append_child(parent, mark.node);
            let tr = Transition::new(z as f64 * self.config.stagger_ms, self.config.duration_ms);
            let t = mark.target;
            scene.animate(mark.node, Attr::R, t.r, tr);
            scene.animate(mark.node, Attr::Cx, t.cx, tr);
            scene.animate(mark.node, Attr::Cy, t.cy, tr);
            scene.animate(mark.node, Attr::Fill, t.fill, tr);
            scene.animate(mark.node, Attr::Opacity, t.opacity, tr);
        }

        tracing::debug!(
            entered = report.entered,
            updated = report.updated,
            exited = report.exited,
            skipped = report.skipped,
            "marks bound"
        );
        report
    }

    fn exit(&self, scene: &mut Scene, node: NodeId) {
        if self.config.animate_exit && self.config.duration_ms > 0.0 {
            scene.animate(node, Attr::R, 0.0, Transition::new(0.0, self.config.duration_ms));
            scene.remove_after(node, self.config.duration_ms);
        } else {
            scene.remove(node);
        }
    }
}
