//! The mount registry.
//!
//! The registry is the sole authority for idempotent mounting: a widget id
//! is mounted at most once, and re-scans triggered by DOM mutations no-op
//! on anything already registered. It is also the dispatch table for the
//! process-wide message listener — `widgetId → entry` lookups route inbound
//! resize messages to the right iframe.
//!
//! Generic over the handle type so the registry itself stays free of
//! `web-sys`: the embed crate instantiates it with `HtmlIFrameElement`,
//! tests with whatever is convenient.

use std::collections::HashMap;

use crate::height::HeightTracker;

/// One mounted widget: the iframe handle plus its resize state.
#[derive(Debug)]
pub struct MountEntry<H> {
    pub handle: H,
    pub heights: HeightTracker,
}

/// Mapping from widget id to its live mount.
///
/// Invariant: at most one entry per widget id (enforced by the map), and an
/// entry exists only for an iframe that was successfully constructed.
/// Entries whose iframe has left the DOM are pruned by the owner via
/// [`MountRegistry::retain`] at the start of each scan.
#[derive(Debug)]
pub struct MountRegistry<H> {
    entries: HashMap<String, MountEntry<H>>,
}

impl<H> MountRegistry<H> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, widget_id: &str) -> bool {
        self.entries.contains_key(widget_id)
    }

    pub fn get(&self, widget_id: &str) -> Option<&MountEntry<H>> {
        self.entries.get(widget_id)
    }

    pub fn get_mut(&mut self, widget_id: &str) -> Option<&mut MountEntry<H>> {
        self.entries.get_mut(widget_id)
    }

    /// Registers a freshly constructed mount, replacing (and returning) any
    /// stale entry for the same widget id.
    pub fn insert(
        &mut self,
        widget_id: impl Into<String>,
        handle: H,
        heights: HeightTracker,
    ) -> Option<MountEntry<H>> {
        self.entries
            .insert(widget_id.into(), MountEntry { handle, heights })
    }

    /// Unregisters a widget, returning its entry if it was mounted.
    pub fn remove(&mut self, widget_id: &str) -> Option<MountEntry<H>> {
        self.entries.remove(widget_id)
    }

    /// Drops entries the predicate rejects. Used to unregister iframes the
    /// host page removed, so the registry never leaks detached handles.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &MountEntry<H>) -> bool) {
        self.entries.retain(|id, entry| keep(id, entry));
    }

    /// Mutable iteration, for source-window fallback dispatch.
    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&String, &mut MountEntry<H>)> {
        self.entries.iter_mut()
    }
}

impl<H> Default for MountRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
