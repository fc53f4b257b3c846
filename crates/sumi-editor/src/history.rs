//! Snapshot undo/redo.
//!
//! Every undoable action ends with a `save`: the whole document (scene plus
//! layer list) is serialized and appended. Undo and redo move a cursor over
//! the saved snapshots and hand back the one to reload. Saving after an
//! undo discards the redo tail.
//!
//! Invariant: the cursor is `None` only before the first save, and
//! otherwise indexes a stored snapshot.

use serde::{Deserialize, Serialize};
use sumi_core::model::{LayerId, Scene};
use sumi_core::{CoreResult, Layer};

pub const DEFAULT_HISTORY_CAP: usize = 50;

/// Everything needed to put the document back as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub scene: Scene,
    pub layers: Vec<Layer>,
    pub active_layer: LayerId,
}

impl Snapshot {
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Bounded list of serialized snapshots with a cursor.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    cursor: Option<usize>,
    cap: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAP)
    }
}

impl History {
    /// A cap of zero is treated as one.
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::with_capacity(cap.min(DEFAULT_HISTORY_CAP)),
            cursor: None,
            cap: cap.max(1),
        }
    }

    /// Record a new snapshot after the cursor.
    pub fn save(&mut self, snapshot: String) {
        match self.cursor {
            Some(cursor) => self.entries.truncate(cursor + 1),
            None => self.entries.clear(),
        }
        self.entries.push(snapshot);

        if self.entries.len() > self.cap {
            // Oldest goes; the cursor already points at the new last entry.
            self.entries.remove(0);
        } else {
            self.cursor = Some(self.cursor.map_or(0, |c| c + 1));
        }
        log::debug!(
            "history: saved {}/{} (cursor {:?})",
            self.entries.len(),
            self.cap,
            self.cursor
        );
    }

    /// Step back. Returns the snapshot to reload.
    pub fn undo(&mut self) -> Option<&str> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        log::debug!("history: undo to {}", cursor - 1);
        self.entries.get(cursor - 1).map(String::as_str)
    }

    /// Step forward. Returns the snapshot to reload.
    pub fn redo(&mut self) -> Option<&str> {
        let next = self.cursor.map(|c| c + 1).filter(|&n| n < self.entries.len())?;
        self.cursor = Some(next);
        log::debug!("history: redo to {next}");
        self.entries.get(next).map(String::as_str)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The snapshot the cursor points at.
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.entries.get(c))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(cap: usize, n: usize) -> History {
        let mut h = History::new(cap);
        for i in 0..n {
            h.save(format!("s{i}"));
        }
        h
    }

    #[test]
    fn empty_history_cannot_move() {
        let mut h = History::default();
        assert_eq!(h.cursor(), None);
        assert!(h.undo().is_none());
        assert!(h.redo().is_none());
        assert!(!h.can_undo() && !h.can_redo());
    }

    #[test]
    fn first_save_sets_cursor_zero() {
        let h = filled(50, 1);
        assert_eq!(h.cursor(), Some(0));
        assert!(!h.can_undo());
        assert_eq!(h.current(), Some("s0"));
    }

    #[test]
    fn undo_redo_walk() {
        let mut h = filled(50, 3);
        assert_eq!(h.undo(), Some("s1"));
        assert_eq!(h.undo(), Some("s0"));
        assert_eq!(h.undo(), None);
        assert_eq!(h.cursor(), Some(0));
        assert_eq!(h.redo(), Some("s1"));
        assert_eq!(h.redo(), Some("s2"));
        assert_eq!(h.redo(), None);
        assert_eq!(h.cursor(), Some(2));
    }

    #[test]
    fn save_after_undo_drops_redo_tail() {
        let mut h = filled(50, 3);
        h.undo();
        h.undo();
        h.save("fork".into());
        assert_eq!(h.len(), 2);
        assert_eq!(h.current(), Some("fork"));
        assert!(!h.can_redo());
        assert_eq!(h.undo(), Some("s0"));
    }

    #[test]
    fn cap_evicts_oldest_without_advancing() {
        let mut h = filled(3, 3);
        assert_eq!(h.cursor(), Some(2));
        h.save("s3".into());
        assert_eq!(h.len(), 3);
        assert_eq!(h.cursor(), Some(2));
        assert_eq!(h.current(), Some("s3"));
        assert_eq!(h.undo(), Some("s2"));
        assert_eq!(h.undo(), Some("s1"));
        assert_eq!(h.undo(), None);
    }

    #[test]
    fn cap_of_one_keeps_latest() {
        let mut h = filled(1, 4);
        assert_eq!(h.len(), 1);
        assert_eq!(h.current(), Some("s3"));
        assert!(h.undo().is_none());
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let snap = Snapshot {
            scene: Scene::default(),
            layers: vec![Layer::new(0, "Main Layer")],
            active_layer: 0,
        };
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"activeLayer\":0"));
        assert_eq!(Snapshot::from_json(&json).unwrap(), snap);
    }
}
