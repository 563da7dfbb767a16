//! Bounded undo/redo over full-model snapshots.
//!
//! The current state always sits on top of `past`, so undo needs at least
//! two entries. Undo and redo hand back the snapshot to apply and enter a
//! restoring state in which commits are suppressed, keeping the echo of
//! applying that snapshot out of the history. Call
//! [`HistoryStore::finish_restore`] once the snapshot has been applied.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::{Edge, GraphModel, Node, TopologyParams, TopologyType};

/// Default number of retained undo steps
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Immutable copy of the editable document at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    pub name: String,
    pub topo_type: TopologyType,
    pub topo_params: TopologyParams,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl From<&GraphModel> for HistorySnapshot {
    fn from(model: &GraphModel) -> Self {
        Self {
            name: model.name.clone(),
            topo_type: model.topo_type.clone(),
            topo_params: model.topo_params.clone(),
            nodes: model.nodes.clone(),
            edges: model.edges.clone(),
        }
    }
}

impl From<HistorySnapshot> for GraphModel {
    fn from(snapshot: HistorySnapshot) -> Self {
        Self {
            name: snapshot.name,
            topo_type: snapshot.topo_type,
            topo_params: snapshot.topo_params,
            nodes: snapshot.nodes,
            edges: snapshot.edges,
        }
    }
}

/// Result of [`HistoryStore::commit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Pushed onto `past`; `future` was cleared
    Recorded,
    /// Equal to the current state, nothing changed
    Duplicate,
    /// A restored snapshot is being applied, nothing changed
    Suppressed,
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    past: VecDeque<HistorySnapshot>,
    future: Vec<HistorySnapshot>,
    restoring: bool,
    limit: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LIMIT)
    }

    /// Store retaining at most `limit` past states (minimum 1)
    pub fn with_capacity(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            past: VecDeque::with_capacity(limit + 1),
            future: Vec::new(),
            restoring: false,
            limit,
        }
    }

    /// Record a settled state.
    pub fn commit(&mut self, snapshot: HistorySnapshot) -> CommitOutcome {
        if self.restoring {
            return CommitOutcome::Suppressed;
        }
        if self.past.back() == Some(&snapshot) {
            return CommitOutcome::Duplicate;
        }

        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.future.clear();
        CommitOutcome::Recorded
    }

    /// Step back one state. Returns the snapshot to apply, or `None` when
    /// there is nothing to revert to.
    pub fn undo(&mut self) -> Option<HistorySnapshot> {
        if self.past.len() < 2 {
            return None;
        }
        let current = self.past.pop_back()?;
        self.future.push(current);
        let restored = self.past.back().cloned();
        self.restoring = restored.is_some();
        restored
    }

    /// Re-apply the most recently undone state.
    pub fn redo(&mut self) -> Option<HistorySnapshot> {
        let next = self.future.pop()?;
        self.past.push_back(next.clone());
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
        self.restoring = true;
        Some(next)
    }

    /// Leave the restoring state once the restored snapshot has been applied.
    pub fn finish_restore(&mut self) {
        self.restoring = false;
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    /// Drop all history, e.g. when another topology is loaded.
    pub fn reset(&mut self) {
        self.past.clear();
        self.future.clear();
        self.restoring = false;
    }

    pub fn can_undo(&self) -> bool {
        self.past.len() >= 2
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// The state on top of `past`
    pub fn current(&self) -> Option<&HistorySnapshot> {
        self.past.back()
    }

    pub fn past(&self) -> impl Iterator<Item = &HistorySnapshot> {
        self.past.iter()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
