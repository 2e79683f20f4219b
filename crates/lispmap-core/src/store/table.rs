// ── Reactive table state ──

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::status::{StatusBanner, StatusKind};
use crate::error::CoreError;

/// The two expandable panels of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Detail,
    Delete,
}

/// One row plus its panel visibility.
#[derive(Debug)]
pub struct TableRow<T> {
    pub item: Arc<T>,
    pub detail_hidden: bool,
    pub delete_hidden: bool,
}

impl<T> TableRow<T> {
    fn new(item: T) -> Self {
        Self {
            item: Arc::new(item),
            detail_hidden: true,
            delete_hidden: true,
        }
    }

    fn panel_mut(&mut self, panel: Panel) -> &mut bool {
        match panel {
            Panel::Detail => &mut self.detail_hidden,
            Panel::Delete => &mut self.delete_hidden,
        }
    }
}

impl<T> Clone for TableRow<T> {
    fn clone(&self) -> Self {
        Self {
            item: Arc::clone(&self.item),
            detail_hidden: self.detail_hidden,
            delete_hidden: self.delete_hidden,
        }
    }
}

/// Everything a consumer needs to draw a table.
#[derive(Debug)]
pub struct TableSnapshot<T> {
    pub rows: Vec<TableRow<T>>,
    pub status: StatusBanner,
    /// Bumped by every `begin_load`.
    pub generation: u64,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl<T> TableSnapshot<T> {
    pub fn items(&self) -> impl Iterator<Item = &Arc<T>> {
        self.rows.iter().map(|r| &r.item)
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Arc<T>> {
        self.rows
            .iter()
            .find(|r| pred(&r.item))
            .map(|r| Arc::clone(&r.item))
    }
}

impl<T> Default for TableSnapshot<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            status: StatusBanner::default(),
            generation: 0,
            loaded_at: None,
        }
    }
}

impl<T> Clone for TableSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            status: self.status.clone(),
            generation: self.generation,
            loaded_at: self.loaded_at,
        }
    }
}

/// Proof that a load was started; only the newest ticket may finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Row state for one table (mappings or keys).
pub struct TableView<T> {
    name: &'static str,
    state: watch::Sender<TableSnapshot<T>>,
}

impl<T> TableView<T> {
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(TableSnapshot::default());
        Self { name, state }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe(&self) -> watch::Receiver<TableSnapshot<T>> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> TableSnapshot<T> {
        self.state.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Loading ──────────────────────────────────────────────────────

    /// Start a load: bump the generation and show the loading banner.
    pub fn begin_load(&self) -> LoadTicket {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            s.status = StatusBanner::new(StatusKind::Loading);
            generation = s.generation;
        });
        debug!(table = self.name, generation, "load started");
        LoadTicket { generation }
    }

    /// Apply a load result if `ticket` is still the newest load.
    ///
    /// Returns `false` when the result was stale and dropped. A failed
    /// load keeps the previous rows.
    pub fn finish_load(&self, ticket: LoadTicket, result: Result<Vec<T>, &CoreError>) -> bool {
        let applied = self.state.send_if_modified(|s| {
            if s.generation != ticket.generation {
                return false;
            }
            match result {
                Ok(items) => {
                    s.rows = items.into_iter().map(TableRow::new).collect();
                    s.status = StatusBanner::new(StatusKind::Loaded);
                    s.loaded_at = Some(Utc::now());
                }
                Err(e) => s.status = StatusBanner::new(StatusKind::LoadError(e.to_string())),
            }
            true
        });
        if !applied {
            warn!(
                table = self.name,
                generation = ticket.generation,
                "dropping stale load result"
            );
        }
        applied
    }

    // ── Row panels ───────────────────────────────────────────────────

    /// Close every panel, then flip `panel` on row `index` relative to
    /// its state before the call. Out-of-range indices are ignored.
    pub fn toggle(&self, index: usize, panel: Panel) -> bool {
        self.state.send_if_modified(|s| {
            let Some(prior) = s.rows.get_mut(index).map(|r| *r.panel_mut(panel)) else {
                return false;
            };
            for row in &mut s.rows {
                row.detail_hidden = true;
                row.delete_hidden = true;
            }
            if let Some(row) = s.rows.get_mut(index) {
                *row.panel_mut(panel) = !prior;
            }
            true
        })
    }

    // ── Status ───────────────────────────────────────────────────────

    /// Record the outcome of a write operation in the banner.
    pub fn record_operation(&self, operation: &str, outcome: Result<(), &CoreError>) {
        let kind = match outcome {
            Ok(()) => StatusKind::OperationSucceeded(operation.to_owned()),
            Err(e) => StatusKind::OperationFailed {
                operation: operation.to_owned(),
                message: e.to_string(),
            },
        };
        self.state.send_modify(|s| s.status = StatusBanner::new(kind));
    }

    pub fn status(&self) -> StatusBanner {
        self.state.borrow().status.clone()
    }
}
