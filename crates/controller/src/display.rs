//! Rows currently rendered by a list view.
//!
//! Display rows move between two phases. A fetch result is `Reconciled`
//! server truth. An optimistic patch switches to `Optimistic` until the next
//! applied fetch, which replaces the rows wholesale; the two are never merged.

/// Whether the rendered rows are server truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPhase {
    Optimistic,
    Reconciled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRows<T> {
    items: Vec<T>,
    total: u64,
    phase: DisplayPhase,
    /// Bumped on every change so a rollback can tell whether it still owns
    /// the rows it patched.
    revision: u64,
}

impl<T: Clone> DisplayRows<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            phase: DisplayPhase::Reconciled,
            revision: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn phase(&self) -> DisplayPhase {
        self.phase
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|row| pred(row))
    }

    /// Replace everything with a fetched page.
    pub fn reconcile(&mut self, items: Vec<T>, total: u64) {
        self.items = items;
        self.total = total;
        self.phase = DisplayPhase::Reconciled;
        self.revision += 1;
    }

    /// Swap the first row matching `pred` for `patched`.
    ///
    /// Returns the rows as they were before, for rollback, or `None` when no
    /// displayed row matches.
    pub fn patch(&mut self, pred: impl Fn(&T) -> bool, patched: T) -> Option<DisplayRows<T>> {
        let index = self.items.iter().position(|row| pred(row))?;
        let before = self.clone();
        self.items[index] = patched;
        self.phase = DisplayPhase::Optimistic;
        self.revision += 1;
        Some(before)
    }

    /// Restore `before` unless the rows changed again since `revision`.
    pub fn rollback(&mut self, before: DisplayRows<T>, revision: u64) -> bool {
        if self.revision != revision {
            return false;
        }
        let next_revision = self.revision + 1;
        *self = before;
        self.revision = next_revision;
        true
    }
}

impl<T: Clone> Default for DisplayRows<T> {
    fn default() -> Self {
        Self::new()
    }
}
