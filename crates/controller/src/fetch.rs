//! Fetch sequencing.
//!
//! Every fetch is issued with a ticket carrying a monotonically increasing
//! sequence number and a frozen copy of the query. Only the response to the
//! most recently issued ticket may be applied; anything older is stale, no
//! matter when it arrives.

use ballie_core::query::ListQuery;

/// One issued list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub query: ListQuery,
}

#[derive(Debug, Default)]
pub struct FetchSequencer {
    latest: u64,
    /// Sequence number of the latest ticket while it is unresolved.
    pending: Option<u64>,
}

impl FetchSequencer {
    pub fn issue(&mut self, query: ListQuery) -> FetchTicket {
        self.latest += 1;
        self.pending = Some(self.latest);
        FetchTicket {
            seq: self.latest,
            query,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Mark `ticket` as resolved. Returns `false` (and changes nothing) for a
    /// stale ticket.
    pub fn resolve(&mut self, ticket: &FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Give up on the outstanding request without applying anything.
    pub fn abandon(&mut self) {
        self.pending = None;
    }

    /// Whether the latest issued request is still outstanding.
    pub fn in_flight(&self) -> bool {
        self.pending.is_some()
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

/// What happened to a list response.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Rows and total were rendered.
    Applied { total: u64 },
    /// The page was past the end for `total` and has been clamped to `page`.
    /// Nothing was rendered; the clamped page still has to be fetched.
    PageCorrected { total: u64, page: u32 },
    /// A newer request was issued after this one.
    Stale,
    /// The list view was unmounted before the response arrived.
    Unmounted,
    /// The collaborator failed. Rendered rows are unchanged and the query is
    /// back to the one they were fetched with.
    Failed(ballie_core::error::CoreError),
    /// The query did not change, so nothing was fetched.
    Unchanged,
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_ticket_is_current() {
        let mut seq = FetchSequencer::default();
        let first = seq.issue(ListQuery::default());
        let second = seq.issue(ListQuery::default());
        assert!(!seq.is_current(&first));
        assert!(seq.is_current(&second));
        assert_eq!(second.seq, 2);
    }

    #[test]
    fn stale_resolution_keeps_latest_pending() {
        let mut seq = FetchSequencer::default();
        let first = seq.issue(ListQuery::default());
        let second = seq.issue(ListQuery::default());

        assert!(!seq.resolve(&first));
        assert!(seq.in_flight());

        assert!(seq.resolve(&second));
        assert!(!seq.in_flight());
    }

    #[test]
    fn abandoned_request_is_no_longer_in_flight() {
        let mut seq = FetchSequencer::default();
        let ticket = seq.issue(ListQuery::default());
        seq.abandon();
        assert!(!seq.in_flight());
        assert!(seq.is_current(&ticket));
    }

    #[test]
    fn ticket_freezes_the_query() {
        let mut seq = FetchSequencer::default();
        let mut query = ListQuery::default();
        query.search = "ann".into();
        let ticket = seq.issue(query.clone());
        query.search = "bob".into();
        assert_eq!(ticket.query.search, "ann");
    }
}
