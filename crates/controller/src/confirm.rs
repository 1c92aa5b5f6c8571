//! Delete confirmation state machine.
//!
//! `Idle` → `Confirming { target }` on request; back to `Idle` on cancel, or
//! once the delete has been acknowledged. A second request while confirming
//! replaces the target. The dialog is never open without a target.

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteConfirmation<T> {
    Idle,
    Confirming {
        target: T,
        /// The delete call is in flight.
        pending: bool,
    },
}

impl<T> Default for DeleteConfirmation<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> DeleteConfirmation<T> {
    /// Stage `target`, returning the target it replaced, if any.
    pub fn request(&mut self, target: T) -> Option<T> {
        let previous = std::mem::replace(
            self,
            Self::Confirming {
                target,
                pending: false,
            },
        );
        match previous {
            Self::Confirming { target, .. } => Some(target),
            Self::Idle => None,
        }
    }

    /// Discard the target without deleting anything.
    pub fn cancel(&mut self) -> Option<T> {
        match std::mem::take(self) {
            Self::Confirming { target, .. } => Some(target),
            Self::Idle => None,
        }
    }

    pub fn target(&self) -> Option<&T> {
        match self {
            Self::Confirming { target, .. } => Some(target),
            Self::Idle => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Confirming { .. })
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Confirming { pending: true, .. })
    }

    pub fn set_pending(&mut self, value: bool) {
        if let Self::Confirming { pending, .. } = self {
            *pending = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_cancel_returns_to_idle() {
        let mut confirm = DeleteConfirmation::default();
        assert!(confirm.request("U001").is_none());
        assert!(confirm.is_open());
        assert_eq!(confirm.cancel(), Some("U001"));
        assert!(!confirm.is_open());
        assert!(confirm.target().is_none());
    }

    #[test]
    fn second_request_replaces_target() {
        let mut confirm = DeleteConfirmation::default();
        confirm.request("U001");
        assert_eq!(confirm.request("U002"), Some("U001"));
        assert_eq!(confirm.target(), Some(&"U002"));
    }

    #[test]
    fn cancel_when_idle_is_noop() {
        let mut confirm: DeleteConfirmation<&str> = DeleteConfirmation::Idle;
        assert!(confirm.cancel().is_none());
    }

    #[test]
    fn pending_flag_only_applies_while_confirming() {
        let mut confirm = DeleteConfirmation::default();
        confirm.set_pending(true);
        assert!(!confirm.is_pending());
        confirm.request("U001");
        confirm.set_pending(true);
        assert!(confirm.is_pending());
    }
}
