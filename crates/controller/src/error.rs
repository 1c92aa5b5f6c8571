use ballie_core::error::CoreError;

/// Why a controller operation did not complete.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ControllerError {
    /// Validation, missing row, or collaborator failure.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("No create/edit drawer is open")]
    DrawerClosed,

    #[error("No delete is awaiting confirmation")]
    NothingToConfirm,

    /// A submit or delete for this view is already in flight.
    #[error("Another request is already in flight")]
    Busy,

    /// The list view was unmounted while the operation was in flight.
    #[error("List view is unmounted")]
    Unmounted,
}

impl ControllerError {
    /// The underlying taxonomy error, if this wraps one.
    pub fn core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(e) => Some(e),
            _ => None,
        }
    }
}
