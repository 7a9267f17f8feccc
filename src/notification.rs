use crate::record::{Record, RecordId};

/// The closed notification vocabulary carried by the bus.
///
/// Intents (`EditRequested`, `DeleteRequested`, `FormSubmitted`) flow
/// from the surfaces toward the coordinator; outcomes (`RecordAdded`,
/// `RecordUpdated`, `RecordDeleted`) flow back once the remote
/// collection has confirmed a write. Notifications are ephemeral: the
/// bus never retains one after dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A row's edit button, or the add button with `id: None`.
    EditRequested { id: Option<RecordId> },
    DeleteRequested { id: RecordId },
    /// Validated form data; `data.id` is `None` in create mode.
    FormSubmitted { data: Record },
    RecordAdded { record: Record },
    RecordUpdated { record: Record },
    RecordDeleted { id: RecordId },
}

impl Notification {
    /// Stable tag used in diagnostics.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::EditRequested { .. } => "edit-requested",
            Self::DeleteRequested { .. } => "delete-requested",
            Self::FormSubmitted { .. } => "form-submitted",
            Self::RecordAdded { .. } => "record-added",
            Self::RecordUpdated { .. } => "record-updated",
            Self::RecordDeleted { .. } => "record-deleted",
        }
    }
}
