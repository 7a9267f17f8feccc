use crate::api::ResourceApi;
use crate::bus::Observer;
use crate::form::modal::ModalForm;
use crate::notification::Notification;
use crate::record::{Record, RecordId};
use crate::table::TableController;
use crate::toast::{ToastKind, ToastSink};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

const ADDED: &str = "Record added successfully!";
const ADD_FAILED: &str = "Something went wrong while adding the record!";
const UPDATED: &str = "Record updated successfully!";
const UPDATE_FAILED: &str = "Something went wrong while updating the record!";
const DELETED: &str = "Record deleted successfully!";
const DELETE_FAILED: &str = "Something went wrong while deleting the record!";

/// Subscribes to the bus and translates UI intents into API calls,
/// republishing each outcome as a data-change notification. The only
/// component that talks to the remote collection.
pub struct Coordinator {
    api: Box<dyn ResourceApi>,
    table: Rc<RefCell<TableController>>,
    form: Rc<RefCell<ModalForm>>,
    toasts: Box<dyn ToastSink>,
    /// Record ids with a delete still in flight. Keyed by id so
    /// unrelated deletes stay independent of each other.
    deletes_in_flight: HashSet<RecordId>,
}

impl Coordinator {
    pub fn new(
        api: Box<dyn ResourceApi>,
        table: Rc<RefCell<TableController>>,
        form: Rc<RefCell<ModalForm>>,
        toasts: Box<dyn ToastSink>,
    ) -> Self {
        Self {
            api,
            table,
            form,
            toasts,
            deletes_in_flight: HashSet::new(),
        }
    }

    fn handle_edit_requested(&mut self, id: Option<RecordId>) -> Result<(), String> {
        let record = match id {
            Some(id) => {
                let table = self
                    .table
                    .try_borrow()
                    .map_err(|_| "table is busy".to_string())?;
                match table.record(id) {
                    Some(record) => record.clone(),
                    None => {
                        log::warn!("edit requested for unknown record {id}");
                        Record::new()
                    }
                }
            }
            None => Record::new(),
        };

        self.form
            .try_borrow_mut()
            .map_err(|_| "form is busy".to_string())?
            .present(&record);
        Ok(())
    }

    fn handle_delete_requested(&mut self, id: RecordId) -> Vec<Notification> {
        if !self.deletes_in_flight.insert(id) {
            log::debug!("delete of {id} already in flight, ignored");
            return Vec::new();
        }

        let outcome = self.api.delete(id);
        self.deletes_in_flight.remove(&id);

        match outcome {
            Ok(result) if result.id.is_some() => {
                self.toasts.toast(ToastKind::Success, DELETED);
                vec![Notification::RecordDeleted { id }]
            }
            Ok(_) => {
                self.toasts.toast(ToastKind::Danger, DELETE_FAILED);
                Vec::new()
            }
            Err(err) => {
                log::error!("delete of {id} failed: {err}");
                self.toasts.toast(ToastKind::Danger, DELETE_FAILED);
                Vec::new()
            }
        }
    }

    fn handle_form_submitted(&mut self, data: &Record) -> Vec<Notification> {
        let notifications = match data.id {
            None => match self.api.create(data) {
                Ok(created) if created.id.is_some() => {
                    self.toasts.toast(ToastKind::Success, ADDED);
                    vec![Notification::RecordAdded { record: created }]
                }
                Ok(_) => {
                    self.toasts.toast(ToastKind::Danger, ADD_FAILED);
                    Vec::new()
                }
                Err(err) => {
                    log::error!("create failed: {err}");
                    self.toasts.toast(ToastKind::Danger, ADD_FAILED);
                    Vec::new()
                }
            },
            Some(id) => match self.api.update(id, data) {
                Ok(updated) if updated.id.is_some() => {
                    self.toasts.toast(ToastKind::Success, UPDATED);
                    vec![Notification::RecordUpdated { record: updated }]
                }
                Ok(_) => {
                    self.toasts.toast(ToastKind::Danger, UPDATE_FAILED);
                    Vec::new()
                }
                Err(err) => {
                    log::error!("update of {id} failed: {err}");
                    self.toasts.toast(ToastKind::Danger, UPDATE_FAILED);
                    Vec::new()
                }
            },
        };

        // The form hides once the call has resolved, success or not.
        match self.form.try_borrow_mut() {
            Ok(mut form) => form.hide(),
            Err(_) => log::warn!("form is busy, cannot hide after submit"),
        }

        notifications
    }

    #[cfg(test)]
    fn begin_delete(&mut self, id: RecordId) -> bool {
        self.deletes_in_flight.insert(id)
    }
}

impl Observer for Coordinator {
    fn name(&self) -> &str {
        "coordinator"
    }

    fn on_notification(
        &mut self,
        notification: &Notification,
    ) -> Result<Vec<Notification>, String> {
        match notification {
            Notification::EditRequested { id } => {
                self.handle_edit_requested(*id)?;
                Ok(Vec::new())
            }
            Notification::DeleteRequested { id } => Ok(self.handle_delete_requested(*id)),
            Notification::FormSubmitted { data } => Ok(self.handle_form_submitted(data)),
            other => {
                log::trace!("coordinator ignoring {}", other.tag());
                Ok(Vec::new())
            }
        }
    }
}
