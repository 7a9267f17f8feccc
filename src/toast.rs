use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Danger,
}

/// Collaborator that presents transient feedback messages. A new toast
/// replaces whatever is still on screen.
pub trait ToastSink {
    fn toast(&mut self, kind: ToastKind, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Buffering sink: the demo prints its contents, tests assert on them.
/// Clones share the same buffer, so a test can keep a handle while the
/// coordinator owns the sink.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    entries: Rc<RefCell<Vec<Toast>>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Toast> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.entries.borrow().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ToastSink for ToastLog {
    fn toast(&mut self, kind: ToastKind, message: &str) {
        self.entries.borrow_mut().push(Toast {
            kind,
            message: message.to_string(),
        });
    }
}
