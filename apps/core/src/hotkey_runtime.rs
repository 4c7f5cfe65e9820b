use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::hotkey::{Hotkey, KeyInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalKey {
    Activate,
    Escape,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyDisposition {
    pub handled: bool,
    pub prevent_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Rc<RefCell<dyn FnMut(GlobalKey)>>;

struct Registration {
    id: ListenerId,
    chord: Hotkey,
    listener: Listener,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    registrations: Vec<Registration>,
}

impl HubInner {
    fn contains(&self, id: ListenerId) -> bool {
        self.registrations.iter().any(|r| r.id == id)
    }
}

/// Document-wide keydown listener registry for one UI thread.
///
/// Listeners are only reachable through [`ListenerGuard`]; dropping the guard is the
/// single way to remove one, so a mount that unwinds early still releases it.
#[derive(Clone, Default)]
pub struct HotkeyHub {
    inner: Rc<RefCell<HubInner>>,
}

impl HotkeyHub {
    pub fn register<F>(&self, chord: Hotkey, listener: F) -> ListenerGuard
    where
        F: FnMut(GlobalKey) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = ListenerId(inner.next_id);
        inner.registrations.push(Registration {
            id,
            chord,
            listener: Rc::new(RefCell::new(listener)),
        });
        debug!(listener = id.0, total = inner.registrations.len(), "hotkey listener installed");

        ListenerGuard {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().registrations.len()
    }

    pub fn dispatch(&self, input: &KeyInput) -> KeyDisposition {
        let escape = input.is_escape();
        let targets: Vec<(ListenerId, Listener)> = self
            .inner
            .borrow()
            .registrations
            .iter()
            .filter(|r| escape || r.chord.matches(input))
            .map(|r| (r.id, Rc::clone(&r.listener)))
            .collect();

        if targets.is_empty() {
            return KeyDisposition::default();
        }

        let key = if escape {
            GlobalKey::Escape
        } else {
            GlobalKey::Activate
        };
        for (id, listener) in targets {
            // An earlier listener may have torn down a later one.
            if !self.inner.borrow().contains(id) {
                continue;
            }
            if let Ok(mut callback) = listener.try_borrow_mut() {
                (*callback)(key);
            }
        }

        KeyDisposition {
            handled: true,
            prevent_default: key == GlobalKey::Activate,
        }
    }
}

/// Keeps one listener installed; dropping it uninstalls the listener.
#[must_use = "dropping the guard immediately removes the listener"]
pub struct ListenerGuard {
    id: ListenerId,
    hub: Weak<RefCell<HubInner>>,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn release(self) {}
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(inner) = self.hub.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            return;
        };
        inner.registrations.retain(|r| r.id != self.id);
        debug!(listener = self.id.0, total = inner.registrations.len(), "hotkey listener removed");
    }
}
