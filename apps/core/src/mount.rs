use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use tracing::{info, warn};

use crate::clock::Clock;
use crate::config::Config;
use crate::hotkey::Hotkey;
use crate::hotkey_runtime::{HotkeyHub, ListenerGuard};
use crate::model::DocumentIndex;
use crate::palette::PaletteController;

/// A palette instance bound to the document-wide hotkey listener.
///
/// The listener only holds a weak reference to the controller. Unmounting (or
/// dropping) releases the listener and cancels any deferred close.
pub struct MountedPalette {
    controller: Rc<RefCell<PaletteController>>,
    listener: Option<ListenerGuard>,
}

impl MountedPalette {
    pub fn mount(
        hub: &HotkeyHub,
        index: DocumentIndex,
        config: &Config,
        clock: Box<dyn Clock>,
    ) -> Result<Self, crate::hotkey::HotkeyError> {
        let chord = config.parsed_hotkey()?;
        let controller = PaletteController::from_config(index, config, clock);
        Ok(Self::mount_controller(hub, chord, controller))
    }

    pub fn mount_controller(hub: &HotkeyHub, chord: Hotkey, controller: PaletteController) -> Self {
        let controller = Rc::new(RefCell::new(controller));
        let weak = Rc::downgrade(&controller);
        let listener = hub.register(chord, move |key| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            let Ok(mut controller) = controller.try_borrow_mut() else {
                return;
            };
            controller.on_global_key(key);
        });
        info!(listener = ?listener.id(), entries = controller.borrow().index().len(), "palette mounted");

        Self {
            controller,
            listener: Some(listener),
        }
    }

    pub fn controller(&self) -> Ref<'_, PaletteController> {
        self.controller.borrow()
    }

    pub fn controller_mut(&self) -> RefMut<'_, PaletteController> {
        self.controller.borrow_mut()
    }

    /// Shared handle, mostly for observing an instance after it has been unmounted.
    pub fn handle(&self) -> Rc<RefCell<PaletteController>> {
        Rc::clone(&self.controller)
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let Some(listener) = self.listener.take() else {
            return;
        };
        let id = listener.id();
        drop(listener);
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.unmount();
        } else if let Ok(controller) = self.controller.try_borrow() {
            warn!(listener = ?id, "palette borrowed during unmount; freezing without closing");
            controller.freeze();
        } else {
            warn!(listener = ?id, "palette mutably borrowed during unmount; left mounted");
        }
        info!(listener = ?id, "palette unmounted");
    }
}

impl Drop for MountedPalette {
    fn drop(&mut self) {
        self.teardown();
    }
}
