use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};
use uuid::Uuid;

use super::errors::DialogError;
use crate::session::WindowHandle;

/// Admits at most one dialog wait per top-level window.
///
/// A slot stays taken until the [`DialogTicket`] issued for it is dropped,
/// which happens when the worker thread exits, not when the command gives up.
#[derive(Debug, Default)]
pub struct DialogGate {
    active: Mutex<HashMap<WindowHandle, Uuid>>,
}

impl DialogGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `window` on behalf of the wait `generation`.
    ///
    /// # Errors
    ///
    /// `DialogError::Busy` while another wait for the same window is alive.
    pub fn acquire(
        self: &Arc<Self>,
        window: WindowHandle,
        generation: Uuid,
    ) -> Result<DialogTicket, DialogError> {
        let mut active = self.lock();
        if let Some(holder) = active.get(&window) {
            warn!(
                event = "core.dialog.gate_busy",
                window = %window,
                holder = %holder,
                generation = %generation
            );
            return Err(DialogError::Busy { window });
        }
        active.insert(window, generation);
        debug!(event = "core.dialog.gate_acquired", window = %window, generation = %generation);

        Ok(DialogTicket {
            gate: Arc::clone(self),
            window,
            generation,
        })
    }

    /// Generation currently holding `window`, if any
    pub fn holder(&self, window: WindowHandle) -> Option<Uuid> {
        self.lock().get(&window).copied()
    }

    pub fn is_busy(&self, window: WindowHandle) -> bool {
        self.holder(window).is_some()
    }

    fn release(&self, window: WindowHandle, generation: Uuid) {
        let mut active = self.lock();
        if active.get(&window) == Some(&generation) {
            active.remove(&window);
            debug!(event = "core.dialog.gate_released", window = %window, generation = %generation);
        }
    }

    // A poisoned map is still consistent: every mutation is a single insert or remove.
    fn lock(&self) -> MutexGuard<'_, HashMap<WindowHandle, Uuid>> {
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Proof of a claimed gate slot; releases it on drop.
#[derive(Debug)]
pub struct DialogTicket {
    gate: Arc<DialogGate>,
    window: WindowHandle,
    generation: Uuid,
}

impl DialogTicket {
    pub fn window(&self) -> WindowHandle {
        self.window
    }

    pub fn generation(&self) -> Uuid {
        self.generation
    }
}

impl Drop for DialogTicket {
    fn drop(&mut self) {
        self.gate.release(self.window, self.generation);
    }
}
