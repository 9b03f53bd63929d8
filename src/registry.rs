/*
 * Registry of decorated windows. Maps each native window handle to its
 * `DecoratedWindow` entry and sequences the OS calls needed to install and
 * remove the decoration shim.
 *
 * The OS side is reached through the `WindowSystem` trait so the registration
 * invariants (single install, restore-before-remove, brush release) can be
 * exercised with a recording double. The entry map sits behind a `Mutex`
 * because hosts may call in from a thread other than the window's UI thread.
 * The lock is never held across a `WindowSystem` call: attaching the
 * dispatcher and refreshing the frame send messages synchronously, and those
 * messages must be able to look their entry up.
 */

use crate::error::{DecorationError, Result};
use crate::message_router::{Disposition, WindowMessage, route_message};
use crate::types::{CaptionInsets, DecorationConfig, Rgb, WindowHandle};
use crate::window_state::DecoratedWindow;

use log::{debug, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A background fill resource that can be lent out by raw handle for painting.
pub trait BackgroundBrush {
    type Raw: Copy;

    fn raw(&self) -> Self::Raw;
}

/// Native window operations needed by the registry.
pub trait WindowSystem {
    type Procedure: Copy + Send;
    type Brush: BackgroundBrush + Send + Sync;

    /// Adds the thick-frame style so the OS keeps resize affordances.
    fn apply_frame_style(&self, handle: WindowHandle) -> Result<()>;
    /// Extends the compositor frame (shadow) into the client area.
    fn extend_frame_into_client(&self, handle: WindowHandle, margin: i32) -> Result<()>;
    fn current_procedure(&self, handle: WindowHandle) -> Result<Self::Procedure>;
    /// Points the window at the shared decoration dispatcher.
    fn attach_dispatcher(&self, handle: WindowHandle) -> Result<()>;
    fn restore_procedure(&self, handle: WindowHandle, procedure: Self::Procedure) -> Result<()>;
    /// Forces the OS to recompute the non-client frame without moving the window.
    fn refresh_frame(&self, handle: WindowHandle) -> Result<()>;
    fn create_brush(&self, color: Rgb) -> Result<Self::Brush>;
}

// Brushes are shared so a plan in flight keeps its brush alive past a concurrent replace.
type Entry<S> =
    DecoratedWindow<<S as WindowSystem>::Procedure, Arc<<S as WindowSystem>::Brush>>;

/// Everything the dispatcher needs to act on a message once the lock is released.
pub struct DispatchPlan<P, B> {
    pub disposition: Disposition,
    pub previous_procedure: P,
    /// Released only when both the entry and this plan have let go of it.
    pub background: Option<Arc<B>>,
}

pub struct DecorationRegistry<S: WindowSystem> {
    system: S,
    config: DecorationConfig,
    windows: Mutex<HashMap<WindowHandle, Entry<S>>>,
}

impl<S: WindowSystem> DecorationRegistry<S> {
    pub fn new(system: S, config: DecorationConfig) -> Self {
        Self {
            system,
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn system(&self) -> &S {
        &self.system
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<WindowHandle, Entry<S>>> {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_installed(&self, handle: WindowHandle) -> bool {
        self.entries().contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /*
     * Installs the decoration shim on `handle`. Refuses a second install so
     * the captured previous procedure is always the window's real one rather
     * than our own dispatcher. Frame styling and the final frame refresh are
     * cosmetic and only logged on failure; failing to read or replace the
     * window procedure aborts the install and leaves no entry behind.
     */
    pub fn install(&self, handle: WindowHandle, is_popup: bool) -> Result<()> {
        if self.is_installed(handle) {
            return Err(DecorationError::AlreadyInstalled(handle));
        }

        if let Err(err) = self.system.apply_frame_style(handle) {
            warn!("Registry: could not add thick frame to {handle}: {err}");
        }
        if let Err(err) = self
            .system
            .extend_frame_into_client(handle, self.config.frame_margins)
        {
            warn!("Registry: could not extend frame into client area of {handle}: {err}");
        }

        let previous = self.system.current_procedure(handle)?;
        {
            let mut entries = self.entries();
            if entries.contains_key(&handle) {
                return Err(DecorationError::AlreadyInstalled(handle));
            }
            entries.insert(handle, DecoratedWindow::new(previous, is_popup));
        }

        if let Err(err) = self.system.attach_dispatcher(handle) {
            self.entries().remove(&handle);
            return Err(err);
        }

        if let Err(err) = self.system.refresh_frame(handle) {
            warn!("Registry: frame refresh for {handle} failed: {err}");
        }

        debug!("Registry: decorations installed on {handle} (popup: {is_popup})");
        Ok(())
    }

    /*
     * Restores the original window procedure, then drops the entry. The order
     * matters: once the procedure is restored no further message can reach
     * the dispatcher for this handle, so removing the entry afterwards cannot
     * strand an in-flight message without state.
     */
    pub fn uninstall(&self, handle: WindowHandle) -> Result<()> {
        let previous = self
            .entries()
            .get(&handle)
            .map(|entry| entry.previous_procedure())
            .ok_or(DecorationError::NotDecorated(handle))?;

        if let Err(err) = self.system.restore_procedure(handle, previous) {
            // Usually the window is already gone; the entry must go regardless.
            warn!("Registry: restoring window procedure of {handle} failed: {err}");
        }

        let removed = self.entries().remove(&handle);
        drop(removed);
        debug!("Registry: decorations removed from {handle}");
        Ok(())
    }

    /// Uninstalls every remaining window. Returns how many were restored.
    pub fn uninstall_all(&self) -> usize {
        let handles: Vec<WindowHandle> = self.entries().keys().copied().collect();
        handles
            .into_iter()
            .filter(|handle| self.uninstall(*handle).is_ok())
            .count()
    }

    fn with_entry<R>(
        &self,
        handle: WindowHandle,
        f: impl FnOnce(&mut Entry<S>) -> R,
    ) -> Result<R> {
        let mut entries = self.entries();
        let entry = entries
            .get_mut(&handle)
            .ok_or(DecorationError::NotDecorated(handle))?;
        Ok(f(entry))
    }

    pub fn set_resizable(&self, handle: WindowHandle, resizable: bool) -> Result<()> {
        self.with_entry(handle, |entry| entry.set_resizable(resizable))
    }

    pub fn update_caption(&self, handle: WindowHandle, caption: CaptionInsets) -> Result<()> {
        self.with_entry(handle, |entry| entry.set_caption(caption))
    }

    /*
     * Replaces the background brush. The entry's reference to the previous
     * brush is dropped after the lock is let go; the brush itself is released
     * once no dispatch plan still holds it.
     */
    pub fn set_background(&self, handle: WindowHandle, color: Rgb) -> Result<()> {
        if !self.is_installed(handle) {
            return Err(DecorationError::NotDecorated(handle));
        }
        let brush = self.system.create_brush(color)?;
        let previous =
            self.with_entry(handle, |entry| entry.replace_background(Arc::new(brush)))?;
        drop(previous);
        Ok(())
    }

    /// Routes `message` for `handle`, returning `None` if the handle is not registered.
    pub fn plan_message(
        &self,
        handle: WindowHandle,
        message: WindowMessage,
    ) -> Option<DispatchPlan<S::Procedure, S::Brush>> {
        let mut entries = self.entries();
        let entry = entries.get_mut(&handle)?;
        let disposition = route_message(entry, message, self.config.resize_border);
        Some(DispatchPlan {
            disposition,
            previous_procedure: entry.previous_procedure(),
            background: entry.background().cloned(),
        })
    }
}
