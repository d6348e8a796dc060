use kite_core::{
    AssetLoader, ComponentId, EngineError, IdAllocator, InputState, Rect, RenderSurface, Result,
    Signal, SignalKind, SignalSlot,
};

use crate::component::ComponentRef;
use crate::registry::Registered;

/// A delivery to a component that was running a callback when it was
/// notified. Delivered once that callback returns.
pub(crate) struct PendingNotify {
    entry: Registered,
    sender: Option<ComponentId>,
    message: String,
}

/// The engine as seen from inside a component callback.
///
/// Built by the frame loop from disjoint borrows of the game's fields, so a
/// component can draw, load assets, raise signals and notify its peers while
/// the loop holds the registry.
pub struct Context<'a> {
    surface: &'a mut dyn RenderSurface,
    assets: &'a dyn AssetLoader,
    input: &'a InputState,
    ids: &'a IdAllocator,
    signal: &'a mut SignalSlot,
    status: &'a mut String,
    registry: &'a [Registered],
    deferred: &'a mut Vec<ComponentRef>,
    pending: &'a mut Vec<PendingNotify>,
}

impl<'a> Context<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        surface: &'a mut dyn RenderSurface,
        assets: &'a dyn AssetLoader,
        input: &'a InputState,
        ids: &'a IdAllocator,
        signal: &'a mut SignalSlot,
        status: &'a mut String,
        registry: &'a [Registered],
        deferred: &'a mut Vec<ComponentRef>,
        pending: &'a mut Vec<PendingNotify>,
    ) -> Self {
        Self {
            surface,
            assets,
            input,
            ids,
            signal,
            status,
            registry,
            deferred,
            pending,
        }
    }

    /// A shorter-lived view of the same engine, handed to nested callbacks.
    pub fn reborrow(&mut self) -> Context<'_> {
        Context {
            surface: &mut *self.surface,
            assets: self.assets,
            input: self.input,
            ids: self.ids,
            signal: &mut *self.signal,
            status: &mut *self.status,
            registry: self.registry,
            deferred: &mut *self.deferred,
            pending: &mut *self.pending,
        }
    }

    pub fn surface(&mut self) -> &mut dyn RenderSurface {
        &mut *self.surface
    }

    pub fn assets(&self) -> &dyn AssetLoader {
        self.assets
    }

    pub fn input(&self) -> &InputState {
        self.input
    }

    pub fn ids(&self) -> &IdAllocator {
        self.ids
    }

    pub fn window_rect(&self) -> Rect {
        self.surface.window_rect()
    }

    pub fn raise_signal(&mut self, kind: SignalKind, message: impl Into<String>) {
        self.signal.raise(Signal::new(kind, message));
    }

    pub fn signal_pending(&self) -> bool {
        self.signal.is_pending()
    }

    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        *self.status = status.into();
    }

    /// Delivers `message` to the components selected by `target`: every
    /// component but the sender for `"all"`, otherwise every component
    /// named `target`. The first failing delivery aborts the pass.
    ///
    /// A recipient that is itself running a callback (usually the caller)
    /// gets the message right after that callback returns.
    pub fn notify(
        &mut self,
        sender: Option<ComponentId>,
        target: &str,
        message: &str,
    ) -> Result<()> {
        let registry = self.registry;
        for entry in registry.iter().filter(|e| e.receives(sender, target)) {
            if !self.deliver(entry, sender, message)? {
                log::trace!("{} is busy; queued '{}'", entry.info, message);
                self.pending.push(PendingNotify {
                    entry: entry.clone(),
                    sender,
                    message: message.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Delivers queued notifications. Called by the frame loop once no
    /// component callback is on the stack.
    pub(crate) fn flush_notifications(&mut self) -> Result<()> {
        while !self.pending.is_empty() {
            for queued in std::mem::take(&mut *self.pending) {
                if !self.deliver(&queued.entry, queued.sender, &queued.message)? {
                    return Err(EngineError::NotifyDispatch(format!(
                        "{} cannot receive '{}' while it is borrowed",
                        queued.entry.info, queued.message
                    )));
                }
            }
        }
        Ok(())
    }

    /// Returns `false` without delivering when `entry` is borrowed.
    fn deliver(
        &mut self,
        entry: &Registered,
        sender: Option<ComponentId>,
        message: &str,
    ) -> Result<bool> {
        let Ok(mut component) = entry.component.try_borrow_mut() else {
            return Ok(false);
        };
        log::trace!("Notify {} <- '{}'", entry.info, message);
        component
            .on_notify(&mut self.reborrow(), sender, message)
            .map_err(|e| match e {
                EngineError::NotifyDispatch(_) => e,
                other => EngineError::NotifyDispatch(other.to_string()),
            })?;
        Ok(true)
    }

    /// Queues a component for registration at the end of the current frame.
    pub fn add_component(&mut self, component: ComponentRef) {
        self.deferred.push(component);
    }
}
