//! Ordered component registry.
//!
//! Each entry caches the component's [`ComponentInfo`] at registration, so
//! recipients of a notification can be selected without borrowing the
//! components themselves (the sender is usually mid-callback and already
//! mutably borrowed).

use std::cell::RefMut;

use kite_core::{ComponentId, EngineError, Result};

use crate::component::{ComponentInfo, ComponentRef, GameComponent};

/// Notification target that reaches every component except the sender.
pub const ALL: &str = "all";

#[derive(Clone)]
pub struct Registered {
    pub info: ComponentInfo,
    pub component: ComponentRef,
}

impl Registered {
    pub fn new(component: ComponentRef) -> Result<Self> {
        let info = component
            .try_borrow()
            .map_err(|_| {
                EngineError::Component("cannot register a component that is in use".to_string())
            })?
            .info()
            .clone();
        Ok(Self { info, component })
    }

    /// Whether a notification from `sender` addressed to `target` is
    /// delivered to this entry.
    pub fn receives(&self, sender: Option<ComponentId>, target: &str) -> bool {
        if target == ALL {
            sender != Some(self.info.id())
        } else {
            self.info.name() == Some(target)
        }
    }

    pub fn borrow_mut(&self) -> Result<RefMut<'_, dyn GameComponent + 'static>> {
        self.component
            .try_borrow_mut()
            .map_err(|_| EngineError::Component(format!("{} is already in use", self.info)))
    }
}

#[derive(Default)]
pub struct Registry {
    entries: Vec<Registered>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `component`. Ids must be unique across the registry.
    pub fn push(&mut self, component: ComponentRef) -> Result<Registered> {
        let entry = Registered::new(component)?;
        if self.entries.iter().any(|e| e.info.id() == entry.info.id()) {
            return Err(EngineError::Component(format!(
                "{} is already registered",
                entry.info
            )));
        }
        log::debug!("Registered {}", entry.info);
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Copy of the current entries for one pass. Registrations made during
    /// the pass do not show up in it.
    pub fn snapshot(&self) -> Vec<Registered> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Registered> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use kite_core::IdAllocator;

    struct Named(ComponentInfo);

    impl GameComponent for Named {
        fn info(&self) -> &ComponentInfo {
            &self.0
        }
    }

    fn component(info: ComponentInfo) -> ComponentRef {
        Rc::new(RefCell::new(Named(info)))
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let ids = IdAllocator::new();
        let other = IdAllocator::new();
        let mut registry = Registry::new();
        registry
            .push(component(ComponentInfo::named(ids.component(), "first")))
            .expect("first");
        let err = registry
            .push(component(ComponentInfo::named(other.component(), "second")))
            .err()
            .expect("same id from a second allocator");
        assert!(matches!(err, EngineError::Component(ref msg) if msg.contains("already registered")));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn broadcast_skips_only_the_sender() {
        let ids = IdAllocator::new();
        let a = Registered::new(component(ComponentInfo::new(ids.component()))).expect("a");
        let b = Registered::new(component(ComponentInfo::new(ids.component()))).expect("b");
        assert!(!a.receives(Some(a.info.id()), ALL));
        assert!(b.receives(Some(a.info.id()), ALL));
        assert!(a.receives(None, ALL));
    }

    #[test]
    fn targeted_delivery_matches_name() {
        let ids = IdAllocator::new();
        let score = Registered::new(component(ComponentInfo::named(ids.component(), "score")))
            .expect("score");
        let anonymous =
            Registered::new(component(ComponentInfo::new(ids.component()))).expect("anonymous");
        assert!(score.receives(None, "score"));
        assert!(score.receives(Some(score.info.id()), "score"));
        assert!(!score.receives(None, "hud"));
        assert!(!anonymous.receives(None, "score"));
    }

    #[test]
    fn snapshot_is_unaffected_by_later_pushes() {
        let ids = IdAllocator::new();
        let mut registry = Registry::new();
        registry
            .push(component(ComponentInfo::new(ids.component())))
            .expect("first");
        let snapshot = registry.snapshot();
        registry
            .push(component(ComponentInfo::new(ids.component())))
            .expect("second");
        assert_eq!(snapshot.len(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn borrowed_component_cannot_be_registered() {
        let ids = IdAllocator::new();
        let c = component(ComponentInfo::new(ids.component()));
        let _guard = c.borrow_mut();
        let err = Registry::new().push(c.clone()).err().expect("in use");
        assert!(matches!(err, EngineError::Component(_)));
    }
}
