use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ComponentId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl ObjectId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Hands out monotonically increasing ids. Owned by the engine and passed to
/// constructors; ids are never reused for the allocator's lifetime.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next_component: Cell<u64>,
    next_object: Cell<u64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn component(&self) -> ComponentId {
        let id = self.next_component.get();
        self.next_component.set(id + 1);
        ComponentId(id)
    }

    pub fn object(&self) -> ObjectId {
        let id = self.next_object.get();
        self.next_object.set(id + 1);
        ObjectId(id)
    }
}
