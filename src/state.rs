/// A component-local piece of state with an explicit update contract.
///
/// Only the owning component writes a slot, and only through [`set`](Self::set)
/// or [`update`](Self::update). Every write that actually changes the value
/// bumps [`version`](Self::version), which is how hosts and tests tell that a
/// write happened without diffing the contents.
#[derive(Debug, Clone, Default)]
pub struct StateSlot<T> {
    value: T,
    version: u64,
}

impl<T> StateSlot<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value)
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl<T: Clone> StateSlot<T> {
    pub fn get(&self) -> T {
        self.value.clone()
    }
}

impl<T: PartialEq> StateSlot<T> {
    /// Sets the slot's value, only counting a write if the value actually changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }
}

impl<T: PartialEq + Clone> StateSlot<T> {
    /// Updates the slot's value using a closure, only counting a write if the value changed.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let old_value = self.value.clone();
        f(&mut self.value);
        if self.value != old_value {
            self.version += 1;
            true
        } else {
            false
        }
    }
}
