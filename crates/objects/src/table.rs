use std::marker::PhantomData;

use softgpu_common::{EMPTY_ID, GpuError, GpuResult, Handle, ObjectId};

/// Arena of objects addressed by reusable integer handles.
///
/// Slots live in a dense vector; deleting an object empties its slot and
/// pushes the handle onto a free list. Creation pops the free list first
/// (most recently deleted handle first) and only grows the vector when the
/// list is empty.
#[derive(Debug, Clone)]
pub struct ObjectTable<H, T> {
    slots: Vec<Option<T>>,
    free: Vec<ObjectId>,
    _handle: PhantomData<H>,
}

impl<H, T> Default for ObjectTable<H, T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            _handle: PhantomData,
        }
    }
}

impl<H: Handle, T> ObjectTable<H, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` and return its handle.
    ///
    /// # Panics
    ///
    /// Panics when every handle below the sentinel is live.
    pub fn insert(&mut self, value: T) -> H {
        if let Some(id) = self.free.pop() {
            self.slots[id as usize] = Some(value);
            return H::from_raw(id);
        }
        let Some(id) = fresh_id(self.slots.len()) else {
            panic!("object table exhausted at {} live handles", self.slots.len());
        };
        self.slots.push(Some(value));
        H::from_raw(id)
    }

    /// Remove the object, returning it and recycling its handle.
    pub fn remove(&mut self, handle: H) -> GpuResult<T> {
        let value = self
            .slot_mut(handle)
            .and_then(Option::take)
            .ok_or_else(|| GpuError::invalid(handle))?;
        self.free.push(handle.raw());
        Ok(value)
    }

    /// False for the sentinel, for ids past the end and for empty slots.
    pub fn contains(&self, handle: H) -> bool {
        self.get(handle).is_ok()
    }

    pub fn get(&self, handle: H) -> GpuResult<&T> {
        if handle.raw() == EMPTY_ID {
            return Err(GpuError::invalid(handle));
        }
        self.slots
            .get(handle.raw() as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| GpuError::invalid(handle))
    }

    pub fn get_mut(&mut self, handle: H) -> GpuResult<&mut T> {
        self.slot_mut(handle)
            .and_then(Option::as_mut)
            .ok_or_else(|| GpuError::invalid(handle))
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live objects in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (H::from_raw(i as ObjectId), v)))
    }

    fn slot_mut(&mut self, handle: H) -> Option<&mut Option<T>> {
        if handle.raw() == EMPTY_ID {
            return None;
        }
        self.slots.get_mut(handle.raw() as usize)
    }
}

/// Handle for a slot appended at index `len`, if it is representable and
/// not the sentinel.
fn fresh_id(len: usize) -> Option<ObjectId> {
    ObjectId::try_from(len).ok().filter(|&id| id != EMPTY_ID)
}
