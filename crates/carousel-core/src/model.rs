use serde_json::{Map, Value};

use crate::entry::{EntryState, ImageEntry};
use crate::error::CarouselError;
use crate::handle::EntryHandle;

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entry: Option<ImageEntry>,
}

/// Ordered carousel items with stable handles.
///
/// Storage is an arena of slots; `order` holds the handles in presentation
/// order (left to right). The trailing "add image" control is not part of the
/// model, so the last element of `order` is always the last real entry.
#[derive(Debug, Clone, Default)]
pub struct CarouselModel {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<EntryHandle>,
}

impl CarouselModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a model from previously saved entries, one entry per record.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ImageEntry>,
    {
        let mut model = Self::new();
        for entry in entries {
            model.insert(entry);
        }
        model
    }

    /// Seed a model from raw JSON records. Malformed records are accepted as
    /// entries with an empty `url`.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::from_entries(records.into_iter().map(ImageEntry::from_record))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Handles in presentation order.
    pub fn handles(&self) -> &[EntryHandle] {
        &self.order
    }

    /// Entries in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryHandle, &ImageEntry)> + '_ {
        self.order
            .iter()
            .filter_map(move |&h| self.get(h).map(|e| (h, e)))
    }

    pub fn get(&self, handle: EntryHandle) -> Option<&ImageEntry> {
        self.slots
            .get(handle.slot as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.entry.as_ref())
    }

    fn get_mut(&mut self, handle: EntryHandle) -> Result<&mut ImageEntry, CarouselError> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.entry.as_mut())
            .ok_or(CarouselError::NotFound(handle))
    }

    pub fn contains(&self, handle: EntryHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Current position of an entry, if it is still live.
    pub fn position(&self, handle: EntryHandle) -> Option<usize> {
        if !self.contains(handle) {
            return None;
        }
        self.order.iter().position(|&h| h == handle)
    }

    pub fn state(&self, handle: EntryHandle) -> EntryState {
        self.get(handle)
            .map(ImageEntry::state)
            .unwrap_or(EntryState::Removed)
    }

    /// Append an empty entry for an upload whose result is not known yet.
    pub fn append_placeholder(&mut self) -> EntryHandle {
        self.insert(ImageEntry::default())
    }

    fn insert(&mut self, entry: ImageEntry) -> EntryHandle {
        let handle = match self.free.pop() {
            Some(slot) => {
                let s = &mut self.slots[slot as usize];
                s.entry = Some(entry);
                EntryHandle {
                    slot,
                    generation: s.generation,
                }
            }
            None => {
                let slot = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    entry: Some(entry),
                });
                EntryHandle {
                    slot,
                    generation: 0,
                }
            }
        };
        self.order.push(handle);
        handle
    }

    /// Fill in (or overwrite) an entry from an upload result.
    ///
    /// `caption: None` keeps whatever caption the entry already has. Extra
    /// fields are replaced wholesale.
    pub fn complete_entry(
        &mut self,
        handle: EntryHandle,
        url: impl Into<String>,
        caption: Option<String>,
        extra: Map<String, Value>,
    ) -> Result<(), CarouselError> {
        let url = url.into();
        let entry = self.get_mut(handle)?;
        if url.is_empty() {
            return Err(CarouselError::UploadFailed(
                "upload result is missing url".to_string(),
            ));
        }

        entry.url = url;
        if let Some(caption) = caption {
            entry.caption = caption;
        }
        entry.set_extra(extra);
        Ok(())
    }

    pub fn set_caption(
        &mut self,
        handle: EntryHandle,
        caption: impl Into<String>,
    ) -> Result<(), CarouselError> {
        self.get_mut(handle)?.caption = caption.into();
        Ok(())
    }

    /// Swap with the left neighbour. Returns `Ok(false)` when already first.
    pub fn move_left(&mut self, handle: EntryHandle) -> Result<bool, CarouselError> {
        let idx = self
            .position(handle)
            .ok_or(CarouselError::NotFound(handle))?;
        if idx == 0 {
            return Ok(false);
        }
        self.order.swap(idx, idx - 1);
        Ok(true)
    }

    /// Swap with the right neighbour. Returns `Ok(false)` when already the
    /// last real entry.
    pub fn move_right(&mut self, handle: EntryHandle) -> Result<bool, CarouselError> {
        let idx = self
            .position(handle)
            .ok_or(CarouselError::NotFound(handle))?;
        if idx + 1 >= self.order.len() {
            return Ok(false);
        }
        self.order.swap(idx, idx + 1);
        Ok(true)
    }

    /// Delete an entry, keeping the relative order of the rest.
    pub fn remove(&mut self, handle: EntryHandle) -> Result<ImageEntry, CarouselError> {
        let idx = self
            .position(handle)
            .ok_or(CarouselError::NotFound(handle))?;
        let slot = &mut self.slots[handle.slot as usize];
        let entry = slot.entry.take().ok_or(CarouselError::NotFound(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.slot);
        self.order.remove(idx);
        Ok(entry)
    }

    /// Persisted form: every ready entry, in order. Pending entries are left out.
    pub fn serialize(&self) -> Vec<ImageEntry> {
        self.iter()
            .map(|(_, e)| e)
            .filter(|e| e.is_ready())
            .cloned()
            .collect()
    }
}
