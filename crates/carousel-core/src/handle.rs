use std::fmt;

/// Stable identity for a carousel entry.
///
/// Points at an arena slot plus the slot's generation at insertion time, so a
/// handle keeps resolving to the same entry across reorders and stops
/// resolving once that entry is removed, even if the slot is reused later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryHandle {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl EntryHandle {
    pub fn slot(self) -> u32 {
        self.slot
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EntryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry#{}.{}", self.slot, self.generation)
    }
}
