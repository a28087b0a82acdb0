/// Opaque position token for a list node.
///
/// A handle stays valid until its node is removed from the list. Removal bumps
/// the slot's generation, so a handle held across a removal no longer matches
/// even if the slot is later reused for a new node. Equality means "same slot,
/// same allocation".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl Handle {
    /// The absent handle. Passing it to any operation that requires a live
    /// handle fails with [`ListError::NullHandle`](crate::ListError::NullHandle).
    pub const NULL: Handle = Handle {
        slot: u32::MAX,
        generation: u32::MAX,
    };

    /// Is this the null handle?
    pub fn is_null(&self) -> bool {
        self.slot == u32::MAX
    }

    /// Returns the raw slot index for debugging or external maps.
    pub fn as_raw(&self) -> usize {
        self.slot as usize
    }
}
