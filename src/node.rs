#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) generation: u32,
    pub(crate) prev: Option<u32>,
    pub(crate) next: Option<u32>,
    pub(crate) value: Option<T>,
}

impl<T> Node<T> {
    /// Is this node live (not a sentinel, not removed, not a free slot)?
    pub(crate) fn is_live(&self) -> bool {
        self.value.is_some()
    }
}
