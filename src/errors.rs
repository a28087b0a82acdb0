/// Errors that can occur when operating on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The null handle was passed where a live handle is required.
    NullHandle,

    /// The handle refers to a node that is not part of this list: it was
    /// removed, it names a sentinel, or it never came from this list.
    NotInList,

    /// A removal was requested on an empty list.
    Empty,
}

impl core::fmt::Display for ListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListError::NullHandle => f.write_str("null handle"),
            ListError::NotInList => f.write_str("handle is no longer in the list"),
            ListError::Empty => f.write_str("list is empty"),
        }
    }
}

impl std::error::Error for ListError {}
