mod errors;
mod handle;
mod list;
mod node;

pub use errors::ListError;
pub use handle::Handle;
pub use list::{DoublyLinkedList, Iter, IterHandles};
