use crate::{errors::ListError, handle::Handle, node::Node};
use std::fmt;

// Sentinel slots, allocated once in `new` and never freed.
const HEAD: u32 = 0;
const TAIL: u32 = 1;

/// A doubly linked list with stable handles, backed by a slot arena.
///
/// The head and tail sentinels bound the live chain at all times, so every
/// insertion reduces to [`link_between`](DoublyLinkedList::push_back) splicing
/// a node between two existing neighbors, with no empty-list or boundary
/// special cases. Removed slots are recycled through a free stack; each slot
/// carries a generation that is bumped on removal, so a stale [`Handle`] is
/// rejected in O(1) even after its slot has been reused.
#[derive(Debug)]
pub struct DoublyLinkedList<T> {
    slots: Vec<Node<T>>,
    free: Vec<u32>,
    len: usize,
}

/// Iterator over values, front to back.
pub struct Iter<'a, T> {
    list: &'a DoublyLinkedList<T>,
    cursor: u32,
}

/// Iterator over `(Handle, &T)`, front to back.
pub struct IterHandles<'a, T> {
    list: &'a DoublyLinkedList<T>,
    cursor: u32,
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyLinkedList<T> {
    /// Create a new empty list with its head and tail sentinels linked to
    /// each other.
    pub fn new() -> Self {
        // Sentinels carry no payload (`value: None`)
        let head = Node {
            generation: 0,
            prev: None,
            next: Some(TAIL),
            value: None,
        };
        let tail = Node {
            generation: 0,
            prev: Some(HEAD),
            next: None,
            value: None,
        };
        Self {
            slots: vec![head, tail],
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live elements
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the list empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the first element, or `None` if the list is empty.
    pub fn first(&self) -> Option<Handle> {
        if self.len == 0 {
            return None;
        }
        Some(self.handle_for(self.forward_of(HEAD)))
    }

    /// Handle of the last element, or `None` if the list is empty.
    pub fn last(&self) -> Option<Handle> {
        if self.len == 0 {
            return None;
        }
        Some(self.handle_for(self.backward_of(TAIL)))
    }

    /// Handle of the element after `handle`, or `Ok(None)` if `handle` is the
    /// last element.
    ///
    /// Error if `handle` is [`Handle::NULL`] or no longer in the list.
    pub fn after(&self, handle: Handle) -> Result<Option<Handle>, ListError> {
        let ix = self.require_live(handle)?;
        let next = self.forward_of(ix);
        if next == TAIL {
            Ok(None)
        } else {
            Ok(Some(self.handle_for(next)))
        }
    }

    /// Handle of the element before `handle`, or `Ok(None)` if `handle` is
    /// the first element.
    ///
    /// Error if `handle` is [`Handle::NULL`] or no longer in the list.
    pub fn before(&self, handle: Handle) -> Result<Option<Handle>, ListError> {
        let ix = self.require_live(handle)?;
        let prev = self.backward_of(ix);
        if prev == HEAD {
            Ok(None)
        } else {
            Ok(Some(self.handle_for(prev)))
        }
    }

    /// Find the first element equal to `value`, scanning front to back. O(n).
    pub fn find(&self, value: &T) -> Option<Handle>
    where
        T: PartialEq,
    {
        let mut ix = self.forward_of(HEAD);
        while ix != TAIL {
            let node = &self.slots[ix as usize];
            if node.value.as_ref() == Some(value) {
                return Some(self.handle_for(ix));
            }
            ix = self.forward_of(ix);
        }
        None
    }

    /// Push a value to the front (after HEAD). Returns the new element handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let next = self.forward_of(HEAD);
        self.link_between(value, HEAD, next)
    }

    /// Push a value to the back (before TAIL). Returns the new element handle.
    pub fn push_back(&mut self, value: T) -> Handle {
        let prev = self.backward_of(TAIL);
        self.link_between(value, prev, TAIL)
    }

    /// Insert a value **before** `anchor`. Returns the new element handle.
    ///
    /// Error if `anchor` is [`Handle::NULL`] or no longer in the list; the
    /// list is unchanged on failure.
    pub fn insert_before(&mut self, anchor: Handle, value: T) -> Result<Handle, ListError> {
        let ix = self.require_live(anchor)?;
        let prev = self.backward_of(ix);
        Ok(self.link_between(value, prev, ix))
    }

    /// Insert a value **after** `anchor`. Returns the new element handle.
    ///
    /// Error if `anchor` is [`Handle::NULL`] or no longer in the list; the
    /// list is unchanged on failure.
    pub fn insert_after(&mut self, anchor: Handle, value: T) -> Result<Handle, ListError> {
        let ix = self.require_live(anchor)?;
        let next = self.forward_of(ix);
        Ok(self.link_between(value, ix, next))
    }

    /// Remove an element by handle, returning its value.
    ///
    /// The handle (and every copy of it) is severed: any later call with it
    /// fails with [`ListError::NotInList`], including after the slot is
    /// reused by a new insertion.
    pub fn remove(&mut self, handle: Handle) -> Result<T, ListError> {
        let ix = self.require_live(handle)?;
        Ok(self.unlink(ix))
    }

    /// Remove the first element, returning its value.
    ///
    /// Error if the list is empty.
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        if self.len == 0 {
            return Err(ListError::Empty);
        }
        let ix = self.forward_of(HEAD);
        Ok(self.unlink(ix))
    }

    /// Remove the last element, returning its value.
    ///
    /// Error if the list is empty.
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        if self.len == 0 {
            return Err(ListError::Empty);
        }
        let ix = self.backward_of(TAIL);
        Ok(self.unlink(ix))
    }

    /// Remove all elements.
    ///
    /// The sentinels persist and the list remains usable; every outstanding
    /// handle is severed exactly as by [`remove`](DoublyLinkedList::remove).
    pub fn clear(&mut self) {
        let mut ix = self.forward_of(HEAD);
        while ix != TAIL {
            let next = self.forward_of(ix);
            self.retire(ix);
            ix = next;
        }
        self.slots[HEAD as usize].next = Some(TAIL);
        self.slots[TAIL as usize].prev = Some(HEAD);
        self.len = 0;
    }

    /// Get a reference by handle (if live).
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.slot as usize)
            .filter(|n| n.generation == handle.generation)
            .and_then(|n| n.value.as_ref())
    }

    /// Get a mutable reference by handle (if live).
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.slot as usize)
            .filter(|n| n.generation == handle.generation)
            .and_then(|n| n.value.as_mut())
    }

    /// Iterate values front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            cursor: self.forward_of(HEAD),
            list: self,
        }
    }

    /// Iterate `(Handle, &T)` front to back.
    pub fn iter_handles(&self) -> IterHandles<'_, T> {
        IterHandles {
            cursor: self.forward_of(HEAD),
            list: self,
        }
    }

    fn handle_for(&self, ix: u32) -> Handle {
        Handle {
            slot: ix,
            generation: self.slots[ix as usize].generation,
        }
    }

    fn forward_of(&self, ix: u32) -> u32 {
        self.slots[ix as usize].next.expect("non-tail node has next")
    }

    fn backward_of(&self, ix: u32) -> u32 {
        self.slots[ix as usize].prev.expect("non-head node has prev")
    }

    fn require_live(&self, h: Handle) -> Result<u32, ListError> {
        if h.is_null() {
            return Err(ListError::NullHandle);
        }
        match self.slots.get(h.slot as usize) {
            Some(n) if n.is_live() && n.generation == h.generation => Ok(h.slot),
            _ => Err(ListError::NotInList),
        }
    }

    /// The one splice primitive: every insertion variant reduces to this.
    fn link_between(&mut self, value: T, prev: u32, next: u32) -> Handle {
        debug_assert_eq!(self.slots[prev as usize].next, Some(next));
        debug_assert_eq!(self.slots[next as usize].prev, Some(prev));

        let ix = match self.free.pop() {
            Some(ix) => {
                let node = &mut self.slots[ix as usize];
                node.prev = Some(prev);
                node.next = Some(next);
                node.value = Some(value);
                ix
            }
            None => {
                let ix = self.slots.len() as u32;
                self.slots.push(Node {
                    generation: 0,
                    prev: Some(prev),
                    next: Some(next),
                    value: Some(value),
                });
                ix
            }
        };

        self.slots[prev as usize].next = Some(ix);
        self.slots[next as usize].prev = Some(ix);
        self.len += 1;
        self.handle_for(ix)
    }

    /// The one unsplice primitive: every removal variant reduces to this.
    fn unlink(&mut self, ix: u32) -> T {
        let prev = self.backward_of(ix);
        let next = self.forward_of(ix);

        self.slots[prev as usize].next = Some(next);
        self.slots[next as usize].prev = Some(prev);
        self.len -= 1;
        self.retire(ix)
    }

    /// Sever a node's links, bump its generation, and recycle its slot.
    fn retire(&mut self, ix: u32) -> T {
        let node = &mut self.slots[ix as usize];
        debug_assert!(node.is_live(), "retire called on non-live slot");
        node.prev = None;
        node.next = None;
        node.generation = node.generation.wrapping_add(1);
        self.free.push(ix);
        node.value.take().expect("live node has value")
    }
}

impl<T: fmt::Display> fmt::Display for DoublyLinkedList<T> {
    /// Each node renders as `{P-(V)-N}` where P/N are the neighbor values, or
    /// `XXX` when the neighbor is a sentinel.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            return f.write_str("[]");
        }
        f.write_str("[")?;
        let mut ix = self.forward_of(HEAD);
        while ix != TAIL {
            let prev = self.backward_of(ix);
            let next = self.forward_of(ix);

            f.write_str("{")?;
            match self.slots[prev as usize].value.as_ref() {
                Some(v) => write!(f, "{}", v)?,
                None => f.write_str("XXX")?,
            }
            match self.slots[ix as usize].value.as_ref() {
                Some(v) => write!(f, "-({})-", v)?,
                None => unreachable!("live chain holds only live nodes"),
            }
            match self.slots[next as usize].value.as_ref() {
                Some(v) => write!(f, "{}", v)?,
                None => f.write_str("XXX")?,
            }
            f.write_str("}")?;

            if next != TAIL {
                f.write_str(",")?;
            }
            ix = next;
        }
        f.write_str("]")
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let node = &self.list.slots[self.cursor as usize];
        self.cursor = node.next.expect("live node has next");
        node.value.as_ref()
    }
}

impl<'a, T> Iterator for IterHandles<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let ix = self.cursor;
        let node = &self.list.slots[ix as usize];
        self.cursor = node.next.expect("live node has next");
        node.value.as_ref().map(|v| (self.list.handle_for(ix), v))
    }
}
