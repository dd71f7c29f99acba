//! # Circular Lists
//!
//! Intrusive circular doubly-linked lists over pooled elements. Each element
//! stores its own `prev`/`next` handles; a [`Ring`] only owns the head and the
//! length. An element may belong to at most one ring through a given set of
//! links at a time.

use crate::pool::{Handle, Pool};

/// Previous and next links of a ring member. `None` while unlinked.
pub(crate) struct Links<T> {
    pub(crate) prev: Option<Handle<T>>,
    pub(crate) next: Option<Handle<T>>,
}

impl<T> Default for Links<T> {
    fn default() -> Self {
        Self {
            prev: None,
            next: None,
        }
    }
}

impl<T> Clone for Links<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Links<T> {}

impl<T> std::fmt::Debug for Links<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Links")
            .field("prev", &self.prev)
            .field("next", &self.next)
            .finish()
    }
}

/// Elements that carry ring links.
pub(crate) trait Linked: Sized {
    fn links(&self) -> &Links<Self>;
    fn links_mut(&mut self) -> &mut Links<Self>;
}

/// Head of a circular list of pooled elements.
pub(crate) struct Ring<T> {
    head: Option<Handle<T>>,
    len: usize,
}

impl<T> Default for Ring<T> {
    fn default() -> Self {
        Self { head: None, len: 0 }
    }
}

impl<T: Linked + Default> Ring<T> {
    #[inline]
    pub(crate) fn head(&self) -> Option<Handle<T>> {
        self.head
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Links `item` in just before the head, i.e. at the tail.
    pub(crate) fn push_back(&mut self, pool: &mut Pool<T>, item: Handle<T>) {
        match self.head {
            None => {
                *pool[item].links_mut() = Links {
                    prev: Some(item),
                    next: Some(item),
                };
                self.head = Some(item);
            }
            Some(head) => {
                let tail = pool[head].links().prev.unwrap_or(head);
                *pool[item].links_mut() = Links {
                    prev: Some(tail),
                    next: Some(head),
                };
                pool[tail].links_mut().next = Some(item);
                pool[head].links_mut().prev = Some(item);
            }
        }
        self.len += 1;
    }

    /// Links `item` in as the new head.
    pub(crate) fn push_front(&mut self, pool: &mut Pool<T>, item: Handle<T>) {
        self.push_back(pool, item);
        self.head = Some(item);
    }

    /// Unlinks `item`, which must be a member of this ring.
    pub(crate) fn unlink(&mut self, pool: &mut Pool<T>, item: Handle<T>) {
        let Links { prev, next } = *pool[item].links();
        match (prev, next) {
            (Some(prev), Some(next)) if next != item => {
                pool[prev].links_mut().next = Some(next);
                pool[next].links_mut().prev = Some(prev);
                if self.head == Some(item) {
                    self.head = Some(next);
                }
            }
            _ => self.head = None,
        }
        *pool[item].links_mut() = Links::default();
        self.len -= 1;
    }

    /// Unlinks and returns the head.
    pub(crate) fn pop_front(&mut self, pool: &mut Pool<T>) -> Option<Handle<T>> {
        let head = self.head?;
        self.unlink(pool, head);
        Some(head)
    }

    /// Iterates the members in list order starting at the head.
    pub(crate) fn iter<'p>(&self, pool: &'p Pool<T>) -> RingIter<'p, T> {
        RingIter {
            pool,
            cursor: self.head,
            remaining: self.len,
        }
    }
}

/// Iterator over the handles of a [`Ring`].
pub(crate) struct RingIter<'p, T> {
    pool: &'p Pool<T>,
    cursor: Option<Handle<T>>,
    remaining: usize,
}

impl<'p, T: Linked + Default> Iterator for RingIter<'p, T> {
    type Item = Handle<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.cursor?;
        self.remaining -= 1;
        self.cursor = self.pool[item].links().next;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
