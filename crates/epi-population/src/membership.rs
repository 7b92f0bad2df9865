//! `Membership` — the insertion-ordered set of persons inside a location.
//!
//! # Layout
//!
//! A slab of slots threaded into a doubly linked list.  Entering appends at
//! the tail and hands back a [`MemberHandle`]; leaving unlinks that slot in
//! O(1) and returns it to a free list.  Each slot carries a generation
//! counter that is bumped on removal, so a handle kept past its person's
//! departure no longer matches and is rejected instead of evicting whoever
//! reused the slot.
//!
//! Iteration always follows insertion order, independent of slot reuse.
//! The list is not random-access: the infection sampler walks it once with
//! a [`Cursor`], advancing by sorted offsets.

use epi_core::PersonId;

const NIL: u32 = u32::MAX;

/// Opaque proof of membership returned by `Location::enter`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MemberHandle {
    slot:       u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    person:     Option<PersonId>,
    prev:       u32,
    next:       u32,
}

/// Insertion-ordered membership list with O(1) handle-based removal.
#[derive(Clone, Debug)]
pub struct Membership {
    slots: Vec<Slot>,
    free:  Vec<u32>,
    head:  u32,
    tail:  u32,
    len:   usize,
}

impl Default for Membership {
    fn default() -> Self {
        Self::new()
    }
}

impl Membership {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free:  Vec::new(),
            head:  NIL,
            tail:  NIL,
            len:   0,
        }
    }

    /// Append `person` at the tail.
    pub fn insert(&mut self, person: PersonId) -> MemberHandle {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot { generation: 0, person: None, prev: NIL, next: NIL });
                (self.slots.len() - 1) as u32
            }
        };

        let tail = self.tail;
        {
            let s = &mut self.slots[slot as usize];
            s.person = Some(person);
            s.prev = tail;
            s.next = NIL;
        }
        if tail == NIL {
            self.head = slot;
        } else {
            self.slots[tail as usize].next = slot;
        }
        self.tail = slot;
        self.len += 1;

        MemberHandle { slot, generation: self.slots[slot as usize].generation }
    }

    /// Unlink the member behind `handle`.
    ///
    /// Returns `None` if the handle is stale (already removed, or the slot
    /// has since been reused).
    pub fn remove(&mut self, handle: MemberHandle) -> Option<PersonId> {
        let s = self.slots.get_mut(handle.slot as usize)?;
        if s.generation != handle.generation {
            return None;
        }
        let person = s.person.take()?;
        let (prev, next) = (s.prev, s.next);
        s.generation = s.generation.wrapping_add(1);
        s.prev = NIL;
        s.next = NIL;

        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev as usize].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next as usize].prev = prev;
        }

        self.free.push(handle.slot);
        self.len -= 1;
        Some(person)
    }

    /// The member behind `handle`, or `None` if the handle is stale.
    pub fn get(&self, handle: MemberHandle) -> Option<PersonId> {
        self.slots
            .get(handle.slot as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.person)
    }

    /// `true` if `handle` still refers to a current member.
    pub fn contains(&self, handle: MemberHandle) -> bool {
        self.get(handle).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Members in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        Iter { members: self, slot: self.head }
    }

    /// A cursor positioned on the first member.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor { members: self, slot: self.head }
    }

    fn person_at(&self, slot: u32) -> Option<PersonId> {
        if slot == NIL {
            return None;
        }
        self.slots[slot as usize].person
    }
}

// ── Traversal ─────────────────────────────────────────────────────────────────

/// Insertion-order iterator over a [`Membership`].
pub struct Iter<'a> {
    members: &'a Membership,
    slot:    u32,
}

impl Iterator for Iter<'_> {
    type Item = PersonId;

    fn next(&mut self) -> Option<PersonId> {
        let person = self.members.person_at(self.slot)?;
        self.slot = self.members.slots[self.slot as usize].next;
        Some(person)
    }
}

/// Forward-only position inside a [`Membership`].
pub struct Cursor<'a> {
    members: &'a Membership,
    slot:    u32,
}

impl Cursor<'_> {
    /// Member under the cursor, or `None` past the end.
    #[inline]
    pub fn get(&self) -> Option<PersonId> {
        self.members.person_at(self.slot)
    }

    /// Move `n` members forward.  `advance(0)` stays put.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            if self.slot == NIL {
                return;
            }
            self.slot = self.members.slots[self.slot as usize].next;
        }
    }
}
