/// Hands out the ids that keep generated names unique within one lowering
/// context (typically one method body).
///
/// Each context owns its own counter. Lowering two methods concurrently
/// needs two counters, not a shared one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UniqueIdCounter {
    next: u32,
}

impl UniqueIdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at `first`, for contexts continuing an earlier numbering.
    pub fn starting_at(first: u32) -> Self {
        UniqueIdCounter { next: first }
    }

    /// The next id. Ids are consecutive from the starting value.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    /// The id [`UniqueIdCounter::next_id`] will return next.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_consecutive() {
        let mut ids = UniqueIdCounter::new();
        assert_eq!((ids.next_id(), ids.next_id(), ids.next_id()), (0, 1, 2));
        assert_eq!(ids.peek(), 3);

        let mut resumed = UniqueIdCounter::starting_at(7);
        assert_eq!(resumed.next_id(), 7);
    }
}
