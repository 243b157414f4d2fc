use super::WorkerId;

/// Largest identifier ever stored or generated.
pub const MAX_ID: WorkerId = i64::MAX as WorkerId;

/// Process-wide monotonic source of worker identifiers.
///
/// `next` is always strictly greater than every identifier handed out or observed. Once it
/// passes [`MAX_ID`] the generator is exhausted and hands out nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: WorkerId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a fresh identifier and advances the sequence, or `None` when exhausted.
    pub fn generate(&mut self) -> Option<WorkerId> {
        let id = self.peek()?;
        self.next = id + 1;
        Some(id)
    }

    /// Marks `id` as used so it is never generated. The sequence never moves backwards.
    pub fn observe(&mut self, id: WorkerId) {
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
    }

    /// The identifier the next call to [`generate`](Self::generate) will return.
    pub fn peek(&self) -> Option<WorkerId> {
        (self.next <= MAX_ID).then_some(self.next)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
