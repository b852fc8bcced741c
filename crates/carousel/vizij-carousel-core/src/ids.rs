//! Tickets identifying transitions.
//!
//! Every started transition gets a fresh ticket. Completions carry the ticket
//! back, so a completion for a superseded run can be recognised and dropped.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransitionTicket(pub u32);

/// Monotonic ticket allocator.
#[derive(Default, Debug)]
pub struct TicketAllocator {
    next: u32,
}

impl TicketAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> TransitionTicket {
        let t = TransitionTicket(self.next);
        self.next = self.next.wrapping_add(1);
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = TicketAllocator::new();
        assert_eq!(alloc.alloc(), TransitionTicket(0));
        assert_eq!(alloc.alloc(), TransitionTicket(1));
        assert_ne!(alloc.alloc(), TransitionTicket(1));
    }
}
