//! Events emitted after each committed ledger operation.

use ballot_types::VoterAddress;

/// A committed state transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BallotEvent {
    /// `voter` received weight 1 from the chairperson.
    Enrolled { voter: VoterAddress },
    /// `from` handed `weight` to the resolved chain end `to`.
    ///
    /// `applied_to` is the proposal that received the weight immediately
    /// because `to` had already voted; `None` means `to` now holds it.
    Delegated {
        from: VoterAddress,
        to: VoterAddress,
        weight: u64,
        applied_to: Option<usize>,
    },
    /// `voter` cast `weight` for `proposal`.
    Voted {
        voter: VoterAddress,
        proposal: usize,
        weight: u64,
    },
}

/// Synchronous fan-out of ledger events.
///
/// Listeners run inline on the thread that committed the operation, while
/// any lock around the ledger is still held.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&BallotEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&BallotEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &BallotEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn every_listener_sees_every_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            bus.subscribe(Box::new(move |e| seen.lock().unwrap().push(e.clone())));
        }

        let voter = VoterAddress::new([7; 20]);
        bus.emit(&BallotEvent::Enrolled { voter });
        assert_eq!(
            *seen.lock().unwrap(),
            vec![BallotEvent::Enrolled { voter }, BallotEvent::Enrolled { voter }]
        );
    }

    #[test]
    fn emit_without_listeners_is_fine() {
        EventBus::new().emit(&BallotEvent::Voted {
            voter: VoterAddress::new([1; 20]),
            proposal: 0,
            weight: 1,
        });
    }
}
