//! At-most-one in-flight execution per request fingerprint.
//!
//! The first caller for a key becomes the leader and runs the work. Callers
//! that arrive while it runs become followers and receive a clone of the
//! leader's result. If the leader is dropped before completing, followers
//! observe a closed channel.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use doppelcheck_types::Fingerprint;
use tokio::sync::broadcast;

pub struct SingleFlight<T: Clone> {
    inflight: Mutex<HashMap<Fingerprint, broadcast::Sender<T>>>,
}

/// Outcome of [`SingleFlight::admit`].
pub enum Admission<'a, T: Clone> {
    Leader(LeaderGuard<'a, T>),
    Follower(broadcast::Receiver<T>),
}

/// Held by the leader. Complete it to publish the result; drop it to abandon.
pub struct LeaderGuard<'a, T: Clone> {
    flight: &'a SingleFlight<T>,
    key: Fingerprint,
    sender: Option<broadcast::Sender<T>>,
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            inflight: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<Fingerprint, broadcast::Sender<T>>> {
        // The map stays consistent even if a holder panicked.
        self.inflight.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Become the leader for `key`, or subscribe to the current leader.
    pub fn admit(&self, key: Fingerprint) -> Admission<'_, T> {
        let mut entries = self.entries();
        if let Some(sender) = entries.get(&key) {
            return Admission::Follower(sender.subscribe());
        }
        let (sender, _) = broadcast::channel(1);
        entries.insert(key, sender.clone());
        Admission::Leader(LeaderGuard {
            flight: self,
            key,
            sender: Some(sender),
        })
    }

    /// Number of keys currently led.
    pub fn in_flight(&self) -> usize {
        self.entries().len()
    }
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> LeaderGuard<'_, T> {
    pub fn key(&self) -> &Fingerprint {
        &self.key
    }

    /// Release the key and hand `value` to every follower.
    pub fn complete(mut self, value: T) {
        if let Some(sender) = self.sender.take() {
            self.flight.entries().remove(&self.key);
            // No followers is fine.
            let _ = sender.send(value);
        }
    }
}

impl<T: Clone> Drop for LeaderGuard<'_, T> {
    fn drop(&mut self) {
        if self.sender.take().is_some() {
            self.flight.entries().remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doppelcheck_types::Hash256;

    fn key(b: u8) -> Fingerprint {
        Hash256::new([b; 32])
    }

    #[tokio::test]
    async fn follower_receives_leader_result() {
        let flight = SingleFlight::<u32>::new();
        let leader = match flight.admit(key(1)) {
            Admission::Leader(g) => g,
            Admission::Follower(_) => panic!("first caller must lead"),
        };
        let mut rx = match flight.admit(key(1)) {
            Admission::Follower(rx) => rx,
            Admission::Leader(_) => panic!("second caller must follow"),
        };
        assert_eq!(flight.in_flight(), 1);
        leader.complete(42);
        assert_eq!(rx.recv().await.unwrap(), 42);
        assert_eq!(flight.in_flight(), 0);
    }

    #[tokio::test]
    async fn dropped_leader_closes_followers() {
        let flight = SingleFlight::<u32>::new();
        let leader = flight.admit(key(2));
        let mut rx = match flight.admit(key(2)) {
            Admission::Follower(rx) => rx,
            Admission::Leader(_) => panic!("second caller must follow"),
        };
        drop(leader);
        assert!(rx.recv().await.is_err());
        assert!(matches!(flight.admit(key(2)), Admission::Leader(_)));
    }

    #[test]
    fn distinct_keys_lead_independently() {
        let flight = SingleFlight::<u32>::new();
        let a = flight.admit(key(3));
        let b = flight.admit(key(4));
        assert!(matches!(a, Admission::Leader(_)));
        assert!(matches!(b, Admission::Leader(_)));
        assert_eq!(flight.in_flight(), 2);
    }
}
