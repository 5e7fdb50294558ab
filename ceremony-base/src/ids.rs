use serde::{Deserialize, Serialize};
use std::fmt;

// Every id in the data model is an opaque string: ceremony and circuit
// ids are coordinator-assigned slugs, participant ids are the authenticated
// caller id, and timeout ids are store-generated.

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(s.to_owned())
            }
        }
    };
}

string_id!(CeremonyId);
string_id!(CircuitId);
string_id!(ParticipantId);
string_id!(TimeoutId);

/// Generates unique document ids for collections the store auto-assigns
/// (currently only `timeouts`). Kept as a trait so tests can substitute a
/// deterministic sequence instead of random ids.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> String;
}

/// Monotonic counter-based id source, adequate for a single-process
/// coordinator; a distributed deployment would swap this for a sharded or
/// random generator without changing anything above this trait.
pub struct CounterIdSource {
    next: std::sync::atomic::AtomicU64,
}

impl CounterIdSource {
    pub fn new() -> Self {
        CounterIdSource {
            next: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

impl Default for CounterIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for CounterIdSource {
    fn next_id(&self) -> String {
        let n = self
            .next
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        format!("timeout-{n}")
    }
}
