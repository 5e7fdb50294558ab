//! Process entrypoint: installs the global tracing subscriber, wires the
//! in-memory store and the system clock/id source, and runs the eviction
//! scheduler loop. The RPC surface (`ceremony::dispatch`) is a library
//! function meant to be called from whatever transport a deployment picks;
//! this binary only owns the scheduler side of the process.

use ceremony_base::{CounterIdSource, SystemClock};
use ceremony_core::SchedulerConfig;
use ceremony_store::MemStore;

fn main() {
    tracing_subscriber::fmt::init();

    let store = MemStore::new();
    let clock = SystemClock;
    let id_source = CounterIdSource::new();

    tracing::info!("ceremony coordination core starting eviction scheduler");
    ceremony::run_scheduler_loop(&store, &clock, &id_source, SchedulerConfig::default());
}
