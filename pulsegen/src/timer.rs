use std::thread::JoinHandle;
use std::time::Duration;
use tracing::debug;

use crate::Event;

/// Tick, then pause for `period`, until the receiver goes away
pub fn main(period: Duration, tx: flume::Sender<Event>) -> anyhow::Result<JoinHandle<()>> {
    let handle = std::thread::Builder::new()
        .name(String::from("pulse-timer"))
        .spawn(move || {
            while let Ok(()) = tx.send(Event::Tick) {
                std::thread::sleep(period);
            }
            debug!("generator gone, stopping timer");
        })?;
    Ok(handle)
}
