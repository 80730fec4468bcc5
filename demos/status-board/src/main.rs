//! A terminal mock of a device-status dashboard: one signal selects a
//! telemetry channel, a resource fetches the snapshot for it, and an effect
//! re-renders on every record transition.

use anyhow::Result;
use brook_core::prelude::*;
use log::info;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
enum FetchError {
    #[error("channel {0} is offline")]
    Offline(usize),
}

#[derive(Clone, Debug)]
struct StatusSnapshot {
    channel: String,
    reading: f64,
    unit: &'static str,
}

// Stand-in for the backend's status endpoint. Channel 2 is wired to fail so
// the error path shows up on the board.
fn fetch_status(idx: usize) -> impl Future<Output = std::result::Result<StatusSnapshot, FetchError>> {
    async move {
        match idx {
            0 => Ok(StatusSnapshot {
                channel: "stabilizer temperature".into(),
                reading: 61.4,
                unit: " °C",
            }),
            1 => Ok(StatusSnapshot {
                channel: "evaporator level".into(),
                reading: 0.72,
                unit: " m",
            }),
            n => Err(FetchError::Offline(n)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let scope = Scope::new();
    scope.run(|| {
        let selected = signal(0usize);

        let status = resource({
            let selected = selected.clone();
            move || fetch_status(selected.get())
        });

        // Repaint on every record transition.
        effect({
            let status = status.clone();
            move || match status.status() {
                Status::Loading => println!("  … fetching"),
                Status::Ready => {
                    if let Some(snap) = status.value() {
                        println!("  {} = {}{}", snap.channel, snap.reading, snap.unit);
                    }
                }
                Status::Error(err) => println!("  fetch failed: {err}"),
            }
        });

        // The resource fetched channel 0 on creation.
        task::drain();

        for idx in 1..3 {
            info!("selecting channel {idx}");
            selected.set(idx);
            task::drain();
        }

        // Manual re-fetch of the current channel.
        info!("refreshing");
        status.refresh();
        task::drain();
    });
    scope.dispose();

    Ok(())
}
