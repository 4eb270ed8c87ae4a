//! Grace period tick source
//!
//! Free-running 1 s ticker. Ticks only count while the grace timer is
//! running; the signal cell stops the timer itself at the threshold.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::SIGNALS;

/// Tick interval in milliseconds
const TICK_INTERVAL_MS: u64 = 1000;

#[embassy_executor::task]
pub async fn tick_task() {
    info!("Tick task started");

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));

    loop {
        ticker.next().await;

        let running = SIGNALS.timer_running();
        SIGNALS.on_timer_tick();
        if running && !SIGNALS.timer_running() {
            info!("Grace period elapsed");
        }
    }
}
