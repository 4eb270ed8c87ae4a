//! Motion sensor edge source

use defmt::*;
use embassy_rp::gpio::Input;

use crate::SIGNALS;

/// Wait for rising edges on the PIR output
///
/// Edges outside Armed-Waiting are ignored by the signal cell.
#[embassy_executor::task]
pub async fn motion_task(mut sensor: Input<'static>) {
    info!("Motion task started");

    loop {
        sensor.wait_for_rising_edge().await;
        if SIGNALS.on_motion_edge() {
            info!("Motion detected");
        } else {
            trace!("Motion edge ignored in {}", SIGNALS.state());
        }
    }
}
