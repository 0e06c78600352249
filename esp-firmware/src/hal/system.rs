// System-Primitiven: Geräte-Restart und Warte-Pausen

use embassy_time::{Duration, Timer};
use esp_core::{Delay, DevicePower};

/// Warm-Restart über den SoC-Reset (kehrt nie zurück)
pub struct SoftReset;

impl DevicePower for SoftReset {
    fn restart(&mut self) {
        esp_hal::system::software_reset()
    }
}

/// Warte-Pause über den Embassy-Timer
pub struct TimerDelay;

impl Delay for TimerDelay {
    async fn delay_ms(&mut self, ms: u32) {
        Timer::after(Duration::from_millis(u64::from(ms))).await;
    }
}
