// Task Module - alle Embassy Tasks

pub mod control;
pub mod wifi;

pub use control::control_task;
pub use wifi::{connection_task, ip_monitor_task, net_task};

use embassy_time::Instant;

/// Aktuelle Uptime in Millisekunden (32 Bit, überläuft nach ~49 Tagen)
///
/// Die Zustands-Logik rechnet durchgehend mit wrapping-Differenzen,
/// der Überlauf ist daher unkritisch.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}
