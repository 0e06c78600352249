//! ESP Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert die Traits und die puren Zustandsmaschinen der Firmware:
//! Blink-Timing, Button-Debounce, Netzwerk-Events und den Update-Ablauf.
//!
//! Alle Zeitstempel sind `u32`-Millisekunden. Verstrichene Zeit wird mit
//! `wrapping_sub` berechnet, damit ein Überlauf der Uhr keine falschen
//! Dauern liefert.

#![no_std]

pub mod blink;
pub mod network;
pub mod traits;
pub mod trigger;
pub mod types;
pub mod update;

// Re-exports für einfachen Zugriff
pub use blink::BlinkState;
pub use network::NetworkMonitor;
pub use traits::{Delay, DevicePower, LedError, OtaTransport, StatusLed};
pub use trigger::{TriggerPoll, UpdateTrigger};
pub use types::{
    NetworkAction, NetworkEvent, SystemStatus, TransferEvent, TransportConfig, UpdateError,
    UpdateOutcome,
};
pub use update::UpdateExecutor;
