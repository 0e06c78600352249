// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod ota;
pub mod tasks;

// Re-exports von esp-core
pub use esp_core::{
    BlinkState, LedError, NetworkAction, NetworkEvent, NetworkMonitor, StatusLed, SystemStatus,
    TriggerPoll, UpdateExecutor, UpdateOutcome, UpdateTrigger,
};

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

// ============================================================================
// Geteilter Netzwerk-Zustand
// ============================================================================

/// Geteilter Netzwerk-Zustand zwischen WiFi-Tasks und Control-Loop
///
/// Der [`NetworkMonitor`] wird von den WiFi-Tasks geschrieben (Events) und
/// vom Update-Executor gelesen (`ip_acquired` entscheidet über die
/// Restore-Farbe nach einem fehlgeschlagenen Update).
///
/// Schreiber und Leser laufen in verschiedenen Embassy-Tasks,
/// daher blocking Mutex plus RefCell für den inneren Zustand.
pub struct SharedNetwork {
    monitor: Mutex<CriticalSectionRawMutex, RefCell<NetworkMonitor>>,
}

impl SharedNetwork {
    /// Erstellt den geteilten Zustand mit gegebenem Disconnect-Debounce
    pub fn new(debounce_ms: u32) -> Self {
        Self {
            monitor: Mutex::new(RefCell::new(NetworkMonitor::new(debounce_ms))),
        }
    }

    /// Reicht ein Netzwerk-Event an den Monitor durch
    pub fn handle_event(&self, now_ms: u32, event: NetworkEvent) -> Option<NetworkAction> {
        self.monitor
            .lock(|cell| cell.borrow_mut().handle_event(now_ms, event))
    }

    /// Aktueller Stand des `ip_acquired`-Flags
    pub fn ip_acquired(&self) -> bool {
        self.monitor.lock(|cell| cell.borrow().ip_acquired())
    }
}
