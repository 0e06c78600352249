// Status Indicator - geteilter Zugriff auf die Status-LED
//
// WiFi-Tasks und Control-Loop schreiben beide Status-Farben; die LED-Hardware
// liegt deshalb hinter einem blocking Mutex.

use core::cell::RefCell;

use defmt::error;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use esp_core::{LedError, StatusLed, SystemStatus};
use rgb::RGB8;

use crate::config::LED_BRIGHTNESS;
use crate::hal::RmtLedWriter;

/// Geteilte Status-LED
///
/// Es gibt kein "aktuelle Farbe"-Readback: wer eine Farbe wiederherstellen
/// will, muss sich merken was er zuletzt gesetzt hat (dafür existiert das
/// `ip_acquired`-Flag im Netzwerk-Zustand).
pub struct StatusIndicator {
    led: Mutex<CriticalSectionRawMutex, RefCell<RmtLedWriter<'static>>>,
}

impl StatusIndicator {
    pub fn new(writer: RmtLedWriter<'static>) -> Self {
        Self {
            led: Mutex::new(RefCell::new(writer)),
        }
    }

    /// Setzt die Preset-Farbe eines System-Zustands und flusht sofort
    ///
    /// Ein Schreibfehler nach erfolgreichem Init wird nur geloggt.
    pub fn set_status(&self, status: SystemStatus) {
        if self.write(status.color(LED_BRIGHTNESS)).is_err() {
            error!("LED: Failed to show status {}", status);
        }
    }

    /// Schaltet die LED aus
    pub fn clear(&self) {
        if self.led.lock(|cell| cell.borrow_mut().clear()).is_err() {
            error!("LED: Failed to clear");
        }
    }

    /// Handle das den StatusLed-Trait implementiert (für den Update-Executor)
    pub fn handle(&self) -> IndicatorHandle<'_> {
        IndicatorHandle { indicator: self }
    }

    fn write(&self, color: RGB8) -> Result<(), LedError> {
        self.led.lock(|cell| cell.borrow_mut().write(color))
    }
}

/// Leichtgewichtiger StatusLed-Adapter auf den geteilten Indicator
pub struct IndicatorHandle<'a> {
    indicator: &'a StatusIndicator,
}

impl StatusLed for IndicatorHandle<'_> {
    fn write(&mut self, color: RGB8) -> Result<(), LedError> {
        self.indicator.write(color)
    }

    fn clear(&mut self) -> Result<(), LedError> {
        self.indicator.led.lock(|cell| cell.borrow_mut().clear())
    }
}
