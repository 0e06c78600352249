//! Update Executor - führt einen OTA-Versuch aus und zeigt das Ergebnis an
//!
//! Die eigentliche Transfer-Mechanik (HTTPS, Flash-Partition) steckt im
//! [`OtaTransport`]-Kollaborateur; hier lebt nur der Ablauf drumherum:
//! Ergebnis-Farbe anzeigen, kurz halten, LED löschen, dann Restart oder
//! Status-Wiederherstellung.

use crate::traits::{Delay, DevicePower, OtaTransport, StatusLed};
use crate::types::{SystemStatus, TransferEvent, UpdateOutcome};

/// Führt genau einen Update-Versuch synchron aus
///
/// Der Aufrufer blockiert für die gesamte Transfer-Dauer - das ist ein
/// bewusster Tradeoff (Einfachheit vor Responsivität): Blink und
/// Button-Erkennung pausieren während des Updates.
///
/// # Trait-basierte Abstraktion
/// Die generischen Parameter ermöglichen:
/// - Real Hardware (RmtLedWriter, SoftReset, HttpsOtaTransport) im
///   Production-Code
/// - Mock-Implementierungen in Unit Tests
pub struct UpdateExecutor<'a, L: StatusLed, D: Delay, P: DevicePower> {
    led: &'a mut L,
    delay: &'a mut D,
    power: &'a mut P,
    brightness: u8,
    status_hold_ms: u32,
}

impl<'a, L: StatusLed, D: Delay, P: DevicePower> UpdateExecutor<'a, L, D, P> {
    /// Erstellt einen Executor
    ///
    /// # Parameter
    /// - `led`: Status-LED (Hardware oder Mock)
    /// - `delay`: Warte-Pause, damit die Ergebnis-Farbe sichtbar bleibt
    /// - `power`: Geräte-Restart
    /// - `brightness`: Helligkeit der Preset-Farben
    /// - `status_hold_ms`: Anzeigedauer der Ergebnis-Farbe
    pub fn new(
        led: &'a mut L,
        delay: &'a mut D,
        power: &'a mut P,
        brightness: u8,
        status_hold_ms: u32,
    ) -> Self {
        Self {
            led,
            delay,
            power,
            brightness,
            status_hold_ms,
        }
    }

    /// Führt den Update-Versuch aus
    ///
    /// Bei Erfolg: `UpdateSucceeded` anzeigen, halten, LED löschen,
    /// Geräte-Restart (kehrt auf Hardware nicht zurück).
    ///
    /// Bei Fehler: `UpdateFailed` anzeigen, halten, LED löschen, dann den
    /// vorherigen Status aus `ip_acquired` wiederherstellen und die
    /// Kontrolle an die Loop zurückgeben.
    ///
    /// `on_event` bekommt den Event-Strom des Transports unverändert
    /// durchgereicht (Logging beim Aufrufer).
    pub async fn run<T: OtaTransport>(
        &mut self,
        transport: &mut T,
        ip_acquired: bool,
        on_event: &mut dyn FnMut(TransferEvent<'_>),
    ) -> UpdateOutcome {
        match transport.perform_update(on_event).await {
            Ok(()) => {
                // LED-Fehler sind hier nicht fatal: das Update selbst ist
                // bereits gelaufen, der Restart passiert so oder so.
                let _ = self
                    .led
                    .write(SystemStatus::UpdateSucceeded.color(self.brightness));
                self.delay.delay_ms(self.status_hold_ms).await;
                let _ = self.led.clear();
                self.power.restart();
                UpdateOutcome::Succeeded
            }
            Err(e) => {
                let _ = self
                    .led
                    .write(SystemStatus::UpdateFailed.color(self.brightness));
                self.delay.delay_ms(self.status_hold_ms).await;
                let _ = self.led.clear();

                let restore = if ip_acquired {
                    SystemStatus::Connected
                } else {
                    SystemStatus::Disconnected
                };
                let _ = self.led.write(restore.color(self.brightness));
                UpdateOutcome::Failed(e)
            }
        }
    }
}
