//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Hardware-Zugriff
//! ohne konkrete Implementierung.

use rgb::RGB8;

use crate::types::{TransferEvent, UpdateError};

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    WriteFailed,
}

/// Trait für die Status-LED (ein adressierbares RGB-Pixel)
///
/// # Implementierungen
/// - **Production:** RmtLedWriter (ESP32 RMT Peripheral)
/// - **Testing:** MockLed (in-memory Mock)
pub trait StatusLed: Send {
    /// Schreibt eine RGB-Farbe auf die LED und flusht sofort
    fn write(&mut self, color: RGB8) -> Result<(), LedError>;

    /// Schaltet die LED aus
    fn clear(&mut self) -> Result<(), LedError>;
}

/// Trait für den Geräte-Restart
///
/// Die echte Implementierung (Warm-Reset des SoC) kehrt nie zurück;
/// Mocks zählen die Aufrufe.
pub trait DevicePower {
    fn restart(&mut self);
}

/// Trait für Warte-Pausen (z.B. damit eine LED-Farbe sichtbar bleibt)
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn delay_ms(&mut self, ms: u32);
}

/// Trait für den OTA-Transport-Kollaborateur
///
/// Ein einzelner blockierender Aufruf: lädt das Firmware-Image herunter,
/// schreibt es in die nächste OTA-Partition und aktiviert sie. Während des
/// Transfers werden [`TransferEvent`]s an den Callback gemeldet (nur
/// Observability).
#[allow(async_fn_in_trait)]
pub trait OtaTransport {
    async fn perform_update(
        &mut self,
        on_event: &mut dyn FnMut(TransferEvent<'_>),
    ) -> Result<(), UpdateError>;
}
