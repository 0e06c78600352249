//! Blink Driver - nicht-blockierendes Pin-Toggle
//!
//! Pure Logic ohne Hardware-Dependencies (testbar!)

/// Zustand des Blink-Pins
///
/// Toggelt einen Digital-Ausgang mit fester Periode, ohne zu blockieren.
/// Wird jede Loop-Iteration mit der aktuellen Zeit getickt; ein Toggle
/// passiert erst wenn die Periode verstrichen ist.
///
/// Die Elapsed-Berechnung nutzt `wrapping_sub`: auch wenn die Uhr bei
/// `u32::MAX` überläuft, bleibt die Differenz korrekt (Modulo-Arithmetik).
#[derive(Debug, Clone, Copy)]
pub struct BlinkState {
    period_ms: u32,
    last_toggle: u32,
    pin_high: bool,
}

impl BlinkState {
    /// Erstellt einen Blink-Zustand mit gegebener Periode (Millisekunden)
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_toggle: 0,
            pin_high: false,
        }
    }

    /// Ein Tick der Blink-Logik
    ///
    /// Gibt `Some(neuer_pegel)` zurück wenn der Pin jetzt umgeschaltet
    /// werden muss, sonst `None`. Pro verstrichener Periode passiert genau
    /// ein Toggle, egal wie oft dazwischen getickt wird.
    pub fn tick(&mut self, now_ms: u32) -> Option<bool> {
        if now_ms.wrapping_sub(self.last_toggle) > self.period_ms {
            self.pin_high = !self.pin_high;
            self.last_toggle = now_ms;
            Some(self.pin_high)
        } else {
            None
        }
    }

    /// Aktueller Pegel des Blink-Pins
    pub const fn pin_high(&self) -> bool {
        self.pin_high
    }
}
