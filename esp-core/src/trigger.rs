//! Update Trigger - Debounce des Update-Buttons
//!
//! Pure Logic ohne Hardware-Dependencies (testbar!)

/// Ergebnis eines Trigger-Ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPoll {
    /// Nichts zu tun
    Idle,
    /// Qualifizierender Druck erkannt: Update jetzt starten
    Start,
    /// Button losgelassen: Cooldown-Fenster beginnt
    Released,
}

/// Debounce-Zustandsmaschine für den Update-Button
///
/// Zustände: Armed → Pressed → (Release + Cooldown) → Armed.
///
/// Ein dauerhaft gehaltener Button triggert genau einmal: erst Loslassen
/// plus abgelaufener Cooldown macht den nächsten Druck wieder gültig. Das
/// `pressed`-Flag ist zugleich der Re-Entrancy-Guard gegen einen zweiten
/// OTA-Versuch während der Button noch gehalten wird.
///
/// Ohne vorheriges Release qualifiziert der erste Druck immer: ein frisch
/// gebootetes Gerät muss nicht erst den Cooldown abwarten.
#[derive(Debug, Clone, Copy)]
pub struct UpdateTrigger {
    cooldown_ms: u32,
    pressed: bool,
    last_release: Option<u32>,
}

impl UpdateTrigger {
    /// Erstellt einen Trigger mit gegebenem Cooldown (Millisekunden)
    pub const fn new(cooldown_ms: u32) -> Self {
        Self {
            cooldown_ms,
            pressed: false,
            last_release: None,
        }
    }

    /// Ein Tick der Debounce-Logik
    ///
    /// `button_active` ist der entprellte Roh-Pegel: `true` wenn der Button
    /// gedrückt ist (der Aufrufer invertiert das Active-Low-Signal).
    pub fn poll(&mut self, now_ms: u32, button_active: bool) -> TriggerPoll {
        if !self.pressed && button_active && self.cooldown_elapsed(now_ms) {
            self.pressed = true;
            TriggerPoll::Start
        } else if self.pressed && !button_active {
            self.pressed = false;
            self.last_release = Some(now_ms);
            TriggerPoll::Released
        } else {
            TriggerPoll::Idle
        }
    }

    /// `true` solange der Button als gedrückt gilt (Re-Entrancy-Guard)
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn cooldown_elapsed(&self, now_ms: u32) -> bool {
        match self.last_release {
            None => true,
            Some(released_at) => now_ms.wrapping_sub(released_at) > self.cooldown_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_always_qualifies() {
        let mut trigger = UpdateTrigger::new(5000);
        assert_eq!(trigger.poll(0, true), TriggerPoll::Start);
    }

    #[test]
    fn test_held_button_does_not_retrigger() {
        let mut trigger = UpdateTrigger::new(5000);
        assert_eq!(trigger.poll(0, true), TriggerPoll::Start);
        for now in [1, 100, 10_000, 100_000] {
            assert_eq!(trigger.poll(now, true), TriggerPoll::Idle);
        }
    }

    #[test]
    fn test_release_starts_cooldown() {
        let mut trigger = UpdateTrigger::new(5000);
        assert_eq!(trigger.poll(0, true), TriggerPoll::Start);
        assert_eq!(trigger.poll(50, false), TriggerPoll::Released);
        // Innerhalb des Cooldowns: kein neuer Start
        assert_eq!(trigger.poll(4999, true), TriggerPoll::Idle);
        // Nach dem Cooldown (Release bei 50): 50 + 5001 = 5051
        assert_eq!(trigger.poll(5051, true), TriggerPoll::Start);
    }
}
