//! Integration Tests für den Update-Trigger (Button-Debounce)
//!
//! Diese Tests laufen auf dem Host (x86_64) mit simulierter Zeit

use esp_core::{TriggerPoll, UpdateTrigger};

// ============================================================================
// Tests: Grundverhalten
// ============================================================================

#[test]
fn test_idle_without_press() {
    let mut trigger = UpdateTrigger::new(5000);
    assert_eq!(trigger.poll(0, false), TriggerPoll::Idle);
    assert_eq!(trigger.poll(10_000, false), TriggerPoll::Idle);
    assert!(!trigger.is_pressed());
}

#[test]
fn test_first_press_qualifies_immediately() {
    let mut trigger = UpdateTrigger::new(5000);
    // Direkt nach dem Boot, kein Cooldown nötig
    assert_eq!(trigger.poll(0, true), TriggerPoll::Start);
    assert!(trigger.is_pressed());
}

#[test]
fn test_held_button_triggers_exactly_once() {
    let mut trigger = UpdateTrigger::new(5000);
    assert_eq!(trigger.poll(100, true), TriggerPoll::Start);

    // Button bleibt gedrückt: kein zweiter Start, egal wie lange
    for now in (200..60_000).step_by(100) {
        assert_eq!(trigger.poll(now, true), TriggerPoll::Idle);
        assert!(trigger.is_pressed());
    }
}

// ============================================================================
// Tests: Cooldown-Fenster
// ============================================================================

#[test]
fn test_press_within_cooldown_is_ignored() {
    let mut trigger = UpdateTrigger::new(5000);
    assert_eq!(trigger.poll(0, true), TriggerPoll::Start);
    assert_eq!(trigger.poll(1000, false), TriggerPoll::Released);

    // 1000 + 5000 = 6000: bei exakt 6000 noch zu früh (strikt größer)
    assert_eq!(trigger.poll(3000, true), TriggerPoll::Idle);
    assert_eq!(trigger.poll(6000, true), TriggerPoll::Idle);
    assert_eq!(trigger.poll(6001, true), TriggerPoll::Start);
}

#[test]
fn test_full_press_release_cycle() {
    let mut trigger = UpdateTrigger::new(5000);

    // Erster Druck: Update startet (Loop blockiert derweil)
    assert_eq!(trigger.poll(0, true), TriggerPoll::Start);

    // Update fehlgeschlagen, Loop läuft weiter, Button wird irgendwann
    // losgelassen
    assert_eq!(trigger.poll(30_000, true), TriggerPoll::Idle);
    assert_eq!(trigger.poll(30_050, false), TriggerPoll::Released);

    // Zweiter Druck innerhalb des Cooldowns: verschluckt
    assert_eq!(trigger.poll(31_000, true), TriggerPoll::Idle);

    // Gleicher Druck, immer noch gehalten, nach Ablauf des Cooldowns:
    // jetzt qualifiziert er
    assert_eq!(trigger.poll(36_000, true), TriggerPoll::Start);
}

#[test]
fn test_release_without_press_is_idle() {
    let mut trigger = UpdateTrigger::new(5000);
    // Pegel-Glitch: nicht gedrückt, bleibt Idle
    assert_eq!(trigger.poll(500, false), TriggerPoll::Idle);
}

// ============================================================================
// Tests: Zeit-Überlauf
// ============================================================================

#[test]
fn test_cooldown_across_wraparound() {
    let mut trigger = UpdateTrigger::new(5000);
    assert_eq!(trigger.poll(u32::MAX - 2000, true), TriggerPoll::Start);
    assert_eq!(trigger.poll(u32::MAX - 1000, false), TriggerPoll::Released);

    // 1000 ms bis zum Überlauf + 4005 danach = 5005 ms verstrichen
    assert_eq!(trigger.poll(4005, true), TriggerPoll::Start);
}
