//! Integration Tests für die Blink-Logik
//!
//! Diese Tests laufen auf dem Host (x86_64) mit simulierter Zeit

use esp_core::BlinkState;

// ============================================================================
// Tests: Toggle-Verhalten
// ============================================================================

#[test]
fn test_initial_state_is_low() {
    let blink = BlinkState::new(500);
    assert!(!blink.pin_high());
}

#[test]
fn test_toggle_sequence_over_time() {
    let mut blink = BlinkState::new(500);
    let mut toggles = Vec::new();

    // Loop mit 1-ms-Ticks über 3 Sekunden simulieren
    for now in 0..3000u32 {
        if let Some(level) = blink.tick(now) {
            toggles.push((now, level));
        }
    }

    // Toggle erst nach strikt mehr als 500 ms, dann alle 501 ms
    assert_eq!(
        toggles,
        vec![
            (501, true),
            (1002, false),
            (1503, true),
            (2004, false),
            (2505, true),
        ]
    );
}

#[test]
fn test_sparse_polling_toggles_once() {
    let mut blink = BlinkState::new(500);

    // Lange nicht getickt (z.B. weil ein Update lief): genau ein Toggle,
    // keine Nachhol-Toggles
    assert_eq!(blink.tick(90_000), Some(true));
    assert_eq!(blink.tick(90_001), None);
}

#[test]
fn test_pin_level_tracks_toggles() {
    let mut blink = BlinkState::new(500);

    blink.tick(501);
    assert!(blink.pin_high());
    blink.tick(1002);
    assert!(!blink.pin_high());
}

// ============================================================================
// Tests: Zeit-Überlauf
// ============================================================================

#[test]
fn test_wraparound_keeps_period() {
    let mut blink = BlinkState::new(500);

    // Letzter Toggle kurz vor dem Zähler-Überlauf
    let mut now = u32::MAX - 200;
    assert_eq!(blink.tick(now), Some(true));

    // Nach dem Überlauf weiter normale Perioden: 201 ms bis zum Überlauf
    // plus 300 danach = 501 ms verstrichen
    now = now.wrapping_add(501);
    assert_eq!(now, 300);
    assert_eq!(blink.tick(now), Some(false));
    now = now.wrapping_add(501);
    assert_eq!(blink.tick(now), Some(true));
}
