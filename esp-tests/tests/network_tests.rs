//! Integration Tests für den Netzwerk-Monitor
//!
//! Diese Tests laufen auf dem Host (x86_64) mit simulierter Zeit

use esp_core::{NetworkAction, NetworkEvent, NetworkMonitor};

// ============================================================================
// Tests: Event → Action Mapping
// ============================================================================

#[test]
fn test_station_connected_has_no_action() {
    let mut monitor = NetworkMonitor::new(500);
    assert_eq!(
        monitor.handle_event(0, NetworkEvent::StationConnected),
        None
    );
}

#[test]
fn test_got_ip_shows_connected() {
    let mut monitor = NetworkMonitor::new(500);
    assert_eq!(
        monitor.handle_event(2000, NetworkEvent::GotIp),
        Some(NetworkAction::ShowConnected)
    );
    assert!(monitor.ip_acquired());
}

#[test]
fn test_first_disconnect_is_accepted() {
    let mut monitor = NetworkMonitor::new(500);
    // Noch nie ein Disconnect gesehen: sofort akzeptiert
    assert_eq!(
        monitor.handle_event(100, NetworkEvent::Disconnected),
        Some(NetworkAction::Reconnect)
    );
}

// ============================================================================
// Tests: Disconnect-Debounce
// ============================================================================

#[test]
fn test_disconnect_storm_collapses_to_one() {
    let mut monitor = NetworkMonitor::new(500);
    monitor.handle_event(0, NetworkEvent::GotIp);

    let mut accepted = 0;
    // Instabiler Link: Burst von Events alle 50 ms über 400 ms
    for now in (1000..1400).step_by(50) {
        if monitor.handle_event(now, NetworkEvent::Disconnected).is_some() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);

    // Nach dem Debounce-Fenster wird wieder reagiert
    assert_eq!(
        monitor.handle_event(1501, NetworkEvent::Disconnected),
        Some(NetworkAction::Reconnect)
    );
}

#[test]
fn test_debounce_boundary_is_strict() {
    let mut monitor = NetworkMonitor::new(500);
    monitor.handle_event(1000, NetworkEvent::Disconnected);

    // Exakt 500 ms später: noch verschluckt (strikt größer)
    assert_eq!(monitor.handle_event(1500, NetworkEvent::Disconnected), None);
    assert_eq!(
        monitor.handle_event(1501, NetworkEvent::Disconnected),
        Some(NetworkAction::Reconnect)
    );
}

// ============================================================================
// Tests: ip_acquired Invariante
// ============================================================================

#[test]
fn test_ip_flag_follows_session_lifecycle() {
    let mut monitor = NetworkMonitor::new(500);
    assert!(!monitor.ip_acquired());

    monitor.handle_event(0, NetworkEvent::StationConnected);
    assert!(!monitor.ip_acquired());

    monitor.handle_event(100, NetworkEvent::GotIp);
    assert!(monitor.ip_acquired());

    monitor.handle_event(5000, NetworkEvent::Disconnected);
    assert!(!monitor.ip_acquired());

    // Reconnect-Zyklus: Flag kommt mit der nächsten IP zurück
    monitor.handle_event(8000, NetworkEvent::StationConnected);
    monitor.handle_event(9000, NetworkEvent::GotIp);
    assert!(monitor.ip_acquired());
}

#[test]
fn test_swallowed_disconnect_still_clears_flag_once() {
    let mut monitor = NetworkMonitor::new(500);
    monitor.handle_event(0, NetworkEvent::GotIp);

    // Der erste (akzeptierte) Disconnect löscht das Flag
    monitor.handle_event(1000, NetworkEvent::Disconnected);
    assert!(!monitor.ip_acquired());

    // Verschluckte Folge-Events ändern nichts mehr
    monitor.handle_event(1100, NetworkEvent::Disconnected);
    assert!(!monitor.ip_acquired());
}
