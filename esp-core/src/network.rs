//! Network Monitor - Event-Verarbeitung des WLAN-Session-Managers
//!
//! Pure Logic ohne Hardware-Dependencies (testbar!)

use crate::types::{NetworkAction, NetworkEvent};

/// Verarbeitet die Events des Netzwerk-Kollaborateurs
///
/// Hält das `ip_acquired`-Flag und entprellt Disconnect-Stürme: bei
/// instabilen Links liefert der Treiber Disconnect-Events im Burst, darauf
/// soll höchstens einmal pro Debounce-Fenster reagiert werden.
///
/// Invariante: `ip_acquired` ist genau zwischen einem `GotIp`-Event und dem
/// nächsten akzeptierten `Disconnected`-Event `true`.
#[derive(Debug, Clone, Copy)]
pub struct NetworkMonitor {
    debounce_ms: u32,
    ip_acquired: bool,
    last_disconnect: Option<u32>,
}

impl NetworkMonitor {
    /// Erstellt einen Monitor mit gegebenem Disconnect-Debounce (Millisekunden)
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            ip_acquired: false,
            last_disconnect: None,
        }
    }

    /// Verarbeitet ein Netzwerk-Event
    ///
    /// - `StationConnected`: nur Logging beim Aufrufer, noch keine IP
    /// - `GotIp`: Flag setzen, LED auf Connected
    /// - `Disconnected`: entprellt - Flag löschen, LED auf Disconnected,
    ///   Reconnect anstoßen; innerhalb des Debounce-Fensters ignoriert
    pub fn handle_event(&mut self, now_ms: u32, event: NetworkEvent) -> Option<NetworkAction> {
        match event {
            NetworkEvent::StationConnected => None,
            NetworkEvent::GotIp => {
                self.ip_acquired = true;
                Some(NetworkAction::ShowConnected)
            }
            NetworkEvent::Disconnected => {
                if self.disconnect_accepted(now_ms) {
                    self.last_disconnect = Some(now_ms);
                    self.ip_acquired = false;
                    Some(NetworkAction::Reconnect)
                } else {
                    None
                }
            }
        }
    }

    /// `true` zwischen `GotIp` und dem nächsten akzeptierten Disconnect
    pub const fn ip_acquired(&self) -> bool {
        self.ip_acquired
    }

    fn disconnect_accepted(&self, now_ms: u32) -> bool {
        match self.last_disconnect {
            None => true,
            Some(at) => now_ms.wrapping_sub(at) > self.debounce_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_got_ip_sets_flag() {
        let mut monitor = NetworkMonitor::new(500);
        assert!(!monitor.ip_acquired());
        assert_eq!(
            monitor.handle_event(100, NetworkEvent::GotIp),
            Some(NetworkAction::ShowConnected)
        );
        assert!(monitor.ip_acquired());
    }

    #[test]
    fn test_station_connected_is_log_only() {
        let mut monitor = NetworkMonitor::new(500);
        assert_eq!(monitor.handle_event(0, NetworkEvent::StationConnected), None);
        assert!(!monitor.ip_acquired());
    }

    #[test]
    fn test_disconnect_storm_collapses() {
        let mut monitor = NetworkMonitor::new(500);
        monitor.handle_event(0, NetworkEvent::GotIp);
        assert_eq!(
            monitor.handle_event(1000, NetworkEvent::Disconnected),
            Some(NetworkAction::Reconnect)
        );
        // Events < 500 ms später werden verschluckt
        assert_eq!(monitor.handle_event(1100, NetworkEvent::Disconnected), None);
        assert_eq!(monitor.handle_event(1499, NetworkEvent::Disconnected), None);
        // Nach dem Fenster wieder akzeptiert
        assert_eq!(
            monitor.handle_event(1501, NetworkEvent::Disconnected),
            Some(NetworkAction::Reconnect)
        );
    }
}
