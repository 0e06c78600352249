//! Core Types für die OTA-Firmware
//!
//! Datenstrukturen ohne Hardware-Dependencies

use rgb::RGB8;

/// System-Zustand der über die Status-LED angezeigt wird
///
/// Jeder Zustand hat genau eine Preset-Farbe (1:1 Mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemStatus {
    /// WLAN getrennt (Amber)
    Disconnected,
    /// IP-Adresse erhalten (Blau)
    Connected,
    /// OTA-Update erfolgreich (Grün)
    UpdateSucceeded,
    /// OTA-Update fehlgeschlagen (Rot)
    UpdateFailed,
}

impl SystemStatus {
    /// Preset-Farbe für diesen Zustand
    ///
    /// `brightness` skaliert alle aktiven Kanäle gleich. Die Helligkeit ist
    /// eine Konstante der Firmware, kein semantischer Unterschied.
    pub const fn color(self, brightness: u8) -> RGB8 {
        match self {
            SystemStatus::Disconnected => RGB8 {
                r: brightness,
                g: brightness,
                b: 0,
            },
            SystemStatus::Connected => RGB8 {
                r: 0,
                g: 0,
                b: brightness,
            },
            SystemStatus::UpdateSucceeded => RGB8 {
                r: 0,
                g: brightness,
                b: 0,
            },
            SystemStatus::UpdateFailed => RGB8 {
                r: brightness,
                g: 0,
                b: 0,
            },
        }
    }
}

/// Netzwerk-Event vom WLAN-Kollaborateur
///
/// Wird vom Session-Manager in [`crate::NetworkMonitor`] verarbeitet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    /// Mit dem Access Point verbunden, IP steht noch aus
    StationConnected,
    /// IP-Adresse via DHCP erhalten
    GotIp,
    /// Verbindung zum Access Point verloren
    Disconnected,
}

/// Reaktion des Netzwerk-Monitors auf ein Event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkAction {
    /// Status-LED auf `Connected` setzen
    ShowConnected,
    /// Status-LED auf `Disconnected` setzen und Reconnect anstoßen
    Reconnect,
}

/// Event-Strom des OTA-Transports während eines Transfers
///
/// Rein informativ (Logging); der Ausgang des Updates wird allein vom
/// Ergebnis des Transport-Aufrufs bestimmt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEvent<'a> {
    /// TCP/TLS-Verbindung steht
    Connected,
    /// Response-Header empfangen
    Header { name: &'a str, value: &'a str },
    /// Daten-Chunk empfangen und in Flash geschrieben
    DataChunk { len: usize },
    /// Transfer abgeschlossen
    Finished,
    /// Fehler während des Transfers (bricht den Transfer nicht selbst ab)
    Error,
}

/// Fehler-Taxonomie für den Update-Transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateError {
    /// DNS-Auflösung des Hosts fehlgeschlagen
    Dns,
    /// TCP-Verbindung fehlgeschlagen
    Connect,
    /// TLS-Handshake fehlgeschlagen
    Tls,
    /// Request konnte nicht gesendet oder Response nicht geparst werden
    Request,
    /// Server hat mit einem Nicht-2xx-Status geantwortet
    BadStatus(u16),
    /// Lesefehler während des Body-Transfers
    Read,
    /// Partitionstabelle ungültig oder keine OTA-Partition gefunden
    InvalidPartitionTable,
    /// Löschen der Ziel-Partition fehlgeschlagen
    Erase,
    /// Schreiben in die Ziel-Partition fehlgeschlagen
    Write,
    /// Aktivieren der neuen Partition fehlgeschlagen
    Activate,
}

/// Ergebnis eines Update-Versuchs
///
/// `Succeeded` ist auf echter Hardware unerreichbar: der Executor löst
/// vorher den Geräte-Restart aus. Die Variante existiert für Tests mit
/// Mock-Restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Succeeded,
    Failed(UpdateError),
}

/// Konfiguration für den OTA-Transport
#[derive(Debug, Clone, Copy)]
pub struct TransportConfig {
    /// HTTPS-URL des Firmware-Images
    pub url: &'static str,
    /// Request-Timeout in Millisekunden
    pub timeout_ms: u32,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for SystemStatus {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SystemStatus::Disconnected => defmt::write!(fmt, "Disconnected"),
            SystemStatus::Connected => defmt::write!(fmt, "Connected"),
            SystemStatus::UpdateSucceeded => defmt::write!(fmt, "UpdateSucceeded"),
            SystemStatus::UpdateFailed => defmt::write!(fmt, "UpdateFailed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NetworkEvent {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            NetworkEvent::StationConnected => defmt::write!(fmt, "StationConnected"),
            NetworkEvent::GotIp => defmt::write!(fmt, "GotIp"),
            NetworkEvent::Disconnected => defmt::write!(fmt, "Disconnected"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UpdateError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            UpdateError::Dns => defmt::write!(fmt, "DNS failed"),
            UpdateError::Connect => defmt::write!(fmt, "Connection failed"),
            UpdateError::Tls => defmt::write!(fmt, "TLS handshake failed"),
            UpdateError::Request => defmt::write!(fmt, "Request failed"),
            UpdateError::BadStatus(code) => defmt::write!(fmt, "HTTP status {}", code),
            UpdateError::Read => defmt::write!(fmt, "Read failed"),
            UpdateError::InvalidPartitionTable => defmt::write!(fmt, "Invalid partition table"),
            UpdateError::Erase => defmt::write!(fmt, "Partition erase failed"),
            UpdateError::Write => defmt::write!(fmt, "Partition write failed"),
            UpdateError::Activate => defmt::write!(fmt, "Partition activate failed"),
        }
    }
}
