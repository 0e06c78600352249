// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die RGB Status-LED (WS2812/Neopixel)
pub const LED_GPIO_PIN: u8 = 8;

/// Helligkeits-Level der Status-Farben (0-255)
/// Niedrig gewählt, die WS2812 ist auch bei 15 gut sichtbar
pub const LED_BRIGHTNESS: u8 = 15;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// Control-Loop Konfiguration
// ============================================================================

/// GPIO-Pin für den Blink-Ausgang
pub const BLINK_GPIO_PIN: u8 = 0;

/// GPIO-Pin für den Update-Button (Input, Pull-Up, active-low)
pub const BUTTON_GPIO_PIN: u8 = 1;

/// Blink-Periode in Millisekunden
pub const BLINK_PERIOD_MS: u32 = 500;

/// Yield pro Loop-Iteration in Millisekunden
/// Minimal, damit andere Tasks (Netzwerk-Stack!) nicht verhungern
pub const LOOP_YIELD_MS: u64 = 1;

/// Cooldown nach Button-Release in Millisekunden
/// Erst danach qualifiziert ein neuer Druck für einen Update-Versuch
pub const BUTTON_COOLDOWN_MS: u32 = 5000;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Debounce für Disconnect-Events in Millisekunden
/// Verhindert Event-Stürme bei instabilem Link
pub const DISCONNECT_DEBOUNCE_MS: u32 = 500;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
/// TLS-Handshake (mbedtls) allokiert ebenfalls dynamisch
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// Gesamt-Heap: ~100 KB für WiFi-Stack + TLS

// ============================================================================
// OTA Konfiguration
// ============================================================================

/// HTTPS-URL des Firmware-Images (versioniertes Release-Asset)
/// Wird zur Build-Zeit aus der Environment Variable OTA_URL geladen
/// Setze diese in .env file (siehe .env.example)
pub const OTA_URL: &str = env!(
    "OTA_URL",
    "OTA URL nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Request-Timeout für den Download in Millisekunden
pub const OTA_TIMEOUT_MS: u32 = 90_000;

/// Transfer-Puffergröße in Bytes (RX und TX je einmal)
pub const OTA_BUFFER_SIZE: usize = 8192;

/// Anzeigedauer der Ergebnis-Farbe (grün/rot) in Millisekunden
pub const STATUS_HOLD_MS: u32 = 1000;

/// CA-Vertrauensanker für die TLS-Validierung (PEM, NUL-terminiert für mbedtls)
pub const CA_BUNDLE: &str = concat!(include_str!("../certs/ca_roots.pem"), "\0");
