// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul kapselt Hardware-Zugriffe hinter Traits,
// um Testbarkeit und Wartbarkeit zu verbessern.

pub mod indicator;
pub mod led_writer;
pub mod system;

pub use indicator::{IndicatorHandle, StatusIndicator};
pub use led_writer::{LedBuffer, RmtLedWriter};
pub use system::{SoftReset, TimerDelay};
