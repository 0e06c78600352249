// OTA Module - Firmware-Download und Flash-Schreiben
//
// `transport` führt den HTTPS-Download durch, `flash` schreibt das Image
// wort-aligned in die inaktive OTA-Partition.

pub mod flash;
pub mod transport;

pub use transport::HttpsOtaTransport;
