// Flash Image Sink - aligned Schreiben in die OTA-Partition
//
// NOR-Flash akzeptiert nur 4-Byte-aligned Writes; TLS-Chunks kommen aber
// in beliebigen Längen an. Der Sink puffert deshalb einen Wort-Rest.

use embedded_storage::nor_flash::NorFlash;
use esp_core::UpdateError;

const WRITE_ALIGN: usize = 4;

/// Erase-Granularität des SPI-Flash in Bytes
pub const ERASE_SECTOR: u32 = 4096;

/// Rundet die Erase-Länge auf ganze Sektoren auf, begrenzt auf die Partition
pub fn erase_len(content_length: u32, capacity: u32) -> u32 {
    let rounded = content_length
        .div_ceil(ERASE_SECTOR)
        .saturating_mul(ERASE_SECTOR);
    rounded.min(capacity)
}

/// Schreibt einen Byte-Strom wort-aligned in eine Flash-Region
pub struct ImageSink<'a, F: NorFlash> {
    partition: &'a mut F,
    written: u32,
    tail: [u8; WRITE_ALIGN],
    tail_len: usize,
}

impl<'a, F: NorFlash> ImageSink<'a, F> {
    pub fn new(partition: &'a mut F) -> Self {
        Self {
            partition,
            written: 0,
            tail: [0xFF; WRITE_ALIGN],
            tail_len: 0,
        }
    }

    /// Schreibt einen Daten-Chunk; unvollständige Worte bleiben im Rest-Puffer
    #[allow(clippy::cast_possible_truncation)]
    pub fn write(&mut self, data: &[u8]) -> Result<(), UpdateError> {
        let mut idx = 0;

        // Angefangenes Wort aus dem vorherigen Chunk vervollständigen
        if self.tail_len > 0 {
            let take = (WRITE_ALIGN - self.tail_len).min(data.len());
            self.tail[self.tail_len..self.tail_len + take].copy_from_slice(&data[..take]);
            self.tail_len += take;
            idx += take;

            if self.tail_len == WRITE_ALIGN {
                self.partition
                    .write(self.written, &self.tail)
                    .map_err(|_| UpdateError::Write)?;
                self.written += WRITE_ALIGN as u32;
                self.tail_len = 0;
                self.tail.fill(0xFF);
            }
        }

        // Aligned Bulk-Anteil direkt schreiben
        let rest = &data[idx..];
        let aligned = rest.len() & !(WRITE_ALIGN - 1);
        if aligned > 0 {
            self.partition
                .write(self.written, &rest[..aligned])
                .map_err(|_| UpdateError::Write)?;
            self.written += aligned as u32;
        }

        // Übrige Bytes für den nächsten Chunk merken
        let leftover = &rest[aligned..];
        if !leftover.is_empty() {
            self.tail[..leftover.len()].copy_from_slice(leftover);
            self.tail_len = leftover.len();
        }

        Ok(())
    }

    /// Flusht den Rest-Puffer (mit 0xFF gepaddet) und liefert die Byte-Anzahl
    pub fn finish(mut self) -> Result<u32, UpdateError> {
        if self.tail_len > 0 {
            self.partition
                .write(self.written, &self.tail)
                .map_err(|_| UpdateError::Write)?;
            self.written += WRITE_ALIGN as u32;
        }
        Ok(self.written)
    }
}
