// HTTPS OTA Transport - lädt das Firmware-Image über TLS herunter
//
// Ablauf: DNS-Lookup, TCP-Connect, TLS-Handshake (Server-Zertifikat wird
// gegen das CA-Bundle validiert), GET-Request, Response streamen und
// direkt in die inaktive OTA-Partition schreiben.

use core::ffi::CStr;
use core::fmt::Write as _;

use defmt::{Debug2Format, info, warn};
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::Stack;
use embassy_time::{Duration, with_timeout};
use embedded_io_async::{Read as _, Write as _};
use embedded_storage::nor_flash::{NorFlash as _, ReadNorFlash as _};
use esp_bootloader_esp_idf::ota::OtaImageState;
use esp_bootloader_esp_idf::ota_updater::OtaUpdater;
use esp_bootloader_esp_idf::partitions::PARTITION_TABLE_MAX_LEN;
use esp_core::{OtaTransport, TransferEvent, TransportConfig, UpdateError};
use esp_mbedtls::asynch::Session;
use esp_mbedtls::{Certificates, Mode, TlsReference, TlsVersion, X509};
use esp_storage::FlashStorage;

use crate::config::{CA_BUNDLE, OTA_BUFFER_SIZE};
use crate::ota::flash::{self, ImageSink};

/// Timeout für den DNS-Lookup (der Socket-Timeout greift erst danach)
const DNS_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximale Größe des Response-Headers
const HEADER_BUF_SIZE: usize = 4096;

/// Chunk-Größe beim Streamen des Bodys in den Flash
const CHUNK_SIZE: usize = 1024;

/// OTA-Transport über HTTPS
///
/// Hält die statischen Socket-Puffer und den Flash-Zugriff; pro
/// Update-Versuch wird eine frische Verbindung aufgebaut.
pub struct HttpsOtaTransport {
    stack: Stack<'static>,
    tls: TlsReference<'static>,
    flash: &'static mut FlashStorage<'static>,
    rx_buffer: &'static mut [u8; OTA_BUFFER_SIZE],
    tx_buffer: &'static mut [u8; OTA_BUFFER_SIZE],
    config: TransportConfig,
}

impl HttpsOtaTransport {
    pub fn new(
        stack: Stack<'static>,
        tls: TlsReference<'static>,
        flash: &'static mut FlashStorage<'static>,
        rx_buffer: &'static mut [u8; OTA_BUFFER_SIZE],
        tx_buffer: &'static mut [u8; OTA_BUFFER_SIZE],
        config: TransportConfig,
    ) -> Self {
        Self {
            stack,
            tls,
            flash,
            rx_buffer,
            tx_buffer,
            config,
        }
    }

    async fn run(
        &mut self,
        on_event: &mut dyn FnMut(TransferEvent<'_>),
    ) -> Result<(), UpdateError> {
        let (host, port, path) = split_url(self.config.url).ok_or(UpdateError::Request)?;

        // DNS-Lookup (A-Record reicht, der Stack läuft nur mit IPv4/DHCP)
        info!("OTA: Resolving '{}'...", host);
        let addr = match with_timeout(DNS_TIMEOUT, self.stack.dns_query(host, DnsQueryType::A))
            .await
        {
            Ok(Ok(addrs)) => addrs.first().copied().ok_or(UpdateError::Dns)?,
            Ok(Err(e)) => {
                warn!("OTA: DNS query failed: {}", Debug2Format(&e));
                return Err(UpdateError::Dns);
            }
            Err(_) => {
                warn!("OTA: DNS query timed out");
                return Err(UpdateError::Dns);
            }
        };

        // TCP-Verbindung mit Gesamt-Timeout auf allen Socket-Operationen
        let mut socket = TcpSocket::new(
            self.stack,
            &mut self.rx_buffer[..],
            &mut self.tx_buffer[..],
        );
        socket.set_timeout(Some(Duration::from_millis(u64::from(self.config.timeout_ms))));

        info!("OTA: Connecting to {}:{}...", Debug2Format(&addr), port);
        socket
            .connect((addr, port))
            .await
            .map_err(|_| UpdateError::Connect)?;

        // TLS-Session; mbedtls braucht den Servernamen NUL-terminiert
        let mut name_buf = heapless::Vec::<u8, 128>::new();
        name_buf
            .extend_from_slice(host.as_bytes())
            .map_err(|_| UpdateError::Request)?;
        name_buf.push(0).map_err(|_| UpdateError::Request)?;
        let servername = CStr::from_bytes_with_nul(&name_buf).map_err(|_| UpdateError::Request)?;

        let certificates = Certificates {
            ca_chain: X509::pem(CA_BUNDLE.as_bytes()).ok(),
            ..Default::default()
        };

        let mut session = Session::new(
            socket,
            Mode::Client { servername },
            TlsVersion::Tls1_2,
            certificates,
            self.tls,
        )
        .map_err(|_| UpdateError::Tls)?;

        session.connect().await.map_err(|_| UpdateError::Tls)?;
        info!("OTA: TLS session established");
        on_event(TransferEvent::Connected);

        // GET-Request senden
        let mut request = heapless::String::<512>::new();
        write!(
            request,
            "GET {path} HTTP/1.1\r\nHost: {host}\r\nUser-Agent: esp-ota-steuerung\r\nConnection: close\r\n\r\n"
        )
        .map_err(|_| UpdateError::Request)?;
        session
            .write_all(request.as_bytes())
            .await
            .map_err(|_| UpdateError::Request)?;
        session.flush().await.map_err(|_| UpdateError::Request)?;

        // Response-Header einlesen (bis zur Leerzeile)
        let mut header_buf = [0u8; HEADER_BUF_SIZE];
        let mut header_len = 0;
        let header_end = loop {
            if header_len == header_buf.len() {
                warn!("OTA: Response header exceeds {} bytes", HEADER_BUF_SIZE);
                return Err(UpdateError::Read);
            }
            let n = session
                .read(&mut header_buf[header_len..])
                .await
                .map_err(|_| UpdateError::Read)?;
            if n == 0 {
                return Err(UpdateError::Read);
            }
            header_len += n;
            if let Some(pos) = find_header_end(&header_buf[..header_len]) {
                break pos;
            }
        };

        let head = core::str::from_utf8(&header_buf[..header_end]).map_err(|_| UpdateError::Read)?;
        let mut lines = head.split("\r\n");

        // Status-Zeile: Redirects werden nicht verfolgt, alles außer 2xx ist ein Fehler
        let status = lines
            .next()
            .and_then(parse_status_line)
            .ok_or(UpdateError::Read)?;
        info!("OTA: HTTP status {}", status);
        if !(200..=299).contains(&status) {
            return Err(UpdateError::BadStatus(status));
        }

        let mut content_length: Option<u32> = None;
        for line in lines {
            let Some((name, value)) = line.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            on_event(TransferEvent::Header { name, value });
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.parse().ok();
            }
        }

        // OTA-Partition vorbereiten
        let mut part_buffer = [0u8; PARTITION_TABLE_MAX_LEN];
        let mut updater = OtaUpdater::new(&mut *self.flash, &mut part_buffer)
            .map_err(|_| UpdateError::InvalidPartitionTable)?;
        let (mut partition, _part_type) = updater
            .next_partition()
            .map_err(|_| UpdateError::InvalidPartitionTable)?;

        #[allow(clippy::cast_possible_truncation)]
        let capacity = partition.capacity() as u32;
        let erase = match content_length {
            Some(len) => {
                if len > capacity {
                    warn!("OTA: Image ({} bytes) exceeds partition ({} bytes)", len, capacity);
                    return Err(UpdateError::Erase);
                }
                flash::erase_len(len, capacity)
            }
            // Länge unbekannt: konservativ die ganze Partition löschen
            None => capacity,
        };
        info!("OTA: Erasing {} bytes of target partition...", erase);
        partition.erase(0, erase).map_err(|_| UpdateError::Erase)?;

        // Body streamen: erst den Rest hinter dem Header, dann vom Socket
        let mut sink = ImageSink::new(&mut partition);
        let mut received: u32 = 0;

        let leftover = &header_buf[header_end + 4..header_len];
        if !leftover.is_empty() {
            sink.write(leftover)?;
            received += leftover.len() as u32;
            on_event(TransferEvent::DataChunk {
                len: leftover.len(),
            });
        }

        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            if let Some(total) = content_length {
                if received >= total {
                    break;
                }
            }
            let n = session
                .read(&mut chunk)
                .await
                .map_err(|_| UpdateError::Read)?;
            if n == 0 {
                break;
            }
            sink.write(&chunk[..n])?;
            received += n as u32;
            on_event(TransferEvent::DataChunk { len: n });
        }

        // Abbruch mitten im Transfer darf kein halbes Image aktivieren
        if let Some(total) = content_length {
            if received < total {
                warn!("OTA: Connection closed after {}/{} bytes", received, total);
                return Err(UpdateError::Read);
            }
        }

        let flashed = sink.finish()?;
        updater
            .activate_next_partition()
            .and_then(|()| updater.set_current_ota_state(OtaImageState::New))
            .map_err(|_| UpdateError::Activate)?;

        info!(
            "OTA: Image complete ({} bytes received, {} bytes flashed), next partition activated",
            received, flashed
        );
        on_event(TransferEvent::Finished);
        Ok(())
    }
}

impl OtaTransport for HttpsOtaTransport {
    async fn perform_update(
        &mut self,
        on_event: &mut dyn FnMut(TransferEvent<'_>),
    ) -> Result<(), UpdateError> {
        match self.run(on_event).await {
            Ok(()) => Ok(()),
            Err(e) => {
                on_event(TransferEvent::Error);
                Err(e)
            }
        }
    }
}

/// Zerlegt eine https-URL in Host, Port und Pfad
fn split_url(url: &str) -> Option<(&str, u16, &str)> {
    let rest = url.strip_prefix("https://")?;
    let (authority, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], &rest[idx..]),
        None => (rest, "/"),
    };
    let (host, port) = match authority.split_once(':') {
        Some((h, p)) => (h, p.parse().ok()?),
        None => (authority, 443),
    };
    if host.is_empty() {
        return None;
    }
    Some((host, port, path))
}

/// Findet das Ende des Header-Blocks (Position der Leerzeile)
fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Parst den Status-Code aus "HTTP/1.1 200 OK"
fn parse_status_line(line: &str) -> Option<u16> {
    line.split_ascii_whitespace().nth(1)?.parse().ok()
}
