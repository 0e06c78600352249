// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi und TLS benötigen dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

// TLS und Flash für OTA
use esp_mbedtls::Tls;
use esp_storage::FlashStorage;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use esp_core::{SystemStatus, TransportConfig};
use esp_ota_steuerung::SharedNetwork;
use esp_ota_steuerung::config::{
    DISCONNECT_DEBOUNCE_MS, EXTRA_HEAP_SIZE, OTA_BUFFER_SIZE, OTA_TIMEOUT_MS, OTA_URL,
    RMT_CLOCK_MHZ, WIFI_HEAP_SIZE,
};
use esp_ota_steuerung::hal::{LedBuffer, RmtLedWriter, StatusIndicator};
use esp_ota_steuerung::ota::HttpsOtaTransport;
use esp_ota_steuerung::tasks::{connection_task, control_task, ip_monitor_task, net_task};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
// Ohne diesen schlägt das Flashen mit "ESP-IDF App Descriptor missing" fehl
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi, OTA-Ressourcen, startet Embassy Runtime
/// und spawnt Tasks. Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren (WiFi + mbedtls brauchen dynamischen Speicher!)
    // Zwei Bereiche: reclaimed RAM (64 KB) + extra (36 KB) = 100 KB total
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Netzwerk-Stack erstellen
    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Static resources für embassy-net
    // 4 Sockets: DHCP (1) + DNS (1) + OTA-Download (1) + Reserve
    static RESOURCES: static_cell::StaticCell<StackResources<4>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    // embassy-net erstellt Stack + Runner (nutzt STA interface für Client-Modus)
    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    // Stack muss 'static sein für Tasks
    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Status-LED initialisieren (geteilter Zugriff via Indicator)
    static LED_BUFFER: static_cell::StaticCell<LedBuffer> = static_cell::StaticCell::new();
    let led_buffer = LED_BUFFER.init(esp_hal_smartled::smart_led_buffer!(1));
    let led_writer = RmtLedWriter::new(peripherals.GPIO8, peripherals.RMT, RMT_CLOCK_MHZ, led_buffer);
    static INDICATOR: static_cell::StaticCell<StatusIndicator> = static_cell::StaticCell::new();
    let indicator = &*INDICATOR.init(StatusIndicator::new(led_writer));

    // Startzustand: noch keine IP, also "nicht verbunden"
    indicator.set_status(SystemStatus::Disconnected);

    // GPIOs für die Control-Loop: Blink-Ausgang + Update-Button
    let blink_pin = Output::new(peripherals.GPIO0, Level::Low, OutputConfig::default());
    let button = Input::new(peripherals.GPIO1, InputConfig::default().with_pull(Pull::Up));

    // Geteilter Netzwerk-Zustand (WiFi-Tasks schreiben, Control-Loop liest)
    static NETWORK: static_cell::StaticCell<SharedNetwork> = static_cell::StaticCell::new();
    let network = &*NETWORK.init(SharedNetwork::new(DISCONNECT_DEBOUNCE_MS));

    // OTA-Ressourcen: Flash-Zugriff, TLS-Kontext (SHA-Beschleuniger), Socket-Puffer
    static FLASH: static_cell::StaticCell<FlashStorage<'static>> = static_cell::StaticCell::new();
    let flash = FLASH.init(FlashStorage::new(peripherals.FLASH));

    static TLS: static_cell::StaticCell<Tls<'static>> = static_cell::StaticCell::new();
    let tls = TLS.init(Tls::new(peripherals.SHA).expect("Failed to initialize TLS"));
    tls.set_debug(0);

    static OTA_RX: static_cell::StaticCell<[u8; OTA_BUFFER_SIZE]> = static_cell::StaticCell::new();
    static OTA_TX: static_cell::StaticCell<[u8; OTA_BUFFER_SIZE]> = static_cell::StaticCell::new();
    let rx_buffer = OTA_RX.init([0; OTA_BUFFER_SIZE]);
    let tx_buffer = OTA_TX.init([0; OTA_BUFFER_SIZE]);

    static TRANSPORT: static_cell::StaticCell<HttpsOtaTransport> = static_cell::StaticCell::new();
    let transport = TRANSPORT.init(HttpsOtaTransport::new(
        *stack,
        tls.reference(),
        flash,
        rx_buffer,
        tx_buffer,
        TransportConfig {
            url: OTA_URL,
            timeout_ms: OTA_TIMEOUT_MS,
        },
    ));

    // Spawn WiFi Tasks
    spawner
        .spawn(connection_task(wifi_controller, network, indicator))
        .unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner
        .spawn(ip_monitor_task(stack, network, indicator))
        .unwrap();

    // Spawn Control Task (Blinken + Button + OTA)
    spawner
        .spawn(control_task(blink_pin, button, indicator, network, transport))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
