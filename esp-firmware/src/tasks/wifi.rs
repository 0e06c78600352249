// WiFi Task - Verbindet mit WLAN und managed Connection
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_core::{NetworkAction, NetworkEvent, SystemStatus};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice};

use crate::SharedNetwork;
use crate::config::{WIFI_PASSWORD, WIFI_SSID};
use crate::hal::StatusIndicator;
use crate::tasks::now_ms;

/// WiFi Connection Task
///
/// Managed die WiFi-Verbindung:
/// - Verbindet mit Access Point
/// - Meldet Connect/Disconnect an den Netzwerk-Zustand
/// - Reconnected nach Verbindungsverlust (endlos, ohne Backoff)
#[embassy_executor::task]
pub async fn connection_task(
    mut controller: WifiController<'static>,
    network: &'static SharedNetwork,
    indicator: &'static StatusIndicator,
) {
    info!("WiFi: Starting connection task");

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            info!("WiFi: Configuring and starting...");

            // Configure WiFi station mode
            let client_config = ModeConfig::Client(
                ClientConfig::default()
                    .with_ssid(WIFI_SSID.into())
                    .with_password(WIFI_PASSWORD.into()),
            );

            if let Err(e) = controller.set_config(&client_config) {
                error!("WiFi: Failed to set configuration: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(5)).await;
                continue;
            }

            if let Err(e) = controller.start_async().await {
                error!("WiFi: Failed to start: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(5)).await;
                continue;
            }

            info!("WiFi: Started successfully");
        }

        // Connect to AP
        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        match controller.connect_async().await {
            Ok(_) => {
                info!("WiFi: Connected to AP");
                network.handle_event(now_ms(), NetworkEvent::StationConnected);
            }
            Err(e) => {
                error!("WiFi: Connection failed: {}", Debug2Format(&e));
                Timer::after(Duration::from_secs(5)).await;
                continue;
            }
        }

        // Wait for disconnect
        controller
            .wait_for_event(esp_radio::wifi::WifiEvent::StaDisconnected)
            .await;

        // Debounce: Event-Stürme bei instabilem Link kollabieren zu einem
        if let Some(NetworkAction::Reconnect) =
            network.handle_event(now_ms(), NetworkEvent::Disconnected)
        {
            warn!("WiFi: Disconnected from AP, will retry...");
            indicator.set_status(SystemStatus::Disconnected);
        }

        Timer::after(Duration::from_secs(2)).await;
    }
}

/// Network Task
///
/// Überwacht den Netzwerk-Stack:
/// - Prozessiert Netzwerk-Pakete
/// - Managed TCP/IP Stack
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// IP Monitor Task
///
/// Wartet auf eine IPv4-Konfiguration vom DHCP-Server, meldet den
/// Got-IP-Übergang an den Netzwerk-Zustand und setzt die Status-LED.
/// Läuft endlos, weil nach jedem Reconnect erneut eine IP geholt wird.
#[embassy_executor::task]
pub async fn ip_monitor_task(
    stack: &'static Stack<'static>,
    network: &'static SharedNetwork,
    indicator: &'static StatusIndicator,
) {
    loop {
        while !stack.is_link_up() {
            Timer::after(Duration::from_millis(500)).await;
        }

        info!("WiFi: Link is up, waiting for IP address...");

        let config = loop {
            if let Some(config) = stack.config_v4() {
                break config;
            }
            Timer::after(Duration::from_millis(500)).await;
        };

        info!("WiFi: Got IP address!");
        info!("  IP:      {}", Debug2Format(&config.address.address()));
        info!("  Gateway: {}", Debug2Format(&config.gateway));
        info!("  DNS:     {}", Debug2Format(&config.dns_servers));

        if let Some(NetworkAction::ShowConnected) =
            network.handle_event(now_ms(), NetworkEvent::GotIp)
        {
            indicator.set_status(SystemStatus::Connected);
        }

        // Warten bis die Konfiguration wieder weg ist (Link-Verlust),
        // dann von vorne
        while stack.config_v4().is_some() {
            Timer::after(Duration::from_millis(500)).await;
        }
    }
}
