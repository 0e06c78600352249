// Control Task - die zentrale Steuerschleife
//
// Eine Schleife für beides: nicht-blockierendes Blinken auf GPIO0 und
// Button-Polling auf GPIO1. Während ein OTA-Versuch läuft pausieren
// Blinken und Polling; der Netzwerk-Stack läuft in eigenen Tasks weiter.

use defmt::{debug, error, info};
use embassy_time::{Duration, Timer};
use esp_core::{
    BlinkState, TransferEvent, TriggerPoll, UpdateExecutor, UpdateOutcome, UpdateTrigger,
};
use esp_hal::gpio::{Input, Level, Output};

use crate::SharedNetwork;
use crate::config::{BLINK_PERIOD_MS, BUTTON_COOLDOWN_MS, LOOP_YIELD_MS, STATUS_HOLD_MS};
use crate::hal::{SoftReset, StatusIndicator, TimerDelay};
use crate::ota::HttpsOtaTransport;

/// Control Task
///
/// Pollt Blink-Timing und Button in jeder Iteration und yieldet danach
/// kurz an den Executor. Ein qualifizierter Button-Druck startet den
/// OTA-Versuch inline; bei Erfolg restartet das Gerät im Executor.
#[embassy_executor::task]
pub async fn control_task(
    mut blink_pin: Output<'static>,
    button: Input<'static>,
    indicator: &'static StatusIndicator,
    network: &'static SharedNetwork,
    transport: &'static mut HttpsOtaTransport,
) {
    info!("Control: Starting control loop");

    let mut blink = BlinkState::new(BLINK_PERIOD_MS);
    let mut trigger = UpdateTrigger::new(BUTTON_COOLDOWN_MS);

    let mut led = indicator.handle();
    let mut delay = TimerDelay;
    let mut power = SoftReset;
    let mut executor = UpdateExecutor::new(
        &mut led,
        &mut delay,
        &mut power,
        crate::config::LED_BRIGHTNESS,
        STATUS_HOLD_MS,
    );

    loop {
        let now = crate::tasks::now_ms();

        if let Some(high) = blink.tick(now) {
            blink_pin.set_level(if high { Level::High } else { Level::Low });
        }

        // Button ist active-low (Pull-Up, schaltet gegen GND)
        match trigger.poll(now, button.is_low()) {
            TriggerPoll::Start => {
                info!("Button: Pressed, starting OTA update...");
                let outcome = executor
                    .run(
                        &mut *transport,
                        network.ip_acquired(),
                        &mut log_transfer_event,
                    )
                    .await;
                match outcome {
                    // Nur bei gemocktem Restart erreichbar, auf Hardware
                    // kehrt ein erfolgreicher Versuch nicht zurück
                    UpdateOutcome::Succeeded => info!("Update: Succeeded"),
                    UpdateOutcome::Failed(e) => error!("Update: Failed: {}", e),
                }
            }
            TriggerPoll::Released => {
                debug!("Button: Released, cooldown armed");
            }
            TriggerPoll::Idle => {}
        }

        Timer::after(Duration::from_millis(LOOP_YIELD_MS)).await;
    }
}

/// Loggt Transfer-Ereignisse des OTA-Downloads
fn log_transfer_event(event: TransferEvent<'_>) {
    match event {
        TransferEvent::Connected => info!("HTTP: Connected to server"),
        TransferEvent::Header { name, value } => debug!("HTTP: Header {}: {}", name, value),
        TransferEvent::DataChunk { len } => debug!("HTTP: Received {} bytes", len),
        TransferEvent::Finished => info!("HTTP: Transfer finished"),
        TransferEvent::Error => error!("HTTP: Transfer error"),
    }
}
