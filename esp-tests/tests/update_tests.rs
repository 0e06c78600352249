//! Integration Tests für den Update-Executor
//!
//! Diese Tests laufen auf dem Host (x86_64) mit Mock-Implementierungen
//! aller Hardware-Traits. Die async Abläufe werden mit
//! `embassy_futures::block_on` ausgeführt.

use embassy_futures::block_on;
use esp_core::{
    Delay, DevicePower, LedError, OtaTransport, StatusLed, SystemStatus, TransferEvent,
    UpdateError, UpdateExecutor, UpdateOutcome,
};
use rgb::RGB8;

const BRIGHTNESS: u8 = 15;
const HOLD_MS: u32 = 1000;

// ============================================================================
// Mocks
// ============================================================================

/// Protokollierte LED-Operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedOp {
    Write(RGB8),
    Clear,
}

#[derive(Default)]
struct MockLed {
    ops: Vec<LedOp>,
}

impl StatusLed for MockLed {
    fn write(&mut self, color: RGB8) -> Result<(), LedError> {
        self.ops.push(LedOp::Write(color));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LedError> {
        self.ops.push(LedOp::Clear);
        Ok(())
    }
}

#[derive(Default)]
struct MockDelay {
    total_ms: u32,
    calls: usize,
}

impl Delay for MockDelay {
    async fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        self.calls += 1;
    }
}

#[derive(Default)]
struct MockPower {
    restart_count: usize,
}

impl DevicePower for MockPower {
    fn restart(&mut self) {
        self.restart_count += 1;
    }
}

/// Gescripteter Transport: liefert ein festes Ergebnis und spielt
/// vorher eine Event-Sequenz ab
struct MockTransport {
    result: Result<(), UpdateError>,
    events: Vec<TransferEvent<'static>>,
    call_count: usize,
}

impl MockTransport {
    fn new(result: Result<(), UpdateError>) -> Self {
        Self {
            result,
            events: Vec::new(),
            call_count: 0,
        }
    }

    fn with_events(mut self, events: Vec<TransferEvent<'static>>) -> Self {
        self.events = events;
        self
    }
}

impl OtaTransport for MockTransport {
    async fn perform_update(
        &mut self,
        on_event: &mut dyn FnMut(TransferEvent<'_>),
    ) -> Result<(), UpdateError> {
        self.call_count += 1;
        for event in &self.events {
            on_event(*event);
        }
        self.result
    }
}

fn no_events() -> impl FnMut(TransferEvent<'_>) {
    |_| {}
}

// ============================================================================
// Tests: Erfolgsfall
// ============================================================================

#[test]
fn test_success_shows_green_then_restarts() {
    let mut led = MockLed::default();
    let mut delay = MockDelay::default();
    let mut power = MockPower::default();
    let mut transport = MockTransport::new(Ok(()));

    let outcome = block_on(
        UpdateExecutor::new(&mut led, &mut delay, &mut power, BRIGHTNESS, HOLD_MS).run(
            &mut transport,
            true,
            &mut no_events(),
        ),
    );

    assert_eq!(outcome, UpdateOutcome::Succeeded);
    assert_eq!(transport.call_count, 1);

    // Grün anzeigen, halten, löschen - dann Restart, keine Restore-Farbe
    assert_eq!(
        led.ops,
        vec![
            LedOp::Write(SystemStatus::UpdateSucceeded.color(BRIGHTNESS)),
            LedOp::Clear,
        ]
    );
    assert_eq!(delay.total_ms, HOLD_MS);
    assert_eq!(power.restart_count, 1);
}

// ============================================================================
// Tests: Fehlerfall
// ============================================================================

#[test]
fn test_failure_restores_connected_color() {
    let mut led = MockLed::default();
    let mut delay = MockDelay::default();
    let mut power = MockPower::default();
    let mut transport = MockTransport::new(Err(UpdateError::BadStatus(404)));

    let outcome = block_on(
        UpdateExecutor::new(&mut led, &mut delay, &mut power, BRIGHTNESS, HOLD_MS).run(
            &mut transport,
            true, // IP vorhanden
            &mut no_events(),
        ),
    );

    assert_eq!(outcome, UpdateOutcome::Failed(UpdateError::BadStatus(404)));

    // Rot anzeigen, halten, löschen, dann Blau (verbunden) wiederherstellen
    assert_eq!(
        led.ops,
        vec![
            LedOp::Write(SystemStatus::UpdateFailed.color(BRIGHTNESS)),
            LedOp::Clear,
            LedOp::Write(SystemStatus::Connected.color(BRIGHTNESS)),
        ]
    );
    // Kein Restart bei Fehler
    assert_eq!(power.restart_count, 0);
}

#[test]
fn test_failure_without_ip_restores_disconnected_color() {
    let mut led = MockLed::default();
    let mut delay = MockDelay::default();
    let mut power = MockPower::default();
    let mut transport = MockTransport::new(Err(UpdateError::Dns));

    let outcome = block_on(
        UpdateExecutor::new(&mut led, &mut delay, &mut power, BRIGHTNESS, HOLD_MS).run(
            &mut transport,
            false, // keine IP (Update ohne WLAN versucht)
            &mut no_events(),
        ),
    );

    assert_eq!(outcome, UpdateOutcome::Failed(UpdateError::Dns));
    assert_eq!(
        led.ops.last(),
        Some(&LedOp::Write(SystemStatus::Disconnected.color(BRIGHTNESS)))
    );
}

#[test]
fn test_failure_holds_result_color() {
    let mut led = MockLed::default();
    let mut delay = MockDelay::default();
    let mut power = MockPower::default();
    let mut transport = MockTransport::new(Err(UpdateError::Tls));

    block_on(
        UpdateExecutor::new(&mut led, &mut delay, &mut power, BRIGHTNESS, HOLD_MS).run(
            &mut transport,
            true,
            &mut no_events(),
        ),
    );

    // Die rote Farbe muss sichtbar gehalten werden bevor sie gelöscht wird
    assert_eq!(delay.calls, 1);
    assert_eq!(delay.total_ms, HOLD_MS);
}

// ============================================================================
// Tests: Event-Durchreichung
// ============================================================================

#[test]
fn test_transfer_events_are_forwarded() {
    let mut led = MockLed::default();
    let mut delay = MockDelay::default();
    let mut power = MockPower::default();
    let mut transport = MockTransport::new(Ok(())).with_events(vec![
        TransferEvent::Connected,
        TransferEvent::Header {
            name: "Content-Length",
            value: "1024",
        },
        TransferEvent::DataChunk { len: 1024 },
        TransferEvent::Finished,
    ]);

    let mut seen = Vec::new();
    let mut collect = |event: TransferEvent<'_>| {
        // Events halten geborgte Strings, für den Log reicht die Diskriminante
        seen.push(match event {
            TransferEvent::Connected => "connected",
            TransferEvent::Header { .. } => "header",
            TransferEvent::DataChunk { .. } => "chunk",
            TransferEvent::Finished => "finished",
            TransferEvent::Error => "error",
        });
    };

    block_on(
        UpdateExecutor::new(&mut led, &mut delay, &mut power, BRIGHTNESS, HOLD_MS).run(
            &mut transport,
            true,
            &mut collect,
        ),
    );

    assert_eq!(seen, vec!["connected", "header", "chunk", "finished"]);
}
