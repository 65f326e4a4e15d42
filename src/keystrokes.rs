//! Keystroke dispatch over the emulator control channel.
//!
//! The emulator types text one character at a time: each character is
//! wrapped in its own `KeyboardEvent` and sent through `sendKey`, with
//! a short pause between events so the guest keyboard driver keeps up.
//! The first failed call aborts the remaining characters.

use std::time::Duration;

use async_trait::async_trait;
use tonic::Status;
use tracing::info;

use crate::channel::ControllerClient;
use crate::proto::KeyboardEvent;
use crate::proto::emulator_controller_client::EmulatorControllerClient;
use crate::proto::keyboard_event::KeyEventType;

/// Pause between consecutive keystrokes.
pub const KEY_DELAY: Duration = Duration::from_millis(200);

/// The one remote operation the dispatcher needs, abstracted so tests
/// can substitute a recording sink for the connected stub.
#[async_trait]
pub trait SendKey {
    async fn send_key(&mut self, event: KeyboardEvent) -> Result<(), Status>;
}

#[async_trait]
impl SendKey for ControllerClient {
    async fn send_key(&mut self, event: KeyboardEvent) -> Result<(), Status> {
        EmulatorControllerClient::send_key(self, event).await?;
        Ok(())
    }
}

/// Type `text` on the emulator's virtual keyboard, one `sendKey` call
/// per character in source order, pausing `delay` after each.
pub async fn type_text<S: SendKey>(
    sink: &mut S,
    text: &str,
    delay: Duration,
) -> Result<(), Status> {
    for ch in text.chars() {
        info!("Typing: {ch}");
        sink.send_key(text_event(ch)).await?;
        tokio::time::sleep(delay).await;
    }
    Ok(())
}

/// Press a single named key (W3C `KeyboardEvent.key` name, e.g. "Enter").
pub async fn press_key<S: SendKey>(sink: &mut S, key: &str) -> Result<(), Status> {
    info!("Pressing: {key}");
    sink.send_key(named_key_event(key)).await
}

fn text_event(ch: char) -> KeyboardEvent {
    KeyboardEvent {
        text: ch.to_string(),
        ..Default::default()
    }
}

fn named_key_event(key: &str) -> KeyboardEvent {
    KeyboardEvent {
        event_type: KeyEventType::Keypress as i32,
        key: key.to_string(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<(KeyboardEvent, Instant)>,
        fail_after: Option<usize>,
    }

    #[async_trait]
    impl SendKey for RecordingSink {
        async fn send_key(&mut self, event: KeyboardEvent) -> Result<(), Status> {
            if self.fail_after.is_some_and(|n| self.events.len() >= n) {
                return Err(Status::unavailable("emulator went away"));
            }
            self.events.push((event, Instant::now()));
            Ok(())
        }
    }

    fn typed(sink: &RecordingSink) -> String {
        sink.events.iter().map(|(e, _)| e.text.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn one_call_per_character_in_order() {
        let mut sink = RecordingSink::default();
        type_text(&mut sink, "Hello World", KEY_DELAY).await.unwrap();

        assert_eq!(sink.events.len(), 11);
        assert_eq!(typed(&sink), "Hello World");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_text_sends_nothing() {
        let mut sink = RecordingSink::default();
        type_text(&mut sink, "", KEY_DELAY).await.unwrap();

        assert!(sink.events.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn delay_elapses_between_calls() {
        let mut sink = RecordingSink::default();
        type_text(&mut sink, "Hi", KEY_DELAY).await.unwrap();

        let gap = sink.events[1].1 - sink.events[0].1;
        assert!(gap >= KEY_DELAY, "gap was {gap:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn failure_stops_remaining_characters() {
        let mut sink = RecordingSink {
            fail_after: Some(1),
            ..Default::default()
        };

        let err = type_text(&mut sink, "Hola", KEY_DELAY).await.unwrap_err();
        assert_eq!(err.code(), tonic::Code::Unavailable);
        assert_eq!(typed(&sink), "H");
    }

    #[tokio::test(start_paused = true)]
    async fn text_events_carry_only_text() {
        let mut sink = RecordingSink::default();
        type_text(&mut sink, "a", KEY_DELAY).await.unwrap();

        let event = &sink.events[0].0;
        assert_eq!(event.text, "a");
        assert_eq!(event.event_type, KeyEventType::Keydown as i32);
        assert!(event.key.is_empty());
        assert_eq!(event.key_code, 0);
    }

    #[tokio::test]
    async fn press_key_sends_a_named_keypress() {
        let mut sink = RecordingSink::default();
        press_key(&mut sink, "Enter").await.unwrap();

        let event = &sink.events[0].0;
        assert_eq!(event.key, "Enter");
        assert_eq!(event.event_type, KeyEventType::Keypress as i32);
        assert!(event.text.is_empty());
    }
}
