//! Terminal adapter for display events.

use orbit_core::{AppEvent, AppEventEmitter, MessageKind, VoiceStatus};

use super::display::format_position;

/// Prints display events to the terminal.
///
/// Conversation messages and the satellite panel go to stdout; transient
/// status (thinking, listening, speaking) goes to stderr so piped output
/// only carries answers.
#[derive(Debug, Clone, Copy)]
pub struct TerminalEmitter {
    interactive: bool,
}

impl TerminalEmitter {
    /// `interactive` enables the hints that only make sense in `orbit chat`
    /// (echoing the user's words is skipped there since they just typed them).
    pub const fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

/// Where a rendered line goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Out(String),
    Status(String),
}

/// Render one event, or `None` if it has no terminal representation.
pub fn render_event(event: &AppEvent, interactive: bool) -> Option<Rendered> {
    match event {
        AppEvent::MessageAdded { kind, text } => match kind {
            MessageKind::User if interactive => None,
            MessageKind::User => Some(Rendered::Out(format!("You: {text}"))),
            MessageKind::Assistant => Some(Rendered::Out(format!("Guide: {text}"))),
            MessageKind::Error => Some(Rendered::Out(format!("Error: {text}"))),
        },
        AppEvent::LoadingChanged { loading: true } => {
            Some(Rendered::Status("Thinking...".to_string()))
        }
        AppEvent::InputTextChanged { text } if interactive && !text.is_empty() => {
            Some(Rendered::Status(format!("... {text}")))
        }
        AppEvent::VoiceStatusChanged { status } => match status {
            VoiceStatus::Listening => Some(Rendered::Status(
                "Listening... (type /voice again to stop)".to_string(),
            )),
            VoiceStatus::Heard { transcript } => {
                Some(Rendered::Status(format!("Heard: \"{transcript}\"")))
            }
            VoiceStatus::Failed { reason } => {
                Some(Rendered::Status(format!("Voice input failed: {reason}")))
            }
            VoiceStatus::Ready => None,
        },
        AppEvent::StopControlChanged { visible: true } if interactive => Some(
            Rendered::Status("(speaking - /stop to interrupt)".to_string()),
        ),
        AppEvent::SatelliteUpdated { position } => {
            Some(Rendered::Out(format_position(position)))
        }
        AppEvent::LoadingChanged { .. }
        | AppEvent::InputsEnabled { .. }
        | AppEvent::InputTextChanged { .. }
        | AppEvent::StopControlChanged { .. } => None,
    }
}

impl AppEventEmitter for TerminalEmitter {
    fn emit(&self, event: AppEvent) {
        tracing::trace!(event = event.event_name(), "Display event");
        match render_event(&event, self.interactive) {
            Some(Rendered::Out(line)) => println!("{line}"),
            Some(Rendered::Status(line)) => eprintln!("{line}"),
            None => {}
        }
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::SatellitePosition;

    #[test]
    fn test_messages_render_with_speaker() {
        assert_eq!(
            render_event(&AppEvent::assistant_message("Mars is red."), false),
            Some(Rendered::Out("Guide: Mars is red.".to_string()))
        );
        assert_eq!(
            render_event(&AppEvent::error_message("Oops"), true),
            Some(Rendered::Out("Error: Oops".to_string()))
        );
    }

    #[test]
    fn test_user_echo_only_outside_chat() {
        let event = AppEvent::user_message("Tell me about Saturn");
        assert_eq!(
            render_event(&event, false),
            Some(Rendered::Out("You: Tell me about Saturn".to_string()))
        );
        assert_eq!(render_event(&event, true), None);
    }

    #[test]
    fn test_quiet_events() {
        assert_eq!(render_event(&AppEvent::loading(false), true), None);
        assert_eq!(render_event(&AppEvent::inputs_enabled(true), true), None);
        assert_eq!(render_event(&AppEvent::input_text(""), true), None);
        assert_eq!(render_event(&AppEvent::stop_control(true), false), None);
        assert_eq!(
            render_event(&AppEvent::voice_status(VoiceStatus::Ready), true),
            None
        );
    }

    #[test]
    fn test_status_events_go_to_stderr() {
        assert_eq!(
            render_event(&AppEvent::loading(true), false),
            Some(Rendered::Status("Thinking...".to_string()))
        );
        assert!(matches!(
            render_event(&AppEvent::input_text("what is"), true),
            Some(Rendered::Status(_))
        ));
        assert!(matches!(
            render_event(
                &AppEvent::voice_status(VoiceStatus::Failed {
                    reason: "no-speech".into()
                }),
                true
            ),
            Some(Rendered::Status(line)) if line.contains("no-speech")
        ));
    }

    #[test]
    fn test_satellite_update_prints_panel() {
        let position = SatellitePosition {
            satellite_name: "SPACE STATION".to_string(),
            latitude: 51.5,
            longitude: -0.12,
            altitude_km: 420.0,
            timestamp: 0,
        };
        let Some(Rendered::Out(panel)) =
            render_event(&AppEvent::SatelliteUpdated { position }, false)
        else {
            panic!("expected panel");
        };
        assert!(panel.contains("SPACE STATION"));
    }
}
