//! External playback toggle
//!
//! Wires a user-facing on/off control to an opaque audio transport and
//! exposes the resulting state for animated entities to branch on. The
//! animation core only ever reads [`ToggleState`]; all mutation happens
//! through [`AudioToggle`] in response to input and transport events.

/// Playback state readable by animated entities.
///
/// Created at scene setup and alive for the whole session; `position` is
/// the last transport-reported playback time in seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToggleState {
    pub is_active: bool,
    pub position: f32,
}

/// Events a transport reports back between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportEvent {
    /// Playback reached end of stream on its own.
    Ended,
    /// Playback position advanced to this many seconds.
    TimeUpdate(f32),
}

/// The opaque audio playback collaborator.
///
/// Decoding and output are not this crate's concern; hosts plug in
/// whatever backend they have. [`NullAudio`] is a silent stand-in.
pub trait AudioTransport {
    fn play(&mut self);
    fn pause(&mut self);
    /// Seeks to an absolute position in seconds.
    fn seek(&mut self, seconds: f32);
    /// Drains events accumulated since the last call. The app polls this
    /// once per frame; a transport with nothing to report returns empty.
    fn poll_events(&mut self) -> Vec<TransportEvent> {
        Vec::new()
    }
}

/// Transport that plays nothing and reports nothing. Useful for tests and
/// for running the demos without an audio backend.
pub struct NullAudio;

impl AudioTransport for NullAudio {
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn seek(&mut self, _seconds: f32) {}
}

/// Owns the [`ToggleState`] and the transport, and applies the state
/// transitions for user toggling and transport events.
///
/// Double activation or deactivation is harmless: each operation is a
/// plain state assignment, so repeats are idempotent by construction.
pub struct AudioToggle {
    state: ToggleState,
    transport: Box<dyn AudioTransport>,
}

impl AudioToggle {
    pub fn new(transport: Box<dyn AudioTransport>) -> Self {
        Self {
            state: ToggleState::default(),
            transport,
        }
    }

    /// Current state, for handing to entities each frame.
    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    /// User switched playback on: start the transport, mark active.
    pub fn activate(&mut self) {
        self.transport.play();
        self.state.is_active = true;
        log::debug!("audio toggle: active");
    }

    /// User switched playback off: pause, rewind to the start, mark
    /// inactive.
    pub fn deactivate(&mut self) {
        self.transport.pause();
        self.transport.seek(0.0);
        self.state.position = 0.0;
        self.state.is_active = false;
        log::debug!("audio toggle: inactive");
    }

    /// Convenience for a single toggle control (button or key).
    pub fn toggle(&mut self) {
        if self.state.is_active {
            self.deactivate();
        } else {
            self.activate();
        }
    }

    /// Drains the transport's pending events and applies them. Called
    /// once per frame, before entities read the state.
    pub fn poll_transport(&mut self) {
        for event in self.transport.poll_events() {
            match event {
                TransportEvent::Ended => self.handle_ended(),
                TransportEvent::TimeUpdate(seconds) => self.handle_time_update(seconds),
            }
        }
    }

    /// Transport reached end of stream on its own.
    pub fn handle_ended(&mut self) {
        self.state.is_active = false;
        self.state.position = 0.0;
        log::debug!("audio toggle: stream ended");
    }

    /// Transport reported a new playback position. Sampled into the state
    /// so audio-synced entities can read it.
    pub fn handle_time_update(&mut self, seconds: f32) {
        self.state.position = seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, PartialEq)]
    enum Call {
        Play,
        Pause,
        Seek(i32),
    }

    struct RecordingTransport {
        calls: Rc<RefCell<Vec<Call>>>,
    }

    impl AudioTransport for RecordingTransport {
        fn play(&mut self) {
            self.calls.borrow_mut().push(Call::Play);
        }
        fn pause(&mut self) {
            self.calls.borrow_mut().push(Call::Pause);
        }
        fn seek(&mut self, seconds: f32) {
            self.calls.borrow_mut().push(Call::Seek(seconds as i32));
        }
    }

    fn recording_toggle() -> (AudioToggle, Rc<RefCell<Vec<Call>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let toggle = AudioToggle::new(Box::new(RecordingTransport {
            calls: calls.clone(),
        }));
        (toggle, calls)
    }

    #[test]
    fn test_activate_starts_playback() {
        let (mut toggle, calls) = recording_toggle();
        toggle.activate();
        assert!(toggle.is_active());
        assert_eq!(*calls.borrow(), vec![Call::Play]);
    }

    #[test]
    fn test_manual_deactivate_resets_position() {
        let (mut toggle, calls) = recording_toggle();
        toggle.activate();
        toggle.handle_time_update(12.5);
        assert_eq!(toggle.state().position, 12.5);

        toggle.deactivate();
        assert!(!toggle.is_active());
        assert_eq!(toggle.state().position, 0.0);
        assert_eq!(*calls.borrow(), vec![Call::Play, Call::Pause, Call::Seek(0)]);
    }

    #[test]
    fn test_natural_end_resets_state() {
        let (mut toggle, _calls) = recording_toggle();
        toggle.activate();
        toggle.handle_time_update(30.0);
        toggle.handle_ended();
        assert!(!toggle.is_active());
        assert_eq!(toggle.state().position, 0.0);
    }

    struct QueuedTransport {
        queue: Rc<RefCell<Vec<TransportEvent>>>,
    }

    impl AudioTransport for QueuedTransport {
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn seek(&mut self, _seconds: f32) {}
        fn poll_events(&mut self) -> Vec<TransportEvent> {
            self.queue.borrow_mut().drain(..).collect()
        }
    }

    #[test]
    fn test_polled_events_drive_natural_completion() {
        let queue = Rc::new(RefCell::new(Vec::new()));
        let mut toggle = AudioToggle::new(Box::new(QueuedTransport {
            queue: queue.clone(),
        }));
        toggle.activate();

        queue.borrow_mut().push(TransportEvent::TimeUpdate(30.0));
        toggle.poll_transport();
        assert!(toggle.is_active());
        assert_eq!(toggle.state().position, 30.0);

        // The stream running out must read back as the full reset
        queue.borrow_mut().push(TransportEvent::Ended);
        toggle.poll_transport();
        assert!(!toggle.is_active());
        assert_eq!(toggle.state().position, 0.0);

        // Nothing queued: polling changes nothing
        toggle.poll_transport();
        assert!(!toggle.is_active());
    }

    #[test]
    fn test_toggle_flips_state() {
        let (mut toggle, _calls) = recording_toggle();
        toggle.toggle();
        assert!(toggle.is_active());
        toggle.toggle();
        assert!(!toggle.is_active());
    }
}
