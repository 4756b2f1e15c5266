/// Input event types the engine understands.
/// Generic: no viewer-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at viewport coordinates (x, y), CSS pixels.
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at viewport coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// The cursor moved to viewport coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// Mouse wheel; positive `delta_y` scrolls away.
    Wheel { delta_y: f32 },
    /// The drawable surface changed size.
    Resize { width: f32, height: f32 },
    /// A custom event from the UI layer (settings panel, close button).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Wheel { delta_y: -3.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Resize { width: 1024.0, height: 768.0 });
        q.push(InputEvent::PointerMove { x: 1.0, y: 2.0 });
        let events = q.drain();
        assert_eq!(events[0], InputEvent::Resize { width: 1024.0, height: 768.0 });
        assert_eq!(events[1], InputEvent::PointerMove { x: 1.0, y: 2.0 });
    }

    #[test]
    fn custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: 7, a: 1.5, b: 2.5, c: 3.5 });
        let events = q.drain();
        match events[0] {
            InputEvent::Custom { kind, a, b, c } => {
                assert_eq!(kind, 7);
                assert_eq!(a, 1.5);
                assert_eq!(b, 2.5);
                assert_eq!(c, 3.5);
            }
            _ => panic!("Expected Custom event"),
        }
    }
}
