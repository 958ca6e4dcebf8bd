/// Events the host page forwards to the field between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A wheel event; positive `delta` scrolls the page down.
    Wheel { delta: f32 },
    /// The model finished loading and reported its largest bounding dimension.
    ModelResized { dimension: f32 },
}

/// A queue of input events.
/// JS pushes events as they arrive; the runner drains them in arrival order each frame.
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

    /// Move all pending events into `out`, keeping this queue's allocation.
    pub fn drain_into(&mut self, out: &mut Vec<InputEvent>) {
        out.clear();
        out.append(&mut self.events);
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
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
    fn push_and_drain_preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Wheel { delta: 100.0 });
        q.push(InputEvent::ModelResized { dimension: 250.0 });
        q.push(InputEvent::Wheel { delta: -40.0 });
        assert_eq!(q.len(), 3);

        let mut out = Vec::new();
        q.drain_into(&mut out);
        assert!(q.is_empty());
        assert_eq!(
            out,
            vec![
                InputEvent::Wheel { delta: 100.0 },
                InputEvent::ModelResized { dimension: 250.0 },
                InputEvent::Wheel { delta: -40.0 },
            ]
        );
    }

    #[test]
    fn drain_into_replaces_previous_contents() {
        let mut q = InputQueue::new();
        let mut out = vec![InputEvent::Wheel { delta: 1.0 }];
        q.push(InputEvent::Wheel { delta: 2.0 });
        q.drain_into(&mut out);
        assert_eq!(out, vec![InputEvent::Wheel { delta: 2.0 }]);
    }
}
