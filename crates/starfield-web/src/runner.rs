use starfield::{
    ConfigError, Field, FieldConfig, FrameHeader, InputEvent, InputQueue, ProtocolLayout,
};

/// Owns one mounted particle field and wires it to the browser frame loop.
///
/// The page pushes wheel and model events at any time; they queue up and are
/// applied in arrival order at the start of the next frame, right before the tick.
pub struct FieldRunner {
    field: Field,
    input: InputQueue,
    /// Scratch space for drained events, reused every frame.
    pending: Vec<InputEvent>,
    header: FrameHeader,
    layout: ProtocolLayout,
}

impl FieldRunner {
    pub fn new(config: FieldConfig) -> Result<Self, ConfigError> {
        let field = Field::new(config)?;
        let layout = ProtocolLayout::from_config(field.config());
        let mut runner = Self {
            field,
            input: InputQueue::new(),
            pending: Vec::with_capacity(32),
            header: FrameHeader::default(),
            layout,
        };
        runner.capture_header();
        Ok(runner)
    }

    /// Build a runner from the page's JSON config. An empty string means defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = if json.trim().is_empty() {
            FieldConfig::default()
        } else {
            FieldConfig::from_json(json)?
        };
        Self::new(config)
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, tick the field, refresh the header.
    pub fn frame(&mut self) {
        self.input.drain_into(&mut self.pending);
        for event in self.pending.drain(..) {
            self.field.handle(event);
        }

        self.field.tick();
        self.capture_header();
    }

    fn capture_header(&mut self) {
        let dirty = self.field.take_dirty();
        self.header = FrameHeader::capture(&self.field, dirty);
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn header(&self) -> &FrameHeader {
        &self.header
    }

    // ---- Pointer accessors for zero-copy reads from JS memory ----

    pub fn positions_ptr(&self) -> *const f32 {
        self.field.buffer().positions_ptr()
    }

    /// Active positions as flat `x, y, z` floats.
    pub fn positions(&self) -> &[f32] {
        self.field.buffer().positions_f32()
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_floats().as_ptr()
    }

    pub fn active_count(&self) -> u32 {
        self.field.buffer().active_count() as u32
    }

    pub fn dirty(&self) -> bool {
        self.header.dirty != 0.0
    }

    // ---- Capacity accessors ----

    pub fn capacity(&self) -> u32 {
        self.layout.max_particles as u32
    }

    pub fn position_floats(&self) -> u32 {
        self.layout.position_data_floats as u32
    }

    // ---- State accessors for the model collaborator ----

    pub fn scroll_progress(&self) -> f32 {
        self.field.scroll_progress()
    }

    pub fn rotation_speed(&self) -> f32 {
        self.field.rotation_speed()
    }

    pub fn model_yaw(&self) -> f32 {
        self.field.model_yaw()
    }

    pub fn particle_radius(&self) -> f32 {
        self.field.particle_radius()
    }
}
