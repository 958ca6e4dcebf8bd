use std::ops::Range;

use glam::Vec3;

/// Mutable views over the active prefix of every per-particle array.
/// Lets systems read one array while writing another without fighting the borrow checker.
pub struct ActiveSlices<'a> {
    pub position: &'a mut [Vec3],
    pub velocity: &'a mut [Vec3],
    pub target: &'a mut [Vec3],
    pub gather_speed: &'a mut [f32],
}

/// Fixed-capacity particle storage in structure-of-arrays layout.
///
/// All arrays are allocated to full capacity on construction and never grow.
/// Only indices below `active_count` are simulated and drawn; growing the
/// active range is a count change, not an allocation.
pub struct ParticleBuffer {
    position: Vec<Vec3>,
    velocity: Vec<Vec3>,
    target: Vec<Vec3>,
    gather_speed: Vec<f32>,
    active_count: usize,
    /// Set whenever positions change; cleared by the renderer after upload.
    dirty: bool,
}

impl ParticleBuffer {
    /// Allocate storage for `capacity` particles, none of them active.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            position: vec![Vec3::ZERO; capacity],
            velocity: vec![Vec3::ZERO; capacity],
            target: vec![Vec3::ZERO; capacity],
            gather_speed: vec![0.0; capacity],
            active_count: 0,
            dirty: false,
        }
    }

    pub fn capacity(&self) -> usize {
        self.position.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_full(&self) -> bool {
        self.active_count == self.capacity()
    }

    /// Extend the active range by up to `count` particles.
    /// Returns the newly activated index range (empty once the buffer is full).
    /// Callers must initialise every index in the returned range.
    pub fn activate(&mut self, count: usize) -> Range<usize> {
        let start = self.active_count;
        let end = start.saturating_add(count).min(self.capacity());
        self.active_count = end;
        if end > start {
            self.dirty = true;
        }
        start..end
    }

    /// Active positions.
    pub fn positions(&self) -> &[Vec3] {
        &self.position[..self.active_count]
    }

    /// Active positions as a flat `x, y, z` float array for GPU upload.
    pub fn positions_f32(&self) -> &[f32] {
        bytemuck::cast_slice(self.positions())
    }

    /// Raw pointer to the position array, for zero-copy reads from JS.
    pub fn positions_ptr(&self) -> *const f32 {
        self.position.as_ptr() as *const f32
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocity[..self.active_count]
    }

    pub fn targets(&self) -> &[Vec3] {
        &self.target[..self.active_count]
    }

    pub fn gather_speeds(&self) -> &[f32] {
        &self.gather_speed[..self.active_count]
    }

    /// Split-borrow the active prefix of all arrays.
    pub fn active_mut(&mut self) -> ActiveSlices<'_> {
        self.range_mut(0..self.active_count)
    }

    /// Split-borrow an arbitrary index range (e.g. freshly activated particles).
    pub fn range_mut(&mut self, range: Range<usize>) -> ActiveSlices<'_> {
        ActiveSlices {
            position: &mut self.position[range.clone()],
            velocity: &mut self.velocity[range.clone()],
            target: &mut self.target[range.clone()],
            gather_speed: &mut self.gather_speed[range],
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Read and clear the dirty flag. Returns true if positions need re-upload.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
