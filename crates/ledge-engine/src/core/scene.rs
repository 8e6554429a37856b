use crate::api::error::LevelError;
use crate::api::types::BodyIndex;
use crate::components::body::Body;

/// Body storage for one level, indexed by [`BodyIndex`].
/// Built once at load and dropped as a whole with the level.
pub struct Scene {
    bodies: Vec<Body>,
}

impl Scene {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Reserve room for exactly `count` bodies, reporting allocation failure.
    pub fn with_capacity(count: usize) -> Result<Self, LevelError> {
        let mut bodies = Vec::new();
        bodies
            .try_reserve_exact(count)
            .map_err(|source| LevelError::Allocation { count, source })?;
        Ok(Self { bodies })
    }

    /// Add the next body. Its index must equal the current length.
    pub fn push(&mut self, body: Body) {
        debug_assert_eq!(body.index.as_usize(), self.bodies.len());
        self.bodies.push(body);
    }

    pub fn get(&self, index: BodyIndex) -> Option<&Body> {
        self.bodies.get(index.as_usize())
    }

    pub fn get_mut(&mut self, index: BodyIndex) -> Option<&mut Body> {
        self.bodies.get_mut(index.as_usize())
    }

    /// The player's body (index 0).
    pub fn player(&self) -> Option<&Body> {
        self.get(BodyIndex::PLAYER)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.bodies.capacity()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
