use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Mirror of the visual object's position for consumers that should not
/// touch the scene graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionComponent {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PositionComponent {
    /// Position component at `(x, y, z)`.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn get(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Overwrite the stored coordinates. Does not touch the visual object.
    pub fn set(&mut self, position: Vec3) {
        self.x = position.x;
        self.y = position.y;
        self.z = position.z;
    }

    /// Place the visual object at the stored coordinates.
    pub(crate) fn on_add(&mut self, entity: &mut Entity) {
        if let Some(object) = entity.object() {
            object.borrow_mut().set_position(self.get());
        }
    }

    /// Pull the latest position from the visual object.
    pub(crate) fn update(&mut self, entity: &mut Entity) {
        if let Some(position) = entity.position() {
            self.set(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyline_common::{SceneNode, shared};

    #[test]
    fn update_follows_visual_object() {
        let node = shared(SceneNode::default());
        let mut entity = Entity::with_object("e", node.clone());
        entity.add_component(PositionComponent::new(1.0, 2.0, 3.0));
        node.borrow_mut().set_position(Vec3::new(5.0, 0.0, 0.0));

        let mut mirror = *entity.position_component().unwrap();
        mirror.update(&mut entity);
        assert_eq!(mirror.get(), Vec3::new(5.0, 0.0, 0.0));
    }
}
