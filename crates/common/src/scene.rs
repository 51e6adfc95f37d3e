use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;

/// A visual object owned by the rendering layer.
///
/// The runtime only reads and writes transform fields through this trait; it
/// never creates or destroys the underlying object. Limbs use `pitch` (the
/// forward/backward swing axis), bodies use `position` and `yaw`.
pub trait SceneObject {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn yaw(&self) -> f32;
    fn set_yaw(&mut self, yaw: f32);
    fn pitch(&self) -> f32;
    fn set_pitch(&mut self, pitch: f32);
}

/// Shared handle to a scene object. The renderer holds another clone; the
/// entity's copy is only used for transform access.
pub type SharedObject = Rc<RefCell<dyn SceneObject>>;

/// Wrap a concrete scene object into a [`SharedObject`].
pub fn shared<T: SceneObject + 'static>(object: T) -> SharedObject {
    Rc::new(RefCell::new(object))
}

/// In-memory scene object used by the headless driver and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SceneNode {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl SceneNode {
    /// Node placed at `position` with zero yaw.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl SceneObject for SceneNode {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
    }

    fn pitch(&self) -> f32 {
        self.pitch
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_handle_sees_writes() {
        let node = Rc::new(RefCell::new(SceneNode::default()));
        let handle: SharedObject = node.clone();
        handle.borrow_mut().set_position(Vec3::new(1.0, 2.0, 3.0));
        handle.borrow_mut().set_yaw(0.5);
        assert_eq!(node.borrow().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.borrow().yaw, 0.5);
    }
}
