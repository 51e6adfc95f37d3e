use serde::{Deserialize, Serialize};

use crate::components::{
    AnimationController, JumpComponent, MovementComponent, PhysicsComponent, PositionComponent,
    RotationComponent, WalkingAnimationComponent,
};
use crate::entity::{Entity, UpdateContext};

/// Storage key for a component. An entity holds at most one component of
/// each kind; both animation variants share [`ComponentKind::Animation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentKind {
    Position,
    Rotation,
    Movement,
    Physics,
    Jump,
    Animation,
}

impl ComponentKind {
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Position => "position",
            ComponentKind::Rotation => "rotation",
            ComponentKind::Movement => "movement",
            ComponentKind::Physics => "physics",
            ComponentKind::Jump => "jump",
            ComponentKind::Animation => "animation",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Every component variant an entity can carry.
#[derive(Debug)]
pub enum Component {
    Position(PositionComponent),
    Rotation(RotationComponent),
    Movement(MovementComponent),
    Physics(PhysicsComponent),
    Jump(JumpComponent),
    WalkingAnimation(WalkingAnimationComponent),
    AnimationController(AnimationController),
}

impl Component {
    /// Storage key of this component.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Position(_) => ComponentKind::Position,
            Component::Rotation(_) => ComponentKind::Rotation,
            Component::Movement(_) => ComponentKind::Movement,
            Component::Physics(_) => ComponentKind::Physics,
            Component::Jump(_) => ComponentKind::Jump,
            Component::WalkingAnimation(_) | Component::AnimationController(_) => {
                ComponentKind::Animation
            }
        }
    }

    pub(crate) fn on_add(&mut self, entity: &mut Entity) {
        match self {
            Component::Position(c) => c.on_add(entity),
            Component::Rotation(c) => c.on_add(entity),
            Component::Movement(_)
            | Component::Physics(_)
            | Component::Jump(_)
            | Component::WalkingAnimation(_)
            | Component::AnimationController(_) => {}
        }
    }

    pub(crate) fn update(&mut self, dt: f32, entity: &mut Entity, ctx: &UpdateContext<'_>) {
        match self {
            Component::Position(c) => c.update(entity),
            Component::Rotation(c) => c.update(dt, entity),
            Component::Movement(c) => c.update(dt, entity, ctx),
            // Integrated by the physics system, not per entity.
            Component::Physics(_) => {}
            Component::Jump(c) => c.update(entity, ctx),
            Component::WalkingAnimation(c) => c.update(dt, entity, ctx),
            Component::AnimationController(c) => c.update(dt, entity, ctx),
        }
    }

    pub(crate) fn on_remove(&mut self, _entity: &mut Entity) {
        match self {
            Component::AnimationController(c) => c.on_remove(),
            Component::Position(_)
            | Component::Rotation(_)
            | Component::Movement(_)
            | Component::Physics(_)
            | Component::Jump(_)
            | Component::WalkingAnimation(_) => {}
        }
    }
}

macro_rules! impl_from_component {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Component {
                fn from(c: $ty) -> Self {
                    Component::$variant(c)
                }
            }
        )*
    };
}

impl_from_component!(
    Position(PositionComponent),
    Rotation(RotationComponent),
    Movement(MovementComponent),
    Physics(PhysicsComponent),
    Jump(JumpComponent),
    WalkingAnimation(WalkingAnimationComponent),
    AnimationController(AnimationController),
);
