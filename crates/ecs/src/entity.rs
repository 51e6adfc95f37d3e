use glam::Vec3;
use skyline_common::{EntityId, SharedObject};
use skyline_input::InputSystem;

use crate::component::{Component, ComponentKind};
use crate::components::{
    AnimationController, JumpComponent, MovementComponent, PhysicsComponent, PositionComponent,
    RotationComponent, WalkingAnimationComponent,
};

/// Borrowed session state handed to component updates.
///
/// The input system is owned by the session; components only see it for
/// the duration of one update call.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateContext<'a> {
    pub input: Option<&'a InputSystem>,
}

impl<'a> UpdateContext<'a> {
    /// Context that exposes `input` to the hooks.
    pub fn new(input: &'a InputSystem) -> Self {
        Self { input: Some(input) }
    }

    /// No session state: input-driven components become no-ops.
    pub fn detached() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
struct Slot {
    kind: ComponentKind,
    // `None` only while the component is running one of its hooks.
    component: Option<Component>,
}

/// A game object: identity, name, active flag, an optional visual object and
/// its components in insertion order.
pub struct Entity {
    id: EntityId,
    name: String,
    active: bool,
    object: Option<SharedObject>,
    components: Vec<Slot>,
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &self.active)
            .field("has_object", &self.object.is_some())
            .field("components", &self.component_kinds().collect::<Vec<_>>())
            .finish()
    }
}

macro_rules! typed_access {
    ($($get:ident, $get_mut:ident => $variant:ident($ty:ty);)*) => {
        $(
            pub fn $get(&self) -> Option<&$ty> {
                self.components.iter().find_map(|slot| match &slot.component {
                    Some(Component::$variant(c)) => Some(c),
                    _ => None,
                })
            }

            pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                self.components.iter_mut().find_map(|slot| match &mut slot.component {
                    Some(Component::$variant(c)) => Some(c),
                    _ => None,
                })
            }
        )*
    };
}

impl Entity {
    /// Active entity with no visual object and no components.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            active: true,
            object: None,
            components: Vec::new(),
        }
    }

    /// Active entity bound to a visual object.
    pub fn with_object(name: impl Into<String>, object: SharedObject) -> Self {
        let mut entity = Self::new(name);
        entity.object = Some(object);
        entity
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Gate update dispatch without removing components.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    // --- Visual object ---

    /// Visual object handle, if one is attached.
    pub fn object(&self) -> Option<&SharedObject> {
        self.object.as_ref()
    }

    /// Attach or replace the visual object.
    pub fn set_object(&mut self, object: SharedObject) {
        self.object = Some(object);
    }

    /// Position of the visual object, if there is one.
    pub fn position(&self) -> Option<Vec3> {
        self.object.as_ref().map(|o| o.borrow().position())
    }

    /// Yaw of the visual object, if there is one.
    pub fn yaw(&self) -> Option<f32> {
        self.object.as_ref().map(|o| o.borrow().yaw())
    }

    /// Move the visual object and mirror the result into the position
    /// component. Returns false when there is no visual object.
    pub fn set_position(&mut self, position: Vec3) -> bool {
        let Some(object) = &self.object else {
            return false;
        };
        object.borrow_mut().set_position(position);
        self.sync_position(position);
        true
    }

    /// Copy `position` into the position component, if present.
    pub fn sync_position(&mut self, position: Vec3) {
        if let Some(mirror) = self.position_component_mut() {
            mirror.set(position);
        }
    }

    // --- Components ---

    /// Store a component and run its `on_add` hook. A component of the same
    /// kind is replaced in place (keeping its update order) after its
    /// `on_remove` hook runs.
    pub fn add_component(&mut self, component: impl Into<Component>) {
        let mut component = component.into();
        let kind = component.kind();

        let index = match self.slot_index(kind) {
            Some(index) => {
                if let Some(mut old) = self.components[index].component.take() {
                    old.on_remove(self);
                }
                index
            }
            None => {
                self.components.push(Slot {
                    kind,
                    component: None,
                });
                self.components.len() - 1
            }
        };

        component.on_add(self);
        self.components[index].component = Some(component);
        tracing::trace!(entity = %self.name, %kind, "component added");
    }

    /// Component of `kind`, if present.
    pub fn component(&self, kind: ComponentKind) -> Option<&Component> {
        self.components
            .iter()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.component.as_ref())
    }

    /// Mutable component of `kind`, if present.
    pub fn component_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components
            .iter_mut()
            .find(|slot| slot.kind == kind)
            .and_then(|slot| slot.component.as_mut())
    }

    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.component(kind).is_some()
    }

    /// Kinds in update order.
    pub fn component_kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.components.iter().map(|slot| slot.kind)
    }

    /// Run `on_remove` and drop the component from the entity.
    pub fn remove_component(&mut self, kind: ComponentKind) -> Option<Component> {
        let index = self.slot_index(kind)?;
        let mut component = self.components[index].component.take()?;
        component.on_remove(self);
        self.components.retain(|slot| slot.kind != kind);
        Some(component)
    }

    /// Temporarily detach the component of `kind` and call `f` with it and
    /// the rest of the entity. The component cannot see itself through the
    /// entity while `f` runs.
    pub fn with_component<R>(
        &mut self,
        kind: ComponentKind,
        f: impl FnOnce(&mut Component, &mut Entity) -> R,
    ) -> Option<R> {
        let index = self.slot_index(kind)?;
        let mut component = self.components[index].component.take()?;
        let result = f(&mut component, self);
        self.restore(kind, component);
        Some(result)
    }

    /// Run every component's update hook in insertion order. Inactive
    /// entities are skipped entirely.
    pub fn update(&mut self, dt: f32, ctx: &UpdateContext<'_>) {
        if !self.active {
            return;
        }
        // A hook may destroy the entity, so the length is re-read each step.
        let mut index = 0;
        while let Some(kind) = self.components.get(index).map(|slot| slot.kind) {
            self.with_component(kind, |component, entity| {
                component.update(dt, entity, ctx)
            });
            index += 1;
        }
    }

    /// Remove every component (running `on_remove`) and deactivate the
    /// entity for good.
    pub fn destroy(&mut self) {
        let slots = std::mem::take(&mut self.components);
        for slot in slots {
            if let Some(mut component) = slot.component {
                component.on_remove(self);
            }
        }
        self.active = false;
        tracing::debug!(entity = %self.name, id = %self.id.short(), "entity destroyed");
    }

    typed_access! {
        position_component, position_component_mut => Position(PositionComponent);
        rotation, rotation_mut => Rotation(RotationComponent);
        movement, movement_mut => Movement(MovementComponent);
        physics, physics_mut => Physics(PhysicsComponent);
        jump, jump_mut => Jump(JumpComponent);
        walking_animation, walking_animation_mut => WalkingAnimation(WalkingAnimationComponent);
        animation_controller, animation_controller_mut => AnimationController(AnimationController);
    }

    fn slot_index(&self, kind: ComponentKind) -> Option<usize> {
        self.components.iter().position(|slot| slot.kind == kind)
    }

    fn restore(&mut self, kind: ComponentKind, component: Component) {
        match self
            .components
            .iter_mut()
            .find(|slot| slot.kind == kind && slot.component.is_none())
        {
            Some(slot) => slot.component = Some(component),
            // The entity was destroyed while the hook ran.
            None => tracing::trace!(entity = %self.name, %kind, "dropping detached component"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyline_common::{SceneNode, shared};
    use std::f32::consts::PI;

    fn player() -> Entity {
        Entity::with_object("Player", shared(SceneNode::at(Vec3::new(0.0, 1.25, 0.0))))
    }

    #[test]
    fn get_missing_component_is_none() {
        let e = Entity::new("Empty");
        assert!(e.component(ComponentKind::Physics).is_none());
        assert!(e.physics().is_none());
        assert!(!e.has_component(ComponentKind::Jump));
    }

    #[test]
    fn components_keep_insertion_order() {
        let mut e = player();
        e.add_component(PhysicsComponent::default());
        e.add_component(MovementComponent::default());
        e.add_component(RotationComponent::new(0.0, 2.0));
        let kinds: Vec<_> = e.component_kinds().collect();
        assert_eq!(
            kinds,
            vec![
                ComponentKind::Physics,
                ComponentKind::Movement,
                ComponentKind::Rotation
            ]
        );
    }

    #[test]
    fn replacing_keeps_position_in_order() {
        let mut e = player();
        e.add_component(PhysicsComponent::default());
        e.add_component(JumpComponent::new(7.0, 1));
        e.add_component(PhysicsComponent::new(2.0, false));
        let kinds: Vec<_> = e.component_kinds().collect();
        assert_eq!(kinds, vec![ComponentKind::Physics, ComponentKind::Jump]);
        assert_eq!(e.physics().unwrap().mass, 2.0);
    }

    #[test]
    fn on_add_writes_initial_transform() {
        let mut e = player();
        e.add_component(PositionComponent::new(3.0, 1.25, -2.0));
        e.add_component(RotationComponent::new(PI, 2.0));
        assert_eq!(e.position(), Some(Vec3::new(3.0, 1.25, -2.0)));
        assert_eq!(e.yaw(), Some(PI));
    }

    #[test]
    fn remove_component_deletes_entry() {
        let mut e = player();
        e.add_component(PhysicsComponent::default());
        let removed = e.remove_component(ComponentKind::Physics);
        assert!(matches!(removed, Some(Component::Physics(_))));
        assert!(!e.has_component(ComponentKind::Physics));
        assert!(e.remove_component(ComponentKind::Physics).is_none());
    }

    #[test]
    fn inactive_entity_does_not_update() {
        let mut e = player();
        e.add_component(RotationComponent::new(0.0, 2.0));
        e.rotation_mut().unwrap().set_target_rotation(1.0);
        e.set_active(false);
        e.update(0.1, &UpdateContext::detached());
        assert_eq!(e.rotation().unwrap().rotation(), 0.0);
    }

    #[test]
    fn update_runs_component_hooks() {
        let mut e = player();
        e.add_component(RotationComponent::new(0.0, 2.0));
        e.rotation_mut().unwrap().set_target_rotation(1.0);
        e.update(0.1, &UpdateContext::detached());
        let yaw = e.rotation().unwrap().rotation();
        assert!(yaw > 0.0 && yaw < 1.0);
        assert_eq!(e.yaw(), Some(yaw));
    }

    #[test]
    fn update_visits_every_component_once() {
        let mut e = player();
        let mut physics = PhysicsComponent::default();
        physics.is_grounded = true;
        e.add_component(physics);
        e.add_component(RotationComponent::new(0.0, 1.0));
        e.add_component(JumpComponent::new(7.0, 1));
        e.rotation_mut().unwrap().set_target_rotation(1.0);

        e.update(0.5, &UpdateContext::detached());
        // One easing step of diff * min(1.0 * 0.5, 1).
        assert!((e.rotation().unwrap().rotation() - 0.5).abs() < 1e-6);
        assert!(e.jump().unwrap().was_grounded_last_frame);
        assert_eq!(e.component_kinds().count(), 3);
        assert!(e.physics().is_some());
    }

    #[test]
    fn destroy_clears_and_deactivates() {
        let mut e = player();
        e.add_component(PhysicsComponent::default());
        e.add_component(AnimationController::without_clips());
        e.destroy();
        assert!(!e.is_active());
        assert_eq!(e.component_kinds().count(), 0);
    }

    #[test]
    fn set_position_mirrors_into_component() {
        let mut e = player();
        e.add_component(PositionComponent::new(0.0, 1.25, 0.0));
        assert!(e.set_position(Vec3::new(4.0, 2.0, 1.0)));
        assert_eq!(e.position_component().unwrap().get(), Vec3::new(4.0, 2.0, 1.0));

        let mut headless = Entity::new("Ghost");
        assert!(!headless.set_position(Vec3::ONE));
    }

    #[test]
    fn with_component_hides_itself() {
        let mut e = player();
        e.add_component(PhysicsComponent::default());
        let seen = e.with_component(ComponentKind::Physics, |_, entity| entity.physics().is_some());
        assert_eq!(seen, Some(false));
        assert!(e.physics().is_some());
    }
}
