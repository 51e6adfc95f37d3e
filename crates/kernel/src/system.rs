use std::any::Any;

use skyline_ecs::Entity;
use skyline_input::InputSystem;
use skyline_physics::PhysicsSystem;

/// Cross-entity behaviour run once per frame in a fixed phase.
///
/// Every hook defaults to a no-op so a system only implements the phases
/// it takes part in.
pub trait System: Any {
    /// Registry name, unique within a [`SystemManager`].
    fn name(&self) -> &'static str;

    fn init(&mut self) {}

    /// Runs before entity updates.
    fn pre_update(&mut self, _dt: f32, _entities: &mut [Entity]) {}

    /// Runs after entity updates.
    fn post_update(&mut self, _dt: f32, _entities: &mut [Entity]) {}

    fn destroy(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl System for InputSystem {
    fn name(&self) -> &'static str {
        "input"
    }

    fn init(&mut self) {
        InputSystem::init(self);
    }

    fn pre_update(&mut self, _dt: f32, _entities: &mut [Entity]) {
        InputSystem::pre_update(self);
    }

    fn destroy(&mut self) {
        InputSystem::destroy(self);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn pre_update(&mut self, dt: f32, entities: &mut [Entity]) {
        PhysicsSystem::pre_update(self, dt, entities);
    }

    fn post_update(&mut self, dt: f32, entities: &mut [Entity]) {
        PhysicsSystem::post_update(self, dt, entities);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Ordered system registry. Phases run systems in registration order.
#[derive(Default)]
pub struct SystemManager {
    systems: Vec<Box<dyn System>>,
}

impl std::fmt::Debug for SystemManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl SystemManager {
    /// Empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register and initialise a system. A system with the same name is
    /// destroyed and replaced in place.
    pub fn add_system(&mut self, mut system: Box<dyn System>) {
        system.init();
        let name = system.name();
        match self.systems.iter_mut().find(|s| s.name() == name) {
            Some(slot) => {
                slot.destroy();
                *slot = system;
                tracing::debug!(system = name, "system replaced");
            }
            None => {
                self.systems.push(system);
                tracing::debug!(system = name, "system added");
            }
        }
    }

    /// Destroy and unregister the system called `name`.
    pub fn remove_system(&mut self, name: &str) -> Option<Box<dyn System>> {
        let index = self.systems.iter().position(|s| s.name() == name)?;
        let mut system = self.systems.remove(index);
        system.destroy();
        tracing::debug!(system = name, "system removed");
        Some(system)
    }

    /// Run every system's `pre_update` in registration order.
    pub fn pre_update(&mut self, dt: f32, entities: &mut [Entity]) {
        for system in &mut self.systems {
            system.pre_update(dt, entities);
        }
    }

    /// Run every system's `post_update` in registration order.
    pub fn post_update(&mut self, dt: f32, entities: &mut [Entity]) {
        for system in &mut self.systems {
            system.post_update(dt, entities);
        }
    }

    /// First registered system of concrete type `T`.
    pub fn get<T: System>(&self) -> Option<&T> {
        self.systems
            .iter()
            .find_map(|s| s.as_any().downcast_ref::<T>())
    }

    /// Mutable typed lookup; `None` if no system has type `T`.
    pub fn get_mut<T: System>(&mut self) -> Option<&mut T> {
        self.systems
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }

    /// System names in run order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.systems.iter().map(|s| s.name())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Destroy every system and empty the registry.
    pub fn destroy(&mut self) {
        for mut system in self.systems.drain(..) {
            system.destroy();
        }
    }
}
