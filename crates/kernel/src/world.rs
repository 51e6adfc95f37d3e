use std::time::Instant;

use skyline_common::{EntityId, SharedObject};
use skyline_ecs::{Component, ComponentKind, EcsError, Entity, JumpOutcome, Limbs, UpdateContext};
use skyline_input::{ActionMap, InputSystem};
use skyline_physics::{PhysicsConfig, PhysicsSystem};
use skyline_world::CityLayout;

use crate::clock::{FrameClock, FrameTimer};
use crate::config::SkylineConfig;
use crate::error::KernelError;
use crate::player::{PlayerConfig, spawn_player};
use crate::system::SystemManager;

/// The running session: entities, systems and frame timing.
///
/// One frame is: systems `pre_update` (input edges, then physics), every
/// entity's component updates, systems `post_update` (physics ground
/// re-check). Rendering happens outside, after [`World::frame`] returns.
pub struct World {
    entities: Vec<Entity>,
    systems: SystemManager,
    clock: FrameClock,
    timer: FrameTimer,
    tick: u64,
    layout: Option<CityLayout>,
    player: Option<EntityId>,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("tick", &self.tick)
            .field("entities", &self.entities.len())
            .field("systems", &self.systems)
            .field("buildings", &self.buildings_len())
            .finish()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(
            PhysicsConfig::default(),
            ActionMap::default(),
            FrameClock::default().max_dt(),
        )
    }
}

impl World {
    /// Input and physics systems registered, no entities, no buildings.
    pub fn new(physics: PhysicsConfig, bindings: ActionMap, max_dt: f32) -> Self {
        let mut systems = SystemManager::new();
        systems.add_system(Box::new(InputSystem::with_actions(bindings)));
        systems.add_system(Box::new(PhysicsSystem::new(physics)));
        Self {
            entities: Vec::new(),
            systems,
            clock: FrameClock::new(max_dt),
            timer: FrameTimer::default(),
            tick: 0,
            layout: None,
            player: None,
        }
    }

    /// Validated config, generated city, no entities yet.
    pub fn from_config(config: &SkylineConfig) -> Result<Self, KernelError> {
        config.validate()?;
        let mut world = Self::new(config.physics, config.bindings.clone(), config.max_dt);
        world.set_layout(CityLayout::generate(&config.world)?);
        Ok(world)
    }

    /// Install a city: its buildings and ground level go to the physics system.
    pub fn set_layout(&mut self, layout: CityLayout) {
        if let Some(physics) = self.physics_mut() {
            physics.set_ground_level(layout.ground_level());
            physics.set_buildings(layout.buildings().to_vec());
        }
        tracing::info!(
            seed = layout.seed(),
            buildings = layout.buildings().len(),
            "layout installed"
        );
        self.layout = Some(layout);
    }

    /// Layout passed to `set_layout`, if any.
    pub fn layout(&self) -> Option<&CityLayout> {
        self.layout.as_ref()
    }

    /// Advance one host frame. Returns the delta time used, in seconds.
    pub fn frame(&mut self, timestamp_ms: f64) -> f32 {
        let dt = self.clock.tick(timestamp_ms);
        self.step(dt);
        dt
    }

    /// Run the frame pipeline with an explicit delta time.
    pub fn step(&mut self, dt: f32) {
        let _span = tracing::info_span!("frame", tick = self.tick).entered();
        let start = Instant::now();

        self.systems.pre_update(dt, &mut self.entities);

        let ctx = self
            .systems
            .get::<InputSystem>()
            .map(UpdateContext::new)
            .unwrap_or_default();
        for entity in &mut self.entities {
            entity.update(dt, &ctx);
        }

        self.systems.post_update(dt, &mut self.entities);

        self.tick += 1;
        self.timer.record(start.elapsed());
        tracing::trace!(dt, tick = self.tick, "frame complete");
    }

    /// Number of frames stepped so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Wall-clock duration history of recent frames.
    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    // --- Systems ---

    /// Registered systems in run order.
    pub fn systems(&self) -> &SystemManager {
        &self.systems
    }

    pub fn systems_mut(&mut self) -> &mut SystemManager {
        &mut self.systems
    }

    /// The input system, if still registered.
    pub fn input(&self) -> Option<&InputSystem> {
        self.systems.get::<InputSystem>()
    }

    /// Host event entry point.
    pub fn input_mut(&mut self) -> Option<&mut InputSystem> {
        self.systems.get_mut::<InputSystem>()
    }

    /// The physics system, if still registered.
    pub fn physics(&self) -> Option<&PhysicsSystem> {
        self.systems.get::<PhysicsSystem>()
    }

    /// Mutable physics system, if still registered.
    pub fn physics_mut(&mut self) -> Option<&mut PhysicsSystem> {
        self.systems.get_mut::<PhysicsSystem>()
    }

    fn buildings_len(&self) -> usize {
        self.physics().map_or(0, |p| p.buildings().len())
    }

    /// Ground level the physics system resolves against.
    pub fn ground_level(&self) -> f32 {
        self.physics()
            .map_or(PhysicsConfig::default().ground_level, PhysicsSystem::ground_level)
    }

    // --- Entities ---

    /// Append an entity to the update order.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id();
        tracing::debug!(id = %id.short(), name = entity.name(), "spawn");
        self.entities.push(entity);
        id
    }

    /// Validate `config`, then build the player avatar on the current ground
    /// level and spawn it. Nothing is spawned when validation fails.
    pub fn spawn_player(
        &mut self,
        config: &PlayerConfig,
        body: SharedObject,
        limbs: Option<Limbs>,
    ) -> Result<EntityId, KernelError> {
        config.validate()?;
        let player = spawn_player(config, self.ground_level(), body, limbs);
        let id = self.spawn(player);
        self.player = Some(id);
        Ok(id)
    }

    /// Id of the spawned player, if any.
    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    /// All entities in update order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities whose update is not gated off.
    pub fn active_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_active()).count()
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Look up an entity by id for mutation.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Destroy the entity and drop it from the world.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(index) = self.entities.iter().position(|e| e.id() == id) else {
            return false;
        };
        let mut entity = self.entities.remove(index);
        entity.destroy();
        if self.player == Some(id) {
            self.player = None;
        }
        true
    }

    /// Request a jump outside the input path (host button, script).
    pub fn jump(&mut self, id: EntityId) -> Result<JumpOutcome, KernelError> {
        let entity = self.entity_mut(id).ok_or(KernelError::EntityNotFound(id))?;
        let result = entity.with_component(ComponentKind::Jump, |component, entity| {
            match component {
                Component::Jump(jump) => jump.trigger_jump(entity),
                _ => Err(missing_jump(entity)),
            }
        });
        match result {
            Some(outcome) => Ok(outcome?),
            None => {
                tracing::warn!(entity = entity.name(), "jump requested without a jump component");
                Err(missing_jump(entity).into())
            }
        }
    }

    /// End the session: destroy every entity and system.
    pub fn shutdown(&mut self) {
        for mut entity in self.entities.drain(..) {
            entity.destroy();
        }
        self.systems.destroy();
        self.player = None;
        tracing::info!(ticks = self.tick, "world shut down");
    }
}

fn missing_jump(entity: &Entity) -> EcsError {
    EcsError::MissingComponent {
        entity: entity.name().to_string(),
        kind: ComponentKind::Jump,
    }
}
