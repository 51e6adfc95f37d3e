use serde::Serialize;
use skyline_common::EntityId;
use skyline_ecs::{AnimationState, Entity, UpdateContext};
use skyline_kernel::World;

/// World inspector for developer tooling.
///
/// Read-only queries against a running world for debugging, profiling and
/// the CLI's report output.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        WorldSummary {
            tick: world.tick(),
            entity_count: world.entity_count(),
            active_count: world.active_count(),
            building_count: world.physics().map_or(0, |p| p.buildings().len()),
            systems: world.systems().names().collect(),
            avg_frame_us: world.timer().average().as_secs_f64() * 1e6,
            max_frame_us: world.timer().max().as_secs_f64() * 1e6,
        }
    }

    /// Snapshot one entity, or `None` if the id is unknown.
    pub fn inspect_entity(world: &World, id: EntityId) -> Option<EntityInfo> {
        let entity = world.entity(id)?;
        let ctx = world.input().map(UpdateContext::new).unwrap_or_default();
        Some(EntityInfo::capture(entity, &ctx))
    }

    /// Every entity, in update order.
    pub fn list_entities(world: &World) -> Vec<EntityId> {
        world.entities().iter().map(Entity::id).collect()
    }
}

/// Snapshot of world-level counters.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub entity_count: usize,
    pub active_count: usize,
    pub building_count: usize,
    pub systems: Vec<&'static str>,
    pub avg_frame_us: f64,
    pub max_frame_us: f64,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} entities={} active={} buildings={} systems=[{}] frame avg={:.1}us max={:.1}us",
            self.tick,
            self.entity_count,
            self.active_count,
            self.building_count,
            self.systems.join(", "),
            self.avg_frame_us,
            self.max_frame_us,
        )
    }
}

/// Snapshot of one entity. Fields are `None` when the entity lacks the
/// backing object or component.
#[derive(Debug, Clone, Serialize)]
pub struct EntityInfo {
    pub id: EntityId,
    pub name: String,
    pub active: bool,
    pub position: Option<[f32; 3]>,
    pub yaw: Option<f32>,
    pub velocity: Option<[f32; 3]>,
    pub grounded: Option<bool>,
    pub animation: AnimationState,
    pub remaining_air_jumps: Option<u32>,
}

impl EntityInfo {
    fn capture(entity: &Entity, ctx: &UpdateContext<'_>) -> Self {
        let physics = entity.physics();
        Self {
            id: entity.id(),
            name: entity.name().to_string(),
            active: entity.is_active(),
            position: entity.position().map(|p| p.to_array()),
            yaw: entity.yaw(),
            velocity: physics.map(|p| p.velocity.to_array()),
            grounded: physics.map(|p| p.is_grounded),
            animation: AnimationState::derive(entity, ctx),
            remaining_air_jumps: entity.jump().map(|j| j.remaining_air_jumps),
        }
    }
}

impl std::fmt::Display for EntityInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.id.short())?;
        if !self.active {
            f.write_str(" (inactive)")?;
        }
        if let Some([x, y, z]) = self.position {
            write!(f, " pos=({x:.2}, {y:.2}, {z:.2})")?;
        }
        if let Some(yaw) = self.yaw {
            write!(f, " yaw={yaw:.2}")?;
        }
        if let Some([x, y, z]) = self.velocity {
            write!(f, " vel=({x:.2}, {y:.2}, {z:.2})")?;
        }
        if let Some(grounded) = self.grounded {
            write!(f, " grounded={grounded}")?;
        }
        write!(f, " anim={}", self.animation)?;
        if let Some(jumps) = self.remaining_air_jumps {
            write!(f, " air_jumps={jumps}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use skyline_common::{SceneNode, shared};
    use skyline_kernel::PlayerConfig;

    fn world_with_player() -> (World, EntityId) {
        let mut world = World::default();
        let id = world
            .spawn_player(&PlayerConfig::default(), shared(SceneNode::default()), None)
            .unwrap();
        (world, id)
    }

    #[test]
    fn summary_empty_world() {
        let world = World::default();
        let summary = WorldInspector::summary(&world);
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.entity_count, 0);
        assert_eq!(summary.building_count, 0);
        assert_eq!(summary.systems, ["input", "physics"]);
        assert_eq!(summary.avg_frame_us, 0.0);
    }

    #[test]
    fn summary_counts_ticks_and_entities() {
        let (mut world, _) = world_with_player();
        world.spawn(Entity::new("Marker"));
        world.step(1.0 / 60.0);
        world.step(1.0 / 60.0);

        let summary = WorldInspector::summary(&world);
        assert_eq!(summary.tick, 2);
        assert_eq!(summary.entity_count, 2);
        assert_eq!(summary.active_count, 2);
        assert!(summary.to_string().starts_with("World: tick=2 entities=2"));
    }

    #[test]
    fn inspect_player() {
        let (world, id) = world_with_player();
        let info = WorldInspector::inspect_entity(&world, id).unwrap();
        assert_eq!(info.name, "Player");
        assert_eq!(info.position, Some([0.0, 1.25, 0.0]));
        assert_eq!(info.grounded, Some(true));
        assert_eq!(info.velocity, Some([0.0; 3]));
        assert_eq!(info.animation, AnimationState::Idle);
        assert_eq!(info.remaining_air_jumps, Some(1));

        let text = info.to_string();
        assert!(text.contains("pos=(0.00, 1.25, 0.00)"));
        assert!(text.contains("anim=idle"));
    }

    #[test]
    fn inspect_walking_player() {
        let (mut world, id) = world_with_player();
        world.input_mut().unwrap().key_down("w");
        world.step(1.0 / 60.0);
        let info = WorldInspector::inspect_entity(&world, id).unwrap();
        assert_eq!(info.animation, AnimationState::Walking);
    }

    #[test]
    fn inspect_bare_entity() {
        let mut world = World::default();
        let id = world.spawn(Entity::new("Ghost"));
        let info = WorldInspector::inspect_entity(&world, id).unwrap();
        assert_eq!(info.position, None);
        assert_eq!(info.grounded, None);
        assert_eq!(info.remaining_air_jumps, None);
        assert_eq!(info.to_string(), format!("Ghost [{}] anim=idle", id.short()));
    }

    #[test]
    fn inspect_entity_not_found() {
        let world = World::default();
        assert!(WorldInspector::inspect_entity(&world, EntityId::new()).is_none());
    }

    #[test]
    fn list_entities_in_update_order() {
        let mut world = World::default();
        let a = world.spawn(Entity::with_object("A", shared(SceneNode::at(Vec3::X))));
        let b = world.spawn(Entity::new("B"));
        assert_eq!(WorldInspector::list_entities(&world), vec![a, b]);
    }

    #[test]
    fn info_serializes_to_json() {
        let (world, id) = world_with_player();
        let info = WorldInspector::inspect_entity(&world, id).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["name"], "Player");
        assert_eq!(json["grounded"], true);
        assert_eq!(json["animation"], "Idle");
    }
}
