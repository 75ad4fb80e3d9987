//! Read-only world queries shared by several systems.

use hecs::{Component, Entity, World};

use defender_core::components::{Humanoid, Player, SpawnOrder};
use defender_core::types::Position;

/// Entities carrying component `C`, in creation order.
pub fn ordered<C: Component>(world: &World) -> Vec<Entity> {
    let mut found: Vec<(SpawnOrder, Entity)> = world
        .query::<(&C, &SpawnOrder)>()
        .iter()
        .map(|(entity, (_, order))| (*order, entity))
        .collect();
    found.sort_unstable_by_key(|(order, _)| *order);
    found.into_iter().map(|(_, entity)| entity).collect()
}

/// Roaming humanoids and their positions, in creation order.
pub fn roaming_humanoids(world: &World) -> Vec<(Entity, Position)> {
    ordered::<Humanoid>(world)
        .into_iter()
        .filter_map(|entity| {
            let mut query = world.query_one::<(&Humanoid, &Position)>(entity).ok()?;
            let (humanoid, pos) = query.get()?;
            humanoid.is_roaming().then_some((entity, *pos))
        })
        .collect()
}

/// The player entity, if a run is in progress.
pub fn player_entity(world: &World) -> Option<Entity> {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}

pub fn player_position(world: &World) -> Option<Position> {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (_, pos))| *pos)
}
