//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use defender_core::components::*;
use defender_core::enums::GamePhase;
use defender_core::events::AudioEvent;
use defender_core::state::*;
use defender_core::types::{Position, SimTime};

use crate::scoring::ScoreState;

/// Build a complete GameStateSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    audio_events: Vec<AudioEvent>,
    score: &ScoreState,
) -> GameStateSnapshot {
    let player = build_player(world);
    let fuel = player.as_ref().map(|p| p.fuel).unwrap_or_default();

    GameStateSnapshot {
        time: *time,
        phase,
        player,
        landers: build_landers(world),
        humanoids: build_humanoids(world),
        projectiles: build_projectiles(world),
        fuel_pickup: build_fuel_pickup(world, time),
        hud: HudView {
            score: score.score,
            lives: score.lives,
            shields: score.shields,
            fuel,
            humanoids_alive: score.humanoids_alive,
            landers_destroyed: score.landers_destroyed,
            landers_spawned: score.landers_spawned,
            all_humanoids_dead: score.all_humanoids_dead,
            loss_reason: score.loss_reason,
        },
        audio_events,
    }
}

fn entity_id(entity: Entity) -> u64 {
    entity.to_bits().get()
}

fn build_player(world: &World) -> Option<PlayerView> {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .next()
        .map(|(_, (player, pos))| PlayerView {
            position: *pos,
            facing: player.facing,
            fuel: player.fuel,
            shield_active: player.shield_active,
            carrying_humanoid: player.is_carrying(),
        })
}

fn build_landers(world: &World) -> Vec<LanderView> {
    let mut landers: Vec<(SpawnOrder, LanderView)> = world
        .query::<(&Lander, &Position, &SpawnOrder)>()
        .iter()
        .map(|(entity, (lander, pos, order))| {
            let view = LanderView {
                id: entity_id(entity),
                position: *pos,
                target: lander.target,
                destroyed: lander.destroyed,
                carrying_humanoid: lander.is_carrying(),
            };
            (*order, view)
        })
        .collect();

    landers.sort_by_key(|(order, _)| *order);
    landers.into_iter().map(|(_, v)| v).collect()
}

fn build_humanoids(world: &World) -> Vec<HumanoidView> {
    let mut humanoids: Vec<(SpawnOrder, HumanoidView)> = world
        .query::<(&Humanoid, &Position, &SpawnOrder)>()
        .iter()
        .map(|(entity, (humanoid, pos, order))| {
            let view = HumanoidView {
                id: entity_id(entity),
                position: *pos,
                state: humanoid.state,
            };
            (*order, view)
        })
        .collect();

    humanoids.sort_by_key(|(order, _)| *order);
    humanoids.into_iter().map(|(_, v)| v).collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(SpawnOrder, ProjectileView)> = world
        .query::<(&Projectile, &Position, &SpawnOrder)>()
        .iter()
        .filter(|(_, (p, _, _))| !p.destroyed)
        .map(|(entity, (projectile, pos, order))| {
            let view = ProjectileView {
                id: entity_id(entity),
                position: *pos,
                kind: projectile.kind,
                owner: projectile.owner,
            };
            (*order, view)
        })
        .collect();

    projectiles.sort_by_key(|(order, _)| *order);
    projectiles.into_iter().map(|(_, v)| v).collect()
}

fn build_fuel_pickup(world: &World, time: &SimTime) -> Option<FuelPickupView> {
    world
        .query::<(&FuelPickup, &Position)>()
        .iter()
        .next()
        .map(|(_, (pickup, pos))| FuelPickupView {
            position: *pos,
            visible: pickup.is_visible(time),
        })
}
