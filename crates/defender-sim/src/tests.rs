//! Tests for the simulation engine, collision rules, spawning and the
//! win/lose checks.

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use defender_core::commands::InputIntents;
use defender_core::components::*;
use defender_core::constants::*;
use defender_core::enums::*;
use defender_core::events::AudioEvent;
use defender_core::highscores::ScoreEntry;
use defender_core::tuning::Tuning;
use defender_core::types::{Cooldown, Position, SimTime};

use defender_lander_ai::profiles::LanderProfile;

use crate::engine::{SimConfig, SimulationEngine};
use crate::scoring::ScoreState;
use crate::systems::spawner::SpawnScheduler;
use crate::systems::{cleanup, collision, game_state, humanoid, lander_ai, projectiles, spawner};
use crate::world_setup;

const DT: f32 = 1.0 / 60.0;

fn start() -> InputIntents {
    InputIntents {
        start: true,
        ..InputIntents::idle()
    }
}

/// No landers and no humanoids ever spawn; the player has the arena alone.
fn quiet_tuning() -> Tuning {
    Tuning {
        lander_lifetime_cap: 0,
        humanoid_concurrent_target: 0,
        ..Tuning::default()
    }
}

fn started_engine(tuning: Tuning) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig { seed: 7, tuning });
    engine.tick(DT, &start());
    engine
}

fn player_of(world: &World) -> Entity {
    world
        .query::<&Player>()
        .iter()
        .next()
        .map(|(e, _)| e)
        .expect("player exists")
}

/// A bare world plus the loose state the engine normally owns, for
/// driving single systems.
struct Bench {
    world: World,
    tuning: Tuning,
    now: SimTime,
    rng: ChaCha8Rng,
    score: ScoreState,
    events: Vec<AudioEvent>,
    order: u64,
}

impl Bench {
    fn new(tuning: Tuning) -> Self {
        Self {
            world: World::new(),
            score: ScoreState::new(&tuning),
            tuning,
            now: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(1),
            events: Vec::new(),
            order: 0,
        }
    }

    fn with_player() -> (Self, Entity) {
        let mut bench = Self::new(Tuning::default());
        let player = world_setup::spawn_player(&mut bench.world, &bench.tuning, &bench.now);
        (bench, player)
    }

    fn lander_at(&mut self, pos: Position) -> Entity {
        let order = SpawnOrder(self.order);
        self.order += 1;
        self.world.spawn((
            Lander {
                target: pos,
                destroyed: false,
                carrying: None,
                fire_cooldown: Cooldown::started(self.tuning.missile_cooldown_secs, &self.now),
            },
            pos,
            Hitbox::new(LANDER_WIDTH, LANDER_HEIGHT),
            order,
        ))
    }

    fn humanoid_at(&mut self, pos: Position) -> Entity {
        world_setup::spawn_humanoid_at(&mut self.world, pos, &mut self.order)
    }

    fn falling_humanoid_at(&mut self, pos: Position) -> Entity {
        let h = self.humanoid_at(pos);
        self.world.get::<&mut Humanoid>(h).unwrap().state = HumanoidState::Falling;
        h
    }

    fn laser_at(&mut self, pos: Position) -> Entity {
        world_setup::spawn_laser(&mut self.world, &self.tuning, &mut self.order, pos, Facing::Right)
    }

    fn missile_at(&mut self, pos: Position) -> Entity {
        world_setup::spawn_missile(
            &mut self.world,
            &self.tuning,
            &mut self.order,
            pos,
            Vec2::new(0.0, 1.0),
        )
    }

    fn collide(&mut self) {
        collision::run(
            &mut self.world,
            &self.tuning,
            &self.now,
            &mut self.rng,
            &mut self.score,
            &mut self.events,
        );
    }

    fn move_landers(&mut self, dt: f32) {
        let profile = LanderProfile::from_tuning(&self.tuning);
        lander_ai::run(
            &mut self.world,
            &profile,
            &self.tuning,
            &self.now,
            dt,
            &mut self.order,
            &mut self.events,
        );
    }

    fn move_humanoids(&mut self, dt: f32) {
        humanoid::run(
            &mut self.world,
            &self.tuning,
            dt,
            &mut self.score,
            &mut self.events,
        );
    }

    fn state_of(&self, humanoid: Entity) -> HumanoidState {
        self.world.get::<&Humanoid>(humanoid).unwrap().state
    }

    fn lander(&self, lander: Entity) -> Lander {
        (*self.world.get::<&Lander>(lander).unwrap()).clone()
    }

    fn set_position(&mut self, entity: Entity, pos: Position) {
        *self.world.get::<&mut Position>(entity).unwrap() = pos;
    }

    fn count<C: hecs::Component>(&self) -> usize {
        self.world.query::<&C>().iter().count()
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.tick(DT, &start());
    engine_b.tick(DT, &start());

    for frame in 0..600u32 {
        let intents = InputIntents {
            left: frame % 120 < 60,
            right: frame % 120 >= 60,
            fire: frame % 3 == 0,
            ..InputIntents::idle()
        };
        let snap_a = engine_a.tick(DT, &intents);
        let snap_b = engine_b.tick(DT, &intents);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.tick(DT, &start());
    engine_b.tick(DT, &start());

    let mut diverged = false;
    for _ in 0..300 {
        let a = serde_json::to_string(&engine_a.tick(DT, &InputIntents::idle())).unwrap();
        let b = serde_json::to_string(&engine_b.tick(DT, &InputIntents::idle())).unwrap();
        if a != b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce different runs");
}

#[test]
fn test_sim_config_from_partial_json() {
    let config: SimConfig = serde_json::from_str(r#"{"seed": 9}"#).unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.tuning, Tuning::default());
}

// ---- Phase flow ----

#[test]
fn test_splash_holds_until_start() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    for _ in 0..10 {
        let snap = engine.tick(DT, &InputIntents::idle());
        assert_eq!(snap.phase, GamePhase::Splash);
        assert!(snap.player.is_none());
        assert!(snap.landers.is_empty());
    }
    assert_eq!(engine.time().frame, 0);
}

#[test]
fn test_start_spawns_player_and_pickup() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.tick(DT, &start());

    assert_eq!(snap.phase, GamePhase::Playing);
    let player = snap.player.expect("player spawned");
    assert_eq!(player.position, Position::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0));
    assert_eq!(player.facing, Facing::Right);
    assert_eq!(player.fuel, PLAYER_MAX_FUEL);
    assert!(!player.shield_active);

    assert_eq!(snap.hud.lives, INITIAL_LIVES);
    assert_eq!(snap.hud.shields, INITIAL_SHIELDS);
    assert_eq!(snap.hud.humanoids_alive, HUMANOID_LIFETIME_CAP);
    assert_eq!(snap.hud.score, 0);

    // First humanoid is immediate; the first lander waits an interval.
    assert_eq!(snap.humanoids.len(), 1);
    assert!(snap.landers.is_empty());

    let pickup = snap.fuel_pickup.expect("fuel pickup spawned");
    assert!(!pickup.visible, "pickup starts its cycle hidden");
}

#[test]
fn test_first_lander_arrives_after_interval() {
    let mut engine = started_engine(Tuning::default());
    for _ in 0..100 {
        engine.tick(DT, &InputIntents::idle());
    }
    let snap = engine.tick(DT, &InputIntents::idle());
    assert_eq!(snap.hud.landers_spawned, 1);
    assert_eq!(snap.landers.len(), 1);
}

#[test]
fn test_out_of_fuel_ends_run_and_freezes_time() {
    let mut engine = started_engine(quiet_tuning());
    let player = player_of(engine.world());
    engine.world_mut().get::<&mut Player>(player).unwrap().fuel = 0.05;

    let snap = engine.tick(
        DT,
        &InputIntents {
            right: true,
            ..InputIntents::idle()
        },
    );
    assert_eq!(snap.phase, GamePhase::GameOverLose);
    assert_eq!(snap.hud.loss_reason, Some(LossReason::OutOfFuel));
    assert_eq!(snap.hud.fuel, 0.0);

    let frame = engine.time().frame;
    engine.tick(DT, &InputIntents::idle());
    assert_eq!(engine.time().frame, frame, "no simulation after game over");
    assert_eq!(engine.phase(), GamePhase::GameOverLose);
}

#[test]
fn test_confirm_reset_restarts_run() {
    let mut engine = started_engine(quiet_tuning());
    engine.score_mut().score = 350;
    engine.score_mut().lives = 0;
    let snap = engine.tick(DT, &InputIntents::idle());
    assert_eq!(snap.phase, GamePhase::GameOverLose);
    assert_eq!(snap.hud.loss_reason, Some(LossReason::LivesExhausted));

    // Start alone does not leave the game-over screen.
    engine.tick(DT, &start());
    assert_eq!(engine.phase(), GamePhase::GameOverLose);

    let snap = engine.tick(
        DT,
        &InputIntents {
            confirm_reset: true,
            ..InputIntents::idle()
        },
    );
    assert_eq!(snap.phase, GamePhase::Playing);
    assert_eq!(snap.hud.score, 0);
    assert_eq!(snap.hud.lives, INITIAL_LIVES);
    assert_eq!(snap.hud.shields, INITIAL_SHIELDS);
    assert_eq!(snap.hud.loss_reason, None);
    assert_eq!(snap.time.frame, 1);
    assert_eq!(snap.player.map(|p| p.fuel), Some(PLAYER_MAX_FUEL));
}

#[test]
fn test_win_after_enough_landers_destroyed() {
    let mut engine = started_engine(quiet_tuning());
    engine.score_mut().landers_destroyed = WIN_LANDERS_DESTROYED;
    assert_eq!(engine.tick(DT, &InputIntents::idle()).phase, GamePhase::Playing);

    engine.score_mut().landers_destroyed = WIN_LANDERS_DESTROYED + 1;
    assert_eq!(engine.tick(DT, &InputIntents::idle()).phase, GamePhase::GameOverWin);
}

// ---- High scores ----

#[test]
fn test_high_score_only_on_game_over_and_once() {
    let mut engine = started_engine(quiet_tuning());
    assert!(!engine.can_submit_high_score());
    assert_eq!(engine.submit_high_score("early"), None);

    engine.score_mut().score = 550;
    engine.score_mut().landers_destroyed = WIN_LANDERS_DESTROYED + 1;
    engine.tick(DT, &InputIntents::idle());

    assert!(engine.can_submit_high_score());
    assert_eq!(engine.submit_high_score("ACE"), Some(0));
    assert_eq!(engine.submit_high_score("ACE"), None, "one entry per run");
    assert_eq!(engine.high_scores().len(), 1);
    assert_eq!(engine.high_scores().entries()[0].score, 550);

    // A fresh run may submit again once it ends.
    engine.tick(
        DT,
        &InputIntents {
            confirm_reset: true,
            ..InputIntents::idle()
        },
    );
    assert!(!engine.can_submit_high_score());
    engine.score_mut().lives = 0;
    engine.tick(DT, &InputIntents::idle());
    assert_eq!(engine.submit_high_score("zero"), Some(1));
}

#[test]
fn test_full_table_rejects_low_run_score() {
    let seeded = (0..10).map(|i| ScoreEntry::new("pro", 1000 + i)).collect();
    let mut engine = started_engine(quiet_tuning()).with_high_scores(seeded);
    engine.score_mut().score = 400;
    engine.score_mut().lives = 0;
    engine.tick(DT, &InputIntents::idle());

    assert!(engine.can_submit_high_score());
    assert!(!engine.high_scores().qualifies(400));
    assert_eq!(engine.submit_high_score("me"), None);
    assert_eq!(engine.high_scores().entries()[9].score, 1000);
}

#[test]
fn test_with_high_scores_seeds_table() {
    let engine = SimulationEngine::new(SimConfig::default()).with_high_scores(vec![
        ScoreEntry::new("low", 10),
        ScoreEntry::new("high", 90),
    ]);
    let names: Vec<_> = engine
        .high_scores()
        .entries()
        .iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, ["high", "low"]);
}

// ---- Player ----

#[test]
fn test_movement_burns_fuel_per_axis() {
    let mut engine = started_engine(quiet_tuning());

    let snap = engine.tick(
        DT,
        &InputIntents {
            right: true,
            ..InputIntents::idle()
        },
    );
    let player = snap.player.unwrap();
    assert!((player.position.x - (ARENA_WIDTH / 2.0 + PLAYER_SPEED * DT)).abs() < 1e-3);
    assert!((player.fuel - (PLAYER_MAX_FUEL - FUEL_PER_MOVE)).abs() < 1e-4);

    let snap = engine.tick(
        DT,
        &InputIntents {
            left: true,
            up: true,
            ..InputIntents::idle()
        },
    );
    let player = snap.player.unwrap();
    assert_eq!(player.facing, Facing::Left);
    assert!((player.fuel - (PLAYER_MAX_FUEL - 3.0 * FUEL_PER_MOVE)).abs() < 1e-4);

    // Idle frames burn nothing.
    let fuel = player.fuel;
    let snap = engine.tick(DT, &InputIntents::idle());
    assert_eq!(snap.player.unwrap().fuel, fuel);
}

#[test]
fn test_player_clamped_at_wall_burns_no_fuel() {
    let mut engine = started_engine(quiet_tuning());
    let player = player_of(engine.world());
    let edge = ARENA_WIDTH - PLAYER_WIDTH / 2.0;
    *engine.world_mut().get::<&mut Position>(player).unwrap() = Position::new(edge, 300.0);

    let snap = engine.tick(
        DT,
        &InputIntents {
            right: true,
            ..InputIntents::idle()
        },
    );
    let view = snap.player.unwrap();
    assert_eq!(view.position.x, edge);
    assert_eq!(view.fuel, PLAYER_MAX_FUEL);
}

#[test]
fn test_laser_fire_rate_limited() {
    let mut engine = started_engine(quiet_tuning());
    let fire = InputIntents {
        fire: true,
        ..InputIntents::idle()
    };

    let mut fired = 0;
    let mut first_laser_x = None;
    for _ in 0..21 {
        let snap = engine.tick(DT, &fire);
        fired += snap
            .audio_events
            .iter()
            .filter(|e| matches!(e, AudioEvent::LaserFired { .. }))
            .count();
        if first_laser_x.is_none() {
            first_laser_x = snap.projectiles.first().map(|p| p.position.x);
        }
    }
    assert_eq!(fired, 2, "0.25 s cooldown allows two shots in 21 frames");
    assert!(first_laser_x.unwrap() > ARENA_WIDTH / 2.0, "laser travels the way the ship faces");
}

#[test]
fn test_laser_fired_to_the_left() {
    let mut engine = started_engine(quiet_tuning());
    let snap = engine.tick(
        DT,
        &InputIntents {
            left: true,
            fire: true,
            ..InputIntents::idle()
        },
    );
    let player_x = snap.player.unwrap().position.x;
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(snap.projectiles[0].kind, ProjectileKind::Laser);
    assert_eq!(snap.projectiles[0].owner, ProjectileOwner::Player);
    assert!(snap.projectiles[0].position.x < player_x);
}

#[test]
fn test_shield_activation_and_expiry() {
    let mut engine = started_engine(quiet_tuning());
    let shield = InputIntents {
        shield: true,
        ..InputIntents::idle()
    };

    let snap = engine.tick(DT, &shield);
    assert!(snap.player.unwrap().shield_active);
    assert_eq!(snap.hud.shields, INITIAL_SHIELDS - 1);
    assert!(snap.audio_events.contains(&AudioEvent::ShieldActivated));

    // Holding the key does not burn more charges while it is up.
    for _ in 0..60 {
        engine.tick(DT, &shield);
    }
    assert_eq!(engine.score().shields, INITIAL_SHIELDS - 1);

    let mut snap = engine.tick(DT, &InputIntents::idle());
    for _ in 0..300 {
        snap = engine.tick(DT, &InputIntents::idle());
    }
    assert!(!snap.player.unwrap().shield_active, "shield drops after its duration");
}

#[test]
fn test_shield_needs_charges() {
    let mut engine = started_engine(quiet_tuning());
    engine.score_mut().shields = 0;
    let snap = engine.tick(
        DT,
        &InputIntents {
            shield: true,
            ..InputIntents::idle()
        },
    );
    assert!(!snap.player.unwrap().shield_active);
    assert!(snap.audio_events.is_empty());
}

// ---- Collisions: lasers ----

#[test]
fn test_laser_touching_lander_scores_exactly_once() {
    let mut bench = Bench::new(Tuning::default());
    let lander = bench.lander_at(Position::new(1000.0, 300.0));
    // Laser's right edge exactly meets the lander's left edge.
    let laser_x = 1000.0 - LANDER_WIDTH / 2.0 - LASER_WIDTH / 2.0;
    let laser = bench.laser_at(Position::new(laser_x, 300.0));

    bench.collide();

    let l = bench.lander(lander);
    assert!(l.destroyed);
    assert!(bench.world.get::<&Projectile>(laser).unwrap().destroyed);
    assert_eq!(bench.score.score, LANDER_KILL_BONUS);
    assert_eq!(bench.score.landers_destroyed, 1);
    assert_eq!(
        *bench.world.get::<&Position>(lander).unwrap(),
        Position::new(LANDER_PARKED_X, LANDER_PARKED_Y)
    );
    assert_eq!(
        bench.events,
        vec![AudioEvent::LanderExplosion {
            position: Position::new(1000.0, 300.0)
        }]
    );

    // Already destroyed: nothing more to award.
    bench.laser_at(Position::new(laser_x, 300.0));
    bench.collide();
    assert_eq!(bench.score.score, LANDER_KILL_BONUS);
}

#[test]
fn test_laser_hits_only_first_lander() {
    let mut bench = Bench::new(Tuning::default());
    let first = bench.lander_at(Position::new(500.0, 300.0));
    let second = bench.lander_at(Position::new(510.0, 300.0));
    bench.laser_at(Position::new(505.0, 300.0));

    bench.collide();

    assert!(bench.lander(first).destroyed);
    assert!(!bench.lander(second).destroyed);
    assert_eq!(bench.score.score, LANDER_KILL_BONUS);
}

#[test]
fn test_laser_prefers_lander_over_humanoid() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.falling_humanoid_at(Position::new(400.0, 400.0));
    let lander = bench.lander_at(Position::new(400.0, 400.0));
    bench.laser_at(Position::new(400.0, 400.0));

    bench.collide();

    assert!(bench.lander(lander).destroyed);
    assert_eq!(bench.state_of(h), HumanoidState::Falling);
    assert_eq!(bench.score.score, LANDER_KILL_BONUS);
    assert_eq!(bench.score.humanoids_alive, HUMANOID_LIFETIME_CAP);
}

#[test]
fn test_friendly_fire_on_falling_humanoid() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.falling_humanoid_at(Position::new(300.0, 500.0));
    bench.laser_at(Position::new(300.0, 500.0));

    bench.collide();

    assert_eq!(bench.state_of(h), HumanoidState::Destroyed);
    assert_eq!(bench.score.score, -HUMANOID_KILL_PENALTY);
    assert_eq!(bench.score.humanoids_alive, HUMANOID_LIFETIME_CAP - 1);
    assert!(matches!(bench.events[0], AudioEvent::HumanoidKilled { .. }));
}

#[test]
fn test_friendly_fire_on_grounded_humanoid() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.humanoid_at(Position::new(300.0, GROUND_Y));
    bench.laser_at(Position::new(300.0, GROUND_Y));

    bench.collide();

    assert_eq!(bench.state_of(h), HumanoidState::Destroyed);
    assert_eq!(bench.score.score, -HUMANOID_KILL_PENALTY);
}

#[test]
fn test_carried_humanoid_immune_to_lasers() {
    let (mut bench, player) = Bench::with_player();
    let at = *bench.world.get::<&Position>(player).unwrap();
    let h = bench.falling_humanoid_at(at);
    bench.collide();
    assert_eq!(bench.state_of(h), HumanoidState::CapturedByPlayer);

    let laser = bench.laser_at(at);
    bench.collide();

    assert_eq!(bench.state_of(h), HumanoidState::CapturedByPlayer);
    assert!(!bench.world.get::<&Projectile>(laser).unwrap().destroyed);
    assert_eq!(bench.score.score, 0);
}

// ---- Collisions: player damage ----

#[test]
fn test_lander_crash_costs_a_life_without_score() {
    let (mut bench, player) = Bench::with_player();
    let at = *bench.world.get::<&Position>(player).unwrap();
    let first = bench.lander_at(at);
    let second = bench.lander_at(at);

    bench.collide();

    assert!(bench.lander(first).destroyed);
    assert!(!bench.lander(second).destroyed, "crash gate blocks the second hit");
    assert_eq!(bench.score.lives, INITIAL_LIVES - 1);
    assert_eq!(bench.score.landers_destroyed, 1);
    assert_eq!(bench.score.score, 0);
    assert_eq!(
        bench.events,
        vec![AudioEvent::PlayerCrash {
            lives_remaining: INITIAL_LIVES - 1
        }]
    );

    // After the gate elapses the next crash counts.
    bench.now.elapsed_secs = CRASH_DAMAGE_COOLDOWN;
    bench.collide();
    assert!(bench.lander(second).destroyed);
    assert_eq!(bench.score.lives, INITIAL_LIVES - 2);
}

#[test]
fn test_missile_hits_are_gated() {
    let (mut bench, player) = Bench::with_player();
    let at = *bench.world.get::<&Position>(player).unwrap();
    let first = bench.missile_at(at);
    let second = bench.missile_at(at);

    bench.collide();

    assert!(bench.world.get::<&Projectile>(first).unwrap().destroyed);
    assert!(!bench.world.get::<&Projectile>(second).unwrap().destroyed);
    assert_eq!(bench.score.lives, INITIAL_LIVES - 1);
}

#[test]
fn test_shield_blocks_all_damage() {
    let (mut bench, player) = Bench::with_player();
    bench.world.get::<&mut Player>(player).unwrap().shield_active = true;
    let at = *bench.world.get::<&Position>(player).unwrap();
    let lander = bench.lander_at(at);
    let missile = bench.missile_at(at);

    bench.collide();

    assert_eq!(bench.score.lives, INITIAL_LIVES);
    assert!(!bench.lander(lander).destroyed);
    assert!(!bench.world.get::<&Projectile>(missile).unwrap().destroyed);
    assert!(bench.events.is_empty());
}

// ---- Collisions: captures ----

#[test]
fn test_lander_captures_roaming_humanoid() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.humanoid_at(Position::new(300.0, GROUND_Y));
    let lander = bench.lander_at(Position::new(300.0, GROUND_Y - 10.0));

    bench.collide();

    assert_eq!(bench.state_of(h), HumanoidState::CapturedByLander);
    assert_eq!(
        bench.world.get::<&Humanoid>(h).unwrap().captor,
        Some(Captor::Lander(lander))
    );
    assert_eq!(bench.lander(lander).carrying, Some(h));
}

#[test]
fn test_humanoid_has_single_captor() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.humanoid_at(Position::new(300.0, GROUND_Y));
    let first = bench.lander_at(Position::new(300.0, GROUND_Y - 10.0));
    let second = bench.lander_at(Position::new(305.0, GROUND_Y - 10.0));

    bench.collide();

    assert_eq!(bench.lander(first).carrying, Some(h));
    assert_eq!(bench.lander(second).carrying, None);
}

#[test]
fn test_destroyed_lander_drops_humanoid() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.humanoid_at(Position::new(300.0, GROUND_Y));
    let lander = bench.lander_at(Position::new(300.0, GROUND_Y - 10.0));
    bench.collide();
    assert_eq!(bench.state_of(h), HumanoidState::CapturedByLander);

    bench.laser_at(Position::new(300.0, GROUND_Y - 10.0));
    bench.collide();

    assert!(bench.lander(lander).destroyed);
    assert_eq!(bench.lander(lander).carrying, None);
    assert_eq!(bench.state_of(h), HumanoidState::Falling);
    assert_eq!(bench.world.get::<&Humanoid>(h).unwrap().captor, None);
}

#[test]
fn test_player_catches_and_deposits_humanoid() {
    let (mut bench, player) = Bench::with_player();
    let at = *bench.world.get::<&Position>(player).unwrap();
    let h = bench.falling_humanoid_at(Position::new(at.x + 10.0, at.y));

    bench.collide();
    assert_eq!(bench.state_of(h), HumanoidState::CapturedByPlayer);
    assert_eq!(bench.world.get::<&Player>(player).unwrap().carrying, Some(h));

    // Still above the deposit band: keeps carrying.
    bench.collide();
    assert_eq!(bench.state_of(h), HumanoidState::CapturedByPlayer);

    bench.set_position(player, Position::new(640.0, DEPOSIT_Y));
    bench.collide();

    assert_eq!(bench.state_of(h), HumanoidState::Roaming);
    assert_eq!(
        *bench.world.get::<&Position>(h).unwrap(),
        Position::new(640.0, GROUND_Y)
    );
    assert_eq!(bench.world.get::<&Player>(player).unwrap().carrying, None);
    assert_eq!(bench.score.humanoids_alive, HUMANOID_LIFETIME_CAP);
}

#[test]
fn test_roaming_humanoid_not_caught_by_player() {
    let (mut bench, player) = Bench::with_player();
    let at = *bench.world.get::<&Position>(player).unwrap();
    let h = bench.humanoid_at(at);

    bench.collide();

    assert_eq!(bench.state_of(h), HumanoidState::Roaming);
    assert_eq!(bench.world.get::<&Player>(player).unwrap().carrying, None);
}

// ---- Collisions: fuel ----

#[test]
fn test_visible_fuel_pickup_refills() {
    let (mut bench, player) = Bench::with_player();
    let at = *bench.world.get::<&Position>(player).unwrap();
    let pickup = bench.world.spawn((
        FuelPickup {
            cycle: Cooldown::started(FUEL_CYCLE, &SimTime::default()),
            hidden_secs: FUEL_HIDDEN_FOR,
        },
        at,
        Hitbox::new(FUEL_PICKUP_SIZE, FUEL_PICKUP_SIZE),
    ));
    bench.world.get::<&mut Player>(player).unwrap().fuel = 10.0;

    // Still hidden: no refill.
    bench.now.elapsed_secs = 1.0;
    bench.collide();
    assert_eq!(bench.world.get::<&Player>(player).unwrap().fuel, 10.0);

    bench.now.elapsed_secs = 5.0;
    bench.collide();

    assert_eq!(bench.world.get::<&Player>(player).unwrap().fuel, PLAYER_MAX_FUEL);
    assert_eq!(bench.events, vec![AudioEvent::FuelCollected]);
    let fuel = (*bench.world.get::<&FuelPickup>(pickup).unwrap()).clone();
    assert_eq!(fuel.cycle.restarted_at, 5.0);
    assert!(!fuel.is_visible(&bench.now));
    assert_eq!(bench.world.get::<&Position>(pickup).unwrap().y, FUEL_PICKUP_Y);
}

// ---- Humanoids ----

#[test]
fn test_abduction_costs_exactly_one_humanoid() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.humanoid_at(Position::new(300.0, GROUND_Y));
    let lander = bench.lander_at(Position::new(300.0, GROUND_Y - 10.0));
    bench.collide();

    for _ in 0..600 {
        bench.move_landers(DT);
        bench.move_humanoids(DT);
    }

    assert_eq!(bench.state_of(h), HumanoidState::Destroyed);
    assert_eq!(bench.score.humanoids_alive, HUMANOID_LIFETIME_CAP - 1);
    assert_eq!(bench.lander(lander).carrying, None, "lander left carry mode");
    let kills = bench
        .events
        .iter()
        .filter(|e| matches!(e, AudioEvent::HumanoidKilled { .. }))
        .count();
    assert_eq!(kills, 1);
}

#[test]
fn test_falling_humanoid_lands_on_ground() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.falling_humanoid_at(Position::new(300.0, GROUND_Y - 5.0));

    bench.move_humanoids(0.1);

    assert_eq!(bench.state_of(h), HumanoidState::Roaming);
    assert_eq!(bench.world.get::<&Position>(h).unwrap().y, GROUND_Y);
    assert_eq!(bench.score.humanoids_alive, HUMANOID_LIFETIME_CAP);
}

#[test]
fn test_patrol_turns_at_margin() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.humanoid_at(Position::new(HUMANOID_PATROL_MARGIN + 0.5, GROUND_Y));
    bench.world.get::<&mut Humanoid>(h).unwrap().patrol_dir = -1.0;

    bench.move_humanoids(0.1);

    assert_eq!(bench.world.get::<&Humanoid>(h).unwrap().patrol_dir, 1.0);
}

#[test]
fn test_stale_captor_drops_humanoid() {
    let mut bench = Bench::new(Tuning::default());
    let h = bench.humanoid_at(Position::new(300.0, GROUND_Y));
    let lander = bench.lander_at(Position::new(300.0, GROUND_Y - 10.0));
    bench.collide();
    bench.world.despawn(lander).unwrap();

    bench.move_humanoids(DT);

    assert_eq!(bench.state_of(h), HumanoidState::Falling);
}

// ---- Landers ----

#[test]
fn test_lander_spawns_on_spawn_line_away_from_target() {
    let mut bench = Bench::new(Tuning::default());
    // Landers spawn near the top and humanoids stand on the ground, so the
    // rejection has to look at x alone.
    let target = Position::new(800.0, GROUND_Y);
    let h = bench.humanoid_at(target);

    for _ in 0..200 {
        let lander = world_setup::spawn_lander(
            &mut bench.world,
            &mut bench.rng,
            &bench.tuning,
            &mut bench.order,
            &bench.now,
            &[(h, target)],
        );
        let pos = *bench.world.get::<&Position>(lander).unwrap();
        assert!(pos.x >= 0.0 && pos.x <= ARENA_WIDTH);
        assert_eq!(pos.y, LANDER_SPAWN_Y);
        assert!((pos.x - target.x).abs() >= LANDER_SPAWN_MIN_DISTANCE);
        assert_eq!(bench.lander(lander).target, target);
    }
}

#[test]
fn test_lander_without_humanoids_targets_near_spawn() {
    let mut bench = Bench::new(Tuning::default());
    for _ in 0..50 {
        let lander = world_setup::spawn_lander(
            &mut bench.world,
            &mut bench.rng,
            &bench.tuning,
            &mut bench.order,
            &bench.now,
            &[],
        );
        let pos = *bench.world.get::<&Position>(lander).unwrap();
        let target = bench.lander(lander).target;
        assert!((target.x - pos.x).abs() <= LANDER_INITIAL_TARGET_JITTER);
        assert!((target.y - pos.y).abs() <= LANDER_INITIAL_TARGET_JITTER);
        assert!(target.x >= LANDER_EDGE_MARGIN && target.x <= ARENA_WIDTH - LANDER_EDGE_MARGIN);
        assert!(target.y >= LANDER_TOP_MARGIN && target.y <= GROUND_Y - LANDER_HOVER_CLEARANCE);
    }
}

#[test]
fn test_landers_without_humanoids_stay_inside_arena() {
    let tuning = Tuning {
        humanoid_concurrent_target: 0,
        ..Tuning::default()
    };
    let mut engine = started_engine(tuning);
    let mut seen = 0;
    for _ in 0..(20 * 60) {
        let snap = engine.tick(DT, &InputIntents::idle());
        for lander in snap.landers.iter().filter(|l| !l.destroyed) {
            seen += 1;
            let p = lander.position;
            assert!(p.y >= LANDER_TOP_MARGIN - 1e-3, "lander climbed to {p:?}");
            assert!(p.x >= 0.0 && p.x <= ARENA_WIDTH, "lander drifted to {p:?}");
        }
    }
    assert!(seen > 0, "no lander spawned");
}

#[test]
fn test_missile_cooldown_starts_unready() {
    let (mut bench, _player) = Bench::with_player();
    let lander = bench.lander_at(Position::new(800.0, 100.0));
    assert!(!bench.lander(lander).fire_cooldown.is_ready(&bench.now));

    bench.move_landers(DT);
    assert_eq!(bench.count::<Projectile>(), 0);

    bench.now.elapsed_secs = MISSILE_FIRE_COOLDOWN;
    bench.move_landers(DT);

    let missiles: Vec<Projectile> = bench
        .world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| p.clone())
        .collect();
    assert_eq!(missiles.len(), 1);
    assert_eq!(missiles[0].kind, ProjectileKind::Missile);
    assert_eq!(missiles[0].owner, ProjectileOwner::Lander);
    assert!((missiles[0].direction.y - 1.0).abs() < 1e-5, "aimed at the player below");
    assert!(matches!(bench.events[0], AudioEvent::MissileFired { .. }));
}

#[test]
fn test_simulation_tuning_fires_almost_immediately() {
    let mut bench = Bench::new(Tuning::simulation());
    world_setup::spawn_player(&mut bench.world, &bench.tuning, &bench.now);
    bench.lander_at(Position::new(200.0, 100.0));

    bench.now.elapsed_secs = 1e-5;
    bench.move_landers(DT);

    assert_eq!(bench.count::<Projectile>(), 1);
}

#[test]
fn test_destroyed_lander_is_inert() {
    let (mut bench, _player) = Bench::with_player();
    let lander = bench.lander_at(Position::new(800.0, 100.0));
    collision::destroy_lander(&mut bench.world, lander);

    bench.now.elapsed_secs = 60.0;
    bench.move_landers(DT);

    assert_eq!(bench.count::<Projectile>(), 0);
    assert_eq!(
        *bench.world.get::<&Position>(lander).unwrap(),
        Position::new(LANDER_PARKED_X, LANDER_PARKED_Y)
    );
}

// ---- Spawner ----

#[test]
fn test_spawn_caps() {
    let mut bench = Bench::new(Tuning::default());
    let mut schedule = SpawnScheduler::new(&bench.tuning, &bench.now);

    for i in 0..40 {
        bench.now.elapsed_secs = i as f64 * LANDER_SPAWN_INTERVAL;
        spawner::run(
            &mut bench.world,
            &mut bench.rng,
            &bench.tuning,
            &bench.now,
            &mut schedule,
            &mut bench.score,
            &mut bench.order,
        );
    }

    assert_eq!(bench.score.landers_spawned, LANDER_LIFETIME_CAP);
    assert_eq!(bench.count::<Lander>(), LANDER_LIFETIME_CAP as usize);
    assert_eq!(bench.count::<Humanoid>(), HUMANOID_CONCURRENT_TARGET as usize);

    // Losing humanoids does not bring more once the lifetime cap is spent.
    for (_, h) in bench.world.query_mut::<&mut Humanoid>() {
        h.destroy();
    }
    cleanup::run(&mut bench.world, &mut Vec::new());
    for i in 40..60 {
        bench.now.elapsed_secs = i as f64 * LANDER_SPAWN_INTERVAL;
        spawner::run(
            &mut bench.world,
            &mut bench.rng,
            &bench.tuning,
            &bench.now,
            &mut schedule,
            &mut bench.score,
            &mut bench.order,
        );
    }
    assert_eq!(bench.count::<Humanoid>(), 0);
    assert_eq!(bench.score.humanoids_spawned, HUMANOID_LIFETIME_CAP);
}

// ---- Projectiles and cleanup ----

#[test]
fn test_out_of_bounds_rules() {
    let tuning = Tuning::default();
    let laser = ProjectileKind::Laser;
    let missile = ProjectileKind::Missile;

    assert!(!projectiles::is_out_of_bounds(laser, &Position::new(-199.0, 300.0), &tuning));
    assert!(projectiles::is_out_of_bounds(laser, &Position::new(-201.0, 300.0), &tuning));
    assert!(projectiles::is_out_of_bounds(
        laser,
        &Position::new(ARENA_WIDTH + 201.0, 300.0),
        &tuning
    ));

    assert!(!projectiles::is_out_of_bounds(missile, &Position::new(800.0, 450.0), &tuning));
    assert!(!projectiles::is_out_of_bounds(
        missile,
        &Position::new(ARENA_WIDTH, 0.0),
        &tuning
    ));
    assert!(projectiles::is_out_of_bounds(missile, &Position::new(-1.0, 450.0), &tuning));
    assert!(projectiles::is_out_of_bounds(
        missile,
        &Position::new(800.0, ARENA_HEIGHT + 1.0),
        &tuning
    ));
}

#[test]
fn test_projectile_leaves_arena_and_is_cleaned_up() {
    let mut bench = Bench::new(Tuning::default());
    let missile = world_setup::spawn_missile(
        &mut bench.world,
        &bench.tuning,
        &mut bench.order,
        Position::new(800.0, 5.0),
        Vec2::new(0.0, -1.0),
    );

    projectiles::run(&mut bench.world, &bench.tuning, 0.1);
    assert!(bench.world.get::<&Projectile>(missile).unwrap().destroyed);

    cleanup::run(&mut bench.world, &mut Vec::new());
    assert!(!bench.world.contains(missile));
}

// ---- Game state ----

#[test]
fn test_loss_reasons_in_priority_order() {
    let (mut bench, player) = Bench::with_player();

    bench.score.lives = 0;
    bench.score.humanoids_alive = 0;
    let phase = game_state::run(&bench.world, &bench.tuning, &mut bench.score);
    assert_eq!(phase, GamePhase::GameOverLose);
    assert_eq!(bench.score.loss_reason, Some(LossReason::LivesExhausted));

    bench.score.lives = 1;
    game_state::run(&bench.world, &bench.tuning, &mut bench.score);
    assert_eq!(bench.score.loss_reason, Some(LossReason::AllHumanoidsKilled));
    assert!(bench.score.all_humanoids_dead);

    bench.score.humanoids_alive = 2;
    bench.world.get::<&mut Player>(player).unwrap().fuel = 0.0;
    game_state::run(&bench.world, &bench.tuning, &mut bench.score);
    assert_eq!(bench.score.loss_reason, Some(LossReason::OutOfFuel));
}

#[test]
fn test_loss_beats_win() {
    let (mut bench, _player) = Bench::with_player();
    bench.score.landers_destroyed = WIN_LANDERS_DESTROYED + 1;
    bench.score.humanoids_alive = 0;

    let phase = game_state::run(&bench.world, &bench.tuning, &mut bench.score);
    assert_eq!(phase, GamePhase::GameOverLose);
}

// ---- Invariants over a full run ----

#[test]
fn test_invariants_hold_over_long_run() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 99,
        tuning: Tuning::simulation(),
    });
    engine.tick(DT, &start());

    for frame in 0..3600u32 {
        let intents = InputIntents {
            left: frame % 240 < 120,
            right: frame % 240 >= 120,
            down: frame % 400 < 50,
            up: (200..250).contains(&(frame % 400)),
            fire: true,
            shield: frame % 500 == 0,
            ..InputIntents::idle()
        };
        let snap = engine.tick(DT, &intents);

        assert!(snap.hud.landers_spawned <= LANDER_LIFETIME_CAP);
        assert!(snap.landers.len() <= LANDER_LIFETIME_CAP as usize);
        assert!(snap.hud.humanoids_alive <= HUMANOID_LIFETIME_CAP);
        assert!(snap.humanoids.len() <= HUMANOID_CONCURRENT_TARGET as usize);
        assert!(snap.hud.lives <= INITIAL_LIVES);
        assert!(snap.hud.fuel >= 0.0 && snap.hud.fuel <= PLAYER_MAX_FUEL);

        if let Some(player) = snap.player {
            assert!(player.position.x >= PLAYER_WIDTH / 2.0);
            assert!(player.position.x <= ARENA_WIDTH - PLAYER_WIDTH / 2.0);
            assert!(player.position.y >= PLAYER_HEIGHT / 2.0);
            assert!(player.position.y <= ARENA_HEIGHT - PLAYER_HEIGHT / 2.0);
        }
        for lander in &snap.landers {
            assert!(!lander.destroyed, "destroyed landers are cleaned up");
        }

        if snap.phase.is_game_over() {
            break;
        }
    }
}
