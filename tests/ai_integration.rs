//! End-to-end AI decision scenarios
//!
//! Each test builds a small world by hand, runs one layer of the AI against
//! it and checks the resulting world state.

use hexfront::ai::{
    AiController, InfluenceMap, ProductionOutcome, SkipReason, StrategicPlanner, TacticalAi,
    UnitAction,
};
use hexfront::combat::compute_damage;
use hexfront::core::config::{AiConfig, InfluenceConfig};
use hexfront::core::types::PlayerId;
use hexfront::economy::{PlayerResources, Structure, StructureKind};
use hexfront::game::GameWorld;
use hexfront::map::{HexCoord, HexGrid, Terrain};
use hexfront::units::{UnitCatalog, UnitKind};

const ME: PlayerId = PlayerId(0);
const ENEMY: PlayerId = PlayerId(1);

fn open_field(radius: u32) -> GameWorld {
    GameWorld::new(HexGrid::hexagon(radius), UnitCatalog::default())
}

fn tactical() -> TacticalAi {
    let config = AiConfig::default();
    TacticalAi::new(&config.tactical, &config.pathfinding)
}

/// Badly hurt unit with an enemy two hexes away steps to the free
/// neighbour farthest from it
#[test]
fn test_scenario_a_low_health_unit_retreats() {
    let mut world = open_field(5);
    let me = world.spawn_unit(UnitKind::Infantry, ME, HexCoord::ORIGIN).unwrap();
    let enemy = world.spawn_unit(UnitKind::Infantry, ENEMY, HexCoord::new(2, 0)).unwrap();
    world.units.get_mut(me).unwrap().take_damage(90);

    let action = tactical().execute_unit_decision(&mut world, me, None);

    // Neighbours at distance 3 from (2, 0): NW (0, -1), W, SW; NW comes first
    assert_eq!(
        action,
        UnitAction::Retreat {
            from: HexCoord::ORIGIN,
            to: HexCoord::new(0, -1)
        }
    );
    let unit = world.unit(me).unwrap();
    assert_eq!(unit.position, HexCoord::new(0, -1));
    assert_eq!(unit.remaining_movement, 2);
    assert_eq!(unit.position.distance(&HexCoord::new(2, 0)), 3);
    assert!(!world.grid.is_occupied(HexCoord::ORIGIN));
    assert_eq!(world.unit(enemy).unwrap().health, 100);
}

#[test]
fn test_scenario_a_retreat_skips_occupied_neighbours() {
    let mut world = open_field(5);
    let me = world.spawn_unit(UnitKind::Infantry, ME, HexCoord::ORIGIN).unwrap();
    world.spawn_unit(UnitKind::Infantry, ENEMY, HexCoord::new(2, 0)).unwrap();
    world.spawn_unit(UnitKind::Cavalry, ME, HexCoord::new(0, -1)).unwrap();
    world.units.get_mut(me).unwrap().take_damage(90);

    let action = tactical().execute_unit_decision(&mut world, me, None);
    assert_eq!(
        action,
        UnitAction::Retreat {
            from: HexCoord::ORIGIN,
            to: HexCoord::new(-1, 0)
        }
    );
}

/// Healthy unit next to an enemy attacks once, then falls through
#[test]
fn test_scenario_b_attack_then_fall_through() {
    let mut world = open_field(4);
    world.grid.set_terrain(HexCoord::new(1, 0), Terrain::Forest);
    let me = world.spawn_unit(UnitKind::Infantry, ME, HexCoord::ORIGIN).unwrap();
    let enemy = world.spawn_unit(UnitKind::Infantry, ENEMY, HexCoord::new(1, 0)).unwrap();

    let expected = compute_damage(
        world.unit(me).unwrap(),
        Terrain::Plains,
        world.unit(enemy).unwrap(),
        Terrain::Forest,
    );
    // 10 - 0.5 * (10 * 1.2 * 1.2) = 2.8
    assert_eq!(expected, 3);

    let ai = tactical();
    let action = ai.execute_unit_decision(&mut world, me, None);
    let UnitAction::Attack(outcome) = action else {
        panic!("expected an attack, got {action:?}");
    };
    assert_eq!(outcome.defender, enemy);
    assert_eq!(outcome.damage, expected);
    assert_eq!(world.unit(enemy).unwrap().health, 100 - expected);
    assert!(world.unit(me).unwrap().has_attacked);

    // Same turn: the attack precondition fails and the unit holds
    let again = ai.execute_unit_decision(&mut world, me, None);
    assert_eq!(again, UnitAction::Defend);
    assert_eq!(world.unit(enemy).unwrap().health, 100 - expected);
}

#[test]
fn test_scenario_b_after_attack_unit_advances_on_objective() {
    let mut world = open_field(4);
    let me = world.spawn_unit(UnitKind::Infantry, ME, HexCoord::ORIGIN).unwrap();
    world.spawn_unit(UnitKind::Infantry, ENEMY, HexCoord::new(1, 0)).unwrap();

    let ai = tactical();
    assert!(matches!(
        ai.execute_unit_decision(&mut world, me, Some(HexCoord::new(-3, 0))),
        UnitAction::Attack(_)
    ));
    assert!(matches!(
        ai.execute_unit_decision(&mut world, me, Some(HexCoord::new(-3, 0))),
        UnitAction::Move { .. }
    ));
}

#[test]
fn test_damage_never_below_one_and_health_never_negative() {
    let mut world = open_field(3);
    world.grid.set_terrain(HexCoord::new(1, 0), Terrain::Mountain);
    let weak = world.spawn_unit(UnitKind::Artillery, ME, HexCoord::ORIGIN).unwrap();
    let wall = world.spawn_unit(UnitKind::Infantry, ENEMY, HexCoord::new(1, 0)).unwrap();
    world.units.get_mut(weak).unwrap().stats.attack = 1;
    world.units.get_mut(wall).unwrap().health = 1;

    let outcome = world.resolve_attack(weak, wall).unwrap();
    assert_eq!(outcome.damage, 1);
    assert_eq!(world.unit(wall).unwrap().health, 0);
    assert!(outcome.defender_destroyed);

    world.units.get_mut(weak).unwrap().has_attacked = false;
    world.resolve_attack(weak, wall).unwrap();
    assert_eq!(world.unit(wall).unwrap().health, 0);
}

/// A lone friendly unit makes its own surroundings the safest ground
#[test]
fn test_scenario_c_safest_position_has_friendly_influence() {
    let mut world = open_field(5);
    let me = world.spawn_unit(UnitKind::Infantry, ME, HexCoord::new(2, -1)).unwrap();

    let mut map = InfluenceMap::new();
    map.compute(&world.grid, &world.units, ME, &InfluenceConfig::default());

    let safest = map.find_safest_position().unwrap();
    let position = world.unit(me).unwrap().position;
    assert!(map.friendly(safest) > 0.0);
    assert!(safest.distance(&position) < 3);
    assert_eq!(safest, position);
    assert_eq!(map.friendly(position), 10.0);
    assert_eq!(map.find_weakest_enemy_position(), None);
}

/// Production that cannot be paid for changes nothing
#[test]
fn test_scenario_d_insufficient_gold_skips_production() {
    let mut world = open_field(4);
    world
        .grid
        .place_structure(HexCoord::ORIGIN, Structure::new(StructureKind::Barracks, ME));
    world.resources.init_player(ME, PlayerResources::new(500, 5, 500));
    let owned_before = world.grid.owned_count(ME);

    let planner = StrategicPlanner::new(ME, AiConfig::default());
    let outcome = planner.decide_production(&mut world);

    assert_eq!(
        outcome,
        ProductionOutcome::Skipped {
            kind: UnitKind::Infantry,
            reason: SkipReason::Unaffordable
        }
    );
    assert!(world.units.is_empty());
    assert_eq!(world.resources.resources(ME), PlayerResources::new(500, 5, 500));
    assert_eq!(world.grid.owned_count(ME), owned_before);
    assert!(HexCoord::ORIGIN
        .neighbors()
        .iter()
        .all(|n| !world.grid.is_occupied(*n)));
}

#[test]
fn test_full_turn_moves_army_toward_enemy() {
    let mut world = open_field(6);
    world
        .grid
        .place_structure(HexCoord::new(-4, 0), Structure::new(StructureKind::Barracks, ME));
    world.resources.init_player(ME, PlayerResources::new(0, 0, 0));
    let scout = world.spawn_unit(UnitKind::Cavalry, ME, HexCoord::new(-3, 0)).unwrap();
    world.spawn_unit(UnitKind::Infantry, ENEMY, HexCoord::new(4, 0)).unwrap();

    let mut ai = AiController::new(ME, &AiConfig::default());
    let report = ai.take_turn(&mut world);

    assert!(matches!(
        report.production,
        ProductionOutcome::Skipped {
            reason: SkipReason::Unaffordable,
            ..
        }
    ));
    let position = world.unit(scout).unwrap().position;
    assert!(position.distance(&HexCoord::new(4, 0)) < 7);
    assert!(world.grid.get_cell(position).unwrap().is_owned_by(ME));
}
