//! Strategic layer: army-wide objectives and production for one player

use serde::{Deserialize, Serialize};

use crate::ai::influence::InfluenceMap;
use crate::ai::waypoint::{TacticalWaypoint, WaypointSet};
use crate::core::config::AiConfig;
use crate::core::types::{PlayerId, UnitId};
use crate::game::world::GameWorld;
use crate::map::hex::HexCoord;
use crate::units::{Unit, UnitKind, UnitRoster};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    Unaffordable,
    NoStructure,
    NoFreeCell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionOutcome {
    Produced { kind: UnitKind, unit: UnitId, at: HexCoord },
    Skipped { kind: UnitKind, reason: SkipReason },
}

#[derive(Debug, Clone)]
pub struct StrategicPlanner {
    player: PlayerId,
    config: AiConfig,
    influence: InfluenceMap,
    waypoints: WaypointSet,
}

impl StrategicPlanner {
    pub fn new(player: PlayerId, config: AiConfig) -> Self {
        Self {
            player,
            config,
            influence: InfluenceMap::new(),
            waypoints: WaypointSet::new(),
        }
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn waypoints(&self) -> &WaypointSet {
        &self.waypoints
    }

    /// Recompute the influence map and replace the waypoint set
    pub fn refresh(&mut self, world: &GameWorld) {
        self.influence
            .compute(&world.grid, &world.units, self.player, &self.config.influence);
        self.waypoints = WaypointSet::rebuild(
            &world.grid,
            &world.units,
            &self.influence,
            self.player,
            &self.config.waypoints,
        );
        tracing::debug!(
            player = %self.player,
            waypoints = self.waypoints.len(),
            "strategic refresh"
        );
    }

    /// Position of the best active waypoint for this unit
    pub fn objective_for(&self, unit: &Unit) -> Option<HexCoord> {
        self.waypoints
            .best_for(unit, &self.config.waypoints)
            .map(|waypoint: &TacticalWaypoint| waypoint.position)
    }

    /// Try to build one unit this turn
    ///
    /// Anything that blocks production (cost, missing structure, no room)
    /// skips it for the turn and leaves the world untouched.
    pub fn decide_production(&self, world: &mut GameWorld) -> ProductionOutcome {
        let kind = self.desired_unit(&world.units);
        let outcome = self.produce(world, kind);
        tracing::debug!(player = %self.player, ?outcome, "production");
        outcome
    }

    /// Which unit kind the army needs most
    pub fn desired_unit(&self, units: &UnitRoster) -> UnitKind {
        let total = units.count_for(self.player);
        if total < self.config.production.minimum_army {
            return UnitKind::Infantry;
        }

        let infantry = units.count_by_kind(self.player, UnitKind::Infantry);
        let cavalry = units.count_by_kind(self.player, UnitKind::Cavalry);
        let artillery = units.count_by_kind(self.player, UnitKind::Artillery);

        if cavalry < infantry / 2 {
            UnitKind::Cavalry
        } else if artillery < total / 3 {
            UnitKind::Artillery
        } else {
            UnitKind::Infantry
        }
    }

    fn produce(&self, world: &mut GameWorld, kind: UnitKind) -> ProductionOutcome {
        let skipped = |reason| ProductionOutcome::Skipped { kind, reason };

        let cost = world.catalog.stats(kind).cost;
        if !world.resources.can_afford(self.player, &cost) {
            return skipped(SkipReason::Unaffordable);
        }

        let mut found_structure = false;
        let mut spawn_at = None;
        for cell in world.grid.cells() {
            let Some(structure) = cell.structure else {
                continue;
            };
            if structure.owner != self.player || !structure.kind.produces(kind) {
                continue;
            }
            found_structure = true;
            spawn_at = world
                .grid
                .neighbors(cell.coord)
                .into_iter()
                .find(|n| !world.grid.is_occupied(*n));
            if spawn_at.is_some() {
                break;
            }
        }
        let Some(at) = spawn_at else {
            return skipped(if found_structure {
                SkipReason::NoFreeCell
            } else {
                SkipReason::NoStructure
            });
        };

        if world.resources.pay(self.player, &cost).is_err() {
            return skipped(SkipReason::Unaffordable);
        }
        match world.spawn_unit(kind, self.player, at) {
            Ok(unit) => {
                world.claim_cell(at, self.player);
                ProductionOutcome::Produced { kind, unit, at }
            }
            Err(err) => {
                tracing::debug!(player = %self.player, %err, "spawn failed, refunding");
                world.resources.add(self.player, cost.wood, cost.gold, cost.food);
                skipped(SkipReason::NoFreeCell)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::waypoint::WaypointType;
    use crate::economy::{PlayerResources, Structure, StructureKind};
    use crate::map::grid::HexGrid;
    use crate::units::UnitCatalog;

    const ME: PlayerId = PlayerId(0);

    fn world_with_barracks(at: HexCoord) -> GameWorld {
        let mut world = GameWorld::new(HexGrid::hexagon(4), UnitCatalog::default());
        world.grid.place_structure(at, Structure::new(StructureKind::Barracks, ME));
        world.resources.init_player(ME, PlayerResources::new(150, 150, 150));
        world
    }

    fn planner() -> StrategicPlanner {
        StrategicPlanner::new(ME, AiConfig::default())
    }

    #[test]
    fn test_small_army_wants_infantry() {
        let mut world = world_with_barracks(HexCoord::ORIGIN);
        world.spawn_unit(UnitKind::Cavalry, ME, HexCoord::new(3, 0)).unwrap();
        assert_eq!(planner().desired_unit(&world.units), UnitKind::Infantry);
    }

    #[test]
    fn test_composition_rules() {
        let mut world = world_with_barracks(HexCoord::ORIGIN);
        for q in -3..=0 {
            world.spawn_unit(UnitKind::Infantry, ME, HexCoord::new(q, 3)).unwrap();
        }
        // 4 infantry, 0 cavalry: 0 < 4 / 2
        assert_eq!(planner().desired_unit(&world.units), UnitKind::Cavalry);

        world.spawn_unit(UnitKind::Cavalry, ME, HexCoord::new(1, 2)).unwrap();
        world.spawn_unit(UnitKind::Cavalry, ME, HexCoord::new(2, 1)).unwrap();
        // 2 cavalry, 0 artillery < 6 / 3
        assert_eq!(planner().desired_unit(&world.units), UnitKind::Artillery);

        world.spawn_unit(UnitKind::Artillery, ME, HexCoord::new(3, -3)).unwrap();
        world.spawn_unit(UnitKind::Artillery, ME, HexCoord::new(3, -2)).unwrap();
        // 2 artillery, 8 total: 2 < 8 / 3 is false
        assert_eq!(planner().desired_unit(&world.units), UnitKind::Infantry);
    }

    #[test]
    fn test_produces_on_first_free_neighbour() {
        let mut world = world_with_barracks(HexCoord::ORIGIN);
        world.spawn_unit(UnitKind::Infantry, ME, HexCoord::new(1, 0)).unwrap();

        let outcome = planner().decide_production(&mut world);
        let ProductionOutcome::Produced { kind, at, unit } = outcome else {
            panic!("expected production, got {outcome:?}");
        };
        assert_eq!(kind, UnitKind::Infantry);
        // East is taken, north-east is next
        assert_eq!(at, HexCoord::new(1, -1));
        assert_eq!(world.unit(unit).unwrap().position, at);
        assert!(world.grid.get_cell(at).unwrap().is_owned_by(ME));
        assert_eq!(world.resources.resources(ME), PlayerResources::new(130, 140, 130));
    }

    #[test]
    fn test_unaffordable_leaves_world_untouched() {
        let mut world = world_with_barracks(HexCoord::ORIGIN);
        world.resources.init_player(ME, PlayerResources::new(150, 5, 150));

        let outcome = planner().decide_production(&mut world);
        assert_eq!(
            outcome,
            ProductionOutcome::Skipped {
                kind: UnitKind::Infantry,
                reason: SkipReason::Unaffordable
            }
        );
        assert!(world.units.is_empty());
        assert_eq!(world.resources.resources(ME), PlayerResources::new(150, 5, 150));
    }

    #[test]
    fn test_no_structure_or_room() {
        let mut world = GameWorld::new(HexGrid::hexagon(4), UnitCatalog::default());
        world.resources.init_player(ME, PlayerResources::new(150, 150, 150));
        assert!(matches!(
            planner().decide_production(&mut world),
            ProductionOutcome::Skipped {
                reason: SkipReason::NoStructure,
                ..
            }
        ));

        // Enemy barracks do not count
        world.grid.place_structure(
            HexCoord::ORIGIN,
            Structure::new(StructureKind::Barracks, PlayerId(1)),
        );
        assert!(matches!(
            planner().decide_production(&mut world),
            ProductionOutcome::Skipped {
                reason: SkipReason::NoStructure,
                ..
            }
        ));

        let mut world = world_with_barracks(HexCoord::ORIGIN);
        for n in HexCoord::ORIGIN.neighbors() {
            world.spawn_unit(UnitKind::Infantry, PlayerId(1), n).unwrap();
        }
        assert!(matches!(
            planner().decide_production(&mut world),
            ProductionOutcome::Skipped {
                reason: SkipReason::NoFreeCell,
                ..
            }
        ));
        assert_eq!(world.resources.resources(ME), PlayerResources::new(150, 150, 150));
    }

    #[test]
    fn test_refresh_and_objective() {
        let mut world = world_with_barracks(HexCoord::new(-3, 0));
        let mine = world.spawn_unit(UnitKind::Infantry, ME, HexCoord::new(-2, 0)).unwrap();
        world.spawn_unit(UnitKind::Infantry, PlayerId(1), HexCoord::new(3, 0)).unwrap();

        let mut planner = planner();
        planner.refresh(&world);
        assert_eq!(planner.waypoints().count_of(WaypointType::Attack), 1);

        let unit = world.unit(mine).unwrap();
        let first = planner.objective_for(unit);
        assert!(first.is_some());
        assert_eq!(planner.objective_for(unit), first);

        // Healthy unit: the attack waypoint outranks everything else
        let attack = planner
            .waypoints()
            .iter()
            .find(|w| w.kind == WaypointType::Attack)
            .map(|w| w.position);
        assert_eq!(first, attack);
    }
}
