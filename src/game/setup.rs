//! Initial match setup: map, starting resources, units and barracks

use crate::core::config::GameConfig;
use crate::core::error::{HexfrontError, Result};
use crate::core::types::PlayerId;
use crate::economy::{PlayerResources, Structure, StructureKind};
use crate::game::world::GameWorld;
use crate::map::generation::generate_map;
use crate::map::hex::{HexCoord, HexDirection};
use crate::units::UnitKind;

/// Spawn centres on the ring at `radius - 2`, evenly spaced around the map
///
/// Player 0 starts on the west edge; with two players, player 1 faces it
/// on the east edge.
pub fn spawn_centres(radius: u32, players: u32) -> Vec<HexCoord> {
    let directions = HexDirection::all();
    let distance = radius.saturating_sub(2) as i32;
    (0..players)
        .map(|i| {
            let index = (3 + i as usize * 6 / players.max(1) as usize) % 6;
            HexCoord::ORIGIN.offset_by(directions[index], distance)
        })
        .collect()
}

/// Build the starting world for a match
pub fn setup_world(config: &GameConfig) -> Result<GameWorld> {
    let grid = generate_map(&config.map);
    let mut world = GameWorld::new(grid, config.units.clone());
    let rules = &config.match_rules;
    let start = &rules.starting_resources;

    for (i, centre) in spawn_centres(config.map.radius, rules.players).into_iter().enumerate() {
        let player = PlayerId(i as u32);
        if !world.grid.contains(centre) {
            return Err(HexfrontError::InvalidCoordinate(centre));
        }
        world
            .resources
            .init_player(player, PlayerResources::new(start.wood, start.gold, start.food));

        let mut spawned = 0;
        for neighbor in world.grid.neighbors(centre) {
            if spawned >= rules.starting_units {
                break;
            }
            if world.grid.is_occupied(neighbor) {
                continue;
            }
            let kind = if spawned == 0 {
                UnitKind::Infantry
            } else {
                UnitKind::Cavalry
            };
            world.spawn_unit(kind, player, neighbor)?;
            world.claim_cell(neighbor, player);
            spawned += 1;
        }

        world
            .grid
            .place_structure(centre, Structure::new(StructureKind::Barracks, player));
        tracing::debug!(%player, %centre, units = spawned, "player placed");
    }

    Ok(world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_players_face_each_other() {
        assert_eq!(
            spawn_centres(5, 2),
            vec![HexCoord::new(-3, 0), HexCoord::new(3, 0)]
        );
    }

    #[test]
    fn test_centres_are_distinct_and_on_ring() {
        for players in 2..=6 {
            let centres = spawn_centres(6, players);
            assert_eq!(centres.len(), players as usize);
            for (i, a) in centres.iter().enumerate() {
                assert_eq!(a.length(), 4);
                for b in &centres[i + 1..] {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_setup_places_units_and_barracks() {
        let config = GameConfig::default();
        let world = setup_world(&config).unwrap();

        assert_eq!(world.units.len(), 4);
        for (i, centre) in spawn_centres(config.map.radius, 2).into_iter().enumerate() {
            let player = PlayerId(i as u32);
            let cell = world.grid.get_cell(centre).unwrap();
            assert_eq!(cell.structure, Some(Structure::new(StructureKind::Barracks, player)));
            assert!(cell.is_owned_by(player));

            assert_eq!(world.units.count_by_kind(player, UnitKind::Infantry), 1);
            assert_eq!(world.units.count_by_kind(player, UnitKind::Cavalry), 1);
            for unit in world.units.living_for(player) {
                assert_eq!(unit.position.distance(&centre), 1);
                assert!(world.grid.get_cell(unit.position).unwrap().is_owned_by(player));
            }
            assert_eq!(world.resources.resources(player), PlayerResources::new(150, 150, 150));
        }
    }

    #[test]
    fn test_setup_is_deterministic() {
        let config = GameConfig::default();
        let a = setup_world(&config).unwrap();
        let b = setup_world(&config).unwrap();
        let terrain = |w: &GameWorld| {
            w.grid
                .cells()
                .map(|c| (c.coord, c.terrain, c.resource))
                .collect::<Vec<_>>()
        };
        assert_eq!(terrain(&a), terrain(&b));
    }
}
