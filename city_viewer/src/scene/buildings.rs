//! Building ingestion: ingest_city system, CityState latch, Building component.

use bevy::prelude::*;
use crossbeam_channel::TryRecvError;

use crate::data::{BuildingRecord, ChainChannel};
use crate::scene::materials;
use crate::ui::HudState;

/// Marker + record index for spawned building entities.
#[derive(Component)]
pub struct Building {
    pub index: usize,
}

/// Latch and counter for the one-time city population.
#[derive(Resource, Default)]
pub struct CityState {
    pub synced: bool,
    pub building_count: usize,
}

/// A record is materialized when its 0-based index does not exceed the
/// reported supply, so a supply of `n` admits `n + 1` records.
fn within_supply(index: usize, supply: u64) -> bool {
    index as u64 <= supply
}

/// Drains the one-shot connection channel. The single delivered result
/// populates the city; the latch guarantees a second delivery could never
/// double-add. A failed handshake latches too and lands in the HUD.
pub fn ingest_city(
    mut commands: Commands,
    channel: Res<ChainChannel>,
    mut state: ResMut<CityState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials_res: ResMut<Assets<StandardMaterial>>,
    mut hud: ResMut<HudState>,
) {
    if state.synced {
        return;
    }

    match channel.0.connection.try_recv() {
        Ok(Ok(result)) => {
            state.synced = true;
            hud.connected(&result);
            for (index, record) in result.buildings.iter().enumerate() {
                if !within_supply(index, result.supply) {
                    continue;
                }
                spawn_building(&mut commands, &mut meshes, &mut materials_res, index, record);
                state.building_count += 1;
            }
            eprintln!(
                "metropolis: placed {} of {} buildings (supply {})",
                state.building_count,
                result.buildings.len(),
                result.supply
            );
        }
        Ok(Err(err)) => {
            state.synced = true;
            hud.connection_failed(&err);
            eprintln!("metropolis: {err}");
        }
        Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => {
            state.synced = true;
            hud.connection_lost();
            eprintln!("metropolis: chain worker exited before connecting");
        }
    }
}

fn spawn_building(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials_res: &mut ResMut<Assets<StandardMaterial>>,
    index: usize,
    record: &BuildingRecord,
) {
    commands.spawn((
        Building { index },
        Mesh3d(meshes.add(Cuboid::new(record.w, record.h, record.d))),
        MeshMaterial3d(materials::building_material(materials_res)),
        Transform::from_xyz(record.x, record.y, record.z),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::MeshAabb;
    use crate::data::{ChainError, ChainHandle, ConnectionResult, MintReceipt, MintRequest};
    use crate::ui::ConnectionStatus;
    use crossbeam_channel::{bounded, unbounded, Sender};

    fn record(x: f32) -> BuildingRecord {
        BuildingRecord {
            x,
            y: 0.0,
            z: 1.0,
            w: 2.0,
            h: 3.0,
            d: 4.0,
        }
    }

    fn test_channel() -> (Sender<Result<ConnectionResult, ChainError>>, ChainChannel) {
        let (conn_tx, conn_rx) = bounded(1);
        let (mint_tx, _mint_rx) = unbounded::<MintRequest>();
        let (_outcome_tx, outcome_rx) = bounded::<Result<MintReceipt, ChainError>>(4);
        let (_count_tx, count_rx) = bounded::<Result<usize, ChainError>>(1);
        (
            conn_tx,
            ChainChannel(ChainHandle {
                connection: conn_rx,
                mint_requests: mint_tx,
                mint_outcomes: outcome_rx,
                collection: count_rx,
            }),
        )
    }

    fn test_app(channel: ChainChannel) -> App {
        let mut app = App::new();
        app.insert_resource(Assets::<Mesh>::default());
        app.insert_resource(Assets::<StandardMaterial>::default());
        app.init_resource::<CityState>();
        app.init_resource::<HudState>();
        app.insert_resource(channel);
        app.add_systems(Update, ingest_city);
        app
    }

    fn placed(app: &mut App) -> Vec<(usize, Vec3)> {
        let world = app.world_mut();
        let mut rows: Vec<(usize, Vec3)> = world
            .query::<(&Building, &Transform)>()
            .iter(world)
            .map(|(b, tf)| (b.index, tf.translation))
            .collect();
        rows.sort_by_key(|&(index, _)| index);
        rows
    }

    #[test]
    fn supply_bound_is_inclusive() {
        assert!(within_supply(0, 0));
        assert!(!within_supply(1, 0));
        assert!(within_supply(2, 2));
        assert!(!within_supply(3, 2));
    }

    #[test]
    fn ingest_places_min_supply_plus_one_buildings_in_order() {
        let (conn_tx, channel) = test_channel();
        conn_tx
            .send(Ok(ConnectionResult {
                account: "0xabc".to_string(),
                supply: 2,
                buildings: vec![record(0.0), record(1.0), record(2.0), record(3.0)],
            }))
            .unwrap();

        let mut app = test_app(channel);
        app.update();

        let rows = placed(&mut app);
        assert_eq!(rows.len(), 3);
        for (i, (index, translation)) in rows.iter().enumerate() {
            assert_eq!(*index, i);
            assert_eq!(*translation, Vec3::new(i as f32, 0.0, 1.0));
        }

        let state = app.world().resource::<CityState>();
        assert!(state.synced);
        assert_eq!(state.building_count, 3);
    }

    #[test]
    fn ingest_sizes_each_box_from_its_record() {
        let (conn_tx, channel) = test_channel();
        conn_tx
            .send(Ok(ConnectionResult {
                account: "0xabc".to_string(),
                supply: 0,
                buildings: vec![BuildingRecord {
                    x: 5.0,
                    y: 1.0,
                    z: -4.0,
                    w: 2.0,
                    h: 8.0,
                    d: 3.0,
                }],
            }))
            .unwrap();

        let mut app = test_app(channel);
        app.update();

        let world = app.world_mut();
        let (mesh3d, transform) = world
            .query_filtered::<(&Mesh3d, &Transform), With<Building>>()
            .single(world);
        assert_eq!(transform.translation, Vec3::new(5.0, 1.0, -4.0));

        let mesh_handle = mesh3d.0.clone();
        let meshes = app.world().resource::<Assets<Mesh>>();
        let aabb = meshes
            .get(&mesh_handle)
            .and_then(|mesh| mesh.compute_aabb())
            .expect("building mesh should have extents");
        assert_eq!(Vec3::from(aabb.half_extents) * 2.0, Vec3::new(2.0, 8.0, 3.0));
    }

    #[test]
    fn a_second_delivery_can_never_double_add() {
        let (conn_tx, channel) = test_channel();
        conn_tx
            .send(Ok(ConnectionResult {
                account: "0xabc".to_string(),
                supply: 9,
                buildings: vec![record(0.0), record(1.0)],
            }))
            .unwrap();

        let mut app = test_app(channel);
        app.update();
        assert_eq!(placed(&mut app).len(), 2);

        // The latch is set, so even a buggy second resolution is ignored.
        conn_tx
            .send(Ok(ConnectionResult {
                account: "0xabc".to_string(),
                supply: 9,
                buildings: vec![record(0.0), record(1.0)],
            }))
            .unwrap();
        app.update();
        app.update();

        assert_eq!(placed(&mut app).len(), 2);
        assert_eq!(app.world().resource::<CityState>().building_count, 2);
    }

    #[test]
    fn nothing_is_placed_while_the_handshake_is_pending() {
        let (_conn_tx, channel) = test_channel();

        let mut app = test_app(channel);
        app.update();
        app.update();

        assert!(placed(&mut app).is_empty());
        assert!(!app.world().resource::<CityState>().synced);
        assert_eq!(
            app.world().resource::<HudState>().status,
            ConnectionStatus::Connecting
        );
    }

    #[test]
    fn a_failed_handshake_latches_and_lands_in_the_hud() {
        let (conn_tx, channel) = test_channel();
        conn_tx.send(Err(ChainError::WalletUnavailable)).unwrap();

        let mut app = test_app(channel);
        app.update();

        assert!(placed(&mut app).is_empty());
        assert!(app.world().resource::<CityState>().synced);
        let status = &app.world().resource::<HudState>().status;
        assert!(matches!(status, ConnectionStatus::Failed(_)));
    }

    #[test]
    fn a_dead_worker_is_reported_instead_of_waiting_forever() {
        let (conn_tx, channel) = test_channel();
        drop(conn_tx);

        let mut app = test_app(channel);
        app.update();

        assert!(app.world().resource::<CityState>().synced);
        let status = &app.world().resource::<HudState>().status;
        assert!(matches!(status, ConnectionStatus::Failed(_)));
    }
}
