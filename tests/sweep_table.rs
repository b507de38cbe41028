use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tri_sweep::mesh::TriMesh;
use tri_sweep::mesh::generation::{rectangle, unit_square};
use tri_sweep::quadrature::Direction;
use tri_sweep::sweep::{compute_sweep_orders, sweep_order_for_angle};
use tri_sweep::sweep_error::SweepError;
use tri_sweep::topology::cell::CellId;

fn c(i: u32) -> CellId {
    CellId::new(i)
}

/// Checks one resolved column against the classification that produced it:
/// a permutation of all cells, every downwind edge respected, and the first
/// cell free of upwind dependencies.
fn assert_valid_order(mesh: &TriMesh, theta: f64, order: &[CellId]) {
    assert_eq!(order.len(), mesh.n_cells());
    let mut pos = vec![usize::MAX; mesh.n_cells()];
    for (rank, cell) in order.iter().enumerate() {
        assert_eq!(pos[cell.index()], usize::MAX, "cell {cell} ordered twice");
        pos[cell.index()] = rank;
    }

    let frames = mesh.frames().unwrap();
    let mut incoming = vec![0usize; mesh.n_cells()];
    for (cell, frame) in mesh.cell_ids().zip(frames) {
        for nb in frame.downwind_neighbors(theta) {
            assert!(
                pos[cell.index()] < pos[nb.index()],
                "theta {theta}: {cell} ranked after its downwind neighbor {nb}"
            );
            incoming[nb.index()] += 1;
        }
    }
    assert_eq!(incoming[order[0].index()], 0, "first cell has upwind flux");
}

#[test]
fn split_square_cardinal_directions() {
    let mesh = unit_square(1).unwrap();
    let cardinals = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];
    let directions: Vec<_> = cardinals
        .iter()
        .map(|&theta| Direction::in_plane(theta, 0.25))
        .collect();

    let table = compute_sweep_orders(&mesh, &directions);
    assert!(table.is_complete());
    assert_eq!(table.n_cells(), 2);
    assert_eq!(table.n_directions(), 4);

    // +x and -y enter through the upper-left half; +y and -x through the
    // lower-right half.
    assert_eq!(table.order(0).unwrap(), vec![c(1), c(0)]);
    assert_eq!(table.order(1).unwrap(), vec![c(0), c(1)]);
    assert_eq!(table.order(2).unwrap(), vec![c(0), c(1)]);
    assert_eq!(table.order(3).unwrap(), vec![c(1), c(0)]);

    assert_eq!(table.rank(c(0), 0).unwrap(), 1);
    assert_eq!(table.rank(c(1), 0).unwrap(), 0);
    assert_eq!(table.column(1).unwrap(), &[0, 1]);
}

#[test]
fn normal_incidence_fails_only_its_own_column() {
    let mesh = unit_square(2).unwrap();
    let directions = [
        Direction::in_plane(0.0, 0.5),
        Direction::new(0.0, 0.0, 1.0, 0.5),
        Direction::in_plane(PI, 0.5),
    ];

    let table = compute_sweep_orders(&mesh, &directions);
    assert!(!table.is_complete());
    assert!(table.column(0).is_ok());
    assert!(table.column(2).is_ok());

    let failures: Vec<_> = table.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 1);
    assert_eq!(
        *failures[0].1,
        SweepError::NormalIncidence { omega_z: 1.0 }
    );
}

#[test]
fn eight_directions_over_a_grid_give_valid_orders() {
    let mesh = rectangle(4, 3, [0.0, 0.0], [4.0, 3.0]).unwrap();
    let directions: Vec<_> = (0..8)
        .map(|k| Direction::in_plane(k as f64 * FRAC_PI_4, 1.0 / 8.0))
        .collect();

    let table = compute_sweep_orders(&mesh, &directions);
    assert!(table.is_complete());
    for (d, dir) in directions.iter().enumerate() {
        let order = table.order(d).unwrap();
        assert_valid_order(&mesh, dir.polar_angle().unwrap(), &order);
    }
}

#[test]
fn repeated_resolution_is_bitwise_identical() {
    let mesh = rectangle(5, 4, [0.0, 0.0], [5.0, 4.0]).unwrap();
    let mut rng = SmallRng::seed_from_u64(42);
    let directions: Vec<_> = (0..12)
        .map(|_| {
            let theta = rng.gen_range(0.0..TAU);
            let omega_z: f64 = rng.gen_range(-0.8..0.8);
            let s = (1.0 - omega_z * omega_z).sqrt();
            Direction::new(s * theta.cos(), s * theta.sin(), omega_z, 1.0 / 12.0)
        })
        .collect();

    let first = compute_sweep_orders(&mesh, &directions);
    let second = compute_sweep_orders(&mesh, &directions);
    assert!(first.is_complete());
    assert_eq!(first, second);
}

#[test]
fn outflow_boundary_cells_are_terminal() {
    // +x flow on a 2x2 grid: the lower halves of the right-column quads
    // exit only through the domain boundary, so they are the direction's
    // terminal cells and one of them must be ranked last.
    let mesh = rectangle(2, 2, [0.0, 0.0], [2.0, 2.0]).unwrap();
    let frames = mesh.frames().unwrap();
    let terminal: Vec<_> = mesh
        .cell_ids()
        .zip(frames)
        .filter(|(_, frame)| frame.downwind_neighbors(0.0).next().is_none())
        .map(|(cell, _)| cell)
        .collect();
    assert_eq!(terminal, vec![c(2), c(6)]);

    let order = sweep_order_for_angle(&mesh, 0.0).unwrap();
    assert!(terminal.contains(order.last().unwrap()));
}

#[test]
fn degenerate_cell_fails_every_column() {
    // Cell 1 is collinear; frame construction fails for each direction
    // because failed geometry is never cached.
    let mesh = TriMesh::from_cells(
        vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [2.0, 0.0]],
        vec![[0, 1, 2], [0, 1, 3]],
    )
    .unwrap();
    let directions: Vec<_> = (0..3)
        .map(|k| Direction::in_plane(k as f64 * FRAC_PI_2 + 0.1, 1.0))
        .collect();

    let table = compute_sweep_orders(&mesh, &directions);
    assert_eq!(table.failures().count(), 3);
    for (_, err) in table.failures() {
        assert_eq!(*err, SweepError::DegenerateCell { cell: c(1) });
    }
}
