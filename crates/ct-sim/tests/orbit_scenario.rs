//! End-to-end runs of the two-node model over several orbits.

use ct_sim::{
    CubeSatModel, NodeTemperatures, SimOptions, TimeGrid, Window, minimum_heater_power, run_sim,
    temperature_extrema, window_average_net_power,
};
use ct_thermal::{NodeCoupling, OrbitEnvironment, ThermalNode};

const ORBIT_S: f64 = 5400.0;

fn model(k_w_per_k: f64) -> CubeSatModel {
    CubeSatModel::new(
        OrbitEnvironment::default(),
        NodeCoupling::new(k_w_per_k, 0.0).unwrap(),
        ThermalNode::new("battery", 80.0).unwrap(),
        ThermalNode::new("shell", 570.0).unwrap(),
        NodeTemperatures::new(0.0, 5.0),
    )
    .unwrap()
}

fn reference_grid() -> TimeGrid {
    TimeGrid::linspace(0.0, 30_000.0, 1000).unwrap()
}

#[test]
fn reference_scenario_stays_bounded() {
    let mut model = model(2.64e-3);
    let record = run_sim(&mut model, &reference_grid(), &SimOptions::default()).unwrap();

    assert_eq!(record.len(), 1000);
    assert_eq!(record.t[999], 30_000.0);
    for (t, x) in record.iter() {
        assert!(
            x.internal_c.abs() < 100.0 && x.external_c.abs() < 150.0,
            "diverged at t = {t}: {x:?}"
        );
    }
}

#[test]
fn shell_oscillates_and_battery_lags() {
    let mut model = model(2.64e-3);
    let record = run_sim(&mut model, &reference_grid(), &SimOptions::default()).unwrap();

    // Last full orbit of the run.
    let last_orbit = Window::new(30_000.0 - ORBIT_S, 30_000.0);
    let extrema = temperature_extrema(&record, last_orbit).unwrap();
    assert!(extrema.external_swing_c() > 10.0, "{extrema:?}");
    assert!(extrema.internal_swing_c() < extrema.external_swing_c());

    // The shell warms through every sunlit half and cools through every eclipse.
    let at = |t: f64| {
        let i = record
            .t
            .iter()
            .position(|&s| s >= t)
            .unwrap_or(record.len() - 1);
        record.x[i]
    };
    for orbit in 1..5 {
        let start = orbit as f64 * ORBIT_S;
        let dusk = start + 0.45 * ORBIT_S;
        let night = start + 0.95 * ORBIT_S;
        assert!(at(dusk).external_c > at(start + 60.0).external_c);
        assert!(at(night).external_c < at(dusk).external_c);
    }
}

#[test]
fn periodic_steady_state_has_zero_mean_net_power() {
    let mut model = model(0.5);
    let orbits = 20.0;
    let grid = TimeGrid::linspace(0.0, orbits * ORBIT_S, 10_801).unwrap();
    let record = run_sim(&mut model, &grid, &SimOptions::default()).unwrap();

    let end = orbits * ORBIT_S;
    let net = window_average_net_power(&model, &record, Window::new(end - ORBIT_S, end)).unwrap();
    assert!(net.internal_w.abs() < 0.05, "{net:?}");
    assert!(net.external_w.abs() < 0.05, "{net:?}");
}

#[test]
fn repeated_runs_are_identical() {
    let grid = reference_grid();
    let mut first = model(2.64e-3);
    let a = run_sim(&mut first, &grid, &SimOptions::default()).unwrap();
    let b = run_sim(&mut first, &grid, &SimOptions::default()).unwrap();
    let mut second = model(2.64e-3);
    let c = run_sim(&mut second, &grid, &SimOptions::default()).unwrap();

    assert_eq!(a.x, b.x);
    assert_eq!(a.x, c.x);
}

#[test]
fn heater_sizing_grows_with_target() {
    let mut model = model(2.64e-3);
    let record = run_sim(&mut model, &reference_grid(), &SimOptions::default()).unwrap();

    let mut previous = 0.0;
    for target in [0.0, 10.0, 18.0, 25.0] {
        let sizing = minimum_heater_power(&model, &record, target, Window::all()).unwrap();
        assert!(sizing.peak_w >= 0.0);
        assert!(sizing.mean_w >= 0.0 && sizing.mean_w <= sizing.peak_w);
        assert!(sizing.peak_w >= previous, "target {target}: {sizing:?}");
        previous = sizing.peak_w;
    }
    assert!(previous > 0.0);
}

#[test]
fn forward_euler_tracks_rk4() {
    let grid = reference_grid();
    let mut rk4 = model(2.64e-3);
    let reference = run_sim(&mut rk4, &grid, &SimOptions::default()).unwrap();

    let opts = SimOptions {
        max_dt: 1.0,
        integrator: ct_sim::IntegratorType::ForwardEuler,
        ..SimOptions::default()
    };
    let mut euler = model(2.64e-3);
    let approx = run_sim(&mut euler, &grid, &opts).unwrap();

    for (a, b) in reference.x.iter().zip(&approx.x) {
        assert!((a.external_c - b.external_c).abs() < 1.0);
        assert!((a.internal_c - b.internal_c).abs() < 0.1);
    }
}
