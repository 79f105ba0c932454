use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use orbit_sim::{utils, SimulationConfig, UpdateMode};

fn bench_step_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("orbit_sim_step");

    for mode in [UpdateMode::Sequential, UpdateMode::Simultaneous] {
        // Bounded trails keep memory flat over the many iterations criterion runs.
        let config = SimulationConfig {
            mode,
            trail_capacity: Some(1024),
            ..utils::solar_system()
        };
        let mut sim = config.build().expect("reference scenario is valid");

        group.throughput(Throughput::Elements(sim.len() as u64));
        group.bench_function(BenchmarkId::new("solar_system", format!("{mode:?}")), |b| {
            b.iter(|| sim.step().expect("no degenerate geometry"));
        });
    }

    for n in [8, 32, 128] {
        let config = SimulationConfig {
            trail_capacity: Some(1024),
            ..utils::circular_orbits(n, 0)
        };
        let mut sim = config.build().expect("generated scenario is valid");

        group.throughput(Throughput::Elements(sim.len() as u64));
        group.bench_function(BenchmarkId::new("circular_orbits", n), |b| {
            b.iter(|| sim.step().expect("no degenerate geometry"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step_modes);
criterion_main!(benches);
