use criterion::*;
use std::hint::black_box;

mod common;
use common::*;

fn iterate_benchmark(c: &mut Criterion) {
    let mut manager = make_manager();
    manager.reserve(ENTITIES_MED);
    populate(&mut manager, ENTITIES_MED).unwrap();

    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(ENTITIES_MED as u64));

    group.bench_function("read_position_100k", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for (_, (position,)) in &manager.entity_set::<(Position,)>().unwrap() {
                total += position.x;
            }
            black_box(total);
        });
    });

    group.bench_function("read_position_velocity_100k", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for (_, (position, velocity)) in
                &manager.entity_set::<(Position, Velocity)>().unwrap()
            {
                total += position.x * velocity.x;
            }
            black_box(total);
        });
    });

    group.bench_function("read_position_velocity_mass_100k", |b| {
        b.iter(|| {
            let mut total = 0.0f32;
            for (_, (position, velocity, mass)) in
                &manager.entity_set::<(Position, Velocity, Mass)>().unwrap()
            {
                total += position.x * velocity.x * mass.value;
            }
            black_box(total);
        });
    });

    group.bench_function("integrate_position_velocity_100k", |b| {
        b.iter(|| {
            let mut movers = manager.entity_set_mut::<(Position, Velocity)>().unwrap();
            for (_, (position, velocity)) in movers.iter_mut() {
                position.x += velocity.x * 0.016;
                position.y += velocity.y * 0.016;
            }
        });
    });

    group.finish();
}

criterion_group!(benches, iterate_benchmark);
criterion_main!(benches);
