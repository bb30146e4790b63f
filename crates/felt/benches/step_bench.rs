use criterion::{black_box, criterion_group, criterion_main, Criterion};
use felt::{Bounds, World, WorldConfig};
use glam::Vec2;

/// Builds a world with a full 16-ball layout and six pocket sensors,
/// roughly the shape of a live billiards table.
fn full_table() -> World {
    let mut world = World::new(WorldConfig {
        bounds: Bounds::new(2.84, 1.42),
        ..WorldConfig::default()
    });

    // Six pocket sensors hung off the table frame.
    let hw = 2.84 / 2.0;
    let hh = 1.42 / 2.0;
    for &(x, y) in &[
        (-hw, -hh),
        (-hw, hh),
        (0.0, -hh),
        (0.0, hh),
        (hw, -hh),
        (hw, hh),
    ] {
        world.add_sensor(Vec2::ZERO, Vec2::new(x, y), 0.05);
    }

    // Loose triangle of object balls plus a cue ball.
    let r = 0.03;
    let mut placed = 0;
    'outer: for col in 0..5 {
        for row in 0..(5 - col) {
            if placed == 15 {
                break 'outer;
            }
            let x = -0.71 + col as f32 * 2.0 * r;
            let y = -2.0 * r + row as f32 * 2.0 * r + col as f32 * r;
            world.add_ball(Vec2::new(x, y), r);
            placed += 1;
        }
    }
    world.add_ball(Vec2::new(0.71, 0.0), r);

    world
}

fn bench_step_at_rest(c: &mut Criterion) {
    let mut world = full_table();

    c.bench_function("step_at_rest", |b| {
        b.iter(|| black_box(world.step()))
    });
}

fn bench_step_break_shot(c: &mut Criterion) {
    c.bench_function("step_break_shot", |b| {
        b.iter_with_setup(
            || {
                let mut world = full_table();
                let cue = world.balls().last().map(|(id, _)| id).unwrap();
                world.set_velocity(cue, Vec2::new(-6.0, 0.05)).unwrap();
                world
            },
            |mut world| {
                for _ in 0..120 {
                    black_box(world.step());
                }
            },
        )
    });
}

fn bench_raycast(c: &mut Criterion) {
    let world = full_table();

    c.bench_function("raycast_full_table", |b| {
        b.iter(|| black_box(world.raycast(Vec2::new(1.4, 0.0), Vec2::new(-1.0, 0.0))))
    });
}

criterion_group!(benches, bench_step_at_rest, bench_step_break_shot, bench_raycast);
criterion_main!(benches);
