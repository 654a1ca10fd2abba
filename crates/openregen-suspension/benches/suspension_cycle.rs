//! Criterion benchmarks for the suspension control cycle.

use criterion::{criterion_group, criterion_main, Criterion};
use openregen_suspension::{AdvancedSuspensionController, RoadConditionData, SuspensionInputs};
use std::hint::black_box;

fn active_inputs() -> SuspensionInputs {
    SuspensionInputs {
        vehicle_speed_kmh: 90.0,
        suspension_velocity_ms: 0.6,
        road_roughness: 0.4,
        energy_storage_level: 0.4,
        ..SuspensionInputs::default()
    }
}

fn bench_control_cycle(c: &mut Criterion) {
    let mut controller = AdvancedSuspensionController::new();
    let inputs = active_inputs();

    c.bench_function("suspension_control_cycle", |b| {
        b.iter(|| controller.calculate_advanced_optimal_control(black_box(&inputs), None, None))
    });
}

fn bench_control_cycle_with_preview(c: &mut Criterion) {
    let mut controller = AdvancedSuspensionController::new();
    let inputs = active_inputs();
    let preview = RoadConditionData {
        upcoming_roughness: 0.7,
        confidence: 0.8,
    };

    c.bench_function("suspension_cycle_with_preview", |b| {
        b.iter(|| {
            controller.calculate_advanced_optimal_control(
                black_box(&inputs),
                Some(black_box(&preview)),
                None,
            )
        })
    });
}

criterion_group!(benches, bench_control_cycle, bench_control_cycle_with_preview);
criterion_main!(benches);
