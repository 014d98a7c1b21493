//! # Simulation Tick Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sim_lib::{
    control::ControlMode,
    mapping::{self, ArmForm, ElevatorForm, FeedforwardValues, MechanismForm, PidValues},
    motor::MotorCatalog,
    sim::Simulation,
};

fn form(mechanism_type: &str) -> MechanismForm {
    MechanismForm {
        mechanism_type: mechanism_type.into(),
        motor_type: "Krakenx60".into(),
        gear_ratio: 20.0,
        pid_values: PidValues {
            k_p: 8.0,
            k_i: 0.5,
            k_d: 0.2,
        },
        feedforward: Some(FeedforwardValues {
            k_s: 0.1,
            k_v: 0.05,
            k_g: 0.3,
            ..Default::default()
        }),
        arm_params: Some(ArmForm::default()),
        elevator_params: Some(ElevatorForm::default()),
    }
}

fn tick_benchmark(c: &mut Criterion) {
    let catalog = MotorCatalog::builtin();

    for &mechanism in &["Arm", "Elevator"] {
        let config = mapping::configure(&form(mechanism), 2, &catalog).unwrap();

        let mut sim = Simulation::new(config.clone()).unwrap();
        sim.set_target(0.5);

        c.bench_function(&format!("Simulation::tick::{}", mechanism), |b| {
            b.iter(|| sim.tick(black_box(None)))
        });

        // A full 10 s run including building the simulation
        c.bench_function(&format!("Simulation::run_10s::{}", mechanism), |b| {
            b.iter(|| {
                let mut sim = Simulation::new(config.clone()).unwrap();
                sim.set_target(0.5);
                sim.set_control_mode(ControlMode::Position);
                for _ in 0..500 {
                    black_box(sim.tick(None));
                }
            })
        });
    }
}

criterion_group!(benches, tick_benchmark);
criterion_main!(benches);
