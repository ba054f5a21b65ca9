use kinetic_gas::error::Result;
use kinetic_gas::{GasConfig, ParticleSystem};
use proptest::prelude::*;

/// Σ|v|² must survive many steps of collisions and wall bounces.
#[test]
fn energy_conserved_over_many_steps() -> Result<()> {
    let mut sys = ParticleSystem::new(&GasConfig {
        num_particles: 200,
        box_size: 20.0,
        seed: Some(12345),
        ..GasConfig::default()
    })?;
    let e0 = sys.sum_squared_speed();

    for _ in 0..500 {
        let before = sys.sum_squared_speed();
        sys.evolve(0.05)?;
        let after = sys.sum_squared_speed();
        assert!(
            ((after - before) / before).abs() < 1e-10,
            "step drift too large: {before} -> {after}"
        );
    }

    assert!(sys.collisions() > 0, "dense gas should have collided");
    let e1 = sys.sum_squared_speed();
    let rel = ((e1 - e0) / e0).abs();
    assert!(rel < 1e-9, "relative energy drift {rel} too large (E0={e0}, E1={e1})");
    Ok(())
}

#[test]
fn energy_conserved_in_3d() -> Result<()> {
    let mut sys = ParticleSystem::new(&GasConfig {
        num_particles: 150,
        box_size: 8.0,
        ndim: 3,
        temperature: 2.0,
        seed: Some(4242),
        ..GasConfig::default()
    })?;
    let e0 = sys.sum_squared_speed();
    for _ in 0..200 {
        sys.evolve(0.02)?;
    }
    assert!(((sys.sum_squared_speed() - e0) / e0).abs() < 1e-9);
    assert!((sys.time() - 4.0).abs() < 1e-9);
    assert_eq!(sys.steps(), 200);
    Ok(())
}

/// Same seed, same inputs: bit-identical trajectories.
#[test]
fn seeded_runs_are_bit_identical() -> Result<()> {
    let cfg = GasConfig {
        num_particles: 80,
        box_size: 15.0,
        seed: Some(2024),
        ..GasConfig::default()
    };
    let mut a = ParticleSystem::new(&cfg)?;
    let mut b = ParticleSystem::new(&cfg)?;
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.velocities(), b.velocities());
    for _ in 0..100 {
        a.evolve(0.1)?;
        b.evolve(0.1)?;
    }
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.velocities(), b.velocities());
    assert_eq!(a.collisions(), b.collisions());

    let c = ParticleSystem::new(&GasConfig {
        seed: Some(2025),
        ..cfg
    })?;
    assert_ne!(a.positions(), c.positions());
    Ok(())
}

/// Long runs keep the gas inside the box when steps are small compared to L / max|v|.
#[test]
fn particles_stay_in_box_for_small_steps() -> Result<()> {
    let mut sys = ParticleSystem::new(&GasConfig {
        num_particles: 100,
        box_size: 10.0,
        seed: Some(77),
        ..GasConfig::default()
    })?;
    for _ in 0..300 {
        sys.evolve(0.01)?;
        assert!(sys
            .positions()
            .iter()
            .all(|&x| (0.0..=10.0).contains(&x)));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn evolve_conserves_sum_squared_speed(
        seed in any::<u64>(),
        n in 2usize..60,
        ndim in 2usize..=3,
        l in 2.0f64..30.0,
        t in 0.1f64..5.0,
        dt in 0.001f64..0.2,
        delta in any::<bool>(),
    ) {
        let mut sys = ParticleSystem::new(&GasConfig {
            num_particles: n,
            box_size: l,
            temperature: t,
            ndim,
            delta_velocity: delta,
            seed: Some(seed),
            ..GasConfig::default()
        }).expect("valid config");
        let e0 = sys.sum_squared_speed();
        for _ in 0..20 {
            sys.evolve(dt).expect("valid dt");
        }
        let e1 = sys.sum_squared_speed();
        prop_assert!(((e1 - e0) / e0).abs() < 1e-9, "E0={} E1={}", e0, e1);
    }
}
