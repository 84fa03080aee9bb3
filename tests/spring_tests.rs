use approx::assert_relative_eq;
use filament::{Particle, Simulator, SpringPreset, SpringTemplate, Tuple};

const DT: f64 = 0.01;

fn two_particle_sim(ax: f64, bx: f64) -> Simulator<2> {
    let sim = Simulator::with_seed(42);
    sim.add_particle(Particle::new(Tuple::new([ax, 0.0]), 1.0));
    sim.add_particle(Particle::new(Tuple::new([bx, 0.0]), 1.0));
    sim
}

#[test]
fn stretched_spring_accelerates_endpoints_toward_each_other() {
    let sim = two_particle_sim(0.0, 1.0);
    sim.add_spring(0, 1, SpringTemplate::ideal(0.5, 10.0)).unwrap();

    sim.advance(DT);

    let a = sim.particle(0).unwrap();
    let b = sim.particle(1).unwrap();
    assert!(a.vel[0] > 0.0, "A should accelerate toward B, vx = {}", a.vel[0]);
    assert!(b.vel[0] < 0.0, "B should accelerate toward A, vx = {}", b.vel[0]);
    // Equal masses: momentum stays balanced.
    assert_relative_eq!(a.vel[0], -b.vel[0], epsilon = 1e-12);
}

#[test]
fn spring_at_rest_length_is_idempotent() {
    let sim = two_particle_sim(0.0, 0.5);
    sim.add_spring(0, 1, SpringTemplate::ideal(0.5, 10.0)).unwrap();

    sim.advance(DT);

    assert_eq!(sim.particle(0).unwrap().vel, Tuple::ZERO);
    assert_eq!(sim.particle(1).unwrap().vel, Tuple::ZERO);
}

#[test]
fn rope_is_slack_under_compression() {
    let sim = two_particle_sim(0.0, 0.5);
    let template = SpringTemplate::with_preset(1.0, 5.0, 5.0, SpringPreset::Rope, 0.0).unwrap();
    sim.add_spring(0, 1, template).unwrap();

    sim.advance(DT);

    assert_eq!(sim.particle(0).unwrap().vel, Tuple::ZERO);
    assert_eq!(sim.particle(1).unwrap().vel, Tuple::ZERO);
}

#[test]
fn rope_snaps_taut_under_tension() {
    let sim = two_particle_sim(0.0, 2.0);
    let template = SpringTemplate::with_preset(1.0, 5.0, 5.0, SpringPreset::Rope, 0.0).unwrap();
    sim.add_spring(0, 1, template).unwrap();

    sim.advance(DT);

    let a = sim.particle(0).unwrap();
    let b = sim.particle(1).unwrap();
    let separation = (b.pos - a.pos).magnitude();
    assert_relative_eq!(separation, 1.0, epsilon = 1e-9);
}

#[test]
fn rigid_spring_converges_monotonically() {
    let sim = two_particle_sim(0.0, 3.0);
    let template = SpringTemplate::with_preset(1.0, 1.0, 1.0, SpringPreset::Strut, 0.0).unwrap();
    sim.add_spring(0, 1, template).unwrap();

    let before = 3.0 - 1.0;
    sim.advance(DT);

    let a = sim.particle(0).unwrap();
    let b = sim.particle(1).unwrap();
    let after = ((b.pos - a.pos).magnitude() - 1.0).abs();
    assert!(after < before);
    // With no other forces the correction is exact.
    assert_relative_eq!(after, 0.0, epsilon = 1e-9);
}

#[test]
fn rigid_spring_never_moves_an_anchor() {
    let sim: Simulator<2> = Simulator::with_seed(43);
    sim.add_particle(Particle::fixed(Tuple::new([0.0, 0.0])));
    sim.add_particle(Particle::new(Tuple::new([2.0, 0.0]), 1.0));
    let template = SpringTemplate::with_preset(1.0, 1.0, 1.0, SpringPreset::Strut, 0.0).unwrap();
    sim.add_spring(0, 1, template).unwrap();

    sim.advance(DT);

    assert_eq!(sim.particle(0).unwrap().pos, Tuple::new([0.0, 0.0]));
    let separation = (sim.particle(1).unwrap().pos - Tuple::new([0.0, 0.0])).magnitude();
    assert_relative_eq!(separation, 1.0, epsilon = 1e-9);
}

#[test]
fn plastic_deformation_weakens_the_restoring_force() {
    let elastic_sim = two_particle_sim(0.0, 2.0);
    elastic_sim
        .add_spring(0, 1, SpringTemplate::ideal(1.0, 10.0))
        .unwrap();

    let plastic_sim = two_particle_sim(0.0, 2.0);
    let mut template = SpringTemplate::ideal(1.0, 10.0);
    template.deformation = 0.5;
    plastic_sim.add_spring(0, 1, template).unwrap();

    elastic_sim.advance(DT);
    plastic_sim.advance(DT);

    let elastic_pull = elastic_sim.particle(0).unwrap().vel[0];
    let plastic_pull = plastic_sim.particle(0).unwrap().vel[0];
    assert!(plastic_pull > 0.0);
    assert!(plastic_pull < elastic_pull);
}

#[test]
fn fully_plastic_spring_exerts_nothing() {
    let sim = two_particle_sim(0.0, 4.0);
    let mut template = SpringTemplate::ideal(1.0, 100.0);
    template.deformation = 1.0;
    sim.add_spring(0, 1, template).unwrap();

    for _ in 0..10 {
        sim.advance(DT);
    }

    assert_eq!(sim.particle(0).unwrap().vel, Tuple::ZERO);
    assert_eq!(sim.particle(1).unwrap().vel, Tuple::ZERO);
}
