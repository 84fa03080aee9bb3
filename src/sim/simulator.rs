//! The simulator: particle/spring storage, the integration loop, and the
//! snapshot handoff protocol.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use log::debug;
use parking_lot::Mutex;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::PHYSICS_THREAD_NAME;
use crate::core::particle::Particle;
use crate::core::snapshot::OutputParticle;
use crate::core::spring::{Spring, SpringTemplate};
use crate::error::SimError;
use crate::math::tuple::ZeroPolicy;
use crate::sim::buffers::SnapshotBuffers;
use crate::utils::logging::ScopedTimer;

/// Mutable simulation state guarded by the mutation/step lock.
struct World<const N: usize> {
    particles: Vec<Particle<N>>,
    springs: Vec<Spring>,
    /// Write slot of the triple buffer; its two siblings live in
    /// [`SnapshotBuffers`] behind the swap lock.
    write: Vec<OutputParticle<N>>,
    rng: SmallRng,
    policy: ZeroPolicy,
    parallel: bool,
}

impl<const N: usize> World<N> {
    /// One full integration step: every spring first (forces must be
    /// accumulated before anything integrates), then every particle update
    /// and snapshot capture.
    fn step(&mut self, dt: f64) {
        let _timer = ScopedTimer::new("simulator::step");

        for spring in &mut self.springs {
            if let Err(err) = spring.apply(&mut self.particles, self.policy, &mut self.rng) {
                panic!("spring update failed: {err}");
            }
        }

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                use rayon::prelude::*;
                self.particles
                    .par_iter_mut()
                    .zip(self.write.par_iter_mut())
                    .for_each(|(particle, slot)| {
                        particle.update(dt);
                        slot.capture(particle);
                    });
                return;
            }
        }

        for (particle, slot) in self.particles.iter_mut().zip(self.write.iter_mut()) {
            particle.update(dt);
            slot.capture(particle);
        }
    }
}

/// State shared between the owning handle and the physics thread.
struct Shared<const N: usize> {
    /// Mutation/step lock: particles, springs, and the write slot.
    world: Mutex<World<N>>,
    /// Buffer-swap lock: the `latest`/`read` slots and the fresh flag.
    output: Mutex<SnapshotBuffers<N>>,
    running: AtomicBool,
}

/// Owns every particle and spring, advances them through time, and exposes
/// consistent snapshots to independently paced consumers.
///
/// Two locks, always taken in world → output order. The world lock is held
/// for a whole step and by mutators; the output lock only for the two
/// buffer swaps. A consumer polling [`Simulator::update_output`] therefore
/// never stalls the integration loop, and the loop never hands out a
/// half-written snapshot.
pub struct Simulator<const N: usize> {
    shared: Arc<Shared<N>>,
    worker: Option<JoinHandle<()>>,
}

impl<const N: usize> Simulator<N> {
    /// An empty simulator with an entropy-seeded random source.
    pub fn new() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// An empty simulator with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            shared: Arc::new(Shared {
                world: Mutex::new(World {
                    particles: Vec::new(),
                    springs: Vec::new(),
                    write: Vec::new(),
                    rng,
                    policy: ZeroPolicy::Randomize,
                    parallel: false,
                }),
                output: Mutex::new(SnapshotBuffers::default()),
                running: AtomicBool::new(false),
            }),
            worker: None,
        }
    }

    /// Selects how zero-length spring axes are normalized.
    pub fn set_zero_policy(&self, policy: ZeroPolicy) {
        self.shared.world.lock().policy = policy;
    }

    /// Enables or disables the parallel particle-integration pass.
    ///
    /// A no-op unless the crate was built with the `parallel` feature.
    pub fn set_parallel_enabled(&self, enabled: bool) {
        self.shared.world.lock().parallel = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.shared.world.lock().parallel
    }

    /// Number of particles.
    pub fn size(&self) -> usize {
        self.shared.world.lock().particles.len()
    }

    /// Whether the background loop is running.
    pub fn is_running(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// A copy of the particle at `index`.
    pub fn particle(&self, index: usize) -> Option<Particle<N>> {
        self.shared.world.lock().particles.get(index).copied()
    }

    /// Copies `particle` into the simulation and returns its index.
    ///
    /// Indices are insertion order, 0-based, and stable for the simulator's
    /// lifetime: particles are never removed. All three snapshot buffers
    /// grow a matching slot. Safe to call while the loop is running; the
    /// step in flight finishes first.
    pub fn add_particle(&self, particle: Particle<N>) -> usize {
        let mut world = self.shared.world.lock();
        let index = world.particles.len();
        world.particles.push(particle);
        world.write.push(OutputParticle::default());
        self.shared.output.lock().push_slot();
        debug!("added particle {index} (mass {})", particle.mass);
        index
    }

    /// Connects two existing particles with a spring described by
    /// `template`.
    ///
    /// Fails when either index is out of range or both name the same
    /// particle. Safe to call while the loop is running.
    pub fn add_spring(&self, a: usize, b: usize, template: SpringTemplate) -> Result<(), SimError> {
        let mut world = self.shared.world.lock();
        let count = world.particles.len();
        for index in [a, b] {
            if index >= count {
                return Err(SimError::ParticleOutOfBounds { index, count });
            }
        }
        world.springs.push(Spring::new(a, b, template)?);
        debug!("added spring {a} <-> {b}");
        Ok(())
    }

    /// Advances the simulation one step of `dt` seconds on the caller's
    /// thread.
    ///
    /// # Panics
    ///
    /// Panics if the background loop is running; synchronous stepping and
    /// the asynchronous loop are mutually exclusive by contract.
    pub fn advance(&self, dt: f64) {
        assert!(
            !self.is_running(),
            "advance() called while the background loop is running"
        );
        Self::step_and_publish(&self.shared, dt);
    }

    fn step_and_publish(shared: &Shared<N>, dt: f64) {
        let mut world = shared.world.lock();
        world.step(dt);
        // The swap is the only work ever done under both locks.
        shared.output.lock().publish(&mut world.write);
    }

    /// Starts the integration loop on a dedicated thread.
    ///
    /// Each iteration steps by the wall-clock time elapsed since the
    /// previous one, measured on a steady clock, until [`Simulator::stop`]
    /// is called.
    ///
    /// # Panics
    ///
    /// Panics if the loop is already running.
    pub fn start(&mut self) {
        assert!(
            self.worker.is_none(),
            "start() called on a running simulator"
        );
        self.shared.running.store(true, Ordering::SeqCst);

        let shared = Arc::clone(&self.shared);
        self.worker = Some(
            thread::Builder::new()
                .name(PHYSICS_THREAD_NAME.into())
                .spawn(move || {
                    debug!("physics loop started");
                    let mut last = Instant::now();
                    while shared.running.load(Ordering::SeqCst) {
                        let now = Instant::now();
                        let dt = now.duration_since(last).as_secs_f64();
                        last = now;
                        Self::step_and_publish(&shared, dt);
                    }
                    debug!("physics loop stopped");
                })
                .expect("failed to spawn physics thread"),
        );
    }

    /// Signals the loop to exit after its current step and joins the
    /// thread. The join is unbounded by design.
    ///
    /// # Panics
    ///
    /// Panics if the loop was never started, and re-raises any panic that
    /// escaped the physics thread.
    pub fn stop(&mut self) {
        let worker = self
            .worker
            .take()
            .expect("stop() called on a simulator that is not running");
        self.shared.running.store(false, Ordering::SeqCst);
        if let Err(panic) = worker.join() {
            std::panic::resume_unwind(panic);
        }
    }

    /// Rotates the freshest published snapshot into the read slot.
    ///
    /// Returns `true` when new data became visible; `false` leaves the read
    /// slot untouched. This is the only point at which the consumer-visible
    /// buffer changes.
    pub fn update_output(&self) -> bool {
        self.shared.output.lock().acquire()
    }

    /// The snapshot most recently made visible by
    /// [`Simulator::update_output`] (empty before the first publish).
    pub fn output(&self) -> Vec<OutputParticle<N>> {
        self.shared.output.lock().read().to_vec()
    }

    /// Like [`Simulator::output`], but reuses `target`'s allocation.
    pub fn copy_output_into(&self, target: &mut Vec<OutputParticle<N>>) {
        let buffers = self.shared.output.lock();
        target.clear();
        target.extend_from_slice(buffers.read());
    }
}

impl<const N: usize> Default for Simulator<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Drop for Simulator<N> {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            self.shared.running.store(false, Ordering::SeqCst);
            // A worker panic surfaces through stop(); on drop we only make
            // sure the thread is not left running.
            let _ = worker.join();
        }
    }
}
