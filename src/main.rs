use fabrik_dungeon::debug::{joint_limit_cone, DebugLines, DEFAULT_CONE_SCALE, DEFAULT_CONE_STEPS};
use fabrik_dungeon::dungeon::{self, DrawMode, DungeonConfig};
use fabrik_dungeon::ik::{Chain, FabrikSolver, SolveParams};
use fabrik_dungeon::{Aabb, Pose};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

const TICKS: u32 = 240;
const LOG_EVERY: u32 = 30;
const DEFAULT_SEED: u64 = 42;

struct App {
    chain: Chain,
    params: SolveParams,
    lines: DebugLines,
    tick: u32,
}

impl App {
    fn new() -> Result<Self, fabrik_dungeon::IkError> {
        let chain = Chain::builder()
            .add_joint(Vec3::ZERO)
            .add_joint(Vec3::new(0.0, 1.0, 0.0))
            .add_joint(Vec3::new(0.0, 2.0, 0.0))
            .add_joint(Vec3::new(0.0, 3.0, 0.0))
            .add_joint(Vec3::new(0.0, 4.0, 0.0))
            .build()?;

        let params = SolveParams::default()
            .with_tolerance(0.01)
            .with_rotation_limit(60.0);

        Ok(Self {
            chain,
            params,
            lines: DebugLines::new(),
            tick: 0,
        })
    }

    /// Target circling the root, dipping out of reach once per lap.
    fn target(&self) -> Pose {
        let t = self.tick as f32 / TICKS as f32 * TAU;
        let radius = 3.0 + 1.5 * (2.0 * t).sin().max(0.0);
        let position = Vec3::new(radius * t.cos(), 2.0, radius * t.sin());
        Pose::new(position, Quat::from_rotation_y(-t))
    }

    fn update(&mut self) {
        let target = self.target();

        self.lines.clear();
        let result =
            FabrikSolver::solve_observed(&mut self.chain, &target, &self.params, &mut self.lines);
        self.lines.extend(joint_limit_cone(
            &self.chain,
            self.params.rotation_limit,
            DEFAULT_CONE_SCALE,
            DEFAULT_CONE_STEPS,
        ));

        if self.tick % LOG_EVERY == 0 {
            log::info!(
                "tick {:>3}: {:?}, {} iteration(s), residual {:.4}, {} debug line(s)",
                self.tick,
                result.regime,
                result.iterations,
                result.final_distance,
                self.lines.len()
            );
        }
        if result.degenerate_steps > 0 {
            log::warn!(
                "tick {}: {} degenerate step(s) absorbed",
                self.tick,
                result.degenerate_steps
            );
        }

        self.tick += 1;
    }
}

fn build_dungeon(seed: u64) {
    let bounds = Aabb::new(Vec3::ZERO, Vec3::new(100.0, 2.0, 100.0));
    let config = DungeonConfig::default();
    let mut rng = StdRng::seed_from_u64(seed);

    let mut tree = match dungeon::BspTree::new(bounds) {
        Ok(tree) => tree,
        Err(e) => {
            log::error!("Dungeon error: {}", e);
            return;
        }
    };
    tree.split_recursively(&mut rng, &config);
    tree.generate_rooms(&mut rng, &config);
    let passes = tree.connect_all(&mut rng, &config);

    log::info!(
        "dungeon (seed {}): {} node(s), depth {}, {} room(s), {} hallway(s), {} pass(es)",
        seed,
        tree.len(),
        tree.depth(),
        tree.rooms().len(),
        tree.hallways().len(),
        passes
    );
    log::info!(
        "dungeon debug geometry: {} cell line(s), {} room line(s)",
        tree.debug_lines(DrawMode::Cells).len(),
        tree.debug_lines(DrawMode::Rooms).len()
    );
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(e) => {
                log::error!("invalid seed {:?}: {}", arg, e);
                return;
            }
        },
        None => DEFAULT_SEED,
    };

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            log::error!("Chain error: {}", e);
            return;
        }
    };
    for _ in 0..TICKS {
        app.update();
    }
    log::info!(
        "chain settled at {:?}, max link error {:.2e}",
        app.chain.end_effector(),
        app.chain.max_link_error()
    );

    build_dungeon(seed);
}
