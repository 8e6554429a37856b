use glam::Vec2;
use log::info;

use crate::api::config::GameConfig;
use crate::api::error::LevelError;
use crate::api::types::BodyIndex;
use crate::components::player::Player;
use crate::core::level::{Level, LevelDesc, LevelStatus};
use crate::core::physics::{PhysicsWorld, SensorContact};
use crate::core::scene::Scene;
use crate::core::time::SimTime;
use crate::core::units::Units;
use crate::input::keys::KeyState;
use crate::renderer::camera::Camera;
use crate::renderer::traits::Renderer;
use crate::systems::factory::spawn_body;
use crate::systems::intent::{map_input, Intent};
use crate::systems::kinematic::drive_kinematics;
use crate::systems::render::{present, sync_draw_rects};
use crate::systems::step::{apply_player_force, apply_sensor_events, step_world, SensorStats};

/// Everything one level owns: the simulation, its bodies, the player, the
/// camera. Built whole on load and dropped whole on transition.
pub struct World {
    units: Units,
    grace_secs: f64,
    max_elapsed_ms: f32,
    physics: PhysicsWorld,
    scene: Scene,
    player: Player,
    level: Level,
    camera: Camera,
    time: SimTime,
    contacts: Vec<SensorContact>,
    stats: SensorStats,
}

impl World {
    /// Build a level from its descriptor. `now_ms` is the load time on the
    /// caller's clock.
    pub fn load(config: &GameConfig, desc: &LevelDesc, now_ms: f64) -> Result<Self, LevelError> {
        desc.validate()?;

        let units = config.units();
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        physics.set_solver_iterations(config.solver_iterations);

        let mut scene = Scene::with_capacity(desc.bodies.len())?;
        for (i, spec) in desc.bodies.iter().enumerate() {
            let index = BodyIndex(i as u32);
            scene.push(spawn_body(&mut physics, &units, config, index, spec));
        }

        let level = Level::new(desc, config.viewport(), now_ms);
        let player = Player::new(desc.player.unwrap_or(config.player));

        info!(
            "loaded level '{}' ({}x{}, {} bodies, {} collectibles needed)",
            desc.name,
            desc.width,
            desc.height,
            scene.len(),
            desc.collectibles_needed
        );

        let mut world = Self {
            units,
            grace_secs: config.sensor_grace_secs as f64,
            max_elapsed_ms: config.max_frame_elapsed_ms,
            physics,
            scene,
            player,
            level,
            camera: Camera::new(config.viewport()),
            time: SimTime::new(config.fixed_dt),
            contacts: Vec::new(),
            stats: SensorStats::default(),
        };
        world.sync();
        Ok(world)
    }

    /// Run one frame: input, force, kinematics, step, sensor events, win
    /// check, camera. Once the level is over this does nothing.
    pub fn frame(&mut self, elapsed_ms: f64, keys: KeyState) -> LevelStatus {
        if self.level.status().is_terminal() {
            return self.level.status();
        }

        // f32::clamp panics on a negative or NaN cap.
        let elapsed = (elapsed_ms as f32).min(self.max_elapsed_ms).max(0.0);
        let velocity = self.player_velocity();
        if map_input(&mut self.player, elapsed, keys, velocity) == Intent::Quit {
            self.level.request_quit();
            return self.level.status();
        }

        apply_player_force(&mut self.physics, &self.scene, &self.player);
        drive_kinematics(&mut self.physics, &self.scene, &self.units, self.time.seconds());
        step_world(
            &mut self.physics,
            &mut self.time,
            self.grace_secs,
            &mut self.contacts,
            &mut self.stats,
        );
        apply_sensor_events(
            &self.contacts,
            &mut self.scene,
            &mut self.player,
            &mut self.level,
            &mut self.stats,
        );

        let status = self.level.evaluate();
        self.sync();
        status
    }

    /// Draw the current frame.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        present(renderer, &self.scene, &self.level);
    }

    fn sync(&mut self) {
        sync_draw_rects(
            &self.physics,
            &mut self.scene,
            &self.units,
            &mut self.camera,
            &self.level,
        );
    }

    pub fn status(&self) -> LevelStatus {
        self.level.status()
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn camera_offset(&self) -> Vec2 {
        self.camera.offset()
    }

    pub fn stats(&self) -> SensorStats {
        self.stats
    }

    /// Seconds simulated since load.
    pub fn sim_seconds(&self) -> f64 {
        self.time.seconds()
    }

    pub fn player_velocity(&self) -> Vec2 {
        self.scene
            .player()
            .map(|b| self.physics.velocity(b.handle))
            .unwrap_or(Vec2::ZERO)
    }

    /// Simulation-space center of a body.
    pub fn body_position(&self, index: BodyIndex) -> Option<Vec2> {
        self.scene
            .get(index)
            .map(|b| self.physics.body_position(b.handle))
    }
}
