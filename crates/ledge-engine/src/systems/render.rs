use log::trace;

use crate::api::types::Rgba;
use crate::core::level::Level;
use crate::core::physics::PhysicsWorld;
use crate::core::scene::Scene;
use crate::core::units::Units;
use crate::renderer::camera::Camera;
use crate::renderer::traits::Renderer;

/// Where the remaining-collectibles readout is drawn.
pub const HUD_ORIGIN: (f32, f32) = (10.0, 10.0);

pub fn hud_text(remaining: i32) -> String {
    format!("Collectibles Needed: {}", remaining)
}

/// Point the camera at the player, then move every body's draw rectangle
/// to its simulated position in screen pixels.
pub fn sync_draw_rects(physics: &PhysicsWorld, scene: &mut Scene, units: &Units, camera: &mut Camera, level: &Level) {
    if let Some(player) = scene.player() {
        let target = units.sim_to_pixel(physics.body_position(player.handle), player.size());
        camera.follow(target, level.size, &level.bounds);
    }

    for body in scene.iter_mut() {
        let origin = units.sim_to_pixel(physics.body_position(body.handle), body.size());
        body.rect = camera.to_screen(body.rect.with_origin(origin));
    }
}

/// Draw one frame: black background, every visible body, the HUD readout.
pub fn present(renderer: &mut dyn Renderer, scene: &Scene, level: &Level) {
    renderer.clear(Rgba::BLACK);

    for body in scene.iter().filter(|b| b.visible) {
        if body.kind.is_round() {
            let radius = body.rect.w / 2.0;
            trace!("circle {} at {:?} r={}", body.index.0, body.rect.center(), radius);
            renderer.fill_circle(body.rect.center(), radius, body.color);
        } else {
            trace!("rect {} at {:?}", body.index.0, body.rect);
            renderer.fill_rect(body.rect, body.color);
        }
    }

    let (x, y) = HUD_ORIGIN;
    renderer.draw_text(x, y, &hud_text(level.collectibles_remaining));
    renderer.present();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::GameConfig;
    use crate::api::types::{BodyIndex, PixelRect};
    use crate::components::body::{BodyKind, BodySpec};
    use crate::core::level::LevelDesc;
    use crate::renderer::instance::DrawList;
    use crate::systems::factory::spawn_body;
    use glam::Vec2;

    fn build(specs: &[BodySpec], width: f32) -> (PhysicsWorld, Scene, Level) {
        let config = GameConfig::default();
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut scene = Scene::new();
        for (i, spec) in specs.iter().enumerate() {
            scene.push(spawn_body(&mut physics, &config.units(), &config, BodyIndex(i as u32), spec));
        }
        let desc = LevelDesc {
            name: "render".into(),
            width,
            height: 500.0,
            collectibles_needed: 3,
            player: None,
            bodies: specs.to_vec(),
        };
        (physics, scene, Level::new(&desc, config.viewport(), 0.0))
    }

    #[test]
    fn single_screen_rects_match_authored_positions() {
        let specs = [
            BodySpec::new(BodyKind::Dynamic, PixelRect::new(100.0, 100.0, 50.0, 50.0), Rgba([255, 0, 0, 255])),
            BodySpec::new(BodyKind::Static, PixelRect::new(0.0, 480.0, 1000.0, 20.0), Rgba::WHITE),
        ];
        let (physics, mut scene, level) = build(&specs, 1000.0);
        let mut camera = Camera::new(Vec2::new(1000.0, 500.0));
        sync_draw_rects(&physics, &mut scene, &Units::default(), &mut camera, &level);

        assert_eq!(camera.offset(), Vec2::ZERO);
        for (body, spec) in scene.iter().zip(specs.iter()) {
            assert!((body.rect.x - spec.rect.x).abs() < 1e-3, "x {} vs {}", body.rect.x, spec.rect.x);
            assert!((body.rect.y - spec.rect.y).abs() < 1e-3, "y {} vs {}", body.rect.y, spec.rect.y);
        }
    }

    #[test]
    fn scrolled_level_centers_the_player() {
        let specs = [
            BodySpec::new(BodyKind::Dynamic, PixelRect::new(975.0, 100.0, 50.0, 50.0), Rgba::WHITE),
            BodySpec::new(BodyKind::Static, PixelRect::new(1100.0, 300.0, 100.0, 20.0), Rgba::WHITE),
        ];
        let (physics, mut scene, level) = build(&specs, 2000.0);
        let mut camera = Camera::new(Vec2::new(1000.0, 500.0));
        sync_draw_rects(&physics, &mut scene, &Units::default(), &mut camera, &level);

        let player = scene.get(BodyIndex(0)).unwrap().rect;
        assert!((player.x - 500.0).abs() < 1e-3, "player x {}", player.x);
        let platform = scene.get(BodyIndex(1)).unwrap().rect;
        assert!((platform.x - 625.0).abs() < 1e-3, "platform x {}", platform.x);
    }

    #[test]
    fn present_draws_visible_bodies_and_hud() {
        let specs = [
            BodySpec::new(BodyKind::Dynamic, PixelRect::new(100.0, 100.0, 50.0, 50.0), Rgba::WHITE),
            BodySpec::new(BodyKind::Collectible, PixelRect::new(300.0, 300.0, 50.0, 50.0), Rgba::WHITE),
            BodySpec::new(BodyKind::Collectible, PixelRect::new(400.0, 300.0, 50.0, 50.0), Rgba::WHITE),
        ];
        let (_physics, mut scene, level) = build(&specs, 1000.0);
        scene.get_mut(BodyIndex(2)).unwrap().visible = false;

        let mut list = DrawList::new();
        present(&mut list, &scene, &level);

        assert_eq!(list.clear_color(), Rgba::BLACK);
        assert_eq!(list.instance_count(), 2);
        assert!(!list.instances()[0].is_circle());
        let coin = list.instances()[1];
        assert!(coin.is_circle());
        assert_eq!((coin.x, coin.y, coin.w, coin.h), (300.0, 300.0, 50.0, 50.0));
        assert_eq!(list.texts()[0].text, "Collectibles Needed: 3");
        assert_eq!((list.texts()[0].x, list.texts()[0].y), HUD_ORIGIN);
        assert_eq!(list.frames_presented(), 1);
    }
}
