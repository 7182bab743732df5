use super::collision::Rect;
use super::world::{EntityId, World};

/// Gravity-affected body. Velocity is positive downwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub vel_y: f32,
    pub weight: f32,
    pub max_velocity: f32,
    pub jump_force: f32,
    grounded_on: Option<EntityId>,
}

impl Body {
    pub fn new(weight: f32, max_velocity: f32, jump_force: f32) -> Self {
        Self {
            vel_y: 0.0,
            weight,
            max_velocity,
            jump_force,
            grounded_on: None,
        }
    }

    /// Replaces the vertical velocity with the upward jump impulse.
    pub fn jump(&mut self) {
        self.vel_y = -self.jump_force;
        self.grounded_on = None;
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded_on.is_some()
    }
}

/// Integrates every body for one step and pushes bodies out of solid entities.
pub fn step_bodies(world: &mut World, gravity: f32, dt: f32) {
    let solids: Vec<(EntityId, Rect)> = world
        .iter()
        .filter(|e| e.solid)
        .map(|e| (e.id, e.rect()))
        .collect();

    for entity in world.iter_mut() {
        let Some(mut body) = entity.body.take() else {
            continue;
        };
        let own_id = entity.id;

        if let Some(platform) = body.grounded_on {
            let rect = entity.rect();
            let still_resting = solids
                .iter()
                .any(|(id, solid)| *id == platform && rect.touches(solid));
            if !still_resting {
                body.grounded_on = None;
            }
        }

        if !body.is_grounded() {
            body.vel_y = (body.vel_y + gravity * body.weight * dt).min(body.max_velocity);
            entity.pos[1] += body.vel_y * dt;
        }

        for (id, solid) in solids.iter().filter(|(id, _)| *id != own_id) {
            let rect = entity.rect();
            if !rect.penetrates(solid) {
                continue;
            }
            let centre = rect.min_y() + rect.size[1] * 0.5;
            let solid_centre = solid.min_y() + solid.size[1] * 0.5;
            if centre <= solid_centre {
                entity.pos[1] -= rect.max_y() - solid.min_y();
                body.vel_y = body.vel_y.min(0.0);
                body.grounded_on = Some(*id);
            } else {
                entity.pos[1] += solid.max_y() - rect.min_y();
                body.vel_y = body.vel_y.max(0.0);
            }
        }

        entity.body = Some(body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::world::{Anchor, Entity};

    const DT: f32 = 1.0 / 120.0;

    fn falling_world() -> (World, EntityId) {
        let mut world = World::new();
        world.add(Entity::new([320.0, 30.0]).at([0.0, 210.0]).solid());
        let bird = world.add(
            Entity::new([40.0, 20.0])
                .at([160.0, 100.0])
                .anchored(Anchor::Center)
                .with_area()
                .with_body(Body::new(1.0, 120.0, 300.0)),
        );
        (world, bird)
    }

    #[test]
    fn gravity_is_capped_at_max_velocity() {
        let (mut world, bird) = falling_world();
        for _ in 0..30 {
            step_bodies(&mut world, 1600.0, DT);
        }
        let body = world.get(bird).unwrap().body.clone().unwrap();
        assert_eq!(body.vel_y, 120.0);
    }

    #[test]
    fn jump_sets_upward_velocity() {
        let mut body = Body::new(1.0, 120.0, 300.0);
        body.vel_y = 80.0;
        body.jump();
        assert_eq!(body.vel_y, -300.0);
    }

    #[test]
    fn bodies_land_on_solids() {
        let (mut world, bird) = falling_world();
        for _ in 0..240 {
            step_bodies(&mut world, 1600.0, DT);
        }
        let entity = world.get(bird).unwrap();
        let body = entity.body.as_ref().unwrap();
        assert!(body.is_grounded());
        assert_eq!(body.vel_y, 0.0);
        assert!((entity.rect().max_y() - 210.0).abs() < 1e-3);
    }

    #[test]
    fn jumping_leaves_the_ground() {
        let (mut world, bird) = falling_world();
        for _ in 0..240 {
            step_bodies(&mut world, 1600.0, DT);
        }
        world.get_mut(bird).unwrap().body.as_mut().unwrap().jump();
        step_bodies(&mut world, 1600.0, DT);
        let entity = world.get(bird).unwrap();
        assert!(!entity.body.as_ref().unwrap().is_grounded());
        assert!(entity.rect().max_y() < 210.0);
    }
}
