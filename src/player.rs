//! Player movement, blocking and hazard damage.

use crate::entities::{Door, Facing, Hazard, Obstacle, Player};
use crate::geometry::{Bounds, Collidable, Movable};
use crate::input::FrameInput;

/// Boxes that stop the player this tick: locked doors and active obstacles.
pub fn blockers(doors: &[Door], obstacles: &[Obstacle]) -> Vec<Bounds> {
    doors
        .iter()
        .filter(|d| !d.is_unlocked())
        .map(Collidable::bounds)
        .chain(obstacles.iter().filter(|o| o.active).map(Collidable::bounds))
        .collect()
}

/// Move the player one tick.
///
/// The candidate position is only taken if the whole box stays inside
/// `window`; a candidate that would leave it is dropped rather than clamped.
/// Any blocker overlapping the new box rolls the player back to where the tick
/// started.
pub fn step_player(player: &mut Player, input: &FrameInput, window: &Bounds, blockers: &[Bounds]) {
    player.prev_position = player.position;

    let candidate = player.position + input.movement(player.speed);
    player.facing = if input.pointer.x < candidate.x { Facing::Left } else { Facing::Right };

    if Bounds::centered(candidate, player.extent).is_within(window) {
        player.move_to(candidate);
    }

    let bounds = player.bounds();
    for blocker in blockers {
        if bounds.intersects(blocker) {
            player.revert_move();
        }
    }
}

/// Apply damage from every river the player stands in. Returns the damage
/// dealt this tick.
pub fn apply_hazards(player: &mut Player, hazards: &[Hazard]) -> f64 {
    if player.character.traits().hazard_immune {
        return 0.0;
    }
    let mut dealt = 0.0;
    for hazard in hazards {
        if hazard.collides_with(&*player) {
            player.receive_damage(hazard.damage_per_tick);
            dealt += hazard.damage_per_tick;
        }
    }
    dealt
}
