//! Collision predicates
//!
//! Both tests are pure and run once per live entity per tick against the
//! single player; entity counts are small enough that a linear scan is fine.

use glam::Vec2;

use super::state::{Coin, Obstacle, Player};
use crate::consts::COIN_PICKUP_MARGIN;

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_corner(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not intersect
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }
}

/// True if the player box and the obstacle box overlap
pub fn obstacle_hits(player: &Player, obstacle: &Obstacle) -> bool {
    player.bounds().overlaps(&obstacle.bounds())
}

/// True if the coin center is within `radius + COIN_PICKUP_MARGIN` of the
/// player's box center
pub fn coin_hits(player: &Player, coin: &Coin) -> bool {
    coin.pos.distance(player.center()) < coin.radius + COIN_PICKUP_MARGIN
}
