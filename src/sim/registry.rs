//! Entity registry: deferred mutation of balls and blocks
//!
//! The physics pass iterates these collections while producing destruction
//! and spawn events for the very same collections. Two rules keep that
//! safe and fair:
//!
//! - Block destruction marks the slot dead immediately (later balls in the
//!   same tick cannot hit it) but the slot is only compacted at tick end,
//!   so the scan order other balls see never shifts mid-tick.
//! - Ball insertions and removals queue until every ball has been stepped,
//!   then apply in one batch.

use glam::Vec2;

use super::collision::Rect;
use super::state::{Ball, Block};
use crate::consts::*;

/// Owns the authoritative ball and block sets
#[derive(Debug, Default)]
pub struct Registry {
    pub balls: Vec<Ball>,
    pub blocks: Vec<Block>,
    next_id: u32,
    pending_spawns: Vec<Ball>,
    pending_losses: Vec<u32>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Self::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Immediately add a ball (game reset)
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.balls.push(Ball { id, pos, vel });
        id
    }

    /// Queue a bonus ball dropping from a destroyed block's center;
    /// applied after the current tick's ball pass.
    pub fn queue_bonus_ball(&mut self, center: Vec2) {
        let id = self.next_entity_id();
        self.pending_spawns.push(Ball {
            id,
            pos: center,
            vel: Vec2::new(BONUS_BALL_VEL.0, BONUS_BALL_VEL.1),
        });
    }

    /// Queue removal of a ball that exited the bottom edge
    pub fn queue_ball_loss(&mut self, id: u32) {
        self.pending_losses.push(id);
    }

    /// Apply queued ball changes and drop dead block slots. Call exactly
    /// once per tick, after the physics pass.
    pub fn end_tick(&mut self) {
        if !self.pending_losses.is_empty() {
            let lost = std::mem::take(&mut self.pending_losses);
            self.balls.retain(|b| !lost.contains(&b.id));
        }
        self.balls.append(&mut self.pending_spawns);
        self.blocks.retain(|b| b.alive);
    }

    /// Rebuild the block grid and clear all balls and queues
    pub fn reset(&mut self, rows: u32, cols: u32) {
        self.balls.clear();
        self.pending_spawns.clear();
        self.pending_losses.clear();
        self.build_grid(rows, cols);
    }

    fn build_grid(&mut self, rows: u32, cols: u32) {
        self.blocks.clear();
        for row in 0..rows {
            for col in 0..cols {
                let x = col as f32 * (BLOCK_WIDTH + BLOCK_PADDING) + BLOCK_PADDING;
                let y = row as f32 * (BLOCK_HEIGHT + BLOCK_PADDING) + BLOCK_TOP_OFFSET;
                let id = self.next_entity_id();
                self.blocks.push(Block {
                    id,
                    rect: Rect::new(x, y, BLOCK_WIDTH, BLOCK_HEIGHT),
                    color: (row % 4) as u8,
                    alive: true,
                });
            }
        }
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn live_block_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.alive).count()
    }

    /// Blocks the render collaborator should draw
    pub fn live_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter().filter(|b| b.alive)
    }
}
