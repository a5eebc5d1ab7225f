//! # Utilities Module
//!
//! Grid utilities shared by generation and runtime queries: distance math,
//! flood-fill region detection and breadth-first pathfinding.

pub mod math;
pub mod pathfinding;
pub mod regions;

pub use self::math::*;
pub use self::pathfinding::*;
pub use self::regions::*;
