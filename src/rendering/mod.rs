//! # Rendering Module
//!
//! Plain-text previews of generated levels, used by the command line tool and
//! handy when eyeballing layouts in tests.

pub mod ascii;

pub use ascii::*;
