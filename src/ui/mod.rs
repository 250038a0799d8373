//! Drawing for the Tower ATC display.
//!
//! Scene backgrounds (runways, taxiways, range rings) and aircraft data blocks.

pub mod data_block;
pub mod scene;
