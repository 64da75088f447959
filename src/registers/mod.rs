//! Register definitions for the CC1101 radio
//! Generated from the SWRS061 datasheet

mod map;
mod modem;
mod status;
mod tx;

pub use map::*;
pub use modem::*;
pub use status::*;
pub use tx::*;
