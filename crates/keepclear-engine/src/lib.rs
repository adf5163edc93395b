//! keepclear engine
//!
//! Keeps application windows out of a reserved strip on the right edge of one
//! named display. Every tick it:
//! - enumerates displays and picks the target by name ([`resolve_target`]),
//! - enumerates on-screen windows with tick-scoped handles,
//! - classifies each against the [`MarginPolicy`],
//! - moves and resizes offenders, then releases every handle.
//!
//! [`Placer::tick`] runs one pass; [`Placer::run`] repeats it on a fixed
//! period until cancelled. Platform access goes through
//! [`mac_winops::ops::WinOps`], so the whole loop runs against
//! [`mac_winops::ops::MockWinOps`] in tests.

mod control;
mod error;
mod placement;
mod resolve;
mod startup;
mod tick;

pub use error::{Error, Result};
pub use placement::{Decision, MarginPolicy, Placement};
pub use resolve::resolve_target;
pub use startup::ensure_accessibility;
pub use tick::{Placer, TickReport};
