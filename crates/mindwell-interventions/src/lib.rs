//! mindwell-interventions
//!
//! Guided self-help exercises: the catalog shown on the exercise menu and
//! the deterministic phase-cycling clock behind timed breathing.
//!
//! The clock never schedules itself. Whoever owns it calls
//! [`clock::InterventionClock::tick`] once per second, which keeps the
//! logic independent of any timer mechanism and trivially testable.

pub mod catalog;
pub mod clock;
pub mod error;
pub mod schedule;
