//! Combat resolution.
//!
//! Pure functions over unit stats. Actions decide who may attack whom; this
//! module only turns an attacker, a defender and a set of dice into damage.
//!
//! # Pipeline
//!
//! 1. accuracy draw (miss ends the attack)
//! 2. evasion draw (evade ends the attack)
//! 3. base damage against defense
//! 4. weakness and resistance multipliers
//! 5. critical draw
//! 6. floor and apply, clamped at zero health
//!
//! Area abilities skip the two avoidance draws and start at step 3.

pub mod damage;
pub mod hit;
pub mod result;

pub use damage::{Hundredths, apply_affinity, apply_critical, base_damage};
pub use hit::{check_critical, check_evasion, check_hit};
pub use result::{AttackOutcome, AttackResult, Strike, resolve_impact, resolve_strike};
