//! Percent-chance draws.

use crate::env::Dice;

/// Attacker accuracy draw. `true` means the attack connects.
pub fn check_hit(accuracy: u8, dice: &mut Dice<'_>) -> bool {
    dice.chance(accuracy)
}

/// Defender evasion draw. `true` means the attack is dodged.
pub fn check_evasion(evasion: u8, dice: &mut Dice<'_>) -> bool {
    dice.chance(evasion)
}

pub fn check_critical(crit_chance: u8, dice: &mut Dice<'_>) -> bool {
    dice.chance(crit_chance)
}
