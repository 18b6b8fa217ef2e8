//! Read-only collaborators of the rules.
//!
//! The [`Env`] aggregate bundles configuration, class data and the random
//! source so resolvers can reach them without depending on concrete
//! implementations.
mod classes;
mod rng;

pub use classes::{
    AbilityKit, ClassOracle, ClassProfile, GroupAbility, Reach, SelfBuff, SingleAbility,
    StandardClasses,
};
pub use rng::{Dice, FixedRng, PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;
use crate::state::GameState;

pub struct Env<'a, C, R>
where
    C: ClassOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    config: &'a GameConfig,
    classes: &'a C,
    rng: &'a R,
}

impl<C, R> Clone for Env<'_, C, R>
where
    C: ClassOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, R> Copy for Env<'_, C, R>
where
    C: ClassOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<'a, dyn ClassOracle + 'a, dyn RngOracle + 'a>;

impl<'a, C, R> Env<'a, C, R>
where
    C: ClassOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(config: &'a GameConfig, classes: &'a C, rng: &'a R) -> Self {
        Self {
            config,
            classes,
            rng,
        }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn classes(&self) -> &'a C {
        self.classes
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }
}

impl<'a> GameEnv<'a> {
    /// Upcasts concrete collaborators into the dynamic environment.
    pub fn with_all(
        config: &'a GameConfig,
        classes: &'a (dyn ClassOracle + 'a),
        rng: &'a (dyn RngOracle + 'a),
    ) -> Self {
        Self::new(config, classes, rng)
    }

    /// Dice for the next action of `actor`, keyed on the current nonce.
    pub fn dice_for(&self, state: &GameState, actor: crate::state::UnitId) -> Dice<'a> {
        Dice::new(self.rng, state.game_seed, state.turn.nonce, actor.0)
    }
}
