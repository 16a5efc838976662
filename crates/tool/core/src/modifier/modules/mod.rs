//! Built-in modifier modules.
//!
//! | module                | hook           |
//! |-----------------------|----------------|
//! | [`StatBoostModule`]   | `tool_stats`   |
//! | [`SetStatModule`]     | `tool_stats`   |
//! | [`TierCapModule`]     | `harvest_tier` |
//! | [`TierBoostModule`]   | `harvest_tier` |
//! | [`ToolActionModule`]  | `tool_action`  |
//! | [`VolatileFlagModule`]| `volatile_data`|
//! | [`ReinforcedModule`]  | `tool_damage`  |
//! | [`SharpnessModule`]   | `melee_damage` |
//! | [`TankModule`]        | `capacity`     |
//! | [`InteractionModule`] | `interaction` (+ `tool_action` on request) |

mod action;
mod capacity;
mod durability;
mod interaction;
mod melee;
mod stat_boost;
mod tier;
mod volatile;

pub use action::ToolActionModule;
pub use capacity::TankModule;
pub use durability::ReinforcedModule;
pub use interaction::InteractionModule;
pub use melee::SharpnessModule;
pub use stat_boost::{BoostOp, SetStatModule, StatBoost, StatBoostModule};
pub use tier::{TierBoostModule, TierCapModule};
pub use volatile::VolatileFlagModule;
