use super::descriptor::{StatDescriptor, StatRange};
use super::{StatError, StatRegistry};
use crate::id::Identifier;

/// Descriptors for the stats every tool carries.
///
/// Numeric stats default to zero so a tool with no parts and no modifiers
/// reports exactly what its definition and materials contribute.
#[derive(Clone, Debug)]
pub struct ToolStats {
    pub durability: StatDescriptor<f32>,
    pub mining_speed: StatDescriptor<f32>,
    pub attack_damage: StatDescriptor<f32>,
    pub attack_speed: StatDescriptor<f32>,
    pub harvest_tier: StatDescriptor<u32>,
    pub unbreakable: StatDescriptor<bool>,
    pub repair_kind: StatDescriptor<Identifier>,
}

impl ToolStats {
    pub const DURABILITY: Identifier = Identifier::from_static("tool", "durability");
    pub const MINING_SPEED: Identifier = Identifier::from_static("tool", "mining_speed");
    pub const ATTACK_DAMAGE: Identifier = Identifier::from_static("tool", "attack_damage");
    pub const ATTACK_SPEED: Identifier = Identifier::from_static("tool", "attack_speed");
    pub const HARVEST_TIER: Identifier = Identifier::from_static("tool", "harvest_tier");
    pub const UNBREAKABLE: Identifier = Identifier::from_static("tool", "unbreakable");
    pub const REPAIR_KIND: Identifier = Identifier::from_static("tool", "repair_kind");

    /// Repair kind of tools nothing can repair.
    pub const NO_REPAIR: Identifier = Identifier::from_static("tool", "none");

    pub const MAX_DURABILITY: f32 = 1_000_000_000.0;
    pub const MAX_MINING_SPEED: f32 = 1024.0;
    pub const MAX_ATTACK_DAMAGE: f32 = 2048.0;
    pub const MAX_ATTACK_SPEED: f32 = 1024.0;

    pub fn register(registry: &mut StatRegistry) -> Result<Self, StatError> {
        Ok(Self {
            durability: registry.register_numeric(
                Self::DURABILITY,
                0.0,
                StatRange::new(0.0, Self::MAX_DURABILITY),
            )?,
            mining_speed: registry.register_numeric(
                Self::MINING_SPEED,
                0.0,
                StatRange::new(0.0, Self::MAX_MINING_SPEED),
            )?,
            attack_damage: registry.register_numeric(
                Self::ATTACK_DAMAGE,
                0.0,
                StatRange::new(0.0, Self::MAX_ATTACK_DAMAGE),
            )?,
            attack_speed: registry.register_numeric(
                Self::ATTACK_SPEED,
                0.0,
                StatRange::new(0.0, Self::MAX_ATTACK_SPEED),
            )?,
            harvest_tier: registry.register_tier(Self::HARVEST_TIER, 0)?,
            unbreakable: registry.register_flag(Self::UNBREAKABLE, false)?,
            repair_kind: registry.register_choice(Self::REPAIR_KIND, Self::NO_REPAIR)?,
        })
    }

    /// Looks up a numeric tool stat by identifier.
    pub fn numeric(&self, id: &Identifier) -> Option<&StatDescriptor<f32>> {
        [
            &self.durability,
            &self.mining_speed,
            &self.attack_damage,
            &self.attack_speed,
        ]
        .into_iter()
        .find(|stat| stat.id() == id)
    }
}
