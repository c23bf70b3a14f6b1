/// Which externally owned list an entity belongs to.
///
/// The renderer runs one entity pass per group in `ALL` order. Groups never
/// reorder drawing across depth buckets; they only decide insertion order
/// inside a bucket, so a player drawn in the same cell as an enemy lands on
/// top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum EntityGroup {
    /// Blood, debris and other decorations.
    Decals = 0,
    Enemies = 1,
    #[default]
    Player = 2,
    Projectiles = 3,
}

impl EntityGroup {
    /// Total number of groups.
    pub const COUNT: usize = 4;

    /// Pass order used by the renderer.
    pub const ALL: [EntityGroup; Self::COUNT] = [
        EntityGroup::Decals,
        EntityGroup::Enemies,
        EntityGroup::Player,
        EntityGroup::Projectiles,
    ];

    /// Convert from a u8 value to an EntityGroup.
    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Convert to u8 for protocol serialization.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
