use bitflags::bitflags;

bitflags! {
    /// Transient per-character condition flags.
    ///
    /// The action state is derived from these every tick; deferred callbacks
    /// clear most of them after the matching animation has played.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionFlags: u32 {
        const FACING_RIGHT     = 1 << 0;
        const CROUCHING        = 1 << 1;
        const JUMPING          = 1 << 2;
        const DOUBLE_JUMPING   = 1 << 3;
        const ON_PLATFORM      = 1 << 4;
        const DODGING_FORWARD  = 1 << 5;
        const DODGING_BACKWARD = 1 << 6;
        const ATTACKING        = 1 << 7;
        const USING_SKILL      = 1 << 8;
        /// Incoming damage is ignored (dodge frames).
        const INVINCIBLE       = 1 << 9;
        const TAKING_DAMAGE    = 1 << 10;
        const ALERTED          = 1 << 11;
        /// Health reached zero; the next tick derives `Killed`.
        const SET_TO_KILL      = 1 << 12;
        /// The killed animation finished and the body is gone.
        const KILLED           = 1 << 13;
        const GETTING_UP       = 1 << 14;
        const START_RUNNING    = 1 << 15;
        const STOP_RUNNING     = 1 << 16;
        const JUMP_LOCKED      = 1 << 17;

        const DODGING = Self::DODGING_FORWARD.bits() | Self::DODGING_BACKWARD.bits();
        const DYING = Self::SET_TO_KILL.bits() | Self::KILLED.bits();
    }
}

impl ActionFlags {
    #[inline]
    pub fn is_dodging(self) -> bool {
        self.intersects(Self::DODGING)
    }

    /// Set to kill or already killed.
    #[inline]
    pub fn is_dying(self) -> bool {
        self.intersects(Self::DYING)
    }

    #[inline]
    pub fn facing_right(self) -> bool {
        self.contains(Self::FACING_RIGHT)
    }
}
