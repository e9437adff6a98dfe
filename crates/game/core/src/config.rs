use crate::env::Vec2;
use crate::inventory::ItemKey;

/// Simulation constants and tunable parameters.
///
/// Velocities are in physics units per second, durations in simulation seconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Vertical velocity below which a character counts as falling.
    pub falling_velocity: f32,
    /// Horizontal speed above which a character counts as running.
    pub running_epsilon: f32,
    /// Horizontal speed separating "moving" from "stopped" for the stop-running override.
    pub stop_running_threshold: f32,
    /// Landing faster than this (downwards) forces a get-up animation.
    pub hard_landing_velocity: f32,

    pub jump_lock: f32,
    pub double_jump_delay: f32,
    pub jump_down_window: f32,
    pub taking_damage_duration: f32,
    /// Extra wind-up before NPC hits land.
    pub npc_hit_delay: f32,
    pub knockback: Vec2,

    pub dodge_damping: f32,
    pub dodge_rush_forward: f32,
    pub dodge_rush_backward: f32,
    pub dodge_lift: f32,

    /// Damage output jitter, applied as an inclusive `[-n, n]` range.
    pub damage_jitter: u32,
    pub regen_interval: f32,
    pub combo_window: f32,

    pub equip_sfx: String,
    pub gold_coin: ItemKey,
}

impl SimConfig {
    // ===== compile-time constants =====
    pub const MAX_LEVEL: u32 = 99;
    pub const DEFAULT_ANIMATION_DURATION: f32 = 0.1;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_FALLING_VELOCITY: f32 = -2.5;
    pub const DEFAULT_RUNNING_EPSILON: f32 = 0.01;
    pub const DEFAULT_HARD_LANDING_VELOCITY: f32 = -4.5;
    pub const DEFAULT_JUMP_LOCK: f32 = 0.2;
    pub const DEFAULT_DOUBLE_JUMP_DELAY: f32 = 0.25;
    pub const DEFAULT_JUMP_DOWN_WINDOW: f32 = 0.25;
    pub const DEFAULT_TAKING_DAMAGE_DURATION: f32 = 0.25;
    pub const DEFAULT_NPC_HIT_DELAY: f32 = 0.4;
    pub const DEFAULT_DAMAGE_JITTER: u32 = 5;
    pub const DEFAULT_REGEN_INTERVAL: f32 = 5.0;
    pub const DEFAULT_COMBO_WINDOW: f32 = 1.0;
    pub const DEFAULT_EQUIP_SFX: &'static str = "sfx/equip_unequip_item.wav";
    pub const DEFAULT_GOLD_COIN: &'static str = "gold_coin";

    pub fn new() -> Self {
        Self {
            falling_velocity: Self::DEFAULT_FALLING_VELOCITY,
            running_epsilon: Self::DEFAULT_RUNNING_EPSILON,
            stop_running_threshold: Self::DEFAULT_RUNNING_EPSILON,
            hard_landing_velocity: Self::DEFAULT_HARD_LANDING_VELOCITY,
            jump_lock: Self::DEFAULT_JUMP_LOCK,
            double_jump_delay: Self::DEFAULT_DOUBLE_JUMP_DELAY,
            jump_down_window: Self::DEFAULT_JUMP_DOWN_WINDOW,
            taking_damage_duration: Self::DEFAULT_TAKING_DAMAGE_DURATION,
            npc_hit_delay: Self::DEFAULT_NPC_HIT_DELAY,
            knockback: Vec2::new(0.5, 1.0),
            dodge_damping: 4.0,
            dodge_rush_forward: 7.0,
            dodge_rush_backward: -5.0,
            dodge_lift: 0.6,
            damage_jitter: Self::DEFAULT_DAMAGE_JITTER,
            regen_interval: Self::DEFAULT_REGEN_INTERVAL,
            combo_window: Self::DEFAULT_COMBO_WINDOW,
            equip_sfx: Self::DEFAULT_EQUIP_SFX.to_owned(),
            gold_coin: ItemKey::from(Self::DEFAULT_GOLD_COIN),
        }
    }

    /// Disables damage jitter, making `damage_output` a pure function of the
    /// profile and equipment.
    pub fn without_jitter(mut self) -> Self {
        self.damage_jitter = 0;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}
