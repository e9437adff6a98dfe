use strum::EnumCount;

use crate::env::Playback;

/// Discrete behavior label driving animation and logic for one tick.
///
/// The set is closed: [`State::from_index`] panics on anything outside it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumCount,
    strum::EnumIter,
    strum::FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
#[repr(u8)]
pub enum State {
    Idle,
    RunningStart,
    Running,
    RunningStop,
    Jumping,
    Falling,
    FallingGetup,
    Crouching,
    DodgingBackward,
    DodgingForward,
    Attacking,
    AttackingUnarmed,
    AttackingCrouch,
    AttackingForward,
    AttackingMidair,
    AttackingMidairDownward,
    AttackingUpward,
    Killed,
    Spellcast,
    /// Never derived. Stored as the current state to make the next
    /// derivation count as a transition.
    ForceUpdate,
}

impl State {
    /// Every attack variant, in declaration order.
    pub const ATTACKS: [State; 7] = [
        State::Attacking,
        State::AttackingUnarmed,
        State::AttackingCrouch,
        State::AttackingForward,
        State::AttackingMidair,
        State::AttackingMidairDownward,
        State::AttackingUpward,
    ];

    /// # Panics
    ///
    /// Panics if `index` does not name a state.
    pub fn from_index(index: u8) -> Self {
        match Self::from_repr(index) {
            Some(state) => state,
            None => panic!("state index {index} out of range (0..{})", Self::COUNT),
        }
    }

    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn is_attack(self) -> bool {
        matches!(
            self,
            State::Attacking
                | State::AttackingUnarmed
                | State::AttackingCrouch
                | State::AttackingForward
                | State::AttackingMidair
                | State::AttackingMidairDownward
                | State::AttackingUpward
        )
    }

    /// States a stop-running transition may replace.
    pub const fn is_locomotion(self) -> bool {
        matches!(self, State::Idle | State::Running | State::RunningStart)
    }

    pub const fn playback(self) -> Playback {
        match self {
            State::Idle | State::Running => Playback::Loop,
            _ => Playback::Once,
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn index_round_trips_every_state() {
        for state in State::iter() {
            assert_eq!(State::from_index(state.index()), state);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn from_index_rejects_unknown_index() {
        State::from_index(State::COUNT as u8);
    }

    #[test]
    fn attack_table_matches_predicate() {
        let attacks: Vec<_> = State::iter().filter(|s| s.is_attack()).collect();
        assert_eq!(attacks, State::ATTACKS);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(State::AttackingMidairDownward.to_string(), "attacking_midair_downward");
        assert_eq!("falling_getup".parse::<State>(), Ok(State::FallingGetup));
    }
}
