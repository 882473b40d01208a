//! Playback State Machine
//!
//! A flat state machine for typewriter playback. Transitions are a fixed
//! table of `(from, command) -> to`; commands with no matching row are
//! rejected and leave the state unchanged.

use std::fmt;

/// Playback states
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaybackState {
    /// Built but never played.
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
    Finished,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
            PlaybackState::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// Commands that drive playback transitions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaybackCommand {
    Play,
    Pause,
    Stop,
    /// The last pass completed.
    Finish,
    /// Hard reset from `initialize()`.
    Reset,
}

/// A transition taken by the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: PlaybackState,
    pub command: PlaybackCommand,
    pub to: PlaybackState,
}

use PlaybackCommand as C;
use PlaybackState as S;

const TRANSITIONS: &[(PlaybackState, PlaybackCommand, PlaybackState)] = &[
    (S::Idle, C::Play, S::Playing),
    (S::Paused, C::Play, S::Playing),
    (S::Stopped, C::Play, S::Playing),
    (S::Finished, C::Play, S::Playing),
    (S::Playing, C::Pause, S::Paused),
    (S::Playing, C::Stop, S::Stopped),
    (S::Playing, C::Finish, S::Finished),
    (S::Idle, C::Reset, S::Idle),
    (S::Playing, C::Reset, S::Idle),
    (S::Paused, C::Reset, S::Idle),
    (S::Stopped, C::Reset, S::Idle),
    (S::Finished, C::Reset, S::Idle),
];

/// The playback state machine instance
#[derive(Clone, Debug, Default)]
pub struct PlaybackMachine {
    state: PlaybackState,
    last_transition: Option<Transition>,
}

impl PlaybackMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: PlaybackState) -> bool {
        self.state == state
    }

    /// The most recent transition, if any
    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    /// Check if a command would trigger a transition from the current state
    pub fn can_send(&self, command: PlaybackCommand) -> bool {
        self.target(command).is_some()
    }

    /// Send a command, returning the transition taken
    pub fn send(&mut self, command: PlaybackCommand) -> Option<Transition> {
        let to = self.target(command)?;
        let transition = Transition {
            from: self.state,
            command,
            to,
        };
        tracing::trace!(from = %transition.from, to = %transition.to, ?command, "playback transition");
        self.state = to;
        self.last_transition = Some(transition);
        Some(transition)
    }

    fn target(&self, command: PlaybackCommand) -> Option<PlaybackState> {
        TRANSITIONS
            .iter()
            .find(|(from, cmd, _)| *from == self.state && *cmd == command)
            .map(|(_, _, to)| *to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let machine = PlaybackMachine::new();
        assert!(machine.is_in(PlaybackState::Idle));
        assert_eq!(machine.last_transition(), None);
    }

    #[test]
    fn test_play_pause_resume_finish() {
        let mut machine = PlaybackMachine::new();
        assert!(machine.send(PlaybackCommand::Play).is_some());
        assert!(machine.send(PlaybackCommand::Pause).is_some());
        assert_eq!(machine.state(), PlaybackState::Paused);

        let resumed = machine.send(PlaybackCommand::Play).unwrap();
        assert_eq!(resumed.from, PlaybackState::Paused);
        assert_eq!(resumed.to, PlaybackState::Playing);

        machine.send(PlaybackCommand::Finish);
        assert_eq!(machine.state(), PlaybackState::Finished);
    }

    #[test]
    fn test_rejected_commands_keep_state() {
        let mut machine = PlaybackMachine::new();
        assert!(!machine.can_send(PlaybackCommand::Pause));
        assert!(!machine.can_send(PlaybackCommand::Stop));
        assert_eq!(machine.send(PlaybackCommand::Stop), None);
        assert_eq!(machine.state(), PlaybackState::Idle);

        machine.send(PlaybackCommand::Play);
        assert_eq!(machine.send(PlaybackCommand::Play), None);

        machine.send(PlaybackCommand::Pause);
        assert!(!machine.can_send(PlaybackCommand::Stop));
    }

    #[test]
    fn test_reset_from_any_state() {
        for command in [
            PlaybackCommand::Pause,
            PlaybackCommand::Stop,
            PlaybackCommand::Finish,
        ] {
            let mut machine = PlaybackMachine::new();
            machine.send(PlaybackCommand::Play);
            machine.send(command);
            assert_eq!(machine.send(PlaybackCommand::Reset).unwrap().to, PlaybackState::Idle);
        }
    }
}
