//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation, sending intents, or streaming events from
//! specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use arpg_content::ContentLibrary;
use arpg_core::{
    CharacterId, PartyId, PendingGauge, Role, SuspendFlag, TeardownReport, TickReport, Vec2,
};

use super::errors::{Result, RuntimeError};
use super::{CharacterSnapshot, Intent};
use crate::adapters::KinematicBody;
use crate::events::{Event, EventBus, Topic};
use crate::reload::{ReloadSettings, WorldReloader};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    suspend: SuspendFlag,
    gauge: PendingGauge,
    reload: ReloadSettings,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        suspend: SuspendFlag,
        gauge: PendingGauge,
        reload: ReloadSettings,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            suspend,
            gauge,
            reload,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Spawns a character from the named content profile with a fresh body.
    pub async fn spawn(&self, profile: impl Into<String>, role: Role) -> Result<CharacterId> {
        let profile = profile.into();
        self.request(|reply| Command::Spawn {
            profile,
            role,
            reply,
        })
        .await?
    }

    pub async fn despawn(&self, character: CharacterId) -> Result<()> {
        self.request(|reply| Command::Despawn { character, reply })
            .await?
    }

    /// Advances the simulation by `delta` seconds.
    pub async fn tick(&self, delta: f32) -> Result<TickReport> {
        self.request(|reply| Command::Tick { delta, reply }).await
    }

    /// Applies a controller intent to one character.
    pub async fn intent(&self, character: CharacterId, intent: Intent) -> Result<()> {
        self.request(|reply| Command::Intent {
            character,
            intent,
            reply,
        })
        .await?
    }

    /// Overrides a body's velocity, as a host physics step would.
    pub async fn set_velocity(&self, character: CharacterId, velocity: Vec2) -> Result<()> {
        self.request(|reply| Command::SetVelocity {
            character,
            velocity,
            reply,
        })
        .await?
    }

    pub async fn add_exp(&self, character: CharacterId, amount: u32) -> Result<u32> {
        self.request(|reply| Command::AddExp {
            character,
            amount,
            reply,
        })
        .await?
    }

    pub async fn create_party(&self, leader: CharacterId) -> Result<PartyId> {
        self.request(|reply| Command::CreateParty { leader, reply })
            .await?
    }

    pub async fn join_party(&self, party: PartyId, member: CharacterId) -> Result<()> {
        self.request(|reply| Command::JoinParty {
            party,
            member,
            reply,
        })
        .await?
    }

    pub async fn leave_party(&self, member: CharacterId) -> Result<PartyId> {
        self.request(|reply| Command::LeaveParty { member, reply })
            .await?
    }

    /// Query one character (read-only snapshot)
    pub async fn character(&self, character: CharacterId) -> Result<Option<CharacterSnapshot>> {
        self.request(|reply| Command::Query { character, reply })
            .await
    }

    /// Query every registered character in id order
    pub async fn characters(&self) -> Result<Vec<CharacterSnapshot>> {
        self.request(|reply| Command::QueryAll { reply }).await
    }

    /// Query the kinematic body backing a character
    pub async fn body(&self, character: CharacterId) -> Result<Option<KinematicBody>> {
        self.request(|reply| Command::Body { character, reply })
            .await
    }

    /// Clears the map-local population. Fails while callbacks are pending.
    pub async fn teardown(&self) -> Result<TeardownReport> {
        self.request(|reply| Command::Teardown { reply }).await?
    }

    /// Replaces the content library used for later spawns and pickups.
    pub async fn replace_content(&self, content: ContentLibrary) -> Result<()> {
        let content = Arc::new(content);
        self.request(|reply| Command::ReplaceContent { content, reply })
            .await
    }

    /// Reload coordinator bound to this runtime.
    pub fn reloader(&self) -> WorldReloader {
        WorldReloader::new(self.clone(), self.reload)
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Presentation` - Animations, damage numbers, HUD refreshes
    /// - `Topic::Audio` - Sound effects
    /// - `Topic::Lifecycle` - Spawns, ticks, suspension and teardown
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use arpg_runtime::Topic;
    ///
    /// let mut audio_rx = handle.subscribe(Topic::Audio);
    /// while let Ok(event) = audio_rx.recv().await {
    ///     // Play the sound
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn suspend_flag(&self) -> &SuspendFlag {
        &self.suspend
    }

    pub fn pending_gauge(&self) -> &PendingGauge {
        &self.gauge
    }
}
