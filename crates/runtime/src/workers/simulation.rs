//! Simulation worker that owns the authoritative [`arpg_core::World`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them to the world
//! between ticks, and publishes lifecycle notifications. Presentation and
//! audio side effects reach the bus through the adapters as they happen.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use arpg_content::ContentLibrary;
use arpg_core::{
    CharacterId, ContentOracle, InventoryError, PartyId, Physics, Role, SimEnv, TeardownReport,
    TickReport, Vec2, World,
};

use crate::adapters::{EventAudio, EventPresentation, KinematicBodies, KinematicBody};
use crate::api::{CharacterSnapshot, Intent, Result, RuntimeError};
use crate::events::{Event, EventBus, LifecycleEvent};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Spawn a character from a named content profile.
    Spawn {
        profile: String,
        role: Role,
        reply: oneshot::Sender<Result<CharacterId>>,
    },
    Despawn {
        character: CharacterId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Advance the simulation by `delta` seconds.
    Tick {
        delta: f32,
        reply: oneshot::Sender<TickReport>,
    },
    Intent {
        character: CharacterId,
        intent: Intent,
        reply: oneshot::Sender<Result<()>>,
    },
    SetVelocity {
        character: CharacterId,
        velocity: Vec2,
        reply: oneshot::Sender<Result<()>>,
    },
    AddExp {
        character: CharacterId,
        amount: u32,
        reply: oneshot::Sender<Result<u32>>,
    },
    CreateParty {
        leader: CharacterId,
        reply: oneshot::Sender<Result<PartyId>>,
    },
    JoinParty {
        party: PartyId,
        member: CharacterId,
        reply: oneshot::Sender<Result<()>>,
    },
    LeaveParty {
        member: CharacterId,
        reply: oneshot::Sender<Result<PartyId>>,
    },
    Query {
        character: CharacterId,
        reply: oneshot::Sender<Option<CharacterSnapshot>>,
    },
    QueryAll {
        reply: oneshot::Sender<Vec<CharacterSnapshot>>,
    },
    Body {
        character: CharacterId,
        reply: oneshot::Sender<Option<KinematicBody>>,
    },
    Teardown {
        reply: oneshot::Sender<Result<TeardownReport>>,
    },
    ReplaceContent {
        content: Arc<ContentLibrary>,
        reply: oneshot::Sender<()>,
    },
}

/// Collaborators handed to the world as a [`SimEnv`].
struct Collaborators {
    bodies: KinematicBodies,
    presentation: EventPresentation,
    audio: EventAudio,
}

impl Collaborators {
    fn env(&mut self) -> SimEnv<'_> {
        SimEnv::new(&mut self.bodies, &mut self.presentation, &mut self.audio)
    }
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    world: World,
    content: Arc<ContentLibrary>,
    collaborators: Collaborators,
    event_bus: EventBus,
    command_rx: mpsc::Receiver<Command>,
    ticks: u64,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        world: World,
        content: Arc<ContentLibrary>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            world,
            content,
            collaborators: Collaborators {
                bodies: KinematicBodies::new(),
                presentation: EventPresentation::new(event_bus.clone()),
                audio: EventAudio::new(event_bus.clone()),
            },
            event_bus,
            command_rx,
            ticks: 0,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                else => break,
            }
        }
        info!(ticks = self.ticks, "simulation worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Spawn {
                profile,
                role,
                reply,
            } => {
                let _ = reply.send(self.spawn(profile, role));
            }
            Command::Despawn { character, reply } => {
                let _ = reply.send(self.despawn(character));
            }
            Command::Tick { delta, reply } => {
                let _ = reply.send(self.tick(delta));
            }
            Command::Intent {
                character,
                intent,
                reply,
            } => {
                let result = self.apply_intent(character, intent);
                if let Err(error) = &result {
                    debug!(%character, %error, "intent rejected");
                }
                let _ = reply.send(result);
            }
            Command::SetVelocity {
                character,
                velocity,
                reply,
            } => {
                let _ = reply.send(self.set_velocity(character, velocity));
            }
            Command::AddExp {
                character,
                amount,
                reply,
            } => {
                let result = self
                    .world
                    .add_exp(character, amount)
                    .map_err(RuntimeError::rejected);
                let _ = reply.send(result);
            }
            Command::CreateParty { leader, reply } => {
                let result = self
                    .world
                    .create_party(leader)
                    .map_err(RuntimeError::rejected);
                let _ = reply.send(result);
            }
            Command::JoinParty {
                party,
                member,
                reply,
            } => {
                let result = self
                    .world
                    .join_party(party, member)
                    .map_err(RuntimeError::rejected);
                let _ = reply.send(result);
            }
            Command::LeaveParty { member, reply } => {
                let result = self
                    .world
                    .leave_party(member)
                    .map_err(RuntimeError::rejected);
                let _ = reply.send(result);
            }
            Command::Query { character, reply } => {
                let snapshot = self.world.character(character).map(CharacterSnapshot::from);
                let _ = reply.send(snapshot);
            }
            Command::QueryAll { reply } => {
                let snapshots = self.world.characters().map(CharacterSnapshot::from).collect();
                let _ = reply.send(snapshots);
            }
            Command::Body { character, reply } => {
                let body = self
                    .world
                    .character(character)
                    .and_then(|character| character.body())
                    .and_then(|handle| self.collaborators.bodies.body(handle))
                    .cloned();
                let _ = reply.send(body);
            }
            Command::Teardown { reply } => {
                let _ = reply.send(self.teardown());
            }
            Command::ReplaceContent { content, reply } => {
                self.content = content;
                info!("content library replaced");
                let _ = reply.send(());
            }
        }
    }

    fn publish(&self, event: LifecycleEvent) {
        self.event_bus.publish(Event::Lifecycle(event));
    }

    fn spawn(&mut self, profile_name: String, role: Role) -> Result<CharacterId> {
        let profile = self
            .content
            .character(&profile_name)
            .ok_or_else(|| RuntimeError::UnknownProfile(profile_name.clone()))?;

        let body = self.collaborators.bodies.create_body();
        match self
            .world
            .spawn(profile, role, Some(body), self.content.as_ref())
        {
            Ok(character) => {
                self.publish(LifecycleEvent::Spawned {
                    character,
                    name: profile_name,
                    role,
                });
                Ok(character)
            }
            Err(error) => {
                self.collaborators.bodies.destroy_body(body);
                Err(RuntimeError::rejected(error))
            }
        }
    }

    fn despawn(&mut self, character: CharacterId) -> Result<()> {
        self.world
            .despawn(character, &mut self.collaborators.env())
            .map_err(RuntimeError::rejected)?;
        self.publish(LifecycleEvent::Despawned { character });
        Ok(())
    }

    fn tick(&mut self, delta: f32) -> TickReport {
        let report = self.world.tick(delta, &mut self.collaborators.env());
        self.collaborators.bodies.step(delta);
        self.ticks += 1;

        self.publish(LifecycleEvent::Ticked {
            tick: self.ticks,
            fired: report.fired,
            transitions: report.transitions,
        });
        report
    }

    fn set_velocity(&mut self, character: CharacterId, velocity: Vec2) -> Result<()> {
        let body = self
            .world
            .character(character)
            .ok_or(RuntimeError::UnknownCharacter(character))?
            .body();
        if let Some(body) = body {
            self.collaborators.bodies.set_linear_velocity(body, velocity);
        }
        Ok(())
    }

    fn teardown(&mut self) -> Result<TeardownReport> {
        let report = self
            .world
            .teardown(&mut self.collaborators.env())
            .map_err(RuntimeError::rejected)?;
        self.publish(LifecycleEvent::TornDown {
            removed: report.removed.clone(),
            dismissed: report.dismissed.clone(),
        });
        Ok(report)
    }

    fn apply_intent(&mut self, id: CharacterId, intent: Intent) -> Result<()> {
        let world = &mut self.world;
        let mut env = self.collaborators.env();

        match intent {
            Intent::MoveLeft => world.move_left(id, &mut env).map_err(RuntimeError::rejected),
            Intent::MoveRight => world.move_right(id, &mut env).map_err(RuntimeError::rejected),
            Intent::Jump => world.jump(id, &mut env).map_err(RuntimeError::rejected),
            Intent::DoubleJump => world.double_jump(id, &mut env).map_err(RuntimeError::rejected),
            Intent::JumpDown => world.jump_down(id, &mut env).map_err(RuntimeError::rejected),
            Intent::Crouch => world.crouch(id, &mut env).map_err(RuntimeError::rejected),
            Intent::GetUp => world
                .get_up_from_crouching(id, &mut env)
                .map_err(RuntimeError::rejected),
            Intent::Land { on_platform } => world
                .land(id, on_platform, &mut env)
                .map_err(RuntimeError::rejected),
            Intent::Attack {
                kind,
                hits,
                interval,
            } => world
                .attack(id, kind, hits, interval)
                .map_err(RuntimeError::rejected),
            Intent::DodgeForward => world
                .dodge_forward(id, &mut env)
                .map_err(RuntimeError::rejected),
            Intent::DodgeBackward => world
                .dodge_backward(id, &mut env)
                .map_err(RuntimeError::rejected),
            Intent::ActivateSkill { name } => world
                .activate_skill(id, &name, &mut env)
                .map(|_| ())
                .map_err(RuntimeError::rejected),
            Intent::UseItem { item } => world
                .use_item(id, &item, &mut env)
                .map_err(RuntimeError::rejected),
            Intent::Equip { item } => world
                .equip(id, &item, &mut env)
                .map(|_| ())
                .map_err(RuntimeError::rejected),
            Intent::Unequip { slot } => world
                .unequip(id, slot, &mut env)
                .map(|_| ())
                .map_err(RuntimeError::rejected),
            Intent::PickUp { item, amount } => {
                let definition = self
                    .content
                    .item(&item)
                    .ok_or_else(|| RuntimeError::rejected(InventoryError::UnknownItem(item)))?;
                world
                    .pickup_item(id, definition, amount)
                    .map(|_| ())
                    .map_err(RuntimeError::rejected)
            }
            Intent::EnterRange { target } => world
                .enter_range(id, target)
                .map_err(RuntimeError::rejected),
            Intent::LeaveRange { target } => world
                .leave_range(id, target)
                .map_err(RuntimeError::rejected),
        }
    }
}
