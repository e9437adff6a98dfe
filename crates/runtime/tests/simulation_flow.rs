use std::time::Duration;

use arpg_core::{EquipmentSlot, Role, State};
use arpg_runtime::{
    AudioEvent, Event, Intent, LifecycleEvent, PresentationEvent, Runtime, RuntimeError,
    RuntimeHandle, Topic,
};
use tokio::sync::broadcast;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../game/content/data");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

async fn start() -> (Runtime, RuntimeHandle) {
    init_tracing();
    let runtime = Runtime::builder()
        .data_dir(DATA_DIR)
        .build()
        .await
        .expect("runtime should start from bundled content");
    let handle = runtime.handle();
    (runtime, handle)
}

/// Waits for the first event accepted by `pick`, skipping everything else.
async fn next_matching<T>(
    rx: &mut broadcast::Receiver<Event>,
    mut pick: impl FnMut(Event) -> Option<T>,
) -> T {
    tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            let event = rx.recv().await.expect("event bus closed");
            if let Some(found) = pick(event) {
                return found;
            }
        }
    })
    .await
    .expect("expected event was not published")
}

#[tokio::test]
async fn spawn_publishes_lifecycle_and_grants_defaults() {
    let (runtime, handle) = start().await;
    let mut lifecycle = handle.subscribe(Topic::Lifecycle);

    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();

    let (character, name) = next_matching(&mut lifecycle, |event| match event {
        Event::Lifecycle(LifecycleEvent::Spawned { character, name, .. }) => {
            Some((character, name))
        }
        _ => None,
    })
    .await;
    assert_eq!(character, hero);
    assert_eq!(name, "vigilante");

    let snapshot = handle.character(hero).await.unwrap().unwrap();
    assert_eq!(snapshot.role, Role::Player);
    assert_eq!(snapshot.state, State::ForceUpdate);
    assert!(snapshot.body.is_some());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_profile_is_reported() {
    let (_runtime, handle) = start().await;

    let error = handle.spawn("dragon", Role::Npc).await.unwrap_err();
    assert!(matches!(error, RuntimeError::UnknownProfile(name) if name == "dragon"));
    assert!(handle.characters().await.unwrap().is_empty());
}

#[tokio::test]
async fn intents_for_missing_characters_are_rejected_with_core_codes() {
    let (_runtime, handle) = start().await;
    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();
    handle.despawn(hero).await.unwrap();

    match handle.intent(hero, Intent::Jump).await.unwrap_err() {
        RuntimeError::Rejected { code, .. } => assert_eq!(code, "MOVEMENT_UNKNOWN_CHARACTER"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn walking_pushes_the_body() {
    let (_runtime, handle) = start().await;
    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();

    handle.intent(hero, Intent::MoveRight).await.unwrap();

    let body = handle.body(hero).await.unwrap().unwrap();
    assert!(body.velocity.x > 0.0);
}

#[tokio::test]
async fn basic_attack_damages_target_in_range() {
    let (_runtime, handle) = start().await;
    let mut presentation = handle.subscribe(Topic::Presentation);
    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();
    let slime = handle.spawn("slime", Role::Npc).await.unwrap();

    handle
        .intent(hero, Intent::EnterRange { target: slime })
        .await
        .unwrap();
    handle.intent(hero, Intent::basic_attack()).await.unwrap();
    handle.tick(0.05).await.unwrap();

    let amount = next_matching(&mut presentation, |event| match event {
        Event::Presentation(PresentationEvent::FloatingDamage { character, amount })
            if character == slime =>
        {
            Some(amount)
        }
        _ => None,
    })
    .await;

    let target = handle.character(slime).await.unwrap().unwrap();
    assert!(amount > 0);
    assert_eq!(target.health, target.full_health - amount);
    assert_eq!(target.locked_on, Some(hero));
}

#[tokio::test]
async fn attacking_twice_is_rejected() {
    let (_runtime, handle) = start().await;
    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();

    handle.intent(hero, Intent::basic_attack()).await.unwrap();
    let error = handle.intent(hero, Intent::basic_attack()).await.unwrap_err();

    assert!(matches!(
        error,
        RuntimeError::Rejected {
            code: "COMBAT_ALREADY_ATTACKING",
            ..
        }
    ));
    assert!(error.severity().is_some_and(|s| s.is_recoverable()));
}

#[tokio::test]
async fn equipping_plays_configured_sfx() {
    let (_runtime, handle) = start().await;
    let mut audio = handle.subscribe(Topic::Audio);
    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();

    handle
        .intent(
            hero,
            Intent::Equip {
                item: "rusty_axe".into(),
            },
        )
        .await
        .unwrap();
    let played = next_matching(&mut audio, |event| match event {
        Event::Audio(AudioEvent::Sfx { name }) => Some(name),
        _ => None,
    })
    .await;
    assert_eq!(played, "sfx/equip_unequip_item.wav");

    handle
        .intent(
            hero,
            Intent::Unequip {
                slot: EquipmentSlot::Weapon,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn pickups_resolve_through_content() {
    let (_runtime, handle) = start().await;
    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();

    handle
        .intent(
            hero,
            Intent::PickUp {
                item: "blue_potion".into(),
                amount: 2,
            },
        )
        .await
        .unwrap();
    handle
        .intent(
            hero,
            Intent::UseItem {
                item: "blue_potion".into(),
            },
        )
        .await
        .unwrap();

    let error = handle
        .intent(
            hero,
            Intent::PickUp {
                item: "philosopher_stone".into(),
                amount: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::Rejected {
            code: "INVENTORY_UNKNOWN_ITEM",
            ..
        }
    ));
}

#[tokio::test]
async fn experience_levels_up_through_the_handle() {
    let (_runtime, handle) = start().await;
    let hero = handle.spawn("vigilante", Role::Player).await.unwrap();

    let gained = handle.add_exp(hero, 100).await.unwrap();

    assert_eq!(gained, 1);
    let snapshot = handle.character(hero).await.unwrap().unwrap();
    assert_eq!((snapshot.level, snapshot.exp), (2, 0));
}

#[tokio::test]
async fn building_from_an_empty_directory_fails() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    let result = Runtime::builder().data_dir(dir.path()).build().await;

    assert!(matches!(result, Err(RuntimeError::Content(_))));
}
