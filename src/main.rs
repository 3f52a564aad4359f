//! Chainplay Engine Demo
//!
//! Drives a scripted invocation sequence through every entry point and
//! prints the resulting events and state digest.

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chainplay::{
    CallContext, GameContract, PlayerId, VERSION,
};

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Chainplay Engine v{}", VERSION);

    demo_invocations();
}

/// Demo function walking the entity and score paths.
fn demo_invocations() {
    info!("=== Entity Path ===");

    let mut contract = GameContract::new();
    let alice = PlayerId::from_subject("alice");
    let bob = PlayerId::from_subject("bob");
    let carol = PlayerId::from_subject("carol");

    let ctx = CallContext::new(alice, 1_000);
    let hero = contract.spawn_entity(&ctx, 0, 0).expect("spawn failed");
    let rival = contract.spawn_entity(&ctx, 10, 10).expect("spawn failed");
    info!(
        "Spawned hero {}@{} and rival {}@{}",
        hero.index, hero.generation, rival.index, rival.generation
    );

    let pos = contract.move_entity(&ctx, hero, 5, -3).expect("move failed");
    info!("Hero moved to ({}, {})", pos.x, pos.y);

    // Attack the rival until it dies.
    loop {
        let health = contract.attack_entity(&ctx, rival).expect("attack failed");
        if health.current == 0 {
            break;
        }
    }
    info!(
        "Rival defeated. Alive: {}, dead: {}",
        contract.entity_count().expect("count failed"),
        contract.dead_entity_count().expect("count failed"),
    );

    info!("=== Score Path ===");

    let tournament_id = contract
        .create_tournament(
            &ctx,
            "puzzle-royale".to_string(),
            "Weekly Cup".to_string(),
            1_000,
            2_000,
            100,
        )
        .expect("create_tournament failed");

    for (player, score, timestamp) in [
        (alice, 740, 1_100),
        (bob, 910, 1_150),
        (carol, 910, 1_200),
        (alice, 980, 1_300),
    ] {
        let ctx = CallContext::new(player, timestamp);
        let rank = contract
            .submit_score(&ctx, player, tournament_id, score, timestamp, None)
            .expect("submit_score failed");
        info!(
            "Player {} scored {} -> rank {}",
            hex::encode(&player.0[..4]),
            score,
            rank
        );
    }

    // A replayed submission is rejected and changes nothing.
    let replay_ctx = CallContext::new(alice, 1_400);
    let rejected = contract.submit_score(&replay_ctx, alice, tournament_id, 980, 1_300, None);
    info!("Replayed submission rejected: {:?}", rejected.unwrap_err());

    let board = contract
        .get_leaderboard(tournament_id, 0, 10)
        .expect("get_leaderboard failed");
    for (place, entry) in board.iter().enumerate() {
        info!(
            "  #{} {} - {} points (t={})",
            place + 1,
            hex::encode(&entry.player_id.0[..4]),
            entry.score,
            entry.timestamp
        );
    }

    for event in contract.take_events() {
        info!("Event: {:?}", event);
    }

    let hash = contract.state_hash().expect("state_hash failed");
    info!("Final State Hash: {}", hex::encode(hash));
}
