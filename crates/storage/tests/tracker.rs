mod common;

use common::MemoryStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use storage::error::StorageError;
use storage::models::{NewParticipant, OnboardingState};
use storage::repository::ParticipantStore;
use storage::services::leaderboard;
use storage::services::tracker::{self, ParticipantAction};

#[tokio::test]
async fn first_goal_appends_anchor_weigh_in() {
    let store = MemoryStore::with_participants(&["Bruno"]).await;

    let bruno = tracker::set_goal(&store, 1, dec!(80), dec!(70)).await.unwrap();

    assert_eq!(bruno.state(), OnboardingState::Configured);
    assert_eq!(bruno.weight_history.len(), 1);
    assert_eq!(bruno.weight_history[0].weight, dec!(80));
    assert_eq!(bruno.current_weight(), dec!(80));
    assert_eq!(bruno.progress(), Some(dec!(0)));
}

#[tokio::test]
async fn goal_edit_does_not_append_again() {
    let store = MemoryStore::with_participants(&["Bruno"]).await;
    tracker::set_goal(&store, 1, dec!(80), dec!(70)).await.unwrap();
    tracker::log_weight(&store, 1, dec!(77)).await.unwrap();

    let bruno = tracker::set_goal(&store, 1, dec!(82), dec!(72)).await.unwrap();

    assert_eq!(bruno.weight_history.len(), 2);
    assert_eq!(bruno.participant.initial_weight, dec!(82));
    assert_eq!(bruno.participant.weight_goal, dec!(72));
    assert_eq!(bruno.current_weight(), dec!(77));
    assert_eq!(bruno.progress(), Some(dec!(50)));
}

#[tokio::test]
async fn weigh_in_returns_history_newest_first() {
    let store = MemoryStore::with_participants(&["Daiane"]).await;
    tracker::set_goal(&store, 1, dec!(80), dec!(70)).await.unwrap();
    tracker::log_weight(&store, 1, dec!(78)).await.unwrap();

    let daiane = tracker::log_weight(&store, 1, dec!(75)).await.unwrap();

    let weights: Vec<Decimal> = daiane.weight_history.iter().map(|r| r.weight).collect();
    assert_eq!(weights, vec![dec!(75), dec!(78), dec!(80)]);
    assert_eq!(daiane.progress(), Some(dec!(50)));
}

#[tokio::test]
async fn weigh_in_for_unknown_participant_is_not_found() {
    let store = MemoryStore::with_participants(&["Cris"]).await;

    let result = tracker::log_weight(&store, 9999, dec!(75)).await;

    assert!(matches!(result, Err(StorageError::NotFound)));
    assert_eq!(store.record_counts().await, (0, 0));
}

#[tokio::test]
async fn weigh_in_requires_a_goal() {
    let store = MemoryStore::with_participants(&["Cris"]).await;

    let result = tracker::log_weight(&store, 1, dec!(75)).await;

    assert!(matches!(result, Err(StorageError::InvalidInput(_))));
    assert_eq!(store.record_counts().await, (0, 0));
}

#[tokio::test]
async fn rejected_goal_leaves_participant_untouched() {
    let store = MemoryStore::with_participants(&["Fran"]).await;
    tracker::set_goal(&store, 1, dec!(90), dec!(80)).await.unwrap();

    let result = tracker::set_goal(&store, 1, dec!(85), dec!(85)).await;

    assert!(matches!(result, Err(StorageError::InvalidInput(_))));
    let fran = store.find_participant(1).await.unwrap();
    assert_eq!(fran.participant.initial_weight, dec!(90));
    assert_eq!(fran.participant.weight_goal, dec!(80));
    assert_eq!(fran.weight_history.len(), 1);
}

#[tokio::test]
async fn contributions_sum_into_money_added() {
    let store = MemoryStore::with_participants(&["Paulinho"]).await;

    tracker::log_money(&store, 1, dec!(50)).await.unwrap();
    tracker::log_money(&store, 1, dec!(20.25)).await.unwrap();
    let paulinho = tracker::log_money(&store, 1, dec!(9.999)).await.unwrap();

    assert_eq!(paulinho.money_history.len(), 3);
    assert_eq!(paulinho.money_history[0].amount, dec!(10.00));
    assert_eq!(paulinho.money_added(), dec!(80.25));
}

#[tokio::test]
async fn contribution_rules() {
    let store = MemoryStore::with_participants(&["Douglas"]).await;

    assert!(matches!(
        tracker::log_money(&store, 1, dec!(-5)).await,
        Err(StorageError::InvalidInput(_))
    ));
    assert!(matches!(
        tracker::log_money(&store, 42, dec!(5)).await,
        Err(StorageError::NotFound)
    ));
    assert_eq!(store.record_counts().await, (0, 0));
}

#[tokio::test]
async fn reset_returns_participant_to_unconfigured() {
    let store = MemoryStore::with_participants(&["Bruno", "Daiane"]).await;
    tracker::set_goal(&store, 1, dec!(80), dec!(70)).await.unwrap();
    tracker::log_weight(&store, 1, dec!(79)).await.unwrap();
    tracker::log_weight(&store, 1, dec!(77)).await.unwrap();
    tracker::log_money(&store, 1, dec!(30)).await.unwrap();
    tracker::log_money(&store, 1, dec!(15)).await.unwrap();
    tracker::log_money(&store, 2, dec!(10)).await.unwrap();

    let bruno = tracker::reset(&store, 1).await.unwrap();

    assert_eq!(bruno.state(), OnboardingState::Unconfigured);
    assert!(bruno.weight_history.is_empty());
    assert!(bruno.money_history.is_empty());
    assert_eq!(bruno.participant.initial_weight, Decimal::ZERO);
    assert_eq!(bruno.participant.weight_goal, Decimal::ZERO);
    assert_eq!(bruno.money_added(), Decimal::ZERO);
    assert_eq!(bruno.progress(), None);

    let daiane = store.find_participant(2).await.unwrap();
    assert_eq!(daiane.money_added(), dec!(10));

    let again = tracker::set_goal(&store, 1, dec!(78), dec!(70)).await.unwrap();
    assert_eq!(again.weight_history.len(), 1);
}

#[tokio::test]
async fn reset_of_unknown_participant_is_not_found() {
    let store = MemoryStore::with_participants(&[]).await;
    assert!(matches!(
        tracker::reset(&store, 7).await,
        Err(StorageError::NotFound)
    ));
}

#[tokio::test]
async fn apply_dispatches_actions() {
    let store = MemoryStore::with_participants(&["Cris"]).await;

    tracker::apply(
        &store,
        1,
        ParticipantAction::SetGoal {
            initial_weight: dec!(100),
            weight_goal: dec!(80),
        },
    )
    .await
    .unwrap();
    tracker::apply(&store, 1, ParticipantAction::LogWeight(dec!(95)))
        .await
        .unwrap();
    let cris = tracker::apply(&store, 1, ParticipantAction::LogMoney(dec!(12)))
        .await
        .unwrap();

    assert_eq!(cris.progress(), Some(dec!(25)));
    assert_eq!(cris.money_added(), dec!(12));

    let cris = tracker::apply(&store, 1, ParticipantAction::Reset).await.unwrap();
    assert_eq!(cris.state(), OnboardingState::Unconfigured);
}

#[tokio::test]
async fn create_participant_rejects_blank_name() {
    let store = MemoryStore::default();

    let result = tracker::create_participant(
        &store,
        &NewParticipant {
            name: " ".to_string(),
            photo_url: None,
            color: "#9333EA".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(StorageError::InvalidInput(_))));
    assert!(store.list_participants().await.unwrap().is_empty());
}

#[tokio::test]
async fn leaderboard_after_mutations() {
    let store = MemoryStore::with_participants(&["Bruno", "Daiane", "Cris"]).await;
    tracker::set_goal(&store, 2, dec!(80), dec!(70)).await.unwrap();
    tracker::log_weight(&store, 2, dec!(76)).await.unwrap();
    tracker::set_goal(&store, 3, dec!(90), dec!(80)).await.unwrap();
    tracker::log_weight(&store, 3, dec!(88)).await.unwrap();
    tracker::log_money(&store, 1, dec!(25)).await.unwrap();
    tracker::log_money(&store, 3, dec!(40)).await.unwrap();

    let first = leaderboard::build_leaderboard(store.list_participants().await.unwrap());
    let second = leaderboard::build_leaderboard(store.list_participants().await.unwrap());

    let order: Vec<i32> = first.entries.iter().map(|e| e.participant.id()).collect();
    let repeat: Vec<i32> = second.entries.iter().map(|e| e.participant.id()).collect();
    assert_eq!(order, vec![2, 3, 1]);
    assert_eq!(order, repeat);
    assert_eq!(first.entries[0].progress, Some(dec!(40)));
    assert_eq!(first.entries[1].progress, Some(dec!(20)));
    assert_eq!(first.entries[2].rank, None);
    assert_eq!(first.leader_id, Some(2));
    assert_eq!(first.prize_pool, dec!(65));
    assert_eq!(first.participant_count, 3);
}
