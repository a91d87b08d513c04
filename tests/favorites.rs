use squaddeck_terminal::data::{Dataset, Player};
use squaddeck_terminal::query::filter_favorites;
use squaddeck_terminal::state::Favorites;

fn player(id: u32, name: &str) -> Player {
    Player {
        id,
        name: name.to_string(),
        club: "Club".to_string(),
        nationality: "X".to_string(),
        position: "Forward".to_string(),
        age: 25,
        goals: 10,
        assists: 5,
        matches: 100,
        rating: 7.5,
    }
}

fn sample_players() -> Vec<Player> {
    vec![player(1, "Leo"), player(2, "Karim"), player(3, "Erling")]
}

#[test]
fn toggle_adds_then_removes() {
    let mut favorites = Favorites::default();
    assert!(favorites.toggle(1));
    assert!(favorites.contains(1));
    assert!(!favorites.toggle(1));
    assert!(!favorites.contains(1));
}

#[test]
fn toggle_twice_restores_prior_membership() {
    let mut favorites = Favorites::from_ids(vec![2, 3]);
    let before = favorites.ids().to_vec();
    favorites.toggle(1);
    favorites.toggle(1);
    assert_eq!(favorites.ids(), before.as_slice());
}

#[test]
fn insertion_order_is_preserved() {
    let mut favorites = Favorites::default();
    favorites.toggle(3);
    favorites.toggle(1);
    favorites.toggle(2);
    assert_eq!(favorites.ids(), &[3, 1, 2]);
}

#[test]
fn from_ids_drops_duplicates_keeping_first() {
    let favorites = Favorites::from_ids(vec![2, 1, 2, 3, 1]);
    assert_eq!(favorites.ids(), &[2, 1, 3]);
}

#[test]
fn retain_known_drops_ids_missing_from_dataset() {
    let dataset = Dataset::new(sample_players(), Vec::new());
    let mut favorites = Favorites::from_ids(vec![2, 99, 1]);
    favorites.retain_known(&dataset);
    assert_eq!(favorites.ids(), &[2, 1]);
}

#[test]
fn filter_favorites_returns_members_in_dataset_order() {
    let players = sample_players();
    let mut favorites = Favorites::default();
    favorites.toggle(3);
    favorites.toggle(1);

    let hits = filter_favorites(&players, &favorites);
    let ids: Vec<u32> = hits.iter().map(|p| p.id).collect();
    // Dataset order, not toggle order, and each member exactly once.
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn filter_favorites_never_returns_non_members() {
    let players = sample_players();
    let mut favorites = Favorites::default();
    favorites.toggle(2);

    for hit in filter_favorites(&players, &favorites) {
        assert!(favorites.contains(hit.id));
    }
}

#[test]
fn filter_favorites_skips_ids_without_a_dataset_entry() {
    let players = sample_players();
    let favorites = Favorites::from_ids(vec![99, 2]);
    let hits = filter_favorites(&players, &favorites);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
}

#[test]
fn empty_favorites_yield_an_empty_list() {
    let players = sample_players();
    let favorites = Favorites::default();
    assert!(filter_favorites(&players, &favorites).is_empty());
}
