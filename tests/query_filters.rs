use squaddeck_terminal::data::{self, Player};
use squaddeck_terminal::query::{filter_player_indices, filter_players};
use squaddeck_terminal::state::FilterState;

fn player(id: u32, name: &str, club: &str, nationality: &str, position: &str) -> Player {
    Player {
        id,
        name: name.to_string(),
        club: club.to_string(),
        nationality: nationality.to_string(),
        position: position.to_string(),
        age: 25,
        goals: 10,
        assists: 5,
        matches: 100,
        rating: 7.5,
    }
}

fn sample_players() -> Vec<Player> {
    vec![
        player(1, "Leo", "A", "AR", "Forward"),
        player(2, "Karim", "B", "FR", "Midfielder"),
    ]
}

#[test]
fn default_filter_returns_full_dataset_in_order() {
    let players = &data::builtin().players;
    let indices = filter_player_indices(players, &FilterState::default());
    assert_eq!(indices, (0..players.len()).collect::<Vec<_>>());
}

#[test]
fn search_matches_name_case_insensitively() {
    let players = sample_players();
    let mut filter = FilterState::default();
    filter.set_search("leo");
    let hits = filter_players(&players, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);
}

#[test]
fn search_matches_club_as_well_as_name() {
    let players = sample_players();
    let mut filter = FilterState::default();
    filter.set_search("b");
    let hits = filter_players(&players, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
}

#[test]
fn search_term_is_matched_literally_without_trimming() {
    let players = sample_players();
    let mut filter = FilterState::default();
    filter.set_search(" ");
    assert!(filter_players(&players, &filter).is_empty());
}

#[test]
fn position_filter_matches_by_substring() {
    let players = sample_players();
    let mut filter = FilterState::default();
    filter.set_position("mid");
    let hits = filter_players(&players, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);

    filter.set_position("MID");
    let hits = filter_players(&players, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);
}

#[test]
fn position_substring_spans_compound_categories() {
    let players = vec![
        player(1, "A", "C1", "X", "Midfielder"),
        player(2, "B", "C2", "Y", "Defensive Midfielder"),
    ];
    let mut filter = FilterState::default();
    filter.set_position("midfielder");
    assert_eq!(filter_player_indices(&players, &filter), vec![0, 1]);
}

#[test]
fn nationality_filter_is_exact_and_case_sensitive() {
    let players = sample_players();
    let mut filter = FilterState::default();
    filter.set_nationality("FR");
    let hits = filter_players(&players, &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 2);

    filter.set_nationality("fr");
    assert!(filter_players(&players, &filter).is_empty());
}

#[test]
fn every_active_filter_must_match() {
    let players = sample_players();
    let mut filter = FilterState::default();
    filter.set_search("leo");
    filter.set_position("mid");
    assert!(filter_players(&players, &filter).is_empty());
}

#[test]
fn empty_result_is_an_empty_sequence() {
    let players = sample_players();
    let mut filter = FilterState::default();
    filter.set_search("zzz");
    assert_eq!(filter_player_indices(&players, &filter), Vec::<usize>::new());
}

#[test]
fn search_results_are_a_subset_containing_the_term() {
    let players = &data::builtin().players;
    let mut filter = FilterState::default();
    filter.set_search("ma");
    let hits = filter_players(players, &filter);
    assert!(!hits.is_empty());
    for hit in hits {
        let name = hit.name.to_lowercase();
        let club = hit.club.to_lowercase();
        assert!(
            name.contains("ma") || club.contains("ma"),
            "{} / {} does not contain the term",
            hit.name,
            hit.club
        );
    }
}

#[test]
fn results_keep_dataset_order() {
    let players = &data::builtin().players;
    let mut filter = FilterState::default();
    filter.set_position("forward");
    let indices = filter_player_indices(players, &filter);
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(indices, sorted);
}
