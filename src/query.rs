use crate::data::Player;
use crate::state::{FILTER_ALL, Favorites, FilterState};

/// Position filters by case-insensitive substring, nationality by exact
/// value. The search term is matched literally, whitespace included.
pub fn matches_filter(player: &Player, filter: &FilterState) -> bool {
    let term = filter.search.to_lowercase();
    let matches_search = term.is_empty()
        || player.name.to_lowercase().contains(&term)
        || player.club.to_lowercase().contains(&term);
    if !matches_search {
        return false;
    }

    let matches_position = filter.position == FILTER_ALL
        || player
            .position
            .to_lowercase()
            .contains(&filter.position.to_lowercase());
    if !matches_position {
        return false;
    }

    filter.nationality == FILTER_ALL || player.nationality == filter.nationality
}

/// Indices of players passing every active filter, in dataset order.
pub fn filter_player_indices(players: &[Player], filter: &FilterState) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, player)| matches_filter(player, filter))
        .map(|(idx, _)| idx)
        .collect()
}

pub fn filter_players<'a>(players: &'a [Player], filter: &FilterState) -> Vec<&'a Player> {
    filter_player_indices(players, filter)
        .into_iter()
        .filter_map(|idx| players.get(idx))
        .collect()
}

/// Indices of favorited players, in dataset order. Ids in the set with no
/// matching dataset entry are skipped.
pub fn favorite_indices(players: &[Player], favorites: &Favorites) -> Vec<usize> {
    players
        .iter()
        .enumerate()
        .filter(|(_, player)| favorites.contains(player.id))
        .map(|(idx, _)| idx)
        .collect()
}

pub fn filter_favorites<'a>(players: &'a [Player], favorites: &Favorites) -> Vec<&'a Player> {
    favorite_indices(players, favorites)
        .into_iter()
        .filter_map(|idx| players.get(idx))
        .collect()
}
