use std::collections::VecDeque;
use std::path::PathBuf;

use crate::data::{Dataset, Player, PlayerId, TeamId};
use crate::persist;
use crate::query;

pub const FILTER_ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Players,
    Teams,
    Favorites,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Players => Tab::Teams,
            Tab::Teams => Tab::Favorites,
            Tab::Favorites => Tab::Players,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Players => Tab::Favorites,
            Tab::Teams => Tab::Players,
            Tab::Favorites => Tab::Teams,
        }
    }
}

pub fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::Players => "PLAYERS",
        Tab::Teams => "TEAMS",
        Tab::Favorites => "FAVORITES",
    }
}

/// Current search/filter selection. Setters only replace the field; the
/// re-render request belongs to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub position: String,
    pub nationality: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            position: FILTER_ALL.to_string(),
            nationality: FILTER_ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn set_position(&mut self, value: impl Into<String>) {
        self.position = value.into();
    }

    pub fn set_nationality(&mut self, value: impl Into<String>) {
        self.nationality = value.into();
    }

    pub fn is_default(&self) -> bool {
        self.search.is_empty() && self.position == FILTER_ALL && self.nationality == FILTER_ALL
    }
}

/// Favorited player ids. No duplicates; insertion order is preserved.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: Vec<PlayerId>,
}

impl Favorites {
    pub fn from_ids(ids: Vec<PlayerId>) -> Self {
        let mut favorites = Self::default();
        for id in ids {
            if !favorites.contains(id) {
                favorites.ids.push(id);
            }
        }
        favorites
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.ids.contains(&id)
    }

    /// Returns true when the id is a favorite after the toggle.
    pub fn toggle(&mut self, id: PlayerId) -> bool {
        if let Some(pos) = self.ids.iter().position(|fav| *fav == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    pub fn ids(&self) -> &[PlayerId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn retain_known(&mut self, dataset: &Dataset) {
        self.ids.retain(|id| dataset.player_by_id(*id).is_some());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Player(PlayerId),
    Team(TeamId),
}

/// One input event from the render layer. Every user action arrives here,
/// which keeps the controller drivable without a terminal attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SwitchTab(Tab),
    NextTab,
    PrevTab,
    SearchStart,
    SearchStop,
    SearchChar(char),
    SearchBackspace,
    CyclePosition,
    CycleNationality,
    ResetFilters,
    SelectNext,
    SelectPrev,
    OpenDetail,
    CloseDetail,
    ToggleFavorite,
    ToggleHelp,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub dataset: Dataset,
    pub filter: FilterState,
    pub favorites: Favorites,
    pub favorites_path: Option<PathBuf>,
    pub tab: Tab,
    pub players_view: Vec<usize>,
    pub favorites_view: Vec<usize>,
    pub players_selected: usize,
    pub teams_selected: usize,
    pub favorites_selected: usize,
    pub position_options: Vec<String>,
    pub nationality_options: Vec<String>,
    pub search_active: bool,
    pub detail: Option<Detail>,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl AppState {
    pub fn new(dataset: Dataset) -> Self {
        let players_view = query::filter_player_indices(&dataset.players, &FilterState::default());
        let mut position_options = vec![FILTER_ALL.to_string()];
        position_options.extend(dataset.position_options());
        let mut nationality_options = vec![FILTER_ALL.to_string()];
        nationality_options.extend(dataset.nationality_options());
        Self {
            dataset,
            filter: FilterState::default(),
            favorites: Favorites::default(),
            favorites_path: None,
            tab: Tab::Players,
            players_view,
            favorites_view: Vec::new(),
            players_selected: 0,
            teams_selected: 0,
            favorites_selected: 0,
            position_options,
            nationality_options,
            search_active: false,
            detail: None,
            help_overlay: false,
            logs: VecDeque::with_capacity(200),
        }
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        // Favorites may have changed while another tab was showing; the
        // cached view must never reach the render layer stale.
        if tab == Tab::Favorites {
            self.refresh_favorites_view();
        }
    }

    pub fn update_search(&mut self, text: impl Into<String>) {
        self.filter.set_search(text);
        self.refresh_players_view();
    }

    pub fn update_position(&mut self, value: impl Into<String>) {
        self.filter.set_position(value);
        self.refresh_players_view();
    }

    pub fn update_nationality(&mut self, value: impl Into<String>) {
        self.filter.set_nationality(value);
        self.refresh_players_view();
    }

    pub fn cycle_position(&mut self) {
        let next = next_option(&self.position_options, &self.filter.position);
        self.update_position(next);
    }

    pub fn cycle_nationality(&mut self) {
        let next = next_option(&self.nationality_options, &self.filter.nationality);
        self.update_nationality(next);
    }

    pub fn reset_filters(&mut self) {
        self.filter = FilterState::default();
        self.refresh_players_view();
    }

    /// Add or remove one favorite, then write the whole set through to
    /// disk. Unknown ids are ignored.
    pub fn toggle_favorite(&mut self, id: PlayerId) {
        let Some(player) = self.dataset.player_by_id(id) else {
            return;
        };
        let name = player.name.clone();
        let now_favorite = self.favorites.toggle(id);
        if let Some(path) = self.favorites_path.clone() {
            persist::save_favorites(&path, self.favorites.ids());
        }
        if now_favorite {
            self.push_log(format!(
                "[INFO] Added {name} to favorites ({} total)",
                self.favorites.len()
            ));
        } else {
            self.push_log(format!(
                "[INFO] Removed {name} from favorites ({} total)",
                self.favorites.len()
            ));
        }
        if self.tab == Tab::Favorites {
            self.refresh_favorites_view();
        }
    }

    pub fn show_player_detail(&mut self, id: PlayerId) {
        if self.dataset.player_by_id(id).is_some() {
            self.detail = Some(Detail::Player(id));
        }
    }

    pub fn show_team_detail(&mut self, id: TeamId) {
        if self.dataset.team_by_id(id).is_some() {
            self.detail = Some(Detail::Team(id));
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn selected_player_id(&self) -> Option<PlayerId> {
        let idx = match self.tab {
            Tab::Players => self.players_view.get(self.players_selected).copied(),
            Tab::Favorites => self.favorites_view.get(self.favorites_selected).copied(),
            Tab::Teams => None,
        }?;
        self.dataset.players.get(idx).map(|p| p.id)
    }

    pub fn selected_team_id(&self) -> Option<TeamId> {
        if self.tab != Tab::Teams {
            return None;
        }
        self.dataset.teams.get(self.teams_selected).map(|t| t.id)
    }

    /// Players of the active grid in display order. Empty on the Teams tab.
    pub fn visible_players(&self) -> Vec<&Player> {
        let view = match self.tab {
            Tab::Players => &self.players_view,
            Tab::Favorites => &self.favorites_view,
            Tab::Teams => return Vec::new(),
        };
        view.iter()
            .filter_map(|idx| self.dataset.players.get(*idx))
            .collect()
    }

    pub fn select_next(&mut self) {
        let total = self.active_list_len();
        let selected = self.active_selected_mut();
        if total == 0 {
            *selected = 0;
            return;
        }
        *selected = (*selected + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let total = self.active_list_len();
        let selected = self.active_selected_mut();
        if total == 0 {
            *selected = 0;
            return;
        }
        if *selected == 0 {
            *selected = total - 1;
        } else {
            *selected -= 1;
        }
    }

    pub fn refresh_favorites_view(&mut self) {
        self.favorites_view = query::favorite_indices(&self.dataset.players, &self.favorites);
        clamp_selection(&mut self.favorites_selected, self.favorites_view.len());
    }

    fn refresh_players_view(&mut self) {
        self.players_view = query::filter_player_indices(&self.dataset.players, &self.filter);
        clamp_selection(&mut self.players_selected, self.players_view.len());
    }

    fn active_list_len(&self) -> usize {
        match self.tab {
            Tab::Players => self.players_view.len(),
            Tab::Teams => self.dataset.teams.len(),
            Tab::Favorites => self.favorites_view.len(),
        }
    }

    fn active_selected_mut(&mut self) -> &mut usize {
        match self.tab {
            Tab::Players => &mut self.players_selected,
            Tab::Teams => &mut self.teams_selected,
            Tab::Favorites => &mut self.favorites_selected,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        const MAX_LOGS: usize = 200;
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

fn clamp_selection(selected: &mut usize, total: usize) {
    if total == 0 {
        *selected = 0;
    } else if *selected >= total {
        *selected = total - 1;
    }
}

fn next_option(options: &[String], current: &str) -> String {
    if options.is_empty() {
        return FILTER_ALL.to_string();
    }
    let idx = options.iter().position(|opt| opt == current).unwrap_or(0);
    options[(idx + 1) % options.len()].clone()
}

pub fn apply_command(state: &mut AppState, cmd: Command) {
    match cmd {
        Command::SwitchTab(tab) => state.switch_tab(tab),
        Command::NextTab => state.switch_tab(state.tab.next()),
        Command::PrevTab => state.switch_tab(state.tab.prev()),
        Command::SearchStart => state.search_active = true,
        Command::SearchStop => state.search_active = false,
        Command::SearchChar(c) => {
            let mut search = state.filter.search.clone();
            search.push(c);
            state.update_search(search);
        }
        Command::SearchBackspace => {
            let mut search = state.filter.search.clone();
            search.pop();
            state.update_search(search);
        }
        Command::CyclePosition => state.cycle_position(),
        Command::CycleNationality => state.cycle_nationality(),
        Command::ResetFilters => state.reset_filters(),
        Command::SelectNext => state.select_next(),
        Command::SelectPrev => state.select_prev(),
        Command::OpenDetail => match state.tab {
            Tab::Players | Tab::Favorites => {
                if let Some(id) = state.selected_player_id() {
                    state.show_player_detail(id);
                }
            }
            Tab::Teams => {
                if let Some(id) = state.selected_team_id() {
                    state.show_team_detail(id);
                }
            }
        },
        Command::CloseDetail => state.close_detail(),
        Command::ToggleFavorite => {
            let target = match state.detail {
                Some(Detail::Player(id)) => Some(id),
                Some(Detail::Team(_)) => None,
                None => state.selected_player_id(),
            };
            if let Some(id) = target {
                state.toggle_favorite(id);
            }
        }
        Command::ToggleHelp => state.help_overlay = !state.help_overlay,
    }
}
