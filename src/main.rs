use std::env;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use squaddeck_terminal::data::{self, Dataset, Player, Team};
use squaddeck_terminal::persist;
use squaddeck_terminal::state::{
    AppState, Command, Detail, Tab, apply_command, tab_label,
};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(state: AppState) -> Self {
        Self {
            state,
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        // While the search box has focus, printable keys are input.
        if self.state.search_active {
            let cmd = match key.code {
                KeyCode::Esc | KeyCode::Enter => Some(Command::SearchStop),
                KeyCode::Backspace => Some(Command::SearchBackspace),
                KeyCode::Char(c) => Some(Command::SearchChar(c)),
                _ => None,
            };
            if let Some(cmd) = cmd {
                apply_command(&mut self.state, cmd);
            }
            return;
        }

        if self.state.detail.is_some() {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('b') => {
                    apply_command(&mut self.state, Command::CloseDetail)
                }
                KeyCode::Char('f') => apply_command(&mut self.state, Command::ToggleFavorite),
                KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            }
            return;
        }

        let cmd = match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('1') => Some(Command::SwitchTab(Tab::Players)),
            KeyCode::Char('2') => Some(Command::SwitchTab(Tab::Teams)),
            KeyCode::Char('3') => Some(Command::SwitchTab(Tab::Favorites)),
            KeyCode::Tab => Some(Command::NextTab),
            KeyCode::BackTab => Some(Command::PrevTab),
            KeyCode::Char('j') | KeyCode::Down => Some(Command::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Command::SelectPrev),
            KeyCode::Char('/') if self.state.tab == Tab::Players => Some(Command::SearchStart),
            KeyCode::Char('p') if self.state.tab == Tab::Players => Some(Command::CyclePosition),
            KeyCode::Char('n') if self.state.tab == Tab::Players => Some(Command::CycleNationality),
            KeyCode::Char('c') if self.state.tab == Tab::Players => Some(Command::ResetFilters),
            KeyCode::Char('f') => Some(Command::ToggleFavorite),
            KeyCode::Char('d') | KeyCode::Enter => Some(Command::OpenDetail),
            KeyCode::Char('?') => Some(Command::ToggleHelp),
            _ => None,
        };
        if let Some(cmd) = cmd {
            apply_command(&mut self.state, cmd);
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let (dataset, warnings) = dataset_from_env();
    let mut state = AppState::new(dataset);
    for warning in warnings {
        state.push_log(warning);
    }
    state.favorites_path = persist::favorites_path();
    persist::load_into_state(&mut state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn dataset_from_env() -> (Dataset, Vec<String>) {
    let mut dataset = data::builtin().clone();
    let mut warnings = Vec::new();
    if let Some(path) = env_path("SQUADDECK_PLAYERS_FILE") {
        match data::load_players_file(&path) {
            Ok(players) => dataset.players = players,
            Err(err) => warnings.push(format!("[WARN] Player data load failed: {err:#}")),
        }
    }
    if let Some(path) = env_path("SQUADDECK_TEAMS_FILE") {
        match data::load_teams_file(&path) {
            Ok(teams) => dataset.teams = teams,
            Err(err) => warnings.push(format!("[WARN] Team data load failed: {err:#}")),
        }
    }
    (dataset, warnings)
}

fn env_path(key: &str) -> Option<PathBuf> {
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(value))
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.tab {
        Tab::Players => render_players(frame, chunks[1], &app.state),
        Tab::Teams => render_teams(frame, chunks[1], &app.state),
        Tab::Favorites => render_favorites(frame, chunks[1], &app.state),
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    match app.state.detail {
        Some(Detail::Player(id)) => {
            if let Some(player) = app.state.dataset.player_by_id(id) {
                render_player_detail(frame, frame.size(), player, app.state.favorites.contains(id));
            }
        }
        Some(Detail::Team(id)) => {
            if let Some(team) = app.state.dataset.team_by_id(id) {
                render_team_detail(frame, frame.size(), team);
            }
        }
        None => {}
    }

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let tabs = [Tab::Players, Tab::Teams, Tab::Favorites]
        .into_iter()
        .map(|tab| {
            if tab == state.tab {
                format!("[{}]", tab_label(tab))
            } else {
                tab_label(tab).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    let line1 = format!("  SQUADDECK | {tabs} | Favorites: {}", state.favorites.len());

    let search = if state.search_active {
        format!("{}_", state.filter.search)
    } else if state.filter.search.is_empty() {
        "-".to_string()
    } else {
        state.filter.search.clone()
    };
    let line2 = format!(
        "  Search: {search} | Position: {} | Nationality: {}",
        state.filter.position, state.filter.nationality
    );

    let line3 = state.logs.back().cloned().unwrap_or_default();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to search | Backspace Delete | Enter/Esc Done".to_string();
    }
    if state.detail.is_some() {
        return "f Favorite | Enter/Esc/b Close".to_string();
    }
    match state.tab {
        Tab::Players => {
            "1/2/3/Tab Tabs | j/k/↑/↓ Move | / Search | p Position | n Nationality | c Clear | f Favorite | Enter Detail | ? Help | q Quit"
                .to_string()
        }
        Tab::Teams => "1/2/3/Tab Tabs | j/k/↑/↓ Move | Enter Detail | ? Help | q Quit".to_string(),
        Tab::Favorites => {
            "1/2/3/Tab Tabs | j/k/↑/↓ Move | f Unfavorite | Enter Detail | ? Help | q Quit"
                .to_string()
        }
    }
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    render_player_grid(
        frame,
        area,
        state,
        &state.players_view,
        state.players_selected,
        "No players match the current filters",
    );
}

fn render_favorites(frame: &mut Frame, area: Rect, state: &AppState) {
    render_player_grid(
        frame,
        area,
        state,
        &state.favorites_view,
        state.favorites_selected,
        "No favorites yet - press f on a player to add one",
    );
}

fn render_player_grid(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    view: &[usize],
    selected: usize,
    empty_msg: &str,
) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = player_columns();
    render_player_header(frame, sections[0], &widths);

    let list_area = sections[1];
    if view.is_empty() {
        let empty = Paragraph::new(empty_msg).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(selected, view.len(), visible);

    for (i, row) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let is_selected = row == selected;
        let row_style = if is_selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if is_selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let Some(player) = view.get(row).and_then(|idx| state.dataset.players.get(*idx)) else {
            continue;
        };
        let heart = if state.favorites.contains(player.id) {
            "♥"
        } else {
            " "
        };

        render_cell_text(frame, cols[0], heart, row_style);
        render_cell_text(frame, cols[1], &player.name, row_style);
        render_cell_text(frame, cols[2], &player.club, row_style);
        render_cell_text(frame, cols[3], &player.nationality, row_style);
        render_cell_text(frame, cols[4], &player.position, row_style);
        render_cell_text(frame, cols[5], &player.age.to_string(), row_style);
        render_cell_text(frame, cols[6], &player.goals.to_string(), row_style);
        render_cell_text(frame, cols[7], &player.assists.to_string(), row_style);
        render_cell_text(frame, cols[8], &format!("{:.1}", player.rating), row_style);
    }
}

fn render_teams(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = team_columns();
    render_team_header(frame, sections[0], &widths);

    let list_area = sections[1];
    if state.dataset.teams.is_empty() {
        let empty = Paragraph::new("No teams loaded").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let total = state.dataset.teams.len();
    let (start, end) = visible_range(state.teams_selected, total, visible);

    for (i, row) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let is_selected = row == state.teams_selected;
        let row_style = if is_selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if is_selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let Some(team) = state.dataset.teams.get(row) else {
            continue;
        };

        render_cell_text(frame, cols[0], &team.name, row_style);
        render_cell_text(frame, cols[1], &team.country, row_style);
        render_cell_text(frame, cols[2], &team.squad_size.to_string(), row_style);
        render_cell_text(
            frame,
            cols[3],
            team.league.as_deref().unwrap_or("-"),
            row_style,
        );
        render_cell_text(
            frame,
            cols[4],
            team.stadium.as_deref().unwrap_or("-"),
            row_style,
        );
    }
}

fn player_columns() -> [Constraint; 9] {
    [
        Constraint::Length(2),
        Constraint::Min(18),
        Constraint::Length(20),
        Constraint::Length(12),
        Constraint::Length(21),
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
    ]
}

fn team_columns() -> [Constraint; 5] {
    [
        Constraint::Min(20),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(19),
        Constraint::Length(20),
    ]
}

fn render_player_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "♥", style);
    render_cell_text(frame, cols[1], "Name", style);
    render_cell_text(frame, cols[2], "Club", style);
    render_cell_text(frame, cols[3], "Nation", style);
    render_cell_text(frame, cols[4], "Position", style);
    render_cell_text(frame, cols[5], "Age", style);
    render_cell_text(frame, cols[6], "Goals", style);
    render_cell_text(frame, cols[7], "Asst", style);
    render_cell_text(frame, cols[8], "Rating", style);
}

fn render_team_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Team", style);
    render_cell_text(frame, cols[1], "Ctry", style);
    render_cell_text(frame, cols[2], "Squad", style);
    render_cell_text(frame, cols[3], "League", style);
    render_cell_text(frame, cols[4], "Stadium", style);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    if area.height == 0 {
        return;
    }
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_player_detail(frame: &mut Frame, area: Rect, player: &Player, is_favorite: bool) {
    let popup_area = centered_rect(55, 60, area);
    frame.render_widget(Clear, popup_area);

    let marker = if is_favorite {
        "♥ In favorites"
    } else {
        "Not in favorites"
    };
    let lines = [
        format!("Club: {}", player.club),
        format!("Age: {}", player.age),
        format!("Nationality: {}", player.nationality),
        format!("Position: {}", player.position),
        String::new(),
        "Career".to_string(),
        format!("  Goals:   {}", player.goals),
        format!("  Assists: {}", player.assists),
        format!("  Matches: {}", player.matches),
        format!("  Rating:  {:.1}", player.rating),
        String::new(),
        marker.to_string(),
    ]
    .join("\n");

    let detail = Paragraph::new(lines)
        .block(Block::default().title(player.name.clone()).borders(Borders::ALL));
    frame.render_widget(detail, popup_area);
}

fn render_team_detail(frame: &mut Frame, area: Rect, team: &Team) {
    let popup_area = centered_rect(55, 60, area);
    frame.render_widget(Clear, popup_area);

    let lines = [
        format!(
            "Country: {}",
            team.country_full.as_deref().unwrap_or(&team.country)
        ),
        format!("League: {}", or_no_data(team.league.clone())),
        format!("Founded: {}", or_no_data(team.founded.map(|y| y.to_string()))),
        format!("Stadium: {}", or_no_data(team.stadium.clone())),
        format!(
            "Capacity: {}",
            or_no_data(team.capacity.map(|c| format!("{c} seats")))
        ),
        format!("Coach: {}", or_no_data(team.coach.clone())),
        format!("Squad size: {}", team.squad_size),
    ]
    .join("\n");

    let detail = Paragraph::new(lines)
        .block(Block::default().title(team.name.clone()).borders(Borders::ALL));
    frame.render_widget(detail, popup_area);
}

fn or_no_data(value: Option<String>) -> String {
    value.unwrap_or_else(|| "No data".to_string())
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Squaddeck Terminal - Help",
        "",
        "Global:",
        "  1 / 2 / 3    Players / Teams / Favorites",
        "  Tab          Next tab",
        "  j/k or ↑/↓   Move",
        "  f            Toggle favorite",
        "  Enter / d    Open detail",
        "  b / Esc      Close detail",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Players:",
        "  /            Search name or club",
        "  p            Cycle position filter",
        "  n            Cycle nationality filter",
        "  c            Clear filters",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
