use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub type PlayerId = u32;
pub type TeamId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub club: String,
    pub nationality: String,
    pub position: String,
    pub age: u8,
    pub goals: u32,
    pub assists: u32,
    pub matches: u32,
    pub rating: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub country: String,
    pub squad_size: u32,
    #[serde(default)]
    pub country_full: Option<String>,
    #[serde(default)]
    pub founded: Option<u16>,
    #[serde(default)]
    pub stadium: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub league: Option<String>,
}

/// Reference data for one session. Loaded once at startup, read-only after.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
}

impl Dataset {
    pub fn new(players: Vec<Player>, teams: Vec<Team>) -> Self {
        Self { players, teams }
    }

    pub fn player_by_id(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn team_by_id(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Distinct position categories, first-seen dataset order.
    pub fn position_options(&self) -> Vec<String> {
        distinct(self.players.iter().map(|p| p.position.as_str()))
    }

    /// Distinct nationalities, first-seen dataset order.
    pub fn nationality_options(&self) -> Vec<String> {
        distinct(self.players.iter().map(|p| p.nationality.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.iter().any(|seen| seen == value) {
            out.push(value.to_string());
        }
    }
    out
}

pub fn load_players_file(path: &Path) -> Result<Vec<Player>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read players file {}", path.display()))?;
    let players: Vec<Player> = serde_json::from_str(&raw)
        .with_context(|| format!("parse players file {}", path.display()))?;
    Ok(players)
}

pub fn load_teams_file(path: &Path) -> Result<Vec<Team>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read teams file {}", path.display()))?;
    let teams: Vec<Team> = serde_json::from_str(&raw)
        .with_context(|| format!("parse teams file {}", path.display()))?;
    Ok(teams)
}

pub fn builtin() -> &'static Dataset {
    &BUILTIN
}

static BUILTIN: Lazy<Dataset> = Lazy::new(|| Dataset::new(builtin_players(), builtin_teams()));

#[allow(clippy::too_many_arguments)]
fn player(
    id: PlayerId,
    name: &str,
    club: &str,
    nationality: &str,
    position: &str,
    age: u8,
    goals: u32,
    assists: u32,
    matches: u32,
    rating: f32,
) -> Player {
    Player {
        id,
        name: name.to_string(),
        club: club.to_string(),
        nationality: nationality.to_string(),
        position: position.to_string(),
        age,
        goals,
        assists,
        matches,
        rating,
    }
}

fn builtin_players() -> Vec<Player> {
    vec![
        player(1, "Lionel Messi", "Inter Miami", "Argentina", "Forward", 38, 850, 380, 1090, 9.2),
        player(2, "Cristiano Ronaldo", "Al Nassr", "Portugal", "Forward", 41, 940, 260, 1250, 9.0),
        player(3, "Kylian Mbappe", "Real Madrid", "France", "Forward", 27, 350, 150, 480, 8.9),
        player(4, "Erling Haaland", "Manchester City", "Norway", "Forward", 26, 280, 60, 340, 8.8),
        player(5, "Kevin De Bruyne", "Manchester City", "Belgium", "Midfielder", 34, 160, 290, 620, 8.7),
        player(6, "Luka Modric", "Real Madrid", "Croatia", "Midfielder", 40, 90, 130, 850, 8.5),
        player(7, "Jude Bellingham", "Real Madrid", "England", "Midfielder", 23, 90, 70, 320, 8.6),
        player(8, "Rodri", "Manchester City", "Spain", "Defensive Midfielder", 30, 40, 50, 420, 8.7),
        player(9, "Virgil van Dijk", "Liverpool", "Netherlands", "Defender", 34, 45, 20, 540, 8.4),
        player(10, "Achraf Hakimi", "Paris Saint-Germain", "Morocco", "Defender", 27, 50, 80, 390, 8.2),
        player(11, "Ruben Dias", "Manchester City", "Portugal", "Defender", 29, 15, 10, 380, 8.3),
        player(12, "Thibaut Courtois", "Real Madrid", "Belgium", "Goalkeeper", 34, 0, 1, 680, 8.6),
        player(13, "Alisson Becker", "Liverpool", "Brazil", "Goalkeeper", 33, 1, 2, 540, 8.5),
        player(14, "Vinicius Junior", "Real Madrid", "Brazil", "Winger", 26, 180, 110, 400, 8.8),
        player(15, "Lamine Yamal", "Barcelona", "Spain", "Winger", 19, 60, 50, 150, 8.7),
        player(16, "Pedri", "Barcelona", "Spain", "Midfielder", 23, 40, 45, 250, 8.4),
        player(17, "Harry Kane", "Bayern Munich", "England", "Forward", 32, 450, 120, 700, 8.8),
        player(18, "Mohamed Salah", "Liverpool", "Egypt", "Winger", 33, 380, 170, 740, 8.9),
    ]
}

fn builtin_teams() -> Vec<Team> {
    vec![
        Team {
            id: 1,
            name: "Real Madrid".to_string(),
            country: "ESP".to_string(),
            squad_size: 26,
            country_full: Some("Spain".to_string()),
            founded: Some(1902),
            stadium: Some("Santiago Bernabeu".to_string()),
            capacity: Some(81_044),
            coach: Some("Xabi Alonso".to_string()),
            league: Some("La Liga".to_string()),
        },
        Team {
            id: 2,
            name: "Barcelona".to_string(),
            country: "ESP".to_string(),
            squad_size: 25,
            country_full: Some("Spain".to_string()),
            founded: Some(1899),
            stadium: Some("Camp Nou".to_string()),
            capacity: Some(99_354),
            coach: Some("Hansi Flick".to_string()),
            league: Some("La Liga".to_string()),
        },
        Team {
            id: 3,
            name: "Manchester City".to_string(),
            country: "ENG".to_string(),
            squad_size: 24,
            country_full: Some("England".to_string()),
            founded: Some(1880),
            stadium: Some("Etihad Stadium".to_string()),
            capacity: Some(53_400),
            coach: Some("Pep Guardiola".to_string()),
            league: Some("Premier League".to_string()),
        },
        Team {
            id: 4,
            name: "Liverpool".to_string(),
            country: "ENG".to_string(),
            squad_size: 25,
            country_full: Some("England".to_string()),
            founded: Some(1892),
            stadium: Some("Anfield".to_string()),
            capacity: Some(61_276),
            coach: Some("Arne Slot".to_string()),
            league: Some("Premier League".to_string()),
        },
        Team {
            id: 5,
            name: "Bayern Munich".to_string(),
            country: "GER".to_string(),
            squad_size: 25,
            country_full: Some("Germany".to_string()),
            founded: Some(1900),
            stadium: Some("Allianz Arena".to_string()),
            capacity: Some(75_024),
            coach: Some("Vincent Kompany".to_string()),
            league: Some("Bundesliga".to_string()),
        },
        Team {
            id: 6,
            name: "Paris Saint-Germain".to_string(),
            country: "FRA".to_string(),
            squad_size: 26,
            country_full: Some("France".to_string()),
            founded: Some(1970),
            stadium: Some("Parc des Princes".to_string()),
            capacity: Some(47_929),
            coach: Some("Luis Enrique".to_string()),
            league: Some("Ligue 1".to_string()),
        },
        Team {
            id: 7,
            name: "Inter Miami".to_string(),
            country: "USA".to_string(),
            squad_size: 28,
            country_full: Some("United States".to_string()),
            founded: Some(2018),
            stadium: Some("Chase Stadium".to_string()),
            capacity: Some(21_550),
            coach: Some("Javier Mascherano".to_string()),
            league: Some("Major League Soccer".to_string()),
        },
        // Sparse record; the detail overlay shows per-field fallbacks.
        Team {
            id: 8,
            name: "Al Nassr".to_string(),
            country: "KSA".to_string(),
            squad_size: 27,
            country_full: Some("Saudi Arabia".to_string()),
            founded: Some(1955),
            stadium: Some("Al-Awwal Park".to_string()),
            capacity: None,
            coach: None,
            league: Some("Saudi Pro League".to_string()),
        },
    ]
}
