//! Series tiers and leagues: the scoring taxonomy for postseason games.

use std::fmt;

/// A postseason series tier. Each tier carries a fixed point weight
/// and a repository label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    WildCard,
    DivisionSeries,
    ChampionshipSeries,
    WorldSeries,
}

impl Series {
    pub const ALL: [Series; 4] = [
        Series::WildCard,
        Series::DivisionSeries,
        Series::ChampionshipSeries,
        Series::WorldSeries,
    ];

    /// Classify a raw series code (`ALWC`, `NLDS`, `WS`, ...).
    ///
    /// Total over any input: an unrecognized string falls back to the
    /// lowest tier rather than failing, so an unanticipated site change
    /// degrades scoring instead of aborting the pipeline.
    pub fn classify(raw: &str) -> Series {
        let code = raw.to_uppercase();
        if code.contains("WS") || code.contains("WORLD") {
            Series::WorldSeries
        } else if code.contains("CS") {
            Series::ChampionshipSeries
        } else if code.contains("DS") {
            Series::DivisionSeries
        } else {
            // Covers "WC" and the lossy fallback for unknown codes.
            Series::WildCard
        }
    }

    /// Points awarded per closed game in this tier.
    pub fn points(self) -> u32 {
        match self {
            Series::WildCard => 1,
            Series::DivisionSeries => 2,
            Series::ChampionshipSeries => 3,
            Series::WorldSeries => 4,
        }
    }

    /// The repository label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            Series::WildCard => "series:wc",
            Series::DivisionSeries => "series:ds",
            Series::ChampionshipSeries => "series:cs",
            Series::WorldSeries => "series:ws",
        }
    }

    /// Label color, matching the repository's taxonomy.
    pub fn color(self) -> &'static str {
        match self {
            Series::WildCard => "fbca04",
            Series::DivisionSeries => "f9d0c4",
            Series::ChampionshipSeries => "d4c5f9",
            Series::WorldSeries => "e99695",
        }
    }

    /// Label description shown in the repository's label list.
    pub fn description(self) -> &'static str {
        match self {
            Series::WildCard => "Wild Card Series - 1 point per win",
            Series::DivisionSeries => "Divisional Series - 2 points per win",
            Series::ChampionshipSeries => "Championship Series - 3 points per win",
            Series::WorldSeries => "World Series - 4 points per win",
        }
    }

    /// Short name for league-table columns.
    pub fn short_name(self) -> &'static str {
        match self {
            Series::WildCard => "WC",
            Series::DivisionSeries => "DS",
            Series::ChampionshipSeries => "CS",
            Series::WorldSeries => "WS",
        }
    }

    /// The canonical series code for issue titles, rebuilt from the tier
    /// and the league prefix (`ALCS`, `NLWC`, bare `WS`).
    pub fn code(self, league: Option<League>) -> String {
        let prefix = league.map_or("", League::prefix);
        match self {
            Series::WildCard => format!("{prefix}WC"),
            Series::DivisionSeries => format!("{prefix}DS"),
            Series::ChampionshipSeries => format!("{prefix}CS"),
            Series::WorldSeries => "WS".to_string(),
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Series::WildCard => "Wild Card",
            Series::DivisionSeries => "Divisional",
            Series::ChampionshipSeries => "Championship",
            Series::WorldSeries => "World Series",
        };
        f.write_str(name)
    }
}

/// League grouping for league-scoped series. The World Series has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    American,
    National,
}

impl League {
    pub const ALL: [League; 2] = [League::American, League::National];

    /// Extract the league from a raw series code by prefix.
    /// `WS` and anything unrecognized carry no league.
    pub fn from_code(raw: &str) -> Option<League> {
        let code = raw.to_uppercase();
        if code.starts_with("AL") {
            Some(League::American)
        } else if code.starts_with("NL") {
            Some(League::National)
        } else {
            None
        }
    }

    /// The repository label for this league.
    pub fn label(self) -> &'static str {
        match self {
            League::American => "american",
            League::National => "national",
        }
    }

    /// Series-code prefix (`AL` / `NL`).
    pub fn prefix(self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }

    /// Label color, matching the repository's taxonomy.
    pub fn color(self) -> &'static str {
        match self {
            League::American => "0052cc",
            League::National => "c5def5",
        }
    }

    /// Label description shown in the repository's label list.
    pub fn description(self) -> &'static str {
        match self {
            League::American => "American League",
            League::National => "National League",
        }
    }
}
