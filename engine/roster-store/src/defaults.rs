use rank_aggregator::RosterEntry;

/// Roster written on first run when no roster file exists
const DEFAULT_ROSTER: [(&str, &str); 15] = [
    ("Patrick Mahomes", "QB"),
    ("Brian Thomas Jr.", "WR"),
    ("Terry McLaurin", "WR"),
    ("Chris Olave", "WR"),
    ("Deebo Samuel Sr.", "WR"),
    ("Wan'Dale Robinson", "WR"),
    ("Bijan Robinson", "RB"),
    ("Tony Pollard", "RB"),
    ("Quinshon Judkins", "RB"),
    ("Rhamondre Stevenson", "RB"),
    ("Woody Marks", "RB"),
    ("Kyle Pitts", "RB"),
    ("Trey McBride", "TE"),
    ("Brandon Aubrey", "K"),
    ("Buffalo Bills", "DEF"),
];

pub fn default_roster() -> Vec<RosterEntry> {
    DEFAULT_ROSTER.iter().map(|(name, position)| RosterEntry::new(*name, *position)).collect()
}
