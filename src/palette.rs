// Static color tables for tyre compounds and teams

use crate::color::Color;
use crate::session::Compound;

/// Fixed compound palette used for tyre stint charts
pub const COMPOUND_COLORS: [(Compound, Color); 5] = [
    (Compound::Soft, Color::rgb(0xfc, 0x44, 0x32)),
    (Compound::Medium, Color::rgb(0xe8, 0xd4, 0x02)),
    (Compound::Hard, Color::WHITE),
    (Compound::Intermediate, Color::rgb(0x3b, 0xc8, 0x2c)),
    (Compound::Wet, Color::rgb(0x17, 0x88, 0xff)),
];

/// Team colors keyed by a lowercase fragment of the team name
pub const TEAM_COLORS: [(&str, Color); 12] = [
    ("mercedes", Color::rgb(0x00, 0xd2, 0xbe)),
    ("ferrari", Color::rgb(0xdc, 0x00, 0x00)),
    ("red bull", Color::rgb(0x06, 0x00, 0xef)),
    ("mclaren", Color::rgb(0xff, 0x87, 0x00)),
    ("alpine", Color::rgb(0x00, 0x90, 0xff)),
    ("aston martin", Color::rgb(0x00, 0x6f, 0x62)),
    ("alfa romeo", Color::rgb(0x90, 0x00, 0x00)),
    ("sauber", Color::rgb(0x52, 0xe2, 0x52)),
    ("haas", Color::rgb(0xff, 0xff, 0xff)),
    ("alphatauri", Color::rgb(0x2b, 0x45, 0x62)),
    ("rb", Color::rgb(0x66, 0x92, 0xff)),
    ("williams", Color::rgb(0x00, 0x5a, 0xff)),
];

pub fn compound_color(compound: Compound) -> Color {
    COMPOUND_COLORS
        .iter()
        .find(|(c, _)| *c == compound)
        .map(|(_, color)| *color)
        .unwrap_or(Color::WHITE)
}

/// Looks a team up by name. An exact fragment match wins over a partial one so
/// that "RB" does not shadow "Red Bull Racing".
pub fn team_color(team: &str) -> Option<Color> {
    let team = team.trim().to_lowercase();
    if team.is_empty() {
        return None;
    }
    TEAM_COLORS
        .iter()
        .find(|(fragment, _)| *fragment == team)
        .or_else(|| {
            TEAM_COLORS
                .iter()
                .filter(|(fragment, _)| fragment.len() > 2)
                .find(|(fragment, _)| team.contains(fragment))
        })
        .map(|(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_palette() {
        assert_eq!(compound_color(Compound::Soft).to_hex(), "#fc4432");
        assert_eq!(compound_color(Compound::Medium).to_hex(), "#e8d402");
        assert_eq!(compound_color(Compound::Hard), Color::WHITE);
        assert_eq!(compound_color(Compound::Intermediate).to_hex(), "#3bc82c");
        assert_eq!(compound_color(Compound::Wet).to_hex(), "#1788ff");
    }

    #[test]
    fn test_team_color_partial_match() {
        assert_eq!(
            team_color("Red Bull Racing"),
            Some(Color::rgb(0x06, 0x00, 0xef))
        );
        assert_eq!(team_color("Scuderia FERRARI"), Some(Color::rgb(0xdc, 0, 0)));
        assert_eq!(team_color("RB"), Some(Color::rgb(0x66, 0x92, 0xff)));
    }

    #[test]
    fn test_team_color_unknown() {
        assert_eq!(team_color("Minardi"), None);
        assert_eq!(team_color("  "), None);
    }
}
