//! Plain-text rendering of the board, hands and targets.

use saboteur_core::{
    Board, CardKind, CellContent, Coord, GameState, Orientation, PathTile, Player, Side, Target,
    Treasure, COLS, ROWS,
};
use std::fmt::Write;

/// Single character for a laid or held tile
pub fn tile_glyph(tile: &PathTile) -> char {
    if tile.is_dead_end() {
        return 'x';
    }
    let open = Side::ALL.map(|side| tile.opening(side).is_open());
    match open {
        [true, true, true, true] => '+',
        [true, false, true, false] => '|',
        [false, true, false, true] => '-',
        // east-south and north-west bends
        [false, true, true, false] | [true, false, false, true] => '/',
        // south-west and north-east bends
        [false, false, true, true] | [true, true, false, false] => '\\',
        [false, true, true, true] | [true, false, true, true] => 'T',
        [true, true, true, false] | [true, true, false, true] => 'T',
        _ => 'o',
    }
}

fn cell_glyph(content: &CellContent) -> char {
    match content {
        CellContent::Empty => '.',
        CellContent::Start => 'S',
        CellContent::Tile(tile) => tile_glyph(tile),
        CellContent::Goal(goal) if !goal.revealed => '?',
        CellContent::Goal(goal) => match goal.treasure {
            Treasure::Gold => 'G',
            Treasure::Coal => 'c',
        },
    }
}

/// Draw the board, marking `highlights` with `*`
pub fn render_board(board: &Board, highlights: &[Coord]) -> String {
    let mut out = String::from("   ");
    for col in 0..COLS {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');

    for row in 0..ROWS {
        let _ = write!(out, "{row:>3}");
        for col in 0..COLS {
            let coord = Coord::new(row, col);
            let glyph = match board.cell(coord) {
                Some(cell) if cell.is_empty() && highlights.contains(&coord) => '*',
                Some(cell) => cell_glyph(&cell.content),
                None => ' ',
            };
            let _ = write!(out, "{glyph:>3}");
        }
        out.push('\n');
    }
    out
}

/// Describe one card the way the hand listing shows it
pub fn describe_card(kind: &CardKind) -> String {
    match kind {
        CardKind::Path(path) => {
            let turned = match path.orientation {
                Orientation::Upright => "",
                Orientation::Rotated => " (rotated)",
            };
            format!("{kind} {}{turned}", tile_glyph(&path.resolved()))
        }
        _ => kind.to_string(),
    }
}

/// List a player's hand with 1-based positions
pub fn render_hand(player: &Player) -> String {
    let mut out = format!("{} ({})\n", player.name, player.role());
    let broken: Vec<String> = player.sabotaged_tools().map(|t| t.to_string()).collect();
    if !broken.is_empty() {
        let _ = writeln!(out, "  broken: {}", broken.join(", "));
    }
    for (i, card) in player.hand().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, describe_card(&card.kind));
    }
    out
}

/// Describe legal targets, naming players by seat
pub fn render_targets(game: &GameState, targets: &[Target]) -> String {
    if targets.is_empty() {
        return "no legal targets".to_string();
    }
    let names: Vec<String> = targets
        .iter()
        .map(|target| match target {
            Target::Cell(coord) => coord.to_string(),
            Target::Player(id) => match game.player(*id) {
                Some(player) => format!("{}. {}", id + 1, player.name),
                None => format!("seat {}", id + 1),
            },
        })
        .collect();
    format!("targets: {}", names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use saboteur_core::{Card, GoalCard, Role, TileCategory, Tool, GOALS, START};

    use saboteur_core::Opening::{DeadEnd as D, Path as P, Rock as R};

    fn row_of(rendered: &str, row: usize) -> &str {
        rendered.lines().nth(row + 1).unwrap_or_default()
    }

    #[test]
    fn test_tile_glyphs() {
        assert_eq!(tile_glyph(&PathTile::cross()), '+');
        assert_eq!(tile_glyph(&PathTile::new(R, P, R, P, TileCategory::Pathway)), '-');
        assert_eq!(tile_glyph(&PathTile::new(P, R, P, R, TileCategory::Pathway)), '|');
        assert_eq!(tile_glyph(&PathTile::new(R, P, P, R, TileCategory::Pathway)), '/');
        assert_eq!(tile_glyph(&PathTile::new(R, D, R, D, TileCategory::DeadEnd)), 'x');
    }

    #[test]
    fn test_empty_board_layout() {
        let rendered = render_board(&Board::with_gold_at(0), &[]);
        assert_eq!(rendered.lines().count(), ROWS + 1);

        let start_row: Vec<char> = row_of(&rendered, START.row)
            .split_whitespace()
            .skip(1)
            .filter_map(|s| s.chars().next())
            .collect();
        assert_eq!(start_row[START.col], 'S');
        assert_eq!(start_row[GOALS[1].col], '?');
        assert_eq!(rendered.matches('?').count(), 3);
    }

    #[test]
    fn test_highlights_only_mark_empty_cells() {
        let board = Board::with_gold_at(0);
        let right = Coord::new(START.row, START.col + 1);
        let rendered = render_board(&board, &[right, START]);
        assert_eq!(rendered.matches('*').count(), 1);
        assert!(rendered.contains('S'));
    }

    #[test]
    fn test_laid_tiles_and_revealed_goals() {
        let mut board = Board::with_gold_at(1);
        board
            .place_tile(
                Coord::new(START.row, START.col + 1),
                PathTile::new(R, P, R, P, TileCategory::Pathway),
                Orientation::Upright,
            )
            .unwrap();
        board.reveal_goal(GOALS[1]).unwrap();
        let rendered = render_board(&board, &[]);
        assert!(row_of(&rendered, START.row).contains('-'));
        assert!(row_of(&rendered, START.row).contains('G'));

        let hidden = GoalCard::new(PathTile::cross(), Treasure::Coal);
        assert_eq!(cell_glyph(&CellContent::Goal(hidden)), '?');
    }

    #[test]
    fn test_hand_listing() {
        let mut player = Player::new(0, "Ana".to_string(), Role::GoldMiner);
        player.give_card(Card::new(1, CardKind::Map));
        player.give_card(Card::path(2, PathTile::new(R, P, P, R, TileCategory::Pathway)));
        player.sabotage_tool(Tool::Cart).unwrap();

        let rendered = render_hand(&player);
        assert!(rendered.starts_with("Ana (gold miner)"));
        assert!(rendered.contains("broken: cart"));
        assert!(rendered.contains("1. map"));
        assert!(rendered.contains("2. path /"));
    }

    #[test]
    fn test_rotated_card_description() {
        let mut card = Card::path(2, PathTile::new(R, R, P, P, TileCategory::Pathway));
        if let CardKind::Path(path) = &mut card.kind {
            path.orientation = Orientation::Rotated;
        }
        // A south-west bend turned around opens north and east
        assert_eq!(describe_card(&card.kind), "path \\ (rotated)");
    }
}
