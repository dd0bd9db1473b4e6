use arena_api::{BracketRound, Seed, SeedStatus, SeedTeam};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per seed cell: top-team line, status line, bottom-team line.
pub const GAME_HEIGHT: u16 = 3;

/// Width of the connector zone drawn between adjacent round columns.
pub const CONNECTOR_WIDTH: u16 = 3;

/// Maximum seed cell width in wider terminals.
const CELL_W_FULL: u16 = 24;

/// Slot height at bracket depth `d` (0 = leaf round).
/// sh(0) = GAME_HEIGHT; sh(d) = 2 * sh(d-1) + 1.
fn slot_height(depth: usize) -> u16 {
    let mut h = GAME_HEIGHT;
    for _ in 0..depth {
        h = 2 * h + 1;
    }
    h
}

// ---------------------------------------------------------------------------
// BracketGrid — layout engine for a normalized elimination tree
// ---------------------------------------------------------------------------

/// Pre-computed position for one seed cell within the bracket grid.
#[derive(Debug, Clone)]
pub struct SeedCell {
    /// Row of the status line (center of the 3-row cell), origin-relative.
    pub center_row: u16,
    /// Starting x-column of the cell within the grid.
    pub col: u16,
    pub round_idx: usize,
    pub seed_idx: usize,
}

/// Column order left → right: round 0 | conn | round 1 | conn | ... | final.
///
/// Center rows follow the triangle formula:
///   center[d][i] = sh(d)/2 + i * (sh(d+1) - sh(d))
/// so each parent sits midway between its two children.
#[derive(Debug, Clone)]
pub struct BracketGrid {
    pub cells: Vec<SeedCell>,
    pub round_cols: Vec<u16>,
    pub cell_width: u16,
    /// Total grid height in rows (= slot_height(rounds - 1)).
    pub total_height: u16,
}

impl BracketGrid {
    /// Compute the grid for a normalized round list. Round `r` is assumed to
    /// hold `2^(n-r-1)` seeds (the normalizer guarantees it).
    pub fn compute(rounds: &[BracketRound], terminal_width: u16) -> Self {
        let n = rounds.len().max(1);
        let connector_total = CONNECTOR_WIDTH * (n as u16 - 1);
        let per_col = terminal_width.saturating_sub(connector_total) / n as u16;
        let cell_width = per_col.max(8).min(CELL_W_FULL);
        let stride = cell_width + CONNECTOR_WIDTH;

        let round_cols: Vec<u16> = (0..n).map(|d| stride * d as u16).collect();
        let total_height = slot_height(n - 1);

        let mut cells = Vec::new();
        for (d, round) in rounds.iter().enumerate() {
            let first_center = slot_height(d) / 2;
            let spacing = slot_height(d) + 1;
            for i in 0..round.seeds.len() {
                cells.push(SeedCell {
                    center_row: first_center + i as u16 * spacing,
                    col: round_cols[d],
                    round_idx: d,
                    seed_idx: i,
                });
            }
        }

        Self { cells, round_cols, cell_width, total_height }
    }

    fn cells_for_round(&self, round_idx: usize) -> impl Iterator<Item = &SeedCell> {
        self.cells.iter().filter(move |c| c.round_idx == round_idx)
    }
}

// ---------------------------------------------------------------------------
// EliminationView widget
// ---------------------------------------------------------------------------

/// Renders a normalized elimination tree: one column per round, box-drawing
/// connectors joining each pair of children to their parent slot.
pub struct EliminationView<'a> {
    pub rounds: &'a [BracketRound],
    pub grid: &'a BracketGrid,
    pub selected_round: usize,
    pub selected_seed: usize,
    /// Vertical scroll in rows — deep brackets exceed terminal height.
    pub scroll_offset: u16,
}

impl<'a> Widget for EliminationView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < GAME_HEIGHT {
            return;
        }

        // Pass 1: seed cells.
        for cell in &self.grid.cells {
            let seed = self
                .rounds
                .get(cell.round_idx)
                .and_then(|r| r.seeds.get(cell.seed_idx));
            let selected =
                cell.round_idx == self.selected_round && cell.seed_idx == self.selected_seed;
            draw_seed_cell(seed, cell, self.grid.cell_width, selected, area, self.scroll_offset, buf);
        }

        // Pass 2: connectors. Each parent at round d+1 joins children 2j and
        // 2j+1 at round d.
        for d in 0..self.rounds.len().saturating_sub(1) {
            let children: Vec<&SeedCell> = self.grid.cells_for_round(d).collect();
            let conn_x = area.x + self.grid.round_cols[d] + self.grid.cell_width;
            for (j, parent) in self.grid.cells_for_round(d + 1).enumerate() {
                let (Some(top), Some(bot)) = (children.get(2 * j), children.get(2 * j + 1)) else {
                    continue;
                };
                draw_connector(
                    top.center_row,
                    parent.center_row,
                    bot.center_row,
                    conn_x,
                    area,
                    self.scroll_offset,
                    buf,
                );
            }
        }
    }
}

fn row_to_screen(area: Rect, row: u16, scroll: u16) -> Option<u16> {
    let adjusted = (row as i32) - (scroll as i32);
    if adjusted < 0 || adjusted >= area.height as i32 {
        return None;
    }
    Some(area.y + adjusted as u16)
}

fn draw_seed_cell(
    seed: Option<&Seed>,
    cell: &SeedCell,
    cell_width: u16,
    selected: bool,
    area: Rect,
    scroll: u16,
    buf: &mut Buffer,
) {
    let x = area.x + cell.col;
    if x >= area.x + area.width {
        return;
    }
    let avail = (area.x + area.width - x).min(cell_width) as usize;

    let dim = Style::default().fg(Color::DarkGray);
    let base = if selected {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    for (dy, slot) in [(0u16, 0usize), (1, 2), (2, 1)] {
        let Some(y) = row_to_screen(area, cell.center_row.saturating_sub(1) + dy, scroll) else {
            continue;
        };
        let (text, style) = match slot {
            2 => {
                // Status line between the two team rows.
                let label = match seed.map(|s| s.status) {
                    Some(SeedStatus::Played) => "final",
                    _ => "vs",
                };
                (format!("  {label}"), dim)
            }
            team_idx => {
                let team = seed.map(|s| &s.teams[team_idx]);
                let style = match team {
                    Some(t) if t.winner => Style::default()
                        .fg(Color::Green)
                        .add_modifier(if selected { Modifier::BOLD } else { Modifier::empty() }),
                    Some(t) if t.is_tbd() => dim,
                    _ => base,
                };
                (format_team_row(team, avail), style)
            }
        };
        let clipped: String = text.chars().take(avail).collect();
        buf.set_string(x, y, clipped, style);
    }
}

fn format_team_row(team: Option<&SeedTeam>, width: usize) -> String {
    let Some(team) = team else {
        return "TBD".to_owned();
    };
    let score = if team.is_tbd() { "--".to_owned() } else { format!("{:>2}", team.score) };
    let name_width = width.saturating_sub(4).max(3);
    let mut name: String = team.name.chars().take(name_width).collect();
    while name.chars().count() < name_width {
        name.push(' ');
    }
    format!("{name} {score}")
}

fn draw_connector(
    top: u16,
    mid: u16,
    bot: u16,
    x: u16,
    area: Rect,
    scroll: u16,
    buf: &mut Buffer,
) {
    let dim = Style::default().fg(Color::DarkGray);
    let limit_x = area.x + area.width;
    let put = |buf: &mut Buffer, cx: u16, row: u16, ch: &str| {
        if cx < limit_x
            && let Some(y) = row_to_screen(area, row, scroll)
        {
            buf.set_string(cx, y, ch, dim);
        }
    };

    put(buf, x, top, "─");
    put(buf, x + 1, top, "┐");
    put(buf, x, bot, "─");
    put(buf, x + 1, bot, "┘");
    for row in (top + 1)..bot {
        put(buf, x + 1, row, if row == mid { "├" } else { "│" });
    }
    put(buf, x + 2, mid, "─");
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_api::{Seed, SeedTeam};

    fn rounds_of(sizes: &[usize]) -> Vec<BracketRound> {
        sizes
            .iter()
            .map(|&n| BracketRound {
                title: String::new(),
                seeds: (0..n)
                    .map(|i| Seed {
                        id: i as i64,
                        teams: [SeedTeam::tbd(), SeedTeam::tbd()],
                        ..Default::default()
                    })
                    .collect(),
            })
            .collect()
    }

    #[test]
    fn slot_heights_double_plus_one() {
        assert_eq!(slot_height(0), 3);
        assert_eq!(slot_height(1), 7);
        assert_eq!(slot_height(2), 15);
        assert_eq!(slot_height(3), 31);
    }

    #[test]
    fn parents_sit_midway_between_their_children() {
        let rounds = rounds_of(&[4, 2, 1]);
        let grid = BracketGrid::compute(&rounds, 120);

        let centers = |d: usize| -> Vec<u16> {
            grid.cells_for_round(d).map(|c| c.center_row).collect()
        };
        assert_eq!(centers(0), vec![1, 5, 9, 13]);
        assert_eq!(centers(1), vec![3, 11]);
        assert_eq!(centers(2), vec![7]);
        assert_eq!(grid.total_height, 15);
        assert_eq!(grid.cells.len(), 7);
    }

    #[test]
    fn columns_advance_by_cell_plus_connector() {
        let rounds = rounds_of(&[2, 1]);
        let grid = BracketGrid::compute(&rounds, 200);
        assert_eq!(grid.cell_width, CELL_W_FULL);
        assert_eq!(grid.round_cols, vec![0, CELL_W_FULL + CONNECTOR_WIDTH]);
    }

    #[test]
    fn narrow_terminals_shrink_cells_to_a_floor() {
        let rounds = rounds_of(&[8, 4, 2, 1]);
        let grid = BracketGrid::compute(&rounds, 40);
        assert!(grid.cell_width >= 8);
        assert!(grid.cell_width < CELL_W_FULL);
    }
}
