use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::bracket::{BracketGrid, EliminationView};
use crate::state::app_state::{FormState, StatField, TeamTab, TournamentTab};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use arena_api::{BracketData, EliminationBracket, Team, TeamDetail, TournamentDetail};

static TABS: &[&str; 5] = &["Tournaments", "Bracket", "Teams", "Profile", "Admin"];

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    terminal
        .draw(|f| {
            layout.update(f.area(), app.settings.full_screen);

            if !app.settings.full_screen {
                draw_tabs(f, layout.tab_bar, app);
                draw_status_line(f, layout.status, app);
            }

            let mut main = layout.main;
            if app.state.show_logs && main.height > 12 {
                let [top, logs] =
                    Layout::vertical([Constraint::Fill(1), Constraint::Length(10)]).areas(main);
                main = top;
                draw_logs(f, logs);
            }

            match app.state.active_tab {
                MenuItem::Tournaments => draw_tournaments(f, main, app),
                MenuItem::Bracket => draw_bracket(f, main, app),
                MenuItem::Teams => draw_teams(f, main, app),
                MenuItem::Profile => draw_profile(f, main, app),
                MenuItem::Admin => draw_admin(f, main, app),
                MenuItem::Help => draw_help(f, main),
            }

            draw_loading_spinner(f, f.area(), app, loading);
        })
        .unwrap();
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Tournaments => 0,
        MenuItem::Bracket => 1,
        MenuItem::Teams => 2,
        MenuItem::Profile => 3,
        MenuItem::Admin => 4,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let who = app
        .state
        .session
        .as_ref()
        .map(|s| s.username.clone())
        .unwrap_or_else(|| "guest".to_owned());
    let user = Paragraph::new(format!("{who} ?=help "))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(user, tab_bar[1]);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let (text, style) = match app.state.status_line.as_deref() {
        Some(msg) if msg.starts_with("Action failed") => {
            (msg.to_owned(), Style::default().fg(Color::Red))
        }
        Some(msg) => (msg.to_owned(), Style::default().fg(Color::Green)),
        None => (
            "q=quit  1-5=tabs  R=retry  \"=logs".to_owned(),
            Style::default().fg(Color::DarkGray),
        ),
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(widget, area);
}

fn error_paragraph(message: &str) -> Paragraph<'_> {
    Paragraph::new(format!("{message}\n\nPress R to try again"))
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

fn draw_tournaments(f: &mut Frame, area: Rect, app: &App) {
    if let Some(detail) = app.state.tournaments.detail.as_ref() {
        draw_tournament_detail(f, area, app, detail);
        return;
    }

    let block = default_border(Color::White).title(" Tournaments ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(err) = app.state.tournaments.error.as_deref() {
        f.render_widget(error_paragraph(err), inner);
        return;
    }
    if app.state.tournaments.tournaments.is_empty() {
        f.render_widget(
            Paragraph::new("Loading tournaments...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let filter = app
        .state
        .tournaments
        .game_filter
        .as_deref()
        .map(|g| format!("filter: {g}"))
        .unwrap_or_else(|| "filter: all games".to_owned());
    let visible = app.state.tournaments.visible();

    let mut lines = Vec::with_capacity(visible.len() + 2);
    lines.push(Line::from(Span::styled(
        format!("j/k=move  Enter=detail  G=game filter  R=reload   {filter}"),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    for (idx, t) in visible.iter().enumerate() {
        let marker = if idx == app.state.tournaments.selected { ">" } else { " " };
        let registered = if app.state.tournaments.registered.contains(&t.id) { "*" } else { " " };
        let style = if idx == app.state.tournaments.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let status_style = if t.status.is_live() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{registered} {:<28}", clip(&t.name, 28)), style),
            Span::styled(format!("{:<14}", clip(&t.game, 14)), Style::default().fg(Color::Gray)),
            Span::styled(format!("{:<18}", t.status.label()), status_style),
            Span::styled(
                format!("{:<18}", t.bracket_type.label()),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(t.slots_label(), Style::default().fg(Color::DarkGray)),
        ]));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_tournament_detail(f: &mut Frame, area: Rect, app: &App, detail: &TournamentDetail) {
    let t = &detail.tournament;
    let block = default_border(Color::White).title(format!(" {} ", t.name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [tab_line, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let tabs = [TournamentTab::Overview, TournamentTab::Participants, TournamentTab::Bracket];
    let mut spans = Vec::new();
    for tab in tabs {
        let style = if tab == app.state.tournaments.detail_tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
    }
    spans.push(Span::styled("  Tab=switch  Esc=back", Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(Line::from(spans)), tab_line);

    match app.state.tournaments.detail_tab {
        TournamentTab::Overview => {
            let mut lines = vec![
                format!("Game:           {}", t.game),
                format!("Status:         {}", t.status.label()),
                format!("Bracket:        {}", t.bracket_type.label()),
                format!("Participation:  {}", t.participation.label()),
                format!("Slots:          {}", t.slots_label()),
            ];
            if let Some(start) = t.start_date {
                lines.push(format!("Starts:         {start}"));
            }
            if let Some(end) = t.end_date {
                lines.push(format!("Ends:           {end}"));
            }
            if let Some(prize) = t.prize_pool.as_deref() {
                lines.push(format!("Prize pool:     {prize}"));
            }
            if !t.rules.is_empty() {
                lines.push(String::new());
                lines.push("Rules:".to_owned());
                for rule in &t.rules {
                    lines.push(format!("  - {rule}"));
                }
            }
            f.render_widget(Paragraph::new(lines.join("\n")), content);
        }
        TournamentTab::Participants => {
            if detail.participants.is_empty() {
                f.render_widget(
                    Paragraph::new("No participants registered yet")
                        .style(Style::default().fg(Color::DarkGray)),
                    content,
                );
                return;
            }
            let lines: Vec<String> = detail
                .participants
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{:>3}. {}", i + 1, p.name))
                .collect();
            f.render_widget(Paragraph::new(lines.join("\n")), content);
        }
        TournamentTab::Bracket => {
            f.render_widget(
                Paragraph::new("Press Enter (or b) to open the bracket view")
                    .style(Style::default().fg(Color::Gray))
                    .alignment(Alignment::Center),
                content,
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Bracket
// ---------------------------------------------------------------------------

fn draw_bracket(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.state.bracket.tournament.as_ref() {
        Some(t) => format!(" {} — {} ", t.name, t.bracket_type.label()),
        None => " Bracket ".to_owned(),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(tournament) = app.state.bracket.tournament.as_ref() else {
        f.render_widget(
            Paragraph::new("Open a tournament and pick its Bracket tab first")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    if let Some(err) = app.state.bracket.error.as_deref() {
        f.render_widget(error_paragraph(err), inner);
        return;
    }

    let [header, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    let refreshed = app
        .state
        .bracket
        .last_refreshed
        .as_deref()
        .map(|t| format!("updated {t}"))
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(format!("{} | {}  {refreshed}", tournament.status.label(), tournament.game))
            .style(Style::default().fg(Color::DarkGray)),
        header,
    );

    match app.state.bracket.data.as_ref() {
        None => f.render_widget(
            Paragraph::new("Loading bracket...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        ),
        Some(BracketData::Pending) => f.render_widget(
            Paragraph::new("Bracket not available yet.\nMatches appear once the organizer generates them.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center),
            content,
        ),
        Some(BracketData::Elimination(bracket)) => {
            draw_elimination(f, content, app, bracket);
        }
        Some(BracketData::Groups(_)) => draw_groups(f, content, app),
        Some(BracketData::BattleRoyale(_)) => draw_leaderboard(f, content, app),
    }
}

fn draw_elimination(f: &mut Frame, area: Rect, app: &App, bracket: &EliminationBracket) {
    let mut tree_area = area;
    let mut lower_area: Option<Rect> = None;
    if !bracket.lower.is_empty() && area.height >= 14 {
        let lower_height = (bracket.lower.len() as u16 + 3).min(area.height / 3);
        let [top, bottom] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(lower_height)]).areas(area);
        tree_area = top;
        lower_area = Some(bottom);
    }

    let [champion_line, grid_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(tree_area);

    match bracket.champion() {
        Some(team) => f.render_widget(
            Paragraph::new(format!("Champion: {}", team.name))
                .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            champion_line,
        ),
        None => f.render_widget(
            Paragraph::new("Champion: TBD").style(Style::default().fg(Color::DarkGray)),
            champion_line,
        ),
    }

    let grid = BracketGrid::compute(&bracket.upper, grid_area.width);

    // Auto-scroll so the selected seed stays in view on deep brackets.
    let selected_center = grid
        .cells
        .iter()
        .find(|c| {
            c.round_idx == app.state.bracket.selected_round
                && c.seed_idx == app.state.bracket.selected_seed
        })
        .map(|c| c.center_row)
        .unwrap_or(0);
    let max_scroll = grid.total_height.saturating_sub(grid_area.height);
    let scroll_offset = selected_center.saturating_sub(grid_area.height / 2).min(max_scroll);

    f.render_widget(
        EliminationView {
            rounds: &bracket.upper,
            grid: &grid,
            selected_round: app.state.bracket.selected_round,
            selected_seed: app.state.bracket.selected_seed,
            scroll_offset,
        },
        grid_area,
    );

    if let Some(lower) = lower_area {
        draw_lower_bracket(f, lower, bracket);
    }
}

/// Lower bracket as a compact per-round list; its rounds don't fit the
/// power-of-two tree the widget draws.
fn draw_lower_bracket(f: &mut Frame, area: Rect, bracket: &EliminationBracket) {
    let block = default_border(Color::DarkGray).title(" Lower Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = Vec::new();
    for round in &bracket.lower {
        let seeds: Vec<String> = round
            .seeds
            .iter()
            .map(|s| {
                format!(
                    "{} {}-{} {}",
                    s.teams[0].name, s.teams[0].score, s.teams[1].score, s.teams[1].name
                )
            })
            .collect();
        lines.push(format!("{}: {}", round.title, seeds.join("  |  ")));
    }
    let clipped: Vec<String> = lines
        .into_iter()
        .take(inner.height as usize)
        .map(|l| clip(&l, inner.width as usize))
        .collect();
    f.render_widget(Paragraph::new(clipped.join("\n")), inner);
}

fn draw_groups(f: &mut Frame, area: Rect, app: &App) {
    let Some(BracketData::Groups(groups)) = app.state.bracket.data.as_ref() else {
        return;
    };
    let Some(group) = groups.get(app.state.bracket.group_index) else {
        return;
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("{}  ({}/{})  g=next group  j/k=move", group.name, app.state.bracket.group_index + 1, groups.len()),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("   {:<4}{:<24}{:>4}{:>4}{:>4}", "#", "Team", "W", "D", "L"),
        Style::default().fg(Color::DarkGray),
    )));

    for (idx, s) in group.standings.iter().enumerate() {
        let marker = if idx == app.state.bracket.selected_row { ">" } else { " " };
        let style = if idx == app.state.bracket.selected_row {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{marker}  {:<4}{:<24}{:>4}{:>4}{:>4}",
                idx + 1,
                clip(&s.team_name, 24),
                s.wins,
                s.draws,
                s.losses
            ),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_leaderboard(f: &mut Frame, area: Rect, app: &App) {
    let Some(BracketData::BattleRoyale(participants)) = app.state.bracket.data.as_ref() else {
        return;
    };

    let hint = if app.state.bracket.editor.is_some() {
        "editing: digits=type  Tab=field  Enter=save  Esc=cancel"
    } else {
        "j/k=move  e=edit stats (admin)"
    };

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "   {:<4}{:<22}{:>7}{:>11}{:>8}{:>9}",
            "#", "Player", "Kills", "Placement", "Total", "Matches"
        ),
        Style::default().fg(Color::DarkGray),
    )));

    for (idx, p) in participants.iter().enumerate() {
        let selected = idx == app.state.bracket.selected_row;
        let marker = if selected { ">" } else { " " };

        // While editing the selected row, show the draft values inline.
        if selected && let Some(editor) = app.state.bracket.editor.as_ref() {
            let (kills, placement) = match editor.field {
                StatField::Kills => {
                    (format!("[{}]", editor.input), editor.draft.total_placement_points.to_string())
                }
                StatField::Placement => {
                    (editor.draft.total_kills.to_string(), format!("[{}]", editor.input))
                }
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{marker}  {:<4}{:<22}{:>7}{:>11}{:>8}{:>9}",
                    idx + 1,
                    clip(&editor.draft.name, 22),
                    kills,
                    placement,
                    "...",
                    editor.draft.matches_played
                ),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            continue;
        }

        let style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{marker}  {:<4}{:<22}{:>7}{:>11}{:>8}{:>9}",
                idx + 1,
                clip(&p.name, 22),
                p.total_kills,
                p.total_placement_points,
                p.total_points,
                p.matches_played
            ),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), area);
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

fn draw_teams(f: &mut Frame, area: Rect, app: &App) {
    if let Some(form) = app.state.teams.create_form.as_ref() {
        draw_form(
            f,
            area,
            " Create Team ",
            form,
            "j/k=field  i=edit  s=submit  Esc=cancel",
        );
        return;
    }
    if let (Some(team), detail) = (app.state.teams.open_team.as_ref(), app.state.teams.detail.as_ref())
    {
        draw_team_detail(f, area, app, team, detail);
        return;
    }

    let block = default_border(Color::White).title(" Teams ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(err) = app.state.teams.error.as_deref() {
        f.render_widget(error_paragraph(err), inner);
        return;
    }
    if app.state.teams.teams.is_empty() {
        f.render_widget(
            Paragraph::new("Loading teams...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines = Vec::with_capacity(app.state.teams.teams.len() + 2);
    lines.push(Line::from(Span::styled(
        "j/k=move  Enter=open  n=create team",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));

    for (idx, team) in app.state.teams.teams.iter().enumerate() {
        let marker = if idx == app.state.teams.selected { ">" } else { " " };
        let style = if idx == app.state.teams.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let tier = team.tier.as_deref().unwrap_or("-");
        let division = team.division.as_deref().unwrap_or("-");
        lines.push(Line::from(Span::styled(
            format!(
                "{marker} [{:<5}] {:<26} tier {:<4} div {:<10}",
                clip(&team.tag, 5),
                clip(&team.name, 26),
                tier,
                division
            ),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_team_detail(
    f: &mut Frame,
    area: Rect,
    app: &App,
    team: &Team,
    detail: Option<&TeamDetail>,
) {
    let block = default_border(Color::White).title(format!(" {} [{}] ", team.name, team.tag));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [tab_line, content] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);

    let tabs = [TeamTab::Overview, TeamTab::Members, TeamTab::Requests, TeamTab::Settings];
    let mut spans = Vec::new();
    for tab in tabs {
        let style = if tab == app.state.teams.tab {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
    }
    spans.push(Span::styled("  Tab=switch  Esc=back", Style::default().fg(Color::DarkGray)));
    f.render_widget(Paragraph::new(Line::from(spans)), tab_line);

    if let Some(err) = app.state.teams.error.as_deref() {
        f.render_widget(error_paragraph(err), content);
        return;
    }
    let Some(detail) = detail else {
        f.render_widget(
            Paragraph::new("Loading team...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
        return;
    };

    match app.state.teams.tab {
        TeamTab::Overview => {
            let stats = &detail.stats;
            let mut lines = vec![
                team.description.clone(),
                String::new(),
                format!(
                    "Record: {}W / {}D / {}L   win rate {:.1}%",
                    stats.wins, stats.draws, stats.losses, stats.win_rate
                ),
                format!("Members: {}", detail.members.len()),
            ];
            if let Some(tier) = team.tier.as_deref() {
                lines.push(format!("Tier: {tier}"));
            }
            if let Some(division) = team.division.as_deref() {
                lines.push(format!("Division: {division}"));
            }
            if !team.socials.is_empty() {
                lines.push(String::new());
                for social in &team.socials {
                    lines.push(format!("{}: {}", social.platform, social.url));
                }
            }
            f.render_widget(Paragraph::new(lines.join("\n")), content);
        }
        TeamTab::Members => {
            let lines: Vec<String> = detail
                .members
                .iter()
                .map(|m| {
                    let owner = if m.is_owner(team) { " (owner)" } else { "" };
                    format!("{:<20} {}{owner}", clip(&m.username, 20), m.role)
                })
                .collect();
            let text = if lines.is_empty() { "No members".to_owned() } else { lines.join("\n") };
            f.render_widget(Paragraph::new(text), content);
        }
        TeamTab::Requests => {
            if detail.requests.is_empty() {
                f.render_widget(
                    Paragraph::new("No pending join requests")
                        .style(Style::default().fg(Color::DarkGray)),
                    content,
                );
                return;
            }
            let mut lines = Vec::new();
            lines.push(Line::from(Span::styled(
                "j/k=move  a=accept  x=reject",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            for (idx, r) in detail.requests.iter().enumerate() {
                let marker = if idx == app.state.teams.selected_request { ">" } else { " " };
                let style = if idx == app.state.teams.selected_request {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                let rank = r.rank.as_deref().unwrap_or("-");
                let region = r.region.as_deref().unwrap_or("-");
                lines.push(Line::from(Span::styled(
                    format!("{marker} {:<20} rank {:<12} region {}", clip(&r.username, 20), rank, region),
                    style,
                )));
            }
            f.render_widget(Paragraph::new(lines), content);
        }
        TeamTab::Settings => {
            draw_form_fields(
                f,
                content,
                &app.state.teams.settings_form,
                "j/k=field  i=edit  s=save  d=delete team",
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Profile ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.state.session.is_none() {
        f.render_widget(
            Paragraph::new(
                "Not signed in.\nSign in on the web platform; arenatui reads the saved session\n(~/.config/arenatui/session.json, override with ARENATUI_SESSION_JSON).",
            )
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
            inner,
        );
        return;
    }
    if let Some(err) = app.state.profile.error.as_deref() {
        f.render_widget(error_paragraph(err), inner);
        return;
    }
    let Some(user) = app.state.profile.user.as_ref() else {
        f.render_widget(
            Paragraph::new("Loading profile...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let [info, form_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(inner);

    let verified = if user.is_verified { "verified" } else { "unverified" };
    let rank = user.rank.as_deref().unwrap_or("unranked");
    f.render_widget(
        Paragraph::new(format!(
            "{} — {} ({verified})\n{} points | rank {rank}",
            user.username,
            user.role.as_str(),
            user.points
        ))
        .style(Style::default().fg(Color::Gray)),
        info,
    );

    draw_form_fields(
        f,
        form_area,
        &app.state.profile.form,
        "j/k=field  i=edit  s=save  u=upload avatar",
    );
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

fn draw_admin(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" User Management ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(err) = app.state.admin.error.as_deref() {
        f.render_widget(error_paragraph(err), inner);
        return;
    }
    if app.state.admin.users.is_empty() {
        f.render_widget(
            Paragraph::new("Loading users...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(
        "j/k=move  v=toggle verified  t=cycle role  d=delete",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("   {:<6}{:<20}{:<28}{:<13}{:>7}  {}", "id", "username", "email", "role", "points", "verified"),
        Style::default().fg(Color::DarkGray),
    )));

    for (idx, user) in app.state.admin.users.iter().enumerate() {
        let marker = if idx == app.state.admin.selected { ">" } else { " " };
        let style = if idx == app.state.admin.selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let verified = if user.is_verified { "yes" } else { "no" };
        lines.push(Line::from(Span::styled(
            format!(
                "{marker}  {:<6}{:<20}{:<28}{:<13}{:>7}  {verified}",
                user.id,
                clip(&user.username, 20),
                clip(&user.email, 28),
                user.role.as_str(),
                user.points
            ),
            style,
        )));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn draw_form(f: &mut Frame, area: Rect, title: &str, form: &FormState, hint: &str) {
    let block = default_border(Color::White).title(title.to_owned());
    let inner = block.inner(area);
    f.render_widget(block, area);
    draw_form_fields(f, inner, form, hint);
}

fn draw_form_fields(f: &mut Frame, area: Rect, form: &FormState, hint: &str) {
    let mut lines = Vec::new();
    lines.push(Line::from(Span::styled(hint.to_owned(), Style::default().fg(Color::DarkGray))));
    lines.push(Line::from(""));

    for (idx, field) in form.fields.iter().enumerate() {
        let focused = idx == form.focused;
        let marker = if focused { ">" } else { " " };
        let label_style = Style::default().fg(if focused { Color::Yellow } else { Color::Gray });
        let value_style = if focused && form.editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let value = if focused && form.editing {
            format!("{}_", field.value)
        } else {
            field.value.clone()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {:<14}", field.label), label_style),
            Span::styled(value, value_style),
        ]));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    let text = "\
Tabs:      1=Tournaments  2=Bracket  3=Teams  4=Profile  5=Admin
Lists:     j/k=move  Enter=open  Esc=back  R=retry failed fetch
           G=cycle game filter on the tournament list
Brackets:  h/l=round  j/k=seed or row  g=next group  e=edit BR stats (admin)
Teams:     Tab=sub-tab  a/x=accept or reject request  s=save settings
           n=create team  d=delete team (owner)
Profile:   i=edit field  s=save  u=upload avatar from file path
Global:    f=full screen  \"=log pane  q=quit

Sign-in happens on the web platform; arenatui reads the saved session file.";
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

fn clip(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
