pub mod charting;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as Segment, Points},
        Axis, Block, Chart, Dataset, GraphType, Paragraph, Widget,
    },
};
use unicode_width::UnicodeWidthStr;

use crate::{
    game::Game,
    physics::{Bounds, Position, Vec2},
    trail::Axis as TrailAxis,
};

pub const DEFAULT_GLYPH: &str = "➤";

const TRAIL_COLOR: Color = Color::Gray;
const X_GRAPH_COLOR: Color = Color::Red;
const Y_GRAPH_COLOR: Color = Color::Blue;

/// Screen areas of the game view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub canvas: Rect,
    pub x_graph: Rect,
    pub y_graph: Rect,
    pub legend: Rect,
}

pub fn panes(area: Rect) -> Panes {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),         // canvas
            Constraint::Percentage(35), // graphs
            Constraint::Length(1),      // legend
        ])
        .split(area);

    let graphs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    Panes {
        canvas: rows[0],
        x_graph: graphs[0],
        y_graph: graphs[1],
        legend: rows[2],
    }
}

fn canvas_block() -> Block<'static> {
    Block::bordered().title(" glide ")
}

/// Maps terminal cells onto canvas world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub area: Rect,
    pub bounds: Bounds,
}

impl Viewport {
    /// Viewport of the canvas pane for a frame of size `area`
    pub fn for_frame(area: Rect, bounds: Bounds) -> Self {
        Self {
            area: canvas_block().inner(panes(area).canvas),
            bounds,
        }
    }

    /// World position of the center of cell (`column`, `row`), or `None`
    /// if the cell lies outside the canvas.
    pub fn to_world(&self, column: u16, row: u16) -> Option<Position> {
        let a = self.area;
        if a.width == 0
            || a.height == 0
            || column < a.x
            || row < a.y
            || column >= a.x + a.width
            || row >= a.y + a.height
        {
            return None;
        }

        let fx = (f64::from(column - a.x) + 0.5) / f64::from(a.width);
        let fy = (f64::from(row - a.y) + 0.5) / f64::from(a.height);
        Some(Vec2::new(fx * self.bounds.width, fy * self.bounds.height))
    }

    /// Width of one terminal cell in world units
    fn cell_width(&self) -> f64 {
        if self.area.width == 0 {
            0.0
        } else {
            self.bounds.width / f64::from(self.area.width)
        }
    }
}

/// Renders a [`Game`]: canvas with trail, cursor and timer, the two
/// coordinate graphs, and the control legend.
pub struct GameView<'a> {
    pub game: &'a Game,
    pub glyph: &'a str,
}

impl<'a> GameView<'a> {
    pub fn new(game: &'a Game, glyph: &'a str) -> Self {
        Self { game, glyph }
    }

    fn render_canvas(&self, area: Rect, buf: &mut Buffer) {
        let bounds = self.game.bounds();
        let viewport = Viewport {
            area: canvas_block().inner(area),
            bounds,
        };
        let trail = &self.game.session_state.trail;
        let cursor = self.game.position();
        let h = bounds.height;

        // center the glyph on the cursor cell
        let shift = (self.glyph.width().saturating_sub(1) as f64 / 2.0) * viewport.cell_width();
        let glyph_x = (cursor.x - shift).max(0.0);

        let timer_text = format!("Time: {}s", self.game.elapsed_secs());

        Canvas::default()
            .block(canvas_block())
            .marker(Marker::Braille)
            .x_bounds([0.0, bounds.width])
            .y_bounds([0.0, bounds.height])
            .paint(|ctx| {
                match trail.points() {
                    [] => {}
                    [only] => ctx.draw(&Points {
                        coords: &[(only.x, h - only.y)],
                        color: TRAIL_COLOR,
                    }),
                    points => {
                        for (a, b) in points.iter().tuple_windows() {
                            ctx.draw(&Segment {
                                x1: a.x,
                                y1: h - a.y,
                                x2: b.x,
                                y2: h - b.y,
                                color: TRAIL_COLOR,
                            });
                        }
                    }
                }

                ctx.print(
                    glyph_x,
                    h - cursor.y,
                    Span::styled(
                        self.glyph.to_string(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                );
                ctx.print(
                    0.0,
                    h,
                    Span::styled(
                        timer_text.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                );
            })
            .render(area, buf);
    }

    fn render_graph(&self, axis: TrailAxis, area: Rect, buf: &mut Buffer) {
        let bounds = self.game.bounds();
        let trail = &self.game.session_state.trail;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let (title, extent, color) = match axis {
            TrailAxis::X => ("X Coordinate", bounds.width, X_GRAPH_COLOR),
            TrailAxis::Y => ("Y Coordinate", bounds.height, Y_GRAPH_COLOR),
        };

        let graph_height = f64::from(area.height.max(1));
        let points = charting::graph_points(trail, axis, extent, graph_height);
        let time_bound = charting::time_bound(trail.len());

        let datasets = vec![Dataset::default()
            .marker(Marker::Braille)
            .style(Style::default().fg(color))
            .graph_type(GraphType::Line)
            .data(&points)];

        Chart::new(datasets)
            .block(Block::bordered().title(Span::styled(title, bold_style)))
            .x_axis(
                Axis::default()
                    .title("tick")
                    .bounds([0.0, time_bound])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(charting::format_label(time_bound), bold_style),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .bounds([0.0, graph_height])
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(charting::format_label(extent), bold_style),
                    ]),
            )
            .render(area, buf);
    }

    fn render_legend(&self, area: Rect, buf: &mut Buffer) {
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);
        let start_style = if self.game.can_start() {
            italic_style.add_modifier(Modifier::BOLD)
        } else {
            italic_style.add_modifier(Modifier::DIM)
        };

        Paragraph::new(Line::from(vec![
            Span::styled("(enter) start", start_style),
            Span::styled(" / (r)eset / (esc)ape   arrows or wasd to steer, drag to pull", italic_style),
        ]))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panes = panes(area);
        self.render_canvas(panes.canvas, buf);
        self.render_graph(TrailAxis::X, panes.x_graph, buf);
        self.render_graph(TrailAxis::Y, panes.y_graph, buf);
        self.render_legend(panes.legend, buf);
    }
}
