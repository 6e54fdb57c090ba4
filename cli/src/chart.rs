use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prioritask_core::{max_priority, PriorityBar, MAX_PRIORITY};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Draws pending task priorities. Never writes to the store.
pub trait ChartRenderer {
    fn render(&mut self, bars: &[PriorityBar]) -> Result<()>;
}

impl<T: ChartRenderer + ?Sized> ChartRenderer for &mut T {
    fn render(&mut self, bars: &[PriorityBar]) -> Result<()> {
        (**self).render(bars)
    }
}

impl<T: ChartRenderer + ?Sized> ChartRenderer for Box<T> {
    fn render(&mut self, bars: &[PriorityBar]) -> Result<()> {
        (**self).render(bars)
    }
}

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    bar: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    bar: Color::LightBlue,
};

const LABEL_WIDTH: usize = 28;
const PLAIN_BLOCKS_PER_POINT: usize = 4;

pub struct ChartApp {
    pub bars: Vec<PriorityBar>,
    pub offset: usize,
}

impl ChartApp {
    pub fn new(bars: Vec<PriorityBar>) -> Self {
        Self { bars, offset: 0 }
    }

    pub fn scroll_down(&mut self) {
        if self.offset + 1 < self.bars.len() {
            self.offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn visible(&self) -> &[PriorityBar] {
        &self.bars[self.offset.min(self.bars.len())..]
    }
}

/// Full-screen horizontal bar chart.
pub struct TerminalChart;

impl ChartRenderer for TerminalChart {
    fn render(&mut self, bars: &[PriorityBar]) -> Result<()> {
        run(bars.to_vec())
    }
}

/// Text bars for pipes and non-interactive terminals.
pub struct PlainChart<W: Write> {
    out: W,
}

impl<W: Write> PlainChart<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChartRenderer for PlainChart<W> {
    fn render(&mut self, bars: &[PriorityBar]) -> Result<()> {
        write_plain(&mut self.out, bars)
    }
}

pub fn run(bars: Vec<PriorityBar>) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = ChartApp::new(bars);
    let res = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut ChartApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                        KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                        _ => {}
                    }
                }
            }
        }
    }
}

fn ui(frame: &mut Frame, app: &ChartApp) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(3),    // Chart
            Constraint::Length(1), // Footer / Help
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled(
        "TASK PRIORITY VISUALIZATION",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, layout[0]);

    draw_chart(frame, app.visible(), layout[1]);

    let help = Line::from(vec![
        Span::styled("SCROLL: ", Style::default().fg(THEME.muted)),
        Span::styled("j/k ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), layout[2]);
}

fn draw_chart(frame: &mut Frame, bars: &[PriorityBar], area: Rect) {
    let bar_items: Vec<Bar> = bars
        .iter()
        .map(|b| {
            Bar::default()
                .label(truncate_label(&b.label, LABEL_WIDTH))
                .value(u64::from(b.priority))
                .style(Style::default().fg(THEME.bar))
                .text_value(b.priority.to_string())
        })
        .collect();

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(" Priority ");

    let chart = BarChart::default()
        .block(chart_block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bar_items))
        .max(u64::from(MAX_PRIORITY));

    frame.render_widget(chart, area);
}

pub fn write_plain<W: Write>(out: &mut W, bars: &[PriorityBar]) -> Result<()> {
    writeln!(out, "Task Priority Visualization")?;
    let label_width = bars
        .iter()
        .map(|b| truncate_label(&b.label, LABEL_WIDTH).width())
        .max()
        .unwrap_or(0);
    let scale = usize::from(max_priority(bars).max(1)) * PLAIN_BLOCKS_PER_POINT;

    for bar in bars {
        let label = truncate_label(&bar.label, LABEL_WIDTH);
        let padding = " ".repeat(label_width - label.width());
        let filled = usize::from(bar.priority) * PLAIN_BLOCKS_PER_POINT;
        writeln!(
            out,
            "{}{} | {}{} {}",
            label,
            padding,
            "█".repeat(filled),
            " ".repeat(scale - filled),
            bar.priority
        )?;
    }
    writeln!(out, "{} +- Priority", " ".repeat(label_width))?;
    Ok(())
}

/// Cuts `label` to at most `max` display columns, marking the cut with `…`.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.width() <= max {
        return label.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in label.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(id: i64, label: &str, priority: u8) -> PriorityBar {
        PriorityBar {
            id,
            label: label.to_string(),
            priority,
        }
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("exactly ten", 11), "exactly ten");
        assert_eq!(truncate_label("a much longer label", 8), "a much …");
        assert_eq!(truncate_label("締め切り間近のタスク", 7), "締め切…");
    }

    #[test]
    fn test_write_plain_scales_bars() {
        let bars = vec![bar(1, "Fix prod", 5), bar(2, "Milk", 0)];
        let mut out = Vec::new();
        write_plain(&mut out, &bars).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Task Priority Visualization");
        assert_eq!(lines[1], format!("Fix prod | {} 5", "█".repeat(20)));
        assert_eq!(lines[2], format!("Milk     | {} 0", " ".repeat(20)));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_plain_chart_renderer_writes_to_inner() {
        let mut chart = PlainChart::new(Vec::new());
        chart.render(&[bar(1, "Call", 2)]).unwrap();
        let text = String::from_utf8(chart.into_inner()).unwrap();
        assert!(text.contains("Call | ████████ 2"));
    }

    #[test]
    fn test_chart_app_scrolling() {
        let mut app = ChartApp::new(vec![bar(1, "a", 3), bar(2, "b", 2), bar(3, "c", 1)]);
        app.scroll_up();
        assert_eq!(app.offset, 0);
        app.scroll_down();
        app.scroll_down();
        app.scroll_down();
        assert_eq!(app.offset, 2);
        assert_eq!(app.visible().len(), 1);
        app.scroll_up();
        assert_eq!(app.visible()[0].label, "b");
    }
}
