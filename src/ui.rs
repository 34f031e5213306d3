pub mod starfield;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::Completion;
use crate::chat::ChatLog;
use crate::theme::Background;
use crate::timer::{Phase, TimerSnapshot};

pub const CONTROLS: &str = "SPACE=pause | B=back | Q=quit | C=chat | S=stats | O=color | N=new";

const MIN_BAR_WIDTH: u16 = 20;
const BAR_RESERVED: u16 = 30;
const CONTENT_X: u16 = 2;
const CHAT_PANE_WIDTH: u16 = 48;
const CHAT_PANE_MIN_X: u16 = 50;
const CHAT_LINE_COLUMNS: usize = 45;

const HEADER_ROW: u16 = 1;
const CLOCK_ROW: u16 = 3;
const BAR_ROW: u16 = 5;
const STATUS_ROW: u16 = 7;
const PANEL_ROW: u16 = 9;
const CHAT_ROW: u16 = 10;
/// Rows kept clear below the chat pane.
const CHAT_BOTTOM_MARGIN: u16 = 8;

/// Everything one frame of the timer view depends on.
#[derive(Debug, Clone)]
pub struct TimerView<'a> {
    pub snapshot: TimerSnapshot,
    pub username: &'a str,
    pub background: Background,
    pub star_phase: u64,
    pub chat_log: &'a ChatLog,
    pub completion: Option<&'a Completion>,
}

pub fn draw(f: &mut Frame, view: &TimerView) {
    f.render_widget(view, f.area());
}

/// Width of the progress bar body for a terminal `width` columns wide.
pub fn bar_width(width: u16) -> u16 {
    width.saturating_sub(BAR_RESERVED).max(MIN_BAR_WIDTH)
}

/// `[████░░░░]` with `progress` in `0.0..=1.0`.
pub fn progress_bar(progress: f64, width: u16) -> String {
    let width = width as usize;
    let filled = ((width as f64) * progress.clamp(0.0, 1.0)) as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Left edge of the chat pane, when the terminal is wide enough for one.
pub fn chat_pane_x(width: u16) -> Option<u16> {
    width
        .checked_sub(CHAT_PANE_WIDTH)
        .filter(|x| *x > CHAT_PANE_MIN_X)
}

impl Widget for &TimerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = &self.snapshot;
        let tint = Style::default().fg(self.background.color());
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let green = Style::default().fg(Color::LightGreen);
        let solar = Style::default().fg(Color::LightYellow);
        let red = Style::default().fg(Color::LightRed);

        buf.set_style(area, tint);

        // last row belongs to the controls line
        let sky = Rect {
            height: area.height.saturating_sub(1),
            ..area
        };
        starfield::render(sky, self.star_phase, tint, buf);

        let header = format!(
            "🎯 Goal: {}m ({}min) | User: {}",
            snap.distance_goal,
            snap.goal_minutes(),
            self.username
        );
        put(buf, sky, 0, HEADER_ROW, &header, tint.patch(bold));

        let clock = format!("⏱  {}", format_clock(snap.elapsed.as_secs()));
        put(buf, sky, CONTENT_X, CLOCK_ROW, &clock, tint.patch(bold));

        let progress = snap.progress();
        let bar = progress_bar(progress, bar_width(area.width));
        let bar_style = if progress < 1.0 { green } else { solar };
        let bar_end = put(buf, sky, CONTENT_X, BAR_ROW, &bar, bar_style);
        put(
            buf,
            sky,
            bar_end,
            BAR_ROW,
            &format!(" {:.0}m", snap.distance),
            tint,
        );

        let (status, status_style) = match snap.phase {
            Phase::Running => ("▶ RUNNING", green),
            Phase::Paused => ("⏸ PAUSED", solar),
            Phase::Stopped => ("⏹ STOPPED", red),
        };
        put(buf, sky, CONTENT_X, STATUS_ROW, status, status_style.patch(bold));

        let chat_x = chat_pane_x(area.width);
        if let Some(completion) = self.completion {
            let panel = Rect {
                width: chat_x.map_or(sky.width, |x| x.saturating_sub(1)),
                ..sky
            };
            render_completion(completion, panel, buf, solar, green, tint);
        }
        if let Some(x) = chat_x {
            render_chat(self.chat_log, sky, x, buf, tint);
        }

        if area.height > 0 {
            let controls = Rect {
                y: area.bottom() - 1,
                height: 1,
                ..area
            };
            put(buf, controls, 0, 0, CONTROLS, Style::reset());
        }
    }
}

fn render_completion(
    completion: &Completion,
    area: Rect,
    buf: &mut Buffer,
    solar: Style,
    green: Style,
    tint: Style,
) {
    let lines = [
        ("🎉 Congratulations! Goal Reached! 🎉".to_string(), solar),
        (
            format!("Distance covered: {:.0}m", completion.distance),
            green,
        ),
        (format!("💡 Break Advice: {}", completion.advice), tint),
        ("💧 Remember to drink water!".to_string(), tint),
        (format!("✨ Wisdom: {}", completion.wisdom), tint),
        (
            "Press N for new timer, S for stats, Q to quit".to_string(),
            tint,
        ),
    ];
    for (offset, (text, style)) in lines.iter().enumerate() {
        put(buf, area, CONTENT_X, PANEL_ROW + offset as u16, text, *style);
    }
}

fn render_chat(log: &ChatLog, area: Rect, x: u16, buf: &mut Buffer, tint: Style) {
    let last_row = area.height.saturating_sub(CHAT_BOTTOM_MARGIN);
    if CHAT_ROW >= last_row {
        return;
    }
    put(buf, area, x, CHAT_ROW, "💬 CHAT WITH WISDOM BOT", tint);

    let rows = (last_row - CHAT_ROW - 1) as usize;
    for (idx, msg) in log.tail(rows).enumerate() {
        put(
            buf,
            area,
            x,
            CHAT_ROW + 1 + idx as u16,
            clip_columns(msg, CHAT_LINE_COLUMNS),
            tint,
        );
    }
}

/// Write `text` at (`x`, `row`) relative to `area`, clipped to it.
/// Returns the relative column just past the written text.
fn put(buf: &mut Buffer, area: Rect, x: u16, row: u16, text: &str, style: Style) -> u16 {
    if row >= area.height || x >= area.width {
        return x;
    }
    let max = (area.width - x) as usize;
    let (end, _) = buf.set_stringn(area.x + x, area.y + row, text, max, style);
    end - area.x
}

/// Longest prefix of `text` that fits in `columns` terminal cells.
fn clip_columns(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > columns {
            return &text[..idx];
        }
    }
    text
}
