//! Terminal demo: a scrolling text pane with an overlay scrollbar that fades
//! out after scrolling and fades back in when the mouse approaches it.
//!
//! Scroll with the wheel, drag the thumb, press `q` to quit. Logs go to
//! `overlay.log`.

use std::fs::File;
use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::{cursor, execute, queue, terminal};
use palette::{LinSrgb, Mix, Srgb};
use simplelog::{Config, LevelFilter, WriteLogger};

use scrollfade::{
    DelayedAnimationTask, DelayedTaskQueue, ElementId, PointF, RectF, ScrollbarAnimationClient,
    ScrollbarAnimationController, ScrollbarAnimationSettings, ScrollbarLayer, ScrollbarOrientation,
};

/// Device pixels per terminal cell, so proximity thresholds span a few cells.
const CELL_WIDTH: f32 = 8.0;
const CELL_HEIGHT: f32 = 16.0;

const FRAME: Duration = Duration::from_millis(16);
const PANE: ElementId = ElementId(1);
const LINES: usize = 200;

const BACKGROUND: Srgb<u8> = Srgb::new(30, 30, 46);
const TEXT: Srgb<u8> = Srgb::new(205, 214, 244);
const THUMB: Srgb<u8> = Srgb::new(137, 180, 250);

/// The pane's vertical scrollbar, laid out in the rightmost column.
struct PaneScrollbar {
    column: u16,
    rows: u16,
    offset: usize,
    opacity: f32,
    thickness_scale: f32,
}

impl PaneScrollbar {
    fn max_offset(&self) -> usize {
        LINES.saturating_sub(self.rows as usize)
    }

    /// Thumb position and length in rows.
    fn thumb_rows(&self) -> (u16, u16) {
        let rows = self.rows.max(1) as usize;
        let length = (rows * rows / LINES).clamp(1, rows);
        let travel = rows - length;
        let max_offset = self.max_offset().max(1);
        let start = self.offset * travel / max_offset;
        (start as u16, length as u16)
    }

    fn scroll_by(&mut self, delta: isize) -> bool {
        let offset = self.offset.saturating_add_signed(delta).min(self.max_offset());
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }

    /// Scroll so the thumb starts at `row`.
    fn drag_to(&mut self, row: u16) -> bool {
        let (_, length) = self.thumb_rows();
        let travel = self.rows.saturating_sub(length).max(1) as usize;
        let offset = (row as usize).min(travel) * self.max_offset() / travel;
        let changed = offset != self.offset;
        self.offset = offset;
        changed
    }
}

impl ScrollbarLayer for PaneScrollbar {
    fn orientation(&self) -> ScrollbarOrientation {
        ScrollbarOrientation::Vertical
    }

    fn is_overlay_scrollbar(&self) -> bool {
        true
    }

    fn can_scroll_orientation(&self) -> bool {
        self.max_offset() > 0
    }

    fn set_overlay_scrollbar_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }

    fn thumb_thickness_scale_factor(&self) -> f32 {
        self.thickness_scale
    }

    fn set_thumb_thickness_scale_factor(&mut self, scale: f32) {
        self.thickness_scale = scale;
    }

    fn track_rect(&self) -> RectF {
        RectF::new(
            self.column as f32 * CELL_WIDTH,
            0.0,
            CELL_WIDTH,
            self.rows as f32 * CELL_HEIGHT,
        )
    }

    fn thumb_rect(&self) -> RectF {
        let (start, length) = self.thumb_rows();
        RectF::new(
            self.column as f32 * CELL_WIDTH,
            start as f32 * CELL_HEIGHT,
            CELL_WIDTH,
            length as f32 * CELL_HEIGHT,
        )
    }
}

struct DemoHost {
    scrollbar: PaneScrollbar,
    queue: DelayedTaskQueue,
    needs_animate: bool,
    needs_redraw: bool,
}

impl ScrollbarAnimationClient for DemoHost {
    fn scrollbars_for(&mut self, scroll_element_id: ElementId) -> Vec<&mut dyn ScrollbarLayer> {
        if scroll_element_id == PANE {
            vec![&mut self.scrollbar as &mut dyn ScrollbarLayer]
        } else {
            Vec::new()
        }
    }

    fn set_needs_animate_for_scrollbar_animation(&mut self) {
        self.needs_animate = true;
    }

    fn set_needs_redraw_for_scrollbar_animation(&mut self) {
        self.needs_redraw = true;
    }

    fn did_change_scrollbar_visibility(&mut self) {
        log::info!("scrollbar visible: {}", self.scrollbar.opacity > 0.0);
        self.needs_redraw = true;
    }

    fn post_delayed_scrollbar_animation_task(&mut self, task: DelayedAnimationTask, delay: Duration) {
        self.queue.post(task, Instant::now(), delay);
    }
}

fn main() -> io::Result<()> {
    let log_file = File::create("overlay.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut controller = ScrollbarAnimationSettings::aura_overlay()
        .fade_duration(Duration::from_millis(300))
        .create_controller(PANE)
        .map_err(io::Error::other)?
        .expect("aura overlay always animates");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        event::EnableMouseCapture,
        event::EnableFocusChange
    )?;

    let result = run(&mut stdout, &mut controller);

    execute!(
        stdout,
        event::DisableFocusChange,
        event::DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout, controller: &mut ScrollbarAnimationController) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    let mut host = DemoHost {
        scrollbar: PaneScrollbar {
            column: width.saturating_sub(1),
            rows: height,
            offset: 0,
            opacity: 0.0,
            thickness_scale: 0.4,
        },
        queue: DelayedTaskQueue::new(),
        needs_animate: false,
        needs_redraw: true,
    };

    loop {
        if host.needs_redraw {
            render(stdout, &host.scrollbar)?;
            host.needs_redraw = false;
        }

        let timeout = if host.needs_animate {
            Some(FRAME)
        } else {
            host.queue
                .next_due()
                .map(|due| due.saturating_duration_since(Instant::now()))
        };
        let has_event = match timeout {
            Some(timeout) => event::poll(timeout)?,
            None => true,
        };

        if has_event {
            match event::read()? {
                CrosstermEvent::Key(key) if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) => {
                    return Ok(());
                }
                CrosstermEvent::Mouse(mouse) => handle_mouse(&mut host, controller, mouse),
                CrosstermEvent::FocusLost => controller.did_mouse_leave(&mut host),
                CrosstermEvent::Resize(width, height) => {
                    host.scrollbar.column = width.saturating_sub(1);
                    host.scrollbar.rows = height;
                    host.scrollbar.scroll_by(0);
                    host.needs_redraw = true;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        for task in host.queue.take_due(now) {
            controller.run_delayed_animation(&mut host, task);
        }

        if host.needs_animate {
            host.needs_animate = false;
            if controller.animate(&mut host, now) {
                host.needs_redraw = true;
            }
        }
    }
}

fn handle_mouse(
    host: &mut DemoHost,
    controller: &mut ScrollbarAnimationController,
    mouse: MouseEvent,
) {
    let point = PointF::new(
        (mouse.column as f32 + 0.5) * CELL_WIDTH,
        (mouse.row as f32 + 0.5) * CELL_HEIGHT,
    );

    match mouse.kind {
        MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
            let delta = if mouse.kind == MouseEventKind::ScrollDown { 3 } else { -3 };
            if host.scrollbar.scroll_by(delta) {
                controller.did_scroll_update(host);
                host.needs_redraw = true;
            }
        }
        MouseEventKind::Moved => controller.did_mouse_move(host, point),
        MouseEventKind::Down(MouseButton::Left) => controller.did_mouse_down(host),
        MouseEventKind::Up(MouseButton::Left) => controller.did_mouse_up(host),
        MouseEventKind::Drag(MouseButton::Left) => {
            controller.did_mouse_move(host, point);
            if controller.captured() && host.scrollbar.drag_to(mouse.row) {
                host.needs_redraw = true;
            }
        }
        _ => {}
    }
}

/// Blend the thumb over the background by the scrollbar's opacity.
fn thumb_color(opacity: f32) -> CtColor {
    let background: LinSrgb = BACKGROUND.into_format::<f32>().into_linear();
    let thumb: LinSrgb = THUMB.into_format::<f32>().into_linear();
    let blended: Srgb<u8> = Srgb::<f32>::from_linear(background.mix(thumb, opacity)).into_format();
    CtColor::Rgb {
        r: blended.red,
        g: blended.green,
        b: blended.blue,
    }
}

fn ct_color(color: Srgb<u8>) -> CtColor {
    CtColor::Rgb {
        r: color.red,
        g: color.green,
        b: color.blue,
    }
}

fn render(stdout: &mut Stdout, scrollbar: &PaneScrollbar) -> io::Result<()> {
    let text_width = scrollbar.column as usize;
    let (thumb_start, thumb_length) = scrollbar.thumb_rows();
    let thumb_glyph = if scrollbar.thickness_scale > 0.7 { "█" } else { "▐" };

    queue!(stdout, SetBackgroundColor(ct_color(BACKGROUND)))?;
    for row in 0..scrollbar.rows {
        let line = format!("{:>4}  overlay scrollbar demo line", scrollbar.offset + row as usize + 1);
        let line: String = line.chars().take(text_width).collect();
        queue!(
            stdout,
            cursor::MoveTo(0, row),
            SetForegroundColor(ct_color(TEXT)),
            Print(format!("{:<width$}", line, width = text_width)),
            cursor::MoveTo(scrollbar.column, row),
        )?;

        let on_thumb = row >= thumb_start && row < thumb_start + thumb_length;
        if on_thumb && scrollbar.opacity > 0.0 {
            queue!(
                stdout,
                SetForegroundColor(thumb_color(scrollbar.opacity)),
                Print(thumb_glyph)
            )?;
        } else {
            queue!(stdout, Print(" "))?;
        }
    }
    queue!(stdout, ResetColor)?;
    stdout.flush()
}
