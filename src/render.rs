//! Terminal rendering of a [`ClockFrame`].
//!
//! [`rasterize`] is pure: it lays the dial, markers, numerals, hands and the
//! digital readout into a grid of cells tagged with a [`Role`]. [`draw`] then
//! paints that grid with the theme's palette using crossterm.

use std::io::Write;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::clock::face;
use crate::constants::{
    CELL_ASPECT_RATIO, HOUR_HAND_LENGTH, MINUTE_HAND_LENGTH, SECOND_HAND_LENGTH,
};
use crate::theme::{Palette, Theme};
use crate::widget::ClockFrame;

/// Rows reserved under the dial for the readout and hints
const TEXT_ROWS: u16 = 3;

/// What a cell depicts, which decides its colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Empty,
    Marker,
    MajorMarker,
    Numeral,
    HourHand,
    MinuteHand,
    SecondHand,
    Center,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub role: Role,
}

const BLANK: Cell = Cell {
    ch: ' ',
    role: Role::Empty,
};

/// A grid of cells the size of the terminal.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![BLANK; usize::from(width) * usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        (x < self.width && y < self.height)
            .then(|| self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)])
    }

    fn put(&mut self, x: i32, y: i32, ch: char, role: Role) {
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return;
        }
        let idx = y as usize * usize::from(self.width) + x as usize;
        self.cells[idx] = Cell { ch, role };
    }

    fn put_text(&mut self, x: i32, y: i32, text: &str, role: Role) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i32, y, ch, role);
        }
    }

    /// Text centred horizontally on row `y`.
    fn put_centered(&mut self, y: i32, text: &str, role: Role) {
        let len = text.chars().count() as i32;
        let x = (i32::from(self.width) - len) / 2;
        self.put_text(x, y, text, role);
    }

    /// One row as a string, for tests and plain-text output.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.cell(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

/// Dial placement inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Dial {
    cx: f64,
    cy: f64,
    /// Radius in rows; columns are stretched by the cell aspect ratio
    radius: f64,
}

impl Dial {
    fn fit(width: u16, height: u16) -> Self {
        let rows = height.saturating_sub(TEXT_ROWS).max(1);
        let by_rows = f64::from(rows.saturating_sub(1)) / 2.0;
        let by_cols = f64::from(width.saturating_sub(1)) / 2.0 / CELL_ASPECT_RATIO;
        let radius = by_rows.min(by_cols).floor();
        Self {
            cx: f64::from(width / 2),
            cy: radius,
            radius,
        }
    }

    /// Cell at `distance` (in radius units) along `deg`, measured clockwise
    /// from 12 o'clock.
    fn point(&self, deg: f64, distance: f64) -> (i32, i32) {
        let rad = deg.to_radians();
        let x = self.cx + distance * rad.sin() * CELL_ASPECT_RATIO;
        let y = self.cy - distance * rad.cos();
        (x.round() as i32, y.round() as i32)
    }
}

/// Line character that best follows a hand pointing at `deg`.
fn hand_char(deg: f64) -> char {
    // Fold to [0, 180): a hand and its opposite use the same glyph
    let folded = deg.rem_euclid(180.0);
    match folded {
        d if !(22.5..157.5).contains(&d) => '|',
        d if d < 67.5 => '/',
        d if d < 112.5 => '-',
        _ => '\\',
    }
}

fn draw_hand(canvas: &mut Canvas, dial: &Dial, deg: f64, length: f64, role: Role) {
    let ch = hand_char(deg);
    let reach = dial.radius * length;
    let steps = (reach * 4.0).ceil().max(1.0) as u32;
    for step in 1..=steps {
        let distance = reach * f64::from(step) / f64::from(steps);
        let (x, y) = dial.point(deg, distance);
        canvas.put(x, y, ch, role);
    }
}

/// Lay out a full frame on a `width` x `height` canvas.
///
/// `face_size` is the reference face size used to place numerals at the same
/// relative radius a pixel-based face would use.
pub fn rasterize(frame: &ClockFrame, width: u16, height: u16, face_size: u32) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    let dial = Dial::fit(width, height);

    if dial.radius >= 2.0 {
        for marker in face::markers() {
            let (x, y) = dial.point(marker.angle_deg, dial.radius);
            if marker.major {
                canvas.put(x, y, '●', Role::MajorMarker);
            } else {
                canvas.put(x, y, '·', Role::Marker);
            }
        }

        let half = f64::from(face_size) / 2.0;
        for numeral in face::numerals(face_size, face_size) {
            let ratio = (numeral.radius / half).min(0.85);
            // Numeral angles are measured from 3 o'clock
            let (x, y) = dial.point(numeral.angle_deg + 90.0, dial.radius * ratio);
            let text = numeral.value.to_string();
            canvas.put_text(x - text.len() as i32 / 2, y, &text, Role::Numeral);
        }

        // Renderer works from 12 o'clock; undo whatever surface offset was applied
        let offset = frame.convention.offset_deg();
        draw_hand(
            &mut canvas,
            &dial,
            frame.angles.hour_deg - offset,
            HOUR_HAND_LENGTH,
            Role::HourHand,
        );
        draw_hand(
            &mut canvas,
            &dial,
            frame.angles.minute_deg - offset,
            MINUTE_HAND_LENGTH,
            Role::MinuteHand,
        );
        draw_hand(
            &mut canvas,
            &dial,
            frame.angles.second_deg - offset,
            SECOND_HAND_LENGTH,
            Role::SecondHand,
        );
        canvas.put(dial.cx as i32, dial.cy as i32, 'o', Role::Center);
    }

    let text_top = (dial.cy + dial.radius) as i32 + 1;
    canvas.put_centered(
        text_top,
        &format!("{}  ({})", frame.digital, frame.zone_label),
        Role::Text,
    );
    canvas.put_centered(
        text_top + 1,
        &format!(
            "{}   sound {}",
            frame.theme.toggle_label(),
            if frame.sound_enabled { "on" } else { "off" }
        ),
        Role::Text,
    );
    canvas.put_centered(
        text_top + 2,
        "d: theme  z: zone  s: sound  q: quit",
        Role::Text,
    );

    canvas
}

fn role_color(palette: &Palette, role: Role) -> crossterm::style::Color {
    match role {
        Role::Empty => palette.background,
        Role::Marker => palette.marker,
        Role::MajorMarker => palette.major_marker,
        Role::Numeral => palette.numeral,
        Role::HourHand | Role::Center => palette.hour_hand,
        Role::MinuteHand => palette.minute_hand,
        Role::SecondHand => palette.second_hand,
        Role::Text => palette.text,
    }
}

/// Paint `canvas` to `out` in the colours of `theme`.
///
/// Every cell is rewritten, so the screen is never cleared between frames.
pub fn draw<W: Write>(out: &mut W, canvas: &Canvas, theme: Theme) -> std::io::Result<()> {
    let palette = theme.palette();
    queue!(out, SetBackgroundColor(palette.background))?;

    for y in 0..canvas.height() {
        queue!(out, MoveTo(0, y))?;
        let mut current: Option<Role> = None;
        for x in 0..canvas.width() {
            let Some(cell) = canvas.cell(x, y) else {
                continue;
            };
            if current != Some(cell.role) {
                queue!(out, SetForegroundColor(role_color(&palette, cell.role)))?;
                current = Some(cell.role);
            }
            queue!(out, Print(cell.ch))?;
        }
    }

    queue!(out, ResetColor)?;
    out.flush()
}
