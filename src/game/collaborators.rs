//! Capabilities the game core drives but does not implement.
//!
//! The state machine only ever talks to a [`Renderer`], a [`HighScoreStore`]
//! and a [`Sound`]; the terminal front end, the JSON store and the bell are
//! plugged in from outside. [`DisplayProfile`] is the device-class query used
//! to pick message wording and size.

use std::io;

use super::error::StoreError;
use super::grid::Position;
use super::segment::SegmentColor;

/// Relative text size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSize {
    Large,
    Medium,
    Small,
}

impl FontSize {
    /// Nominal size in points before device scaling
    pub fn points(&self) -> u16 {
        match self {
            FontSize::Large => 40,
            FontSize::Medium => 28,
            FontSize::Small => 16,
        }
    }
}

/// Where a message sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextPosition {
    /// The message line, a quarter of the way down the board
    Headline,
    /// `n` lines below the headline
    BelowHeadline(u16),
}

/// A single semantic drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawIntent {
    Segment {
        pos: Position,
        color: SegmentColor,
    },
    Text {
        text: String,
        size: FontSize,
        position: TextPosition,
    },
}

/// Draw target for the board
pub trait Renderer {
    /// Forget everything drawn so far
    fn clear(&mut self);

    fn draw_segment(&mut self, pos: Position, color: SegmentColor);

    fn draw_text(&mut self, text: &str, size: FontSize, position: TextPosition);
}

/// A renderer that keeps the intents of the last redraw for a front end to paint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    intents: Vec<DrawIntent>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> impl Iterator<Item = (Position, SegmentColor)> + '_ {
        self.intents.iter().filter_map(|intent| match intent {
            DrawIntent::Segment { pos, color } => Some((*pos, *color)),
            DrawIntent::Text { .. } => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, FontSize, TextPosition)> + '_ {
        self.intents.iter().filter_map(|intent| match intent {
            DrawIntent::Text {
                text,
                size,
                position,
            } => Some((text.as_str(), *size, *position)),
            DrawIntent::Segment { .. } => None,
        })
    }
}

impl Renderer for DrawList {
    fn clear(&mut self) {
        self.intents.clear();
    }

    fn draw_segment(&mut self, pos: Position, color: SegmentColor) {
        self.intents.push(DrawIntent::Segment { pos, color });
    }

    fn draw_text(&mut self, text: &str, size: FontSize, position: TextPosition) {
        self.intents.push(DrawIntent::Text {
            text: text.to_string(),
            size,
            position,
        });
    }
}

/// Where the best score survives between runs
pub trait HighScoreStore {
    fn load_high_score(&mut self) -> Result<u32, StoreError>;

    fn save_high_score(&mut self, score: u32) -> Result<(), StoreError>;
}

/// Sound effects. Failures are reported but never stop a round.
pub trait Sound {
    fn play_eat_sound(&mut self) -> io::Result<()>;

    fn play_game_over_sound(&mut self) -> io::Result<()>;
}

/// Kind of device the game is shown on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

/// Width breakpoints dividing small, medium and large displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    pub medium_start: u16,
    pub large_start: u16,
}

impl Default for Breakpoints {
    /// Terminal column equivalents of 600px / 960px
    fn default() -> Self {
        Self {
            medium_start: 60,
            large_start: 96,
        }
    }
}

/// Device class and text scale for the current display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayProfile {
    pub device: DeviceClass,
    pub font_scale: f32,
}

impl Default for DisplayProfile {
    fn default() -> Self {
        Self {
            device: DeviceClass::Desktop,
            font_scale: 1.0,
        }
    }
}

impl DisplayProfile {
    pub fn detect(width: u16, touch: bool, breakpoints: Breakpoints) -> Self {
        let small = width < breakpoints.medium_start;
        let medium = !small && width < breakpoints.large_start;

        let device = match (touch, small, medium) {
            (true, true, _) => DeviceClass::Mobile,
            (true, _, true) => DeviceClass::Tablet,
            _ => DeviceClass::Desktop,
        };

        let font_scale = match device {
            DeviceClass::Mobile => 0.6,
            _ if medium => 0.7,
            _ if small => 0.5,
            _ => 1.0,
        };

        Self { device, font_scale }
    }

    /// Touch-style devices get tap wording instead of key wording
    pub fn is_touch(&self) -> bool {
        matches!(self.device, DeviceClass::Mobile | DeviceClass::Tablet)
    }

    /// Size in points after scaling
    pub fn scaled(&self, size: FontSize) -> f32 {
        f32::from(size.points()) * self.font_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_records_and_clears() {
        let mut list = DrawList::new();
        list.draw_segment(Position::new(1, 2), SegmentColor::Red);
        list.draw_text("hi", FontSize::Large, TextPosition::Headline);

        assert_eq!(
            list.segments().collect::<Vec<_>>(),
            vec![(Position::new(1, 2), SegmentColor::Red)]
        );
        assert_eq!(
            list.texts().collect::<Vec<_>>(),
            vec![("hi", FontSize::Large, TextPosition::Headline)]
        );

        list.clear();
        assert_eq!(list, DrawList::new());
    }

    #[test]
    fn test_device_detection() {
        let bp = Breakpoints::default();

        assert_eq!(DisplayProfile::detect(40, true, bp).device, DeviceClass::Mobile);
        assert_eq!(DisplayProfile::detect(70, true, bp).device, DeviceClass::Tablet);
        assert_eq!(DisplayProfile::detect(120, true, bp).device, DeviceClass::Desktop);
        assert_eq!(DisplayProfile::detect(40, false, bp).device, DeviceClass::Desktop);
    }

    #[test]
    fn test_font_scale_by_width() {
        let bp = Breakpoints::default();

        assert_eq!(DisplayProfile::detect(40, true, bp).font_scale, 0.6);
        assert_eq!(DisplayProfile::detect(40, false, bp).font_scale, 0.5);
        assert_eq!(DisplayProfile::detect(60, false, bp).font_scale, 0.7);
        assert_eq!(DisplayProfile::detect(96, false, bp).font_scale, 1.0);
        assert_eq!(DisplayProfile::detect(96, false, bp).scaled(FontSize::Large), 40.0);
    }
}
