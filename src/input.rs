//! Stateful byte-stream input parser: raw bytes in, typed [`InputEvent`]s out.
//!
//! Bytes arrive via [`InputParser::feed`] and are buffered; [`InputParser::parse_next`]
//! pulls complete events off the front of the buffer, leaving partial escape
//! sequences queued until more bytes arrive or [`InputParser::flush_idle`] is
//! called after an idle timeout.

use crate::event::{InputEvent, KeyCode, KeyboardEvent, Modifiers, MouseButton, MouseEvent};

const ESC: u8 = 0x1B;

/// Stateful CSI/SS3-aware byte-stream parser.
#[derive(Default)]
pub struct InputParser {
    buf: Vec<u8>,
}

impl InputParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes from the terminal to the internal buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Whether bytes remain buffered (a sequence is in progress).
    pub fn has_pending(&self) -> bool {
        !self.buf.is_empty()
    }

    /// Pull the next complete event from the buffer, or `None` if the
    /// buffer is empty or holds only an incomplete sequence.
    pub fn parse_next(&mut self) -> Option<InputEvent> {
        if self.buf.is_empty() {
            return None;
        }
        if self.buf[0] == ESC {
            return self.try_parse_escape();
        }
        self.decode_plain_char()
    }

    /// Force-interpret a pending lone Escape byte after an idle timeout, or
    /// drop a pending sequence that never completed. Returns the Escape
    /// event if that's what was pending, otherwise `None`.
    pub fn flush_idle(&mut self) -> Option<InputEvent> {
        if self.buf.is_empty() {
            return None;
        }
        if self.buf == [ESC] {
            self.buf.clear();
            return Some(InputEvent::Key(KeyboardEvent::new(KeyCode::Escape)));
        }
        self.buf.clear();
        None
    }

    fn try_parse_escape(&mut self) -> Option<InputEvent> {
        if self.buf.len() < 2 {
            return None; // lone ESC so far; wait for more bytes or an idle flush
        }
        match self.buf[1] {
            b'[' => self.try_parse_csi(),
            b'O' => self.try_parse_ss3(),
            _ => {
                // Not a recognized introducer: treat the ESC alone as Escape,
                // leave the rest of the buffer for the next call.
                self.buf.remove(0);
                Some(InputEvent::Key(KeyboardEvent::new(KeyCode::Escape)))
            }
        }
    }

    fn try_parse_ss3(&mut self) -> Option<InputEvent> {
        // ESC O <letter>
        if self.buf.len() < 3 {
            return None;
        }
        let letter = self.buf[2];
        self.buf.drain(0..3);
        let key = match letter {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            _ => return None,
        };
        Some(InputEvent::Key(KeyboardEvent::new(key)))
    }

    fn try_parse_csi(&mut self) -> Option<InputEvent> {
        // ESC [ <params/intermediates> <final>
        // Params: digits, ';', and a leading '<' for SGR mouse reports.
        let mut i = 2;
        let mouse = self.buf.get(i) == Some(&b'<');
        if mouse {
            i += 1;
        }
        let params_start = i;
        while let Some(&b) = self.buf.get(i) {
            if b.is_ascii_digit() || b == b';' {
                i += 1;
            } else {
                break;
            }
        }
        let params_end = i;
        let Some(&final_byte) = self.buf.get(i) else {
            return None; // sequence not complete yet
        };

        let params: Vec<u16> = self.buf[params_start..params_end]
            .split(|&b| b == b';')
            .map(|chunk| std::str::from_utf8(chunk).ok().and_then(|s| s.parse().ok()).unwrap_or(0))
            .collect();

        let total_len = i + 1;
        let event = if mouse {
            Self::decode_sgr_mouse(&params, final_byte)
        } else {
            Self::decode_csi_key(&params, final_byte)
        };
        self.buf.drain(0..total_len);
        event
    }

    fn decode_sgr_mouse(params: &[u16], final_byte: u8) -> Option<InputEvent> {
        if params.len() != 3 {
            return None;
        }
        let cb = params[0];
        let x = params[1].saturating_sub(1);
        let y = params[2].saturating_sub(1);
        let pressed = final_byte == b'M';

        let modifiers = Modifiers {
            shift: cb & 0x04 != 0,
            alt: cb & 0x08 != 0,
            ctrl: cb & 0x10 != 0,
        };

        let button = if cb & 0x40 != 0 {
            if cb & 0x01 == 0 { MouseButton::WheelUp } else { MouseButton::WheelDown }
        } else {
            match cb & 0x03 {
                0 => MouseButton::Left,
                1 => MouseButton::Middle,
                _ => MouseButton::Right,
            }
        };

        Some(InputEvent::Mouse(MouseEvent { button, x, y, pressed, modifiers }))
    }

    fn decode_csi_key(params: &[u16], final_byte: u8) -> Option<InputEvent> {
        let modifiers = params.get(1).copied().map(Modifiers::from_csi_param).unwrap_or(Modifiers::NONE);
        let key = match final_byte {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'~' => match params.first().copied().unwrap_or(0) {
                1 => KeyCode::Home,
                2 => KeyCode::Insert,
                3 => KeyCode::Delete,
                4 => KeyCode::End,
                5 => KeyCode::PageUp,
                6 => KeyCode::PageDown,
                11 => KeyCode::F(1),
                12 => KeyCode::F(2),
                13 => KeyCode::F(3),
                14 => KeyCode::F(4),
                15 => KeyCode::F(5),
                17 => KeyCode::F(6),
                18 => KeyCode::F(7),
                19 => KeyCode::F(8),
                20 => KeyCode::F(9),
                21 => KeyCode::F(10),
                23 => KeyCode::F(11),
                24 => KeyCode::F(12),
                _ => return None,
            },
            _ => return None,
        };
        Some(InputEvent::Key(KeyboardEvent { logical_key: key, modifiers }))
    }

    fn decode_plain_char(&mut self) -> Option<InputEvent> {
        let first = self.buf[0];
        // C0 control codes other than \t/\n/\r (handled below via their
        // decoded char) arrive as Ctrl+<letter>, e.g. Ctrl+C = 0x03.
        if (0x01..=0x1A).contains(&first) && !matches!(first, 0x09 | 0x0A | 0x0D) {
            self.buf.remove(0);
            let letter = (first | 0x60) as char;
            return Some(InputEvent::Key(KeyboardEvent {
                logical_key: KeyCode::Char(letter),
                modifiers: Modifiers { ctrl: true, alt: false, shift: false },
            }));
        }
        let char_len = utf8_char_len(first);
        if self.buf.len() < char_len {
            return None; // wait for the rest of the multi-byte char
        }
        let bytes: Vec<u8> = self.buf.drain(0..char_len).collect();
        let ch = std::str::from_utf8(&bytes).ok()?.chars().next()?;

        let key = match ch {
            '\r' | '\n' => KeyCode::Enter,
            '\u{7F}' => KeyCode::Backspace,
            '\t' => KeyCode::Tab,
            c => KeyCode::Char(c),
        };
        Some(InputEvent::Key(KeyboardEvent::new(key)))
    }
}

fn utf8_char_len(first_byte: u8) -> usize {
    if first_byte & 0x80 == 0 {
        1
    } else if first_byte & 0xE0 == 0xC0 {
        2
    } else if first_byte & 0xF0 == 0xE0 {
        3
    } else if first_byte & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}
