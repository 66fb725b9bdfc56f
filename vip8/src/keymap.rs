use sdl2::keyboard::Keycode;

/// # Keymap
/// Maps a physical key to its hexadecimal keypad index.
///
/// The 4x4 hex pad sits under the left hand on a QWERTY layout:
/// ```text
/// |1|2|3|4|      |1|2|3|C|
/// |Q|W|E|R|  ->  |4|5|6|D|
/// |A|S|D|F|  ->  |7|8|9|E|
/// |Z|X|C|V|      |A|0|B|F|
/// ```
/// Keys outside the grid are ignored.
pub fn keymap(key: Keycode) -> Option<u8> {
    match key {
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Num4 => Some(0xC),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::R => Some(0xD),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::F => Some(0xE),
        Keycode::Z => Some(0xA),
        Keycode::X => Some(0x0),
        Keycode::C => Some(0xB),
        Keycode::V => Some(0xF),
        _ => None,
    }
}
