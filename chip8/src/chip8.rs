use log::trace;
use rand::RngCore;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, FONT_SET, KEY_COUNT, MEMORY_SIZE,
    PROGRAM_START, REGISTER_COUNT, STACK_DEPTH,
};
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::opcode::Opcode;

/// The framebuffer is indexed as `[y][x]`; cells are 1 (on) or 0 (off).
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// ## CPU
/// - (v) 16 primary 8-bit registers; VF doubles as the carry, borrow and
///   collision flag and is clobbered by the instructions that report one
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter, kept inside addressable memory
/// - (sp) a stack pointer into a 16-deep return address stack
///
/// ## Memory
/// - 4096 bytes of addressable memory; ROMs load at 0x200 and the font
///   sprites for the digits 0..F sit at 0x050
/// - a 64x32 monochrome framebuffer plus a draw flag the frontend
///   consumes to know when to repaint
///
/// ## Timers
/// - 2 8-bit timers (delay & sound) that drop by one per cycle while
///   nonzero; the frontend owns pacing cycles against the wall clock
///
/// ## Input
/// - the pressed state of the 16 hexadecimal keys, written by the
///   frontend between cycles and only read by the CPU
pub struct Chip8 {
    pub(crate) v: [u8; REGISTER_COUNT],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) sp: u8,
    pub(crate) stack: [u16; STACK_DEPTH],
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) frame_buffer: FrameBuffer,
    pub(crate) draw_flag: bool,
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) keypad: [bool; KEY_COUNT],
    pub(crate) rng: Box<dyn RngCore>,
}

impl Chip8 {
    /// Creates a machine with a thread-seeded random source.
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }

    /// Creates a machine that draws random bytes from `rng`.
    ///
    /// Only the random-byte instruction consumes the source; supplying a
    /// fixed-sequence generator makes runs reproducible.
    pub fn with_rng<R: RngCore + 'static>(rng: R) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font_base = FONT_BASE as usize;
        memory[font_base..font_base + FONT_SET.len()].copy_from_slice(&FONT_SET);

        Chip8 {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            delay_timer: 0,
            sound_timer: 0,
            keypad: [false; KEY_COUNT],
            rng: Box::new(rng),
        }
    }

    /// Copies a ROM into memory at the program start address.
    ///
    /// Must happen before the first `cycle`; loading over a running
    /// program is a caller error this makes no attempt to detect.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Chip8Error> {
        let capacity = MEMORY_SIZE - PROGRAM_START as usize;
        if rom.len() > capacity {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                capacity,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + rom.len()].copy_from_slice(rom);
        Ok(())
    }

    /// Runs one fetch-decode-execute cycle, then decays the timers.
    ///
    /// The program counter is advanced past the fetched opcode before the
    /// instruction executes, so jumps and calls assign absolute targets
    /// and skips only add the extra step.
    pub fn cycle(&mut self) {
        let op = self.fetch();
        self.pc = (self.pc + 2) & ADDRESS_MASK;
        trace!(
            "{} v{:02X?} i {:03X} pc {:03X} sp {}",
            op,
            self.v,
            self.i,
            self.pc,
            self.sp
        );
        self.execute(Instruction::decode(op));
        self.decay_timers();
    }

    /// Set the pressed status of `key` (masked to 0..F).
    pub fn key_press(&mut self, key: u8) {
        self.keypad[usize::from(key & 0xF)] = true;
    }

    /// Unset the pressed status of `key` (masked to 0..F).
    pub fn key_release(&mut self, key: u8) {
        self.keypad[usize::from(key & 0xF)] = false;
    }

    /// Returns the framebuffer and clears the draw flag if a clear or
    /// draw instruction ran since the last call, `None` otherwise.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.draw_flag {
            self.draw_flag = false;
            Some(self.frame_buffer)
        } else {
            None
        }
    }

    /// Memory is stored as bytes but opcodes are 16 bits, so two
    /// consecutive bytes are combined big-endian.
    fn fetch(&self) -> Opcode {
        Opcode::from_bytes(self.read_byte(self.pc), self.read_byte(self.pc.wrapping_add(1)))
    }

    /// Each nonzero timer drops by one; the zero floor makes them one-shot
    /// countdowns rather than wrapping counters.
    fn decay_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    pub(crate) fn read_byte(&self, addr: u16) -> u8 {
        self.memory[usize::from(addr & ADDRESS_MASK)]
    }

    pub(crate) fn write_byte(&mut self, addr: u16, value: u8) {
        self.memory[usize::from(addr & ADDRESS_MASK)] = value;
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
