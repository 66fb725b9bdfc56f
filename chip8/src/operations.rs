use log::warn;
use rand::Rng;

use crate::chip8::Chip8;
use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_BASE, FONT_GLYPH_LEN, KEY_COUNT, STACK_DEPTH,
};
use crate::instruction::Instruction;

impl Chip8 {
    /// Runs a single decoded instruction against the machine state.
    ///
    /// The program counter already points past the opcode, so handlers
    /// assign absolute targets and skips bump it by one more step.
    pub(crate) fn execute(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::Clear => self.clr(),
            Instruction::Return => self.rts(),
            Instruction::Jump(nnn) => self.jump(nnn),
            Instruction::Call(nnn) => self.call(nnn),
            Instruction::SkipEqByte(x, kk) => self.ske(x, kk),
            Instruction::SkipNeByte(x, kk) => self.skne(x, kk),
            Instruction::SkipEqReg(x, y) => self.skre(x, y),
            Instruction::LoadByte(x, kk) => self.load(x, kk),
            Instruction::AddByte(x, kk) => self.add(x, kk),
            Instruction::Move(x, y) => self.mv(x, y),
            Instruction::Or(x, y) => self.or(x, y),
            Instruction::And(x, y) => self.and(x, y),
            Instruction::Xor(x, y) => self.xor(x, y),
            Instruction::Add(x, y) => self.addr(x, y),
            Instruction::Sub(x, y) => self.sub(x, y),
            Instruction::ShiftRight(x) => self.shr(x),
            Instruction::SubNeg(x, y) => self.subn(x, y),
            Instruction::ShiftLeft(x) => self.shl(x),
            Instruction::SkipNeReg(x, y) => self.skrne(x, y),
            Instruction::LoadIndex(nnn) => self.loadi(nnn),
            Instruction::JumpOffset(nnn) => self.jumpi(nnn),
            Instruction::Random(x, kk) => self.rand(x, kk),
            Instruction::Draw(x, y, n) => self.draw(x, y, n),
            Instruction::SkipKeyDown(x) => self.skpr(x),
            Instruction::SkipKeyUp(x) => self.skup(x),
            Instruction::LoadDelay(x) => self.moved(x),
            Instruction::WaitKey(x) => self.keyd(x),
            Instruction::SetDelay(x) => self.loads(x),
            Instruction::SetSound(x) => self.loadst(x),
            Instruction::AddIndex(x) => self.addi(x),
            Instruction::LoadFont(x) => self.ldspr(x),
            Instruction::StoreBcd(x) => self.bcd(x),
            Instruction::StoreRegisters(x) => self.stor(x),
            Instruction::LoadRegisters(x) => self.read(x),
            Instruction::Nop => {}
        }
    }

    /// Advances past the next instruction.
    fn skip(&mut self) {
        self.pc = (self.pc + 2) & ADDRESS_MASK;
    }

    /// clear
    fn clr(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    /// PC = STACK.pop()
    ///
    /// A return with an empty stack is dropped rather than reading below
    /// the stack.
    fn rts(&mut self) {
        if self.sp == 0 {
            warn!("return with an empty call stack ignored at pc {:03X}", self.pc);
            return;
        }
        self.sp -= 1;
        self.pc = self.stack[usize::from(self.sp)] & ADDRESS_MASK;
    }

    /// PC = nnn
    fn jump(&mut self, nnn: u16) {
        self.pc = nnn;
    }

    /// STACK.push(PC); PC = nnn
    ///
    /// A call with a full stack still jumps but drops the return address.
    fn call(&mut self, nnn: u16) {
        if usize::from(self.sp) < STACK_DEPTH {
            self.stack[usize::from(self.sp)] = self.pc;
            self.sp += 1;
        } else {
            warn!("call to {:03X} with a full call stack, return address dropped", nnn);
        }
        self.pc = nnn;
    }

    /// if Vx == kk then skip
    fn ske(&mut self, x: u8, kk: u8) {
        if self.v[usize::from(x)] == kk {
            self.skip();
        }
    }

    /// if Vx != kk then skip
    fn skne(&mut self, x: u8, kk: u8) {
        if self.v[usize::from(x)] != kk {
            self.skip();
        }
    }

    /// if Vx == Vy then skip
    fn skre(&mut self, x: u8, y: u8) {
        if self.v[usize::from(x)] == self.v[usize::from(y)] {
            self.skip();
        }
    }

    /// Vx = kk
    fn load(&mut self, x: u8, kk: u8) {
        self.v[usize::from(x)] = kk;
    }

    /// Vx += kk
    /// Overflow is implicitly dropped; VF is not a carry here.
    fn add(&mut self, x: u8, kk: u8) {
        self.v[usize::from(x)] = self.v[usize::from(x)].wrapping_add(kk);
    }

    /// Vx = Vy
    fn mv(&mut self, x: u8, y: u8) {
        self.v[usize::from(x)] = self.v[usize::from(y)];
    }

    /// Vx |= Vy
    fn or(&mut self, x: u8, y: u8) {
        self.v[usize::from(x)] |= self.v[usize::from(y)];
    }

    /// Vx &= Vy
    fn and(&mut self, x: u8, y: u8) {
        self.v[usize::from(x)] &= self.v[usize::from(y)];
    }

    /// Vx ^= Vy
    fn xor(&mut self, x: u8, y: u8) {
        self.v[usize::from(x)] ^= self.v[usize::from(y)];
    }

    /// Vx += Vy; VF = carry
    fn addr(&mut self, x: u8, y: u8) {
        let (res, over) = self.v[usize::from(x)].overflowing_add(self.v[usize::from(y)]);
        self.v[0xF] = u8::from(over);
        self.v[usize::from(x)] = res;
    }

    /// Vx -= Vy; VF = !borrow
    fn sub(&mut self, x: u8, y: u8) {
        let (res, under) = self.v[usize::from(x)].overflowing_sub(self.v[usize::from(y)]);
        self.v[0xF] = u8::from(!under);
        self.v[usize::from(x)] = res;
    }

    /// VF = Vx & 1; Vx >>= 1
    fn shr(&mut self, x: u8) {
        self.v[0xF] = self.v[usize::from(x)] & 0x1;
        self.v[usize::from(x)] >>= 1;
    }

    /// Vx = Vy - Vx; VF = !borrow
    fn subn(&mut self, x: u8, y: u8) {
        let (res, under) = self.v[usize::from(y)].overflowing_sub(self.v[usize::from(x)]);
        self.v[0xF] = u8::from(!under);
        self.v[usize::from(x)] = res;
    }

    /// VF = top bit of Vx; Vx <<= 1
    fn shl(&mut self, x: u8) {
        self.v[0xF] = self.v[usize::from(x)] >> 7;
        self.v[usize::from(x)] <<= 1;
    }

    /// if Vx != Vy then skip
    fn skrne(&mut self, x: u8, y: u8) {
        if self.v[usize::from(x)] != self.v[usize::from(y)] {
            self.skip();
        }
    }

    /// I = nnn
    fn loadi(&mut self, nnn: u16) {
        self.i = nnn;
    }

    /// PC = V0 + nnn
    fn jumpi(&mut self, nnn: u16) {
        self.pc = (u16::from(self.v[0x0]) + nnn) & ADDRESS_MASK;
    }

    /// Vx = random byte & kk
    fn rand(&mut self, x: u8, kk: u8) {
        let byte: u8 = self.rng.gen();
        self.v[usize::from(x)] = byte & kk;
    }

    /// Draws the n-byte sprite at memory[I..] at (Vx, Vy).
    ///
    /// The origin wraps modulo the screen size; pixels falling past the
    /// right or bottom edge are clipped, not wrapped. VF is set iff the
    /// XOR turned any on pixel off.
    fn draw(&mut self, x: u8, y: u8, n: u8) {
        let origin_x = usize::from(self.v[usize::from(x)]) % DISPLAY_WIDTH;
        let origin_y = usize::from(self.v[usize::from(y)]) % DISPLAY_HEIGHT;

        self.v[0xF] = 0;
        for row in 0..usize::from(n) {
            let py = origin_y + row;
            if py >= DISPLAY_HEIGHT {
                break;
            }
            let sprite_byte = self.read_byte(self.i.wrapping_add(row as u16));
            for bit in 0..8 {
                let px = origin_x + bit;
                if px >= DISPLAY_WIDTH {
                    break;
                }
                let pixel = (sprite_byte >> (7 - bit)) & 1;
                self.v[0xF] |= pixel & self.frame_buffer[py][px];
                self.frame_buffer[py][px] ^= pixel;
            }
        }
        self.draw_flag = true;
    }

    /// if Vx.pressed then skip
    fn skpr(&mut self, x: u8) {
        if self.keypad[usize::from(self.v[usize::from(x)] & 0xF)] {
            self.skip();
        }
    }

    /// if !Vx.pressed then skip
    fn skup(&mut self, x: u8) {
        if !self.keypad[usize::from(self.v[usize::from(x)] & 0xF)] {
            self.skip();
        }
    }

    /// Vx = DT
    fn moved(&mut self, x: u8) {
        self.v[usize::from(x)] = self.delay_timer;
    }

    /// Await a keypress into Vx.
    ///
    /// With no key down the program counter is stepped back over this
    /// instruction, so the next cycle fetches it again; the whole machine
    /// blocks until the frontend presses something. The lowest pressed
    /// key index wins.
    fn keyd(&mut self, x: u8) {
        match (0..KEY_COUNT).find(|&key| self.keypad[key]) {
            Some(key) => self.v[usize::from(x)] = key as u8,
            None => self.pc = self.pc.wrapping_sub(2) & ADDRESS_MASK,
        }
    }

    /// DT = Vx
    fn loads(&mut self, x: u8) {
        self.delay_timer = self.v[usize::from(x)];
    }

    /// ST = Vx
    fn loadst(&mut self, x: u8) {
        self.sound_timer = self.v[usize::from(x)];
    }

    /// I += Vx; no carry flag
    fn addi(&mut self, x: u8) {
        self.i = self.i.wrapping_add(u16::from(self.v[usize::from(x)]));
    }

    /// I = address of the font glyph for the digit in Vx
    fn ldspr(&mut self, x: u8) {
        let digit = u16::from(self.v[usize::from(x)] & 0xF);
        self.i = FONT_BASE + FONT_GLYPH_LEN * digit;
    }

    /// mem[I..I+3] = the decimal digits of Vx
    fn bcd(&mut self, x: u8) {
        let value = self.v[usize::from(x)];
        self.write_byte(self.i, value / 100);
        self.write_byte(self.i.wrapping_add(1), value / 10 % 10);
        self.write_byte(self.i.wrapping_add(2), value % 10);
    }

    /// mem[I..=I+x] = V0..=Vx
    fn stor(&mut self, x: u8) {
        for offset in 0..=u16::from(x) {
            self.write_byte(self.i.wrapping_add(offset), self.v[usize::from(offset)]);
        }
    }

    /// V0..=Vx = mem[I..=I+x]
    fn read(&mut self, x: u8) {
        for offset in 0..=u16::from(x) {
            self.v[usize::from(offset)] = self.read_byte(self.i.wrapping_add(offset));
        }
    }
}
