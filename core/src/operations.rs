use rand::{Rng, RngCore};

use crate::constants::FLAG_REGISTER;
use crate::font::glyph_address;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::quirks::Quirks;
use crate::sprite::draw_sprite;
use crate::state::{StackError, State};

/// Everything outside of `State` that an instruction may consult while executing
pub struct Context<'a> {
    pub keypad: &'a dyn Keypad,
    pub rng: &'a mut dyn RngCore,
    pub quirks: Quirks,
}

/// Executes `instruction` against `state`.
///
/// Expects the pc to already point past the instruction being executed, so skips add 2 to it
/// and calls push it as the return address.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    ctx: &mut Context,
) -> Result<(), StackError> {
    use Instruction::*;

    match instruction {
        Clear => state.clear_screen(),
        Return => rts(state)?,
        Jump { addr } => state.jump(addr),
        Call { addr } => call(state, addr)?,
        SkipIfEqual { x, nn } => state.skip_if(state.v[x] == nn),
        SkipIfNotEqual { x, nn } => state.skip_if(state.v[x] != nn),
        SkipIfRegistersEqual { x, y } => state.skip_if(state.v[x] == state.v[y]),
        Load { x, nn } => state.v[x] = nn,
        Add { x, nn } => state.v[x] = state.v[x].wrapping_add(nn),
        Move { x, y } => state.v[x] = state.v[y],
        Or { x, y } => state.v[x] |= state.v[y],
        And { x, y } => state.v[x] &= state.v[y],
        Xor { x, y } => state.v[x] ^= state.v[y],
        AddRegisters { x, y } => addr(state, x, y),
        Sub { x, y } => sub(state, x, y),
        ShiftRight { x } => shr(state, x),
        SubReversed { x, y } => subn(state, x, y),
        ShiftLeft { x } => shl(state, x),
        SkipIfRegistersNotEqual { x, y } => state.skip_if(state.v[x] != state.v[y]),
        LoadIndex { addr } => state.i = addr,
        JumpOffset { addr } => state.jump(addr + u16::from(state.v[0x0])),
        Random { x, nn } => state.v[x] = ctx.rng.gen::<u8>() & nn,
        Draw { x, y, n } => {
            draw_sprite(state, x, y, n, ctx.quirks.sprite_wrap);
        }
        SkipIfKeyPressed { x } => {
            let key = key_operand(state, x, &ctx.quirks);
            state.skip_if(ctx.keypad.is_pressed(key));
        }
        SkipIfKeyNotPressed { x } => {
            let key = key_operand(state, x, &ctx.quirks);
            state.skip_if(!ctx.keypad.is_pressed(key));
        }
        ReadDelay { x } => state.v[x] = state.delay_timer,
        WaitForKey { x } => keyd(state, x, ctx.keypad),
        SetDelay { x } => state.delay_timer = state.v[x],
        SetSound { x } => state.sound_timer = state.v[x],
        AddIndex { x } => state.i = state.i.wrapping_add(u16::from(state.v[x])),
        LoadGlyph { x } => state.i = glyph_address(state.v[x]),
        StoreBcd { x } => bcd(state, x),
        StoreRegisters { x } => stor(state, x),
        LoadRegisters { x } => read(state, x),
        Unknown(_) => {}
    }
    Ok(())
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<(), StackError> {
    let addr = state.pop()?;
    state.jump(addr);
    Ok(())
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, addr: u16) -> Result<(), StackError> {
    state.push(state.pc)?;
    state.jump(addr);
    Ok(())
}

/// Vx += Vy; VF = carry
fn addr(state: &mut State, x: usize, y: usize) {
    let (res, carry) = state.v[x].overflowing_add(state.v[y]);
    state.v[x] = res;
    state.set_flag(carry);
}

/// Vx -= Vy; VF = !borrow
fn sub(state: &mut State, x: usize, y: usize) {
    let (res, borrow) = state.v[x].overflowing_sub(state.v[y]);
    state.v[x] = res;
    state.set_flag(!borrow);
}

/// Vx = Vy - Vx; VF = !borrow
fn subn(state: &mut State, x: usize, y: usize) {
    let (res, borrow) = state.v[y].overflowing_sub(state.v[x]);
    state.v[x] = res;
    state.set_flag(!borrow);
}

/// Vx >>= 1; VF = the bit shifted out
fn shr(state: &mut State, x: usize) {
    let lsb = state.v[x] & 0x1;
    state.v[x] >>= 1;
    state.v[FLAG_REGISTER] = lsb;
}

/// Vx <<= 1; VF = the bit shifted out
fn shl(state: &mut State, x: usize) {
    let msb = state.v[x] >> 7;
    state.v[x] <<= 1;
    state.v[FLAG_REGISTER] = msb;
}

/// The key an `EX__` instruction refers to
fn key_operand(state: &State, x: usize, quirks: &Quirks) -> u8 {
    if quirks.key_from_register {
        state.v[x] & 0xF
    } else {
        x as u8
    }
}

/// await keypress for Vx
/// Rewinds the pc onto this instruction until some key is held, so timers and rendering keep
/// running while we wait.
fn keyd(state: &mut State, x: usize, keypad: &dyn Keypad) {
    match keypad.first_pressed() {
        Some(key) => state.v[x] = key,
        None => state.jump(state.pc.wrapping_sub(2)),
    }
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: usize) {
    let value = state.v[x];
    state.write_indexed(0, value / 100);
    state.write_indexed(1, value / 10 % 10);
    state.write_indexed(2, value % 10);
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
fn stor(state: &mut State, x: usize) {
    for register in 0..=x {
        state.write_indexed(register as u16, state.v[register]);
    }
    state.i = state.i.wrapping_add(x as u16 + 1);
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
fn read(state: &mut State, x: usize) {
    for register in 0..=x {
        state.v[register] = state.read_indexed(register as u16);
    }
    state.i = state.i.wrapping_add(x as u16 + 1);
}
