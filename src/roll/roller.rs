use crate::common::{NonZeroUInt, UInt};
use rand::RngCore;

pub type DefaultRoller = rand::rngs::OsRng;

/// Source of individual die faces.
pub trait Roller {
    /// Draws one face uniformly from `1..=sides`.
    fn roll(&mut self, sides: NonZeroUInt) -> UInt;

    fn roll_n(&mut self, num: UInt, sides: NonZeroUInt) -> Vec<UInt> {
        (0..num).map(|_| self.roll(sides)).collect()
    }
}

/// Any byte source can roll dice: enough bytes are drawn to cover `sides`
/// and draws landing in the uneven tail of the byte space are thrown away,
/// so every face is exactly equally likely.
impl<R: RngCore + ?Sized> Roller for R {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        let range = u64::from(sides.get());
        let mut width = 1;
        while 256u64.pow(width) < range {
            width += 1;
        }
        let space = 256u64.pow(width);
        let limit = space - space % range;

        let mut buf = [0u8; 4];
        let buf = &mut buf[..width as usize];
        loop {
            self.fill_bytes(buf);
            let value = buf.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
            if value < limit {
                return (value % range) as UInt + 1;
            }
        }
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
