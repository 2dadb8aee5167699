// Simple color struct, created from an unsigned 32 representing RRGGBBAA

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let pink = Color::from_u32(0xff69b4ff);
        assert_eq!(
            pink,
            Color {
                r: 0xff,
                g: 0x69,
                b: 0xb4,
                a: 0xff
            }
        );
        assert_eq!(pink.to_rgba(), [0xff, 0x69, 0xb4, 0xff]);
    }

    #[test]
    fn zero_is_transparent() {
        assert_eq!(Color::from_u32(0), Color::TRANSPARENT);
    }
}
