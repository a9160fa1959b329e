#[macro_export]
macro_rules! impl_bounded_newtype {
    ($name:ty, $max:expr) => {
        impl $name {
            pub const MAX: u8 = $max;
            pub const COUNT: u32 = $max as u32 + 1;

            pub fn new(value: u8) -> Option<Self> {
                (value <= Self::MAX).then_some(Self(value))
            }

            /// Reduces `value` onto the face, so `COUNT` lands back on zero.
            pub fn wrapping(value: u32) -> Self {
                Self((value % Self::COUNT) as u8)
            }

            pub fn get(self) -> u8 {
                self.0
            }
        }
    };
}
