// Drawing seam between the simulation and whatever paints it. The browser
// canvas implements this in `canvas.rs`; tests record the calls instead.

pub trait Sprite {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// A sprite that has not finished loading is skipped by every draw.
    fn is_ready(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}

pub trait Surface {
    type Image: Sprite;
    type Error;

    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn clear(&mut self);

    /// Blit `image` scaled into the `w` x `h` box at (`x`, `y`) with the
    /// given opacity.
    fn draw_image(
        &mut self,
        image: &Self::Image,
        alpha: f64,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    ) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub mod recording {
    use super::{Sprite, Surface};

    #[derive(Copy, Clone, Debug, PartialEq)]
    pub struct Blit {
        pub alpha: f64,
        pub x: f64,
        pub y: f64,
        pub w: f64,
        pub h: f64,
    }

    #[derive(Copy, Clone, Debug)]
    pub struct TestSprite {
        pub size: f64,
    }

    impl Sprite for TestSprite {
        fn width(&self) -> f64 {
            self.size
        }

        fn height(&self) -> f64 {
            self.size
        }
    }

    /// Remembers every call. `fail_after` makes the n-th blit fail.
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub width: f64,
        pub height: f64,
        pub clears: usize,
        pub blits: Vec<Blit>,
        pub fail_after: Option<usize>,
    }

    impl RecordingSurface {
        pub fn new(width: f64, height: f64) -> Self {
            RecordingSurface {
                width,
                height,
                ..Default::default()
            }
        }
    }

    impl Surface for RecordingSurface {
        type Image = TestSprite;
        type Error = String;

        fn width(&self) -> f64 {
            self.width
        }

        fn height(&self) -> f64 {
            self.height
        }

        fn clear(&mut self) {
            self.clears += 1;
            self.blits.clear();
        }

        fn draw_image(
            &mut self,
            _image: &TestSprite,
            alpha: f64,
            x: f64,
            y: f64,
            w: f64,
            h: f64,
        ) -> Result<(), String> {
            if self.fail_after == Some(self.blits.len()) {
                return Err("surface lost".to_owned());
            }
            self.blits.push(Blit { alpha, x, y, w, h });
            Ok(())
        }
    }
}
