use crate::consts;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};

pub(crate) trait EnumExt: Enum {
    /// Iterate over every variant in declaration order
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

/// Draw everything inside a rectangle of [`consts::DISPLAY_SIZE`] (or the
/// whole buffer, if it is smaller) in the middle of `buffer_area`.
pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a rectangle of `size` centered in `area`, shrunk to fit if need be
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [inner] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [inner] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(inner);
    inner
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Speed;
    use rstest::rstest;

    #[test]
    fn enum_ext() {
        assert_eq!(
            Speed::iter().collect::<Vec<_>>(),
            [Speed::Fast, Speed::Normal, Speed::Slow]
        );
    }

    #[rstest]
    #[case(Rect::new(0, 0, 100, 30), Size::new(80, 24), Rect::new(10, 3, 80, 24))]
    #[case(Rect::new(0, 0, 80, 24), Size::new(80, 24), Rect::new(0, 0, 80, 24))]
    #[case(Rect::new(0, 0, 40, 10), Size::new(80, 24), Rect::new(0, 0, 40, 10))]
    #[case(Rect::new(5, 5, 20, 10), Size::new(10, 4), Rect::new(10, 8, 10, 4))]
    fn test_center_rect(#[case] area: Rect, #[case] size: Size, #[case] r: Rect) {
        assert_eq!(center_rect(area, size), r);
    }
}
