use super::{
    CONTROL_GAP, CONTROL_SIZE, DOT_RADIUS, DOT_SPACING, FILM_HEIGHT, HEADER_HEIGHT, MEDIA_FRACTION,
    PADDING, PEEK_WIDTH, PILL_HEIGHT, PILL_WIDTH, PROGRESS_GAP, PROGRESS_HEIGHT, SECTION_GAP,
    THUMB_GAP, THUMB_WIDTH,
};
use carousel::gesture::nearest_slide;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn shifted(&self, dx: f64) -> Self {
        Self { x: self.x + dx, ..*self }
    }

    pub fn inset(&self, by: f64) -> Self {
        Self::new(
            self.x + by,
            self.y + by,
            self.width - 2.0 * by,
            self.height - 2.0 * by,
        )
    }
}

/// What sits under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Card,
    Open,
    Copy,
    Prev,
    Next,
    Toggle,
    Dot(usize),
    Thumb(usize),
    Outside,
}

/// Geometry of every element in the deck for one window size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckLayout {
    pub width: f64,
    pub height: f64,
    pub counter: Point,
    pub prev: Rect,
    pub next: Rect,
    pub toggle: Rect,
    pub segments: Vec<Rect>,
    pub card: Rect,
    pub media: Rect,
    pub open: Rect,
    pub copy: Rect,
    pub prev_peek: Rect,
    pub next_peek: Rect,
    pub dots: Vec<Point>,
    pub film: Rect,
    pub thumbs: Vec<Rect>,
}

impl DeckLayout {
    pub fn compute(width: f64, height: f64, count: usize) -> Self {
        let n = count.max(1);
        let nf = n as f64;
        let inner_width = (width - 2.0 * PADDING).max(0.0);

        let control_y = PADDING + (HEADER_HEIGHT - CONTROL_SIZE) / 2.0;
        let toggle = Rect::new(
            width - PADDING - CONTROL_SIZE,
            control_y,
            CONTROL_SIZE,
            CONTROL_SIZE,
        );
        let next = Rect::new(
            toggle.x - CONTROL_GAP - CONTROL_SIZE,
            control_y,
            CONTROL_SIZE,
            CONTROL_SIZE,
        );
        let prev = Rect::new(
            next.x - CONTROL_GAP - CONTROL_SIZE,
            control_y,
            CONTROL_SIZE,
            CONTROL_SIZE,
        );

        let progress_y = PADDING + HEADER_HEIGHT + SECTION_GAP / 2.0;
        let segment_width = (inner_width - PROGRESS_GAP * (nf - 1.0)) / nf;
        let segments = (0..n)
            .map(|i| {
                Rect::new(
                    PADDING + i as f64 * (segment_width + PROGRESS_GAP),
                    progress_y,
                    segment_width,
                    PROGRESS_HEIGHT,
                )
            })
            .collect();

        let film_y = height - PADDING - FILM_HEIGHT;
        let thumb_width = THUMB_WIDTH
            .min((inner_width - THUMB_GAP * (nf - 1.0)) / nf)
            .max(0.0);
        let strip_width = nf * thumb_width + THUMB_GAP * (nf - 1.0);
        let strip_x = (width - strip_width) / 2.0;
        let thumbs = (0..n)
            .map(|i| {
                Rect::new(
                    strip_x + i as f64 * (thumb_width + THUMB_GAP),
                    film_y,
                    thumb_width,
                    FILM_HEIGHT,
                )
            })
            .collect();

        let dot_y = film_y - SECTION_GAP - DOT_RADIUS;
        let dots_x = width / 2.0 - DOT_SPACING * (nf - 1.0) / 2.0;
        let dots = (0..n)
            .map(|i| Point::new(dots_x + i as f64 * DOT_SPACING, dot_y))
            .collect();

        let card_y = progress_y + PROGRESS_HEIGHT + SECTION_GAP;
        let card = Rect::new(
            PADDING + PEEK_WIDTH,
            card_y,
            inner_width - 2.0 * PEEK_WIDTH,
            dot_y - 2.0 * DOT_RADIUS - SECTION_GAP - card_y,
        );
        let media = Rect::new(card.x, card.y, card.width, card.height * MEDIA_FRACTION);

        let open = Rect::new(
            card.right() - PADDING - PILL_WIDTH,
            card.bottom() - PADDING - PILL_HEIGHT,
            PILL_WIDTH,
            PILL_HEIGHT,
        );
        let copy = Rect::new(
            open.x - CONTROL_GAP - PILL_WIDTH,
            open.y,
            PILL_WIDTH,
            PILL_HEIGHT,
        );

        Self {
            width,
            height,
            counter: Point::new(PADDING, PADDING + HEADER_HEIGHT / 2.0),
            prev,
            next,
            toggle,
            segments,
            card,
            media,
            open,
            copy,
            prev_peek: Rect::new(PADDING, card.y, PEEK_WIDTH - CONTROL_GAP, card.height),
            next_peek: Rect::new(
                card.right() + CONTROL_GAP,
                card.y,
                PEEK_WIDTH - CONTROL_GAP,
                card.height,
            ),
            dots,
            film: Rect::new(strip_x, film_y, strip_width, FILM_HEIGHT),
            thumbs,
        }
    }

    pub fn hit(&self, p: Point) -> Hit {
        let fixed = [
            (self.open, Hit::Open),
            (self.copy, Hit::Copy),
            (self.prev, Hit::Prev),
            (self.next, Hit::Next),
            (self.toggle, Hit::Toggle),
            (self.card, Hit::Card),
            (self.prev_peek, Hit::Prev),
            (self.next_peek, Hit::Next),
        ];
        if let Some((_, hit)) = fixed.iter().find(|(rect, _)| rect.contains(p)) {
            return *hit;
        }

        // generous hit box: dots are tiny
        let reach = DOT_SPACING / 2.0;
        if let Some(i) = self
            .dots
            .iter()
            .position(|d| (d.x - p.x).abs() < reach && (d.y - p.y).abs() < reach)
        {
            return Hit::Dot(i);
        }

        if self.film.contains(p) {
            let centers: Vec<f64> = self.thumbs.iter().map(|t| t.center().x).collect();
            if let Some(i) = nearest_slide(&centers, p.x) {
                return Hit::Thumb(i);
            }
        }

        Hit::Outside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> DeckLayout {
        DeckLayout::compute(960.0, 640.0, 4)
    }

    #[test]
    fn test_element_counts() {
        let l = layout();
        assert_eq!(l.segments.len(), 4);
        assert_eq!(l.dots.len(), 4);
        assert_eq!(l.thumbs.len(), 4);
    }

    #[test]
    fn test_card_geometry() {
        let l = layout();
        assert_eq!(l.card, Rect::new(80.0, 88.0, 800.0, 420.0));
        assert!(l.card.contains(l.open.center()));
        assert!(l.card.contains(l.copy.center()));
        assert!(l.copy.right() < l.open.x);
    }

    #[test]
    fn test_hits() {
        let l = layout();
        let cases = vec![
            (Point::new(480.0, 200.0), Hit::Card),
            (l.open.center(), Hit::Open),
            (l.copy.center(), Hit::Copy),
            (l.toggle.center(), Hit::Toggle),
            (l.prev.center(), Hit::Prev),
            (l.next.center(), Hit::Next),
            (Point::new(50.0, 300.0), Hit::Prev),
            (Point::new(910.0, 300.0), Hit::Next),
            (Point::new(471.0, 533.0), Hit::Dot(1)),
            (Point::new(430.0, 580.0), Hit::Thumb(1)),
            (l.thumbs[3].center(), Hit::Thumb(3)),
            (Point::new(5.0, 5.0), Hit::Outside),
            (Point::new(30.0, 580.0), Hit::Outside),
        ];

        for (point, expected) in cases {
            assert_eq!(l.hit(point), expected, "{point:?}");
        }
    }

    #[test]
    fn test_thumbs_shrink_to_fit() {
        let l = DeckLayout::compute(400.0, 600.0, 8);
        let last = l.thumbs.last().unwrap();
        assert!(l.thumbs[0].x >= PADDING - 1e-9);
        assert!(last.right() <= 400.0 - PADDING + 1e-9);
    }

    #[test]
    fn test_tiny_window_does_not_go_negative() {
        let l = DeckLayout::compute(10.0, 10.0, 3);
        assert_eq!(l.card.width, 0.0);
        assert_eq!(l.card.height, 0.0);
        assert_eq!(l.hit(Point::new(5.0, 5.0)), Hit::Outside);
    }
}
