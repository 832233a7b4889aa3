use super::layout::{Point, Rect};
use super::model::Deck;
use super::{CARD_RADIUS, DOT_RADIUS, NEIGHBOR_ALPHA, PADDING, PILL_HEIGHT};
use crate::gui::theme::ThemeColors;
use cairo::{Context, FontSlant, FontWeight};
use carousel::{Badge, CopyStatus, Item, Playback};
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

const FONT: &str = "Sans";

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn rounded_rect(cr: &Context, rect: &Rect, radius: f64) {
    let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
    cr.new_sub_path();
    cr.arc(rect.right() - r, rect.y + r, r, -PI / 2.0, 0.0);
    cr.arc(rect.right() - r, rect.bottom() - r, r, 0.0, PI / 2.0);
    cr.arc(rect.x + r, rect.bottom() - r, r, PI / 2.0, PI);
    cr.arc(rect.x + r, rect.y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

fn set_font(cr: &Context, size: f64, bold: bool) {
    let weight = if bold {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };
    cr.select_font_face(FONT, FontSlant::Normal, weight);
    cr.set_font_size(size);
}

fn text_width(cr: &Context, text: &str) -> f64 {
    cr.text_extents(text).map(|e| e.x_advance()).unwrap_or(0.0)
}

fn show_text_at(cr: &Context, text: &str, x: f64, y: f64) -> Result<(), cairo::Error> {
    cr.move_to(x, y);
    cr.show_text(text)
}

fn show_text_centered(cr: &Context, text: &str, center: Point) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(
        center.x - ext.width() / 2.0 - ext.x_bearing(),
        center.y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

/// Greedy word wrap with the current font. Overflowing lines are dropped.
fn wrap(cr: &Context, text: &str, max_width: f64, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(cr, &candidate) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.truncate(max_lines);
    lines
}

struct CardRenderer<'a> {
    item: &'a Item,
    thumbnail: Option<&'a Pixbuf>,
    badges: Vec<Badge>,
    rect: Rect,
    media: Rect,
}

impl CardRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        rounded_rect(cr, &self.rect, CARD_RADIUS);
        cr.clip();

        set_color(cr, colors.card);
        cr.paint()?;
        self.draw_media(cr)?;
        self.draw_body(cr, colors)?;

        cr.restore()?;

        set_color(cr, self.item.accent.to_srgba(0.6));
        cr.set_line_width(2.0);
        rounded_rect(cr, &self.rect, CARD_RADIUS);
        cr.stroke()
    }

    fn draw_media(&self, cr: &Context) -> Result<(), cairo::Error> {
        let media = &self.media;
        match self.thumbnail {
            Some(pixbuf) => {
                // cover: fill the media box, crop the overflow
                let scale = (media.width / pixbuf.width() as f64)
                    .max(media.height / pixbuf.height() as f64);
                let (w, h) = (
                    pixbuf.width() as f64 * scale,
                    pixbuf.height() as f64 * scale,
                );

                cr.save()?;
                cr.rectangle(media.x, media.y, media.width, media.height);
                cr.clip();
                cr.translate(
                    media.x + (media.width - w) / 2.0,
                    media.y + (media.height - h) / 2.0,
                );
                cr.scale(scale, scale);
                cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
                cr.paint()?;
                cr.restore()
            }
            None => {
                let gradient =
                    cairo::LinearGradient::new(media.x, media.y, media.right(), media.bottom());
                let (r, g, b, _) = self.item.accent.to_srgba(1.0).into_components();
                gradient.add_color_stop_rgba(0.0, r, g, b, 0.85);
                gradient.add_color_stop_rgba(1.0, r, g, b, 0.25);
                cr.set_source(&gradient)?;
                cr.rectangle(media.x, media.y, media.width, media.height);
                cr.fill()
            }
        }
    }

    fn draw_body(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let x = self.rect.x + PADDING;
        let width = self.rect.width - 2.0 * PADDING;
        let mut y = self.media.bottom() + PADDING + 6.0;

        set_color(cr, colors.text);
        set_font(cr, 22.0, true);
        show_text_at(cr, &self.item.title, x, y)?;

        if !self.item.meta.is_empty() {
            set_color(cr, colors.muted);
            set_font(cr, 13.0, false);
            let meta_x = self.rect.right() - PADDING - text_width(cr, &self.item.meta);
            show_text_at(cr, &self.item.meta, meta_x, y)?;
        }

        y += 26.0;
        set_color(cr, colors.text);
        set_font(cr, 14.0, false);
        for line in wrap(cr, &self.item.description, width, 2) {
            show_text_at(cr, &line, x, y)?;
            y += 19.0;
        }

        set_color(cr, colors.muted);
        set_font(cr, 13.0, false);
        let bullets_floor = self.rect.bottom() - PADDING - PILL_HEIGHT - 8.0;
        for bullet in &self.item.bullets {
            if y + 18.0 > bullets_floor {
                break;
            }
            y += 4.0;
            for line in wrap(cr, &format!("• {bullet}"), width, 1) {
                show_text_at(cr, &line, x, y)?;
                y += 17.0;
            }
        }

        self.draw_badges(cr, x, self.rect.bottom() - PADDING - PILL_HEIGHT / 2.0)
    }

    fn draw_badges(&self, cr: &Context, x: f64, center_y: f64) -> Result<(), cairo::Error> {
        set_font(cr, 12.0, true);
        let mut x = x;
        for badge in &self.badges {
            let width = text_width(cr, &badge.abbr) + 16.0;
            let rect = Rect::new(x, center_y - 12.0, width, 24.0);

            set_color(cr, badge.color.to_srgba(0.25));
            rounded_rect(cr, &rect, 12.0);
            cr.fill()?;

            set_color(cr, badge.color.to_srgba(1.0));
            show_text_centered(cr, &badge.abbr, rect.center())?;
            x += width + 6.0;
        }
        Ok(())
    }
}

fn draw_pill(
    cr: &Context,
    rect: &Rect,
    label: &str,
    fill: Srgba<f64>,
    text: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, fill);
    rounded_rect(cr, rect, rect.height / 2.0);
    cr.fill()?;
    set_color(cr, text);
    set_font(cr, 13.0, true);
    show_text_centered(cr, label, rect.center())
}

fn draw_header(cr: &Context, deck: &Deck, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let l = &deck.layout;
    let c = &deck.carousel;

    set_color(cr, colors.text);
    set_font(cr, 15.0, true);
    let counter = format!("Project {:02} of {:02}", c.active_index() + 1, c.len());
    show_text_at(cr, &counter, l.counter.x, l.counter.y + 5.0)?;

    let toggle_label = match c.playback() {
        Playback::Playing => "⏸",
        Playback::Paused => "▶",
    };
    for (rect, label) in [(&l.prev, "‹"), (&l.next, "›"), (&l.toggle, toggle_label)] {
        draw_pill(cr, rect, label, colors.control, colors.text)?;
    }
    Ok(())
}

fn draw_progress(cr: &Context, deck: &Deck, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let accent = deck.carousel.active_item().accent;
    for (i, segment) in deck.layout.segments.iter().enumerate() {
        set_color(cr, colors.track);
        rounded_rect(cr, segment, segment.height / 2.0);
        cr.fill()?;

        let fill = deck.carousel.segment_fill(i);
        if fill > 0.0 {
            let filled = Rect::new(segment.x, segment.y, segment.width * fill, segment.height);
            set_color(cr, accent.to_srgba(0.9));
            rounded_rect(cr, &filled, segment.height / 2.0);
            cr.fill()?;
        }
    }
    Ok(())
}

fn draw_neighbors(
    cr: &Context,
    deck: &Deck,
    colors: &ThemeColors,
    dx: f64,
) -> Result<(), cairo::Error> {
    let l = &deck.layout;
    for (offset, peek) in [(-1, &l.prev_peek), (1, &l.next_peek)] {
        let item = deck.carousel.item_at_offset(offset);
        let rect = peek.shifted(dx);

        let (r, g, b, _) = colors.card.into_components();
        set_color(cr, Srgba::new(r, g, b, NEIGHBOR_ALPHA));
        rounded_rect(cr, &rect, CARD_RADIUS / 2.0);
        cr.fill()?;

        set_color(cr, item.accent.to_srgba(NEIGHBOR_ALPHA));
        let stripe = Rect::new(rect.x, rect.y, rect.width, rect.height * 0.42);
        rounded_rect(cr, &stripe, CARD_RADIUS / 2.0);
        cr.fill()?;
    }
    Ok(())
}

fn draw_actions(
    cr: &Context,
    deck: &Deck,
    colors: &ThemeColors,
    dx: f64,
) -> Result<(), cairo::Error> {
    let l = &deck.layout;
    let accent = deck.carousel.active_item().accent;

    draw_pill(
        cr,
        &l.open.shifted(dx),
        "Open",
        accent.to_srgba(0.9),
        Srgba::new(0.05, 0.05, 0.05, 1.0),
    )?;

    let (label, text) = match deck.carousel.copy_feedback() {
        Some(status @ CopyStatus::Copied) => (status.to_string(), colors.success),
        Some(status @ CopyStatus::Failed) => (status.to_string(), colors.failure),
        None => ("Copy".to_string(), colors.text),
    };
    draw_pill(cr, &l.copy.shifted(dx), &label, colors.control, text)
}

fn draw_dots(cr: &Context, deck: &Deck, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let active = deck.carousel.active_index();
    let accent = deck.carousel.active_item().accent;
    for (i, dot) in deck.layout.dots.iter().enumerate() {
        let (color, radius) = if i == active {
            (accent.to_srgba(1.0), DOT_RADIUS * 1.5)
        } else {
            (colors.track, DOT_RADIUS)
        };
        set_color(cr, color);
        cr.arc(dot.x, dot.y, radius, 0.0, 2.0 * PI);
        cr.fill()?;
    }
    Ok(())
}

fn draw_filmstrip(cr: &Context, deck: &Deck, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let active = deck.carousel.active_index();
    for (i, (item, rect)) in deck
        .carousel
        .items()
        .iter()
        .zip(&deck.layout.thumbs)
        .enumerate()
    {
        let alpha = if i == active { 1.0 } else { 0.55 };

        cr.save()?;
        rounded_rect(cr, rect, 10.0);
        cr.clip();
        match deck.thumbnail(i) {
            Some(pixbuf) => {
                let scale = (rect.width / pixbuf.width() as f64)
                    .max(rect.height / pixbuf.height() as f64);
                cr.translate(rect.x, rect.y);
                cr.scale(scale, scale);
                cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
                cr.paint_with_alpha(alpha)?;
            }
            None => {
                set_color(cr, item.accent.to_srgba(0.6 * alpha));
                cr.paint()?;
            }
        }
        cr.restore()?;

        if i == active {
            set_color(cr, item.accent.to_srgba(1.0));
            cr.set_line_width(2.0);
            rounded_rect(cr, rect, 10.0);
            cr.stroke()?;
        } else {
            set_color(cr, colors.track);
            cr.set_line_width(1.0);
            rounded_rect(cr, rect, 10.0);
            cr.stroke()?;
        }
    }
    Ok(())
}

pub fn draw(cr: &Context, deck: &Deck, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let l = &deck.layout;
    if l.card.width <= 0.0 || l.card.height <= 0.0 {
        return Ok(());
    }

    let dx = deck.drag.offset();
    let index = deck.carousel.active_index();
    let item = deck.carousel.active_item();

    draw_header(cr, deck, colors)?;
    draw_progress(cr, deck, colors)?;
    draw_neighbors(cr, deck, colors, dx)?;

    CardRenderer {
        item,
        thumbnail: deck.thumbnail(index),
        badges: deck.badges(item),
        rect: l.card.shifted(dx),
        media: l.media.shifted(dx),
    }
    .draw(cr, colors)?;

    draw_actions(cr, deck, colors, dx)?;
    draw_dots(cr, deck, colors)?;
    draw_filmstrip(cr, deck, colors)
}
