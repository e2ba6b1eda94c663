use std::collections::HashMap;

use iced::widget::{button, column, container, image as picture, text, Column, Row};
use iced::{Alignment, ContentFit, Element, Length, Theme};

use crate::catalog::{StylePreset, HEADSHOT_STYLES};
use crate::Message;

const THUMBNAIL_HEIGHT: f32 = 80.0;

/// Two-column grid of style preset cards
///
/// Thumbnails arrive asynchronously after startup; a card whose thumbnail
/// has not loaded (or failed to) renders name-only.
pub fn view<'a>(
    selected_id: &str,
    thumbnails: &'a HashMap<&'static str, picture::Handle>,
) -> Element<'a, Message> {
    let mut grid = Column::new().spacing(10);

    for pair in HEADSHOT_STYLES.chunks(2) {
        let mut cards = Row::new().spacing(10);
        for style in pair {
            cards = cards.push(style_card(
                style,
                style.id == selected_id,
                thumbnails.get(style.id),
            ));
        }
        grid = grid.push(cards);
    }

    grid.into()
}

fn style_card<'a>(
    style: &'static StylePreset,
    selected: bool,
    thumbnail: Option<&'a picture::Handle>,
) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match thumbnail {
        Some(handle) => picture(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(THUMBNAIL_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(style.name).size(12))
            .width(Length::Fill)
            .height(Length::Fixed(THUMBNAIL_HEIGHT))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let card = column![preview, text(style.name).size(12)]
        .spacing(6)
        .align_x(Alignment::Center);

    let card_style: fn(&Theme, button::Status) -> button::Style = if selected {
        button::primary
    } else {
        button::secondary
    };

    button(card)
        .style(card_style)
        .width(Length::FillPortion(1))
        .padding(8)
        .on_press(Message::StyleSelected(style.id))
        .into()
}
