use iced::widget::{column, container, image as picture, row, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::data::{GeneratedImage, UploadedImage};
use crate::Message;

/// The result area: placeholders before and during generation, then the
/// original and generated headshot side by side
///
/// The three pane states are mutually exclusive; no business logic lives
/// here beyond conditional display.
pub fn view<'a>(
    uploaded: Option<&'a UploadedImage>,
    generated: Option<&'a GeneratedImage>,
    generating: bool,
) -> Element<'a, Message> {
    let Some(uploaded) = uploaded else {
        return placeholder(
            "Upload a selfie to get started",
            "Your generated headshot will appear here.",
        );
    };

    if generating {
        return placeholder(
            "Generating your headshot...",
            "This usually takes a few seconds.",
        );
    }

    match generated {
        Some(generated) => row![
            image_card("Original", uploaded.handle()),
            image_card("Generated Headshot", generated.handle()),
        ]
        .spacing(16)
        .height(Length::Fill)
        .into(),
        None => placeholder(
            "Ready to generate?",
            "Click \"Generate Headshot\" to see the magic happen.",
        ),
    }
}

fn image_card<'a>(title: &'a str, handle: picture::Handle) -> Element<'a, Message> {
    let content = column![
        text(title).size(16),
        container(
            picture(handle)
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
        )
        .height(Length::Fill)
        .padding(10),
    ]
    .spacing(8)
    .align_x(Alignment::Center);

    container(content)
        .style(container::rounded_box)
        .width(Length::FillPortion(1))
        .height(Length::Fill)
        .padding(10)
        .into()
}

fn placeholder<'a>(title: &'a str, subtitle: &'a str) -> Element<'a, Message> {
    let content = column![text(title).size(22), text(subtitle).size(14)]
        .spacing(8)
        .align_x(Alignment::Center);

    container(content)
        .style(container::rounded_box)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
