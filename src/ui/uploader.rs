use iced::widget::{button, column, container, image as picture, text};
use iced::{Alignment, ContentFit, Element, Length};

use crate::state::data::UploadedImage;
use crate::Message;

/// Upload button plus a preview of the current selfie
pub fn view(uploaded: Option<&UploadedImage>) -> Element<'_, Message> {
    let label = if uploaded.is_some() {
        "Change Selfie"
    } else {
        "Upload Selfie"
    };

    let mut content = column![button(text(label))
        .on_press(Message::PickImage)
        .width(Length::Fill)
        .padding(12)]
    .spacing(10);

    if let Some(image) = uploaded {
        let preview = column![
            text("Your Selfie").size(12),
            picture(image.handle())
                .width(Length::Fill)
                .content_fit(ContentFit::Contain),
        ]
        .spacing(6)
        .align_x(Alignment::Center);

        content = content.push(
            container(preview)
                .style(container::rounded_box)
                .padding(8)
                .width(Length::Fill),
        );
    }

    content.into()
}
