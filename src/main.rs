use std::collections::HashMap;

use iced::widget::{button, column, container, image as picture, row, scrollable, text, text_input, Column};
use iced::{Alignment, Element, Length, Size, Task, Theme};
use rfd::FileDialog;
use tracing::{debug, info, warn};

mod catalog;
mod config;
mod gemini;
mod intake;
mod logging;
mod prompt;
mod state;
mod ui;

use config::Config;
use gemini::GenerationClient;
use intake::IntakeError;
use state::data::{GeneratedImage, UploadedImage};
use state::session::{RequestState, Session, ValidationError};

/// Main application state
struct HeadshotStudio {
    /// Upload, style selection, and the generation lifecycle
    session: Session,
    /// Gemini generation client, built once at startup
    client: GenerationClient,
    /// Style thumbnails fetched at startup, keyed by preset id
    thumbnails: HashMap<&'static str, picture::Handle>,
    /// Intake failure shown as an alert next to the upload button
    intake_error: Option<String>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the upload button
    PickImage,
    /// Background file read completed
    ImageLoaded(Result<UploadedImage, IntakeError>),
    /// User clicked a style card
    StyleSelected(&'static str),
    /// User edited the free-text instructions
    EditsChanged(String),
    /// User clicked the generate button
    Generate,
    /// Background generation completed; the token identifies which request
    GenerationFinished {
        token: u64,
        result: Result<Vec<u8>, String>,
    },
    /// Startup thumbnail fetch completed
    ThumbnailFetched {
        style_id: &'static str,
        result: Result<Vec<u8>, String>,
    },
}

impl HeadshotStudio {
    /// Create a new instance of the application
    fn new(config: Config) -> (Self, Task<Message>) {
        let client = GenerationClient::new(&config);

        // Kick off the thumbnail fetches for the style grid
        let fetches = catalog::HEADSHOT_STYLES.iter().map(|style| {
            Task::perform(fetch_thumbnail(style.thumbnail_url), move |result| {
                Message::ThumbnailFetched {
                    style_id: style.id,
                    result,
                }
            })
        });

        (
            HeadshotStudio {
                session: Session::new(),
                client,
                thumbnails: HashMap::new(),
                intake_error: None,
                status: "Upload a selfie to get started.".to_string(),
            },
            Task::batch(fetches),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                // The filter only suggests types; the service rejects the rest
                let file = FileDialog::new()
                    .set_title("Select a Selfie")
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp"])
                    .pick_file();

                if let Some(path) = file {
                    self.status = format!("Loading {}...", path.display());
                    return Task::perform(intake::load_selfie(path), Message::ImageLoaded);
                }

                Task::none()
            }
            Message::ImageLoaded(Ok(image)) => {
                self.intake_error = None;
                self.session.record_upload(image);
                self.status = "Selfie loaded. Pick a style and generate.".to_string();
                Task::none()
            }
            Message::ImageLoaded(Err(err)) => {
                warn!("selfie intake failed: {err}");
                // A previously loaded selfie stays usable
                self.intake_error = Some(err.to_string());
                self.status = "Could not load that image. Try another file.".to_string();
                Task::none()
            }
            Message::StyleSelected(id) => {
                self.session.selected_style = id.to_string();
                Task::none()
            }
            Message::EditsChanged(value) => {
                self.session.custom_prompt = value;
                Task::none()
            }
            Message::Generate => self.start_generation(),
            Message::GenerationFinished { token, result } => {
                let outcome = result.map(GeneratedImage::from_png_bytes);
                if self.session.finish_generation(token, outcome) {
                    self.status = match self.session.state() {
                        RequestState::Succeeded => "Headshot ready.".to_string(),
                        _ => "Generation failed. Adjust and try again.".to_string(),
                    };
                } else {
                    debug!("discarding stale generation response (token {token})");
                }
                Task::none()
            }
            Message::ThumbnailFetched { style_id, result } => {
                match result {
                    Ok(bytes) => {
                        self.thumbnails
                            .insert(style_id, picture::Handle::from_bytes(bytes));
                    }
                    Err(err) => warn!("thumbnail fetch failed for {style_id}: {err}"),
                }
                Task::none()
            }
        }
    }

    /// Validate the request and launch the generation task
    fn start_generation(&mut self) -> Task<Message> {
        let preset = match catalog::find_style(&self.session.selected_style) {
            Some(preset) => preset,
            None => {
                let id = self.session.selected_style.clone();
                self.session.reject(ValidationError::UnknownStyle(id));
                return Task::none();
            }
        };

        let (encoded, media_type) = match self.session.uploaded() {
            Some(upload) => (upload.encoded_data.clone(), upload.media_type.clone()),
            None => {
                self.session.reject(ValidationError::MissingUpload);
                return Task::none();
            }
        };
        let instruction =
            prompt::build_instruction(&prompt::compose(preset, &self.session.custom_prompt));

        let token = match self.session.begin_generation() {
            Ok(token) => token,
            Err(err) => {
                self.session.reject(err);
                return Task::none();
            }
        };
        self.status = "Generating your headshot...".to_string();
        info!("generation request {token} started (style: {})", preset.id);

        let client = self.client.clone();
        Task::perform(
            async move {
                client
                    .generate(&encoded, &media_type, &instruction)
                    .await
                    .map_err(|err| err.to_string())
            },
            move |result| Message::GenerationFinished { token, result },
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header = column![
            text("AI Headshot Photographer").size(36),
            text("Transform your selfie into a professional headshot in seconds.").size(15),
        ]
        .spacing(6)
        .align_x(Alignment::Center)
        .width(Length::Fill);

        let display = ui::display::view(
            self.session.uploaded(),
            self.session.generated(),
            self.session.is_generating(),
        );

        let body = row![
            container(scrollable(self.controls_panel())).width(Length::FillPortion(1)),
            container(display)
                .width(Length::FillPortion(2))
                .height(Length::Fill),
        ]
        .spacing(20)
        .height(Length::Fill);

        let content = column![header, body, text(&self.status).size(13)]
            .spacing(16)
            .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// The controls column: upload, style grid, edits, generate
    fn controls_panel(&self) -> Element<Message> {
        let mut panel = Column::new()
            .spacing(16)
            .push(text("1. Upload Your Selfie").size(17))
            .push(ui::uploader::view(self.session.uploaded()));

        if let Some(alert) = &self.intake_error {
            panel = panel.push(text(alert.as_str()).size(13).style(text::danger));
        }

        if self.session.uploaded().is_some() {
            panel = panel
                .push(text("2. Choose a Style").size(17))
                .push(ui::style_grid::view(
                    &self.session.selected_style,
                    &self.thumbnails,
                ))
                .push(text("3. Add Edits (Optional)").size(17))
                .push(
                    text_input(
                        "e.g. 'Add a retro filter', 'Remove the person in the background'",
                        &self.session.custom_prompt,
                    )
                    .on_input(Message::EditsChanged)
                    .padding(10),
                )
                .push(self.generate_button());
        }

        if let Some(message) = self.session.error_message() {
            panel = panel.push(
                text(format!("Error: {message}"))
                    .size(13)
                    .style(text::danger),
            );
        }

        panel.into()
    }

    fn generate_button(&self) -> Element<Message> {
        let label = if self.session.is_generating() {
            "Generating..."
        } else {
            "Generate Headshot"
        };

        let mut generate = button(text(label))
            .style(button::primary)
            .width(Length::Fill)
            .padding(12);

        // Re-triggering is disabled while a request is in flight
        if !self.session.is_generating() {
            generate = generate.on_press(Message::Generate);
        }

        generate.into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    // If this fails, we panic because the app cannot call the generation
    // service without a key
    let config = Config::from_env()
        .expect("Missing configuration. Set GEMINI_API_KEY or add it to a .env file.");

    logging::init(&config.log_level);
    info!(
        "starting headshot studio (model: {})",
        config.gemini_image_model
    );

    iced::application(
        "Headshot Studio",
        HeadshotStudio::update,
        HeadshotStudio::view,
    )
    .theme(HeadshotStudio::theme)
    .window_size(Size::new(1200.0, 780.0))
    .centered()
    .run_with(move || HeadshotStudio::new(config.clone()))
}

/// Fetch one style thumbnail over HTTP
/// Runs in the background so the window opens immediately
async fn fetch_thumbnail(url: &'static str) -> Result<Vec<u8>, String> {
    let response = reqwest::get(url).await.map_err(|err| err.to_string())?;
    let response = response.error_for_status().map_err(|err| err.to_string())?;
    let bytes = response.bytes().await.map_err(|err| err.to_string())?;
    Ok(bytes.to_vec())
}
