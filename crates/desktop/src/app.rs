use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;
use iced::widget::{
    button, checkbox, column, container, pick_list, row, scrollable, text, text_input, Space,
};
use iced::{Element, Length, Subscription, Task, Theme};

use transcriba_core::export::transcript_file;
use transcriba_core::pipeline::pipeline_stage::PipelineStage;
use transcriba_core::pipeline::transcribe_upload_use_case::validate_upload;
use transcriba_core::shared::constants::AUDIO_EXTENSIONS;
use transcriba_core::transcription::domain::api_key::ApiKey;
use transcriba_core::transcription::domain::audio_upload::AudioUpload;
use transcriba_core::transcription::domain::language::Language;
use transcriba_core::transcription::domain::transcript::Transcript;

use crate::settings::Settings;
use crate::workers::transcription_worker::{self, TranscriptionParams, WorkerMessage};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum ProcessingState {
    Idle,
    Running(PipelineStage),
    Complete(Transcript),
    Error(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    ApiKeyChanged(String),
    LanguageChanged(Language),
    TranslateChanged(bool),
    SelectInput,
    InputSelected(Option<PathBuf>),
    Process,
    PollWorker,
    Download,
    DownloadTargetSelected(Option<PathBuf>),
}

pub struct App {
    settings: Settings,
    /// Held in memory only for this session.
    api_key: String,
    upload: Option<AudioUpload>,
    upload_error: Option<String>,
    processing: ProcessingState,
    worker: Option<Receiver<WorkerMessage>>,
    notice: Option<String>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        (Self::with_settings(Settings::load()), Task::none())
    }

    fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            api_key: String::new(),
            upload: None,
            upload_error: None,
            processing: ProcessingState::Idle,
            worker: None,
            notice: None,
        }
    }

    fn is_busy(&self) -> bool {
        self.worker.is_some()
    }

    fn can_process(&self) -> bool {
        self.upload.is_some() && self.upload_error.is_none() && !self.is_busy()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ApiKeyChanged(value) => {
                self.api_key = value;
            }
            Message::LanguageChanged(language) => {
                self.settings.language = language;
                self.settings.save();
            }
            Message::TranslateChanged(translate) => {
                self.settings.translate = translate;
                self.settings.save();
            }
            Message::SelectInput => {
                return Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .set_title("Upload do arquivo de áudio")
                            .add_filter("Áudio", AUDIO_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|h| h.path().to_path_buf())
                    },
                    Message::InputSelected,
                );
            }
            Message::InputSelected(Some(path)) => self.select_input(path),
            Message::InputSelected(None) => {}
            Message::Process => self.start_processing(),
            Message::PollWorker => self.poll_worker(),
            Message::Download => {
                if let ProcessingState::Complete(_) = self.processing {
                    return Task::perform(
                        async {
                            rfd::AsyncFileDialog::new()
                                .set_title("Baixar transcrição")
                                .set_file_name(Transcript::FILE_NAME)
                                .add_filter(download_filter_name(), &["txt"])
                                .save_file()
                                .await
                                .map(|h| h.path().to_path_buf())
                        },
                        Message::DownloadTargetSelected,
                    );
                }
            }
            Message::DownloadTargetSelected(Some(path)) => {
                if let ProcessingState::Complete(ref transcript) = self.processing {
                    self.notice = Some(match transcript_file::save_as(transcript, &path) {
                        Ok(()) => format!("Transcrição salva em {}", path.display()),
                        Err(e) => format!("Falha ao salvar a transcrição: {e}"),
                    });
                }
            }
            Message::DownloadTargetSelected(None) => {}
        }
        Task::none()
    }

    fn select_input(&mut self, path: PathBuf) {
        self.processing = ProcessingState::Idle;
        self.notice = None;
        match AudioUpload::from_path(&path) {
            Ok(upload) => {
                log::info!(
                    "Selected {} ({:.1}MB)",
                    upload.filename(),
                    upload.size_mib()
                );
                self.upload_error = validate_upload(&upload).err().map(|e| e.to_string());
                self.upload = Some(upload);
            }
            Err(e) => {
                log::warn!("Failed to read {}: {e}", path.display());
                self.upload = None;
                self.upload_error = Some(format!("Não foi possível ler o arquivo: {e}"));
            }
        }
    }

    fn start_processing(&mut self) {
        if !self.can_process() {
            return;
        }
        let Some(upload) = self.upload.clone() else {
            return;
        };
        let params = TranscriptionParams {
            upload,
            options: self.settings.options(),
            api_key: ApiKey::new(self.api_key.as_str()),
            provider: self.settings.provider_config(),
        };
        self.notice = None;
        self.processing = ProcessingState::Running(PipelineStage::Idle);
        self.worker = Some(transcription_worker::spawn(params));
    }

    fn poll_worker(&mut self) {
        let messages: Vec<WorkerMessage> = match self.worker {
            Some(ref rx) => rx.try_iter().collect(),
            None => return,
        };
        for message in messages {
            match message {
                WorkerMessage::Stage(stage) => {
                    if !stage.is_terminal() {
                        self.processing = ProcessingState::Running(stage);
                    }
                }
                WorkerMessage::Complete(transcript) => {
                    self.processing = ProcessingState::Complete(transcript);
                    self.worker = None;
                }
                WorkerMessage::Error(e) => {
                    self.processing = ProcessingState::Error(e);
                    self.worker = None;
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // View
    // -----------------------------------------------------------------------

    pub fn view(&self) -> Element<'_, Message> {
        let sidebar = column![
            text("Configurações").size(18),
            Space::new().height(8),
            text("OpenAI API Key:").size(13),
            text_input("sk-...", &self.api_key)
                .on_input(Message::ApiKeyChanged)
                .secure(true)
                .padding(8),
            Space::new().height(8),
            text("Idioma do áudio:").size(13),
            pick_list(Language::ALL, Some(self.settings.language), |l| {
                Message::LanguageChanged(l)
            })
            .text_size(13),
            Space::new().height(8),
            checkbox(self.settings.translate)
                .label("Traduzir para inglês")
                .on_toggle(Message::TranslateChanged)
                .text_size(13),
        ]
        .spacing(4)
        .width(Length::Fixed(240.0));

        let main = column![
            text("Transcrição de Áudio - OpenAI Whisper").size(22),
            Space::new().height(12),
            row![
                button(text("Upload do arquivo de áudio").size(14))
                    .on_press_maybe((!self.is_busy()).then_some(Message::SelectInput))
                    .padding([8, 16]),
                self.file_info(),
            ]
            .spacing(12)
            .align_y(iced::Alignment::Center),
            text("MP3, MP4, WAV, M4A, WEBM, OGG, FLAC (até 25MB)").size(12),
            Space::new().height(12),
            button(text("Processar").size(14))
                .on_press_maybe(self.can_process().then_some(Message::Process))
                .style(button::primary)
                .padding([8, 24]),
            Space::new().height(12),
            self.result_view(),
        ]
        .spacing(4)
        .width(Length::Fill);

        container(row![sidebar, main].spacing(24))
            .padding(20)
            .height(Length::Fill)
            .into()
    }

    fn file_info(&self) -> Element<'_, Message> {
        match (&self.upload, &self.upload_error) {
            (_, Some(error)) => text(format!("\u{26A0}\u{FE0F} {error}"))
                .size(13)
                .style(text::danger)
                .into(),
            (Some(upload), None) => text(format!(
                "{} (Tamanho do arquivo: {:.1}MB)",
                upload.filename(),
                upload.size_mib()
            ))
            .size(13)
            .into(),
            (None, None) => text("Nenhum arquivo selecionado").size(13).into(),
        }
    }

    fn result_view(&self) -> Element<'_, Message> {
        match &self.processing {
            ProcessingState::Idle => Space::new().height(0).into(),
            ProcessingState::Running(stage) => {
                text(format!("Processando áudio... ({})", stage_label(*stage)))
                    .size(14)
                    .into()
            }
            ProcessingState::Error(e) => text(format!("\u{274C} Erro ao processar: {e}"))
                .size(14)
                .style(text::danger)
                .into(),
            ProcessingState::Complete(transcript) => {
                let mut content = column![
                    text("\u{2705} Processamento concluído")
                        .size(14)
                        .style(text::success),
                    text("Transcrição:").size(13),
                    container(scrollable(text(transcript.text()).size(14)))
                        .padding(8)
                        .width(Length::Fill)
                        .height(Length::Fixed(300.0))
                        .style(container::bordered_box),
                    button(text("\u{1F4E5} Baixar transcrição (.txt)").size(14))
                        .on_press(Message::Download)
                        .padding([8, 16]),
                ]
                .spacing(8);
                if let Some(ref notice) = self.notice {
                    content = content.push(text(notice).size(12));
                }
                content.into()
            }
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.is_busy() {
            iced::time::every(POLL_INTERVAL).map(|_| Message::PollWorker)
        } else {
            Subscription::none()
        }
    }
}

fn download_filter_name() -> String {
    format!("Texto ({})", Transcript::MIME_TYPE)
}

fn stage_label(stage: PipelineStage) -> &'static str {
    match stage {
        PipelineStage::Idle | PipelineStage::Validating => "validando",
        PipelineStage::Staged => "preparando arquivo",
        PipelineStage::AwaitingProvider => "aguardando o provedor",
        PipelineStage::Completed => "concluído",
        PipelineStage::Failed => "falhou",
    }
}
